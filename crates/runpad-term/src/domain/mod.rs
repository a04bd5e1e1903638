//! Core domain logic for the terminal code runner.
//!
//! This module contains the language registry, the session state machine and the
//! request flows, independent of the terminal or the HTTP services behind them.

pub mod models;
pub mod services;
