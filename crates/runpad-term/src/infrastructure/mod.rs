//! Infrastructure layer providing external integrations.
//!
//! This module contains the HTTP clients for the remote execution service and the
//! generative-text service.

pub mod clients;
