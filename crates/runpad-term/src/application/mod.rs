//! Application layer: command line handling, logging setup and the terminal UI loop.

pub mod cli;
pub mod logging;
pub mod ui;
