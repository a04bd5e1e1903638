//! Terminal code editor that runs snippets on a remote execution service and asks a
//! generative assistant about them.
//!
//! The crate is split the same way top to bottom: `domain` holds the models and the
//! services that own session state, `infrastructure` the HTTP clients, `configuration`
//! the resolved settings and `application` the CLI and terminal loop.

pub mod application;
pub mod configuration;
pub mod domain;
pub mod infrastructure;
pub use application::cli::Outcome;
pub use application::ui::{destruct_terminal_for_panic, start_loop};
pub use configuration::{Config, ConfigKey};
pub use domain::models::{Action, Event, Languages};
pub use domain::services::AppStateProps;
pub use infrastructure::clients::ClientManager;
