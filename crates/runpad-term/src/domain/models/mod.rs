//! Data types shared by the controller, the request workers and the clients.

mod action;
mod assistant;
mod assistant_client;
mod author;
mod errors;
mod event;
mod execution;
mod execution_client;
mod language;
mod message;

pub use action::*;
pub use assistant::*;
pub use assistant_client::*;
pub use author::*;
pub use errors::*;
pub use event::*;
pub use execution::*;
pub use execution_client::*;
pub use language::*;
pub use message::*;
