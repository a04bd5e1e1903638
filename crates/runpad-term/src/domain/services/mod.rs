pub mod actions;
mod app_state;
mod assistant;
pub mod events;
mod execution;

pub use actions::ActionsService;
pub use app_state::*;
pub use assistant::AssistantRequester;
pub use events::EventsService;
pub use execution::ExecutionRequester;
