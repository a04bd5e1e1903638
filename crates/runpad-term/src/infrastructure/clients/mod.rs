pub mod gemini;
pub mod piston;

use crate::domain::models::AssistantClientBox;
use crate::domain::models::AssistantName;
use crate::domain::models::ExecutionClientBox;
use crate::domain::models::ExecutorName;

pub struct ClientManager {}

impl ClientManager {
    pub fn get_executor(name: ExecutorName) -> ExecutionClientBox {
        match name {
            ExecutorName::Piston => Box::<piston::Piston>::default(),
        }
    }

    pub fn get_assistant(name: AssistantName) -> AssistantClientBox {
        match name {
            AssistantName::Gemini => Box::<gemini::Gemini>::default(),
        }
    }
}
