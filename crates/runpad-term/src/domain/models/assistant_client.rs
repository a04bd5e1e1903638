use async_trait::async_trait;

use crate::domain::models::AssistantError;
use crate::domain::models::AssistantName;

#[async_trait]
pub trait AssistantClient: Send + Sync {
    fn name(&self) -> AssistantName;
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError>;
}

pub type AssistantClientBox = Box<dyn AssistantClient>;
