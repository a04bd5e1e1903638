use crate::domain::models::AssistantClientBox;
use crate::domain::models::AssistantPrompt;
use crate::domain::models::AssistantResponse;
use crate::domain::models::Author;
use crate::domain::models::Message;

/// Sends a prompt to the generative-text service. A failed request produces an `Error: `
/// reply instead of leaving the previous reply on screen.
pub struct AssistantRequester {
    client: AssistantClientBox,
}

impl AssistantRequester {
    pub fn new(client: AssistantClientBox) -> AssistantRequester {
        return AssistantRequester { client };
    }

    pub async fn ask(&self, prompt: &AssistantPrompt) -> AssistantResponse {
        tracing::debug!(
            assistant = %self.client.name(),
            generation = prompt.generation,
            prompt_len = prompt.text.len(),
            "sending assistant prompt"
        );

        let message = match self.client.generate(&prompt.text).await {
            Ok(text) => Message::new(Author::Model, &text),
            Err(err) => {
                tracing::error!(
                    assistant = %self.client.name(),
                    generation = prompt.generation,
                    error = ?err,
                    "assistant request failed"
                );
                Message::error(Author::Model, &err)
            }
        };

        return AssistantResponse {
            generation: prompt.generation,
            message,
        };
    }
}
