use strum_macros::Display;

use super::Message;

#[derive(Debug, Default, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AssistantName {
    #[default]
    Gemini,
}

#[derive(Debug, Default, Clone)]
pub struct AssistantPrompt {
    pub generation: u64,
    pub text: String,
}

impl AssistantPrompt {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantResponse {
    pub generation: u64,
    pub message: Message,
}
