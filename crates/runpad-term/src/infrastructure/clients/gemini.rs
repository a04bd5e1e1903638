//! Google Gemini API client.
//!
//! Sends a single user turn to the `generateContent` endpoint and returns the text of
//! the first candidate.

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::{Config, ConfigKey};
use crate::domain::models::AssistantClient;
use crate::domain::models::AssistantError;
use crate::domain::models::AssistantName;

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetails {
    code: u16,
    message: String,
}

pub struct Gemini {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Default for Gemini {
    fn default() -> Gemini {
        Gemini::with_base_url(
            Config::get(ConfigKey::GeminiApiKey),
            Config::get(ConfigKey::GeminiModel),
            Config::get(ConfigKey::GeminiUrl),
        )
    }
}

impl Gemini {
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Gemini {
        Gemini {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn reply_text(response: GeminiResponse) -> Result<String, AssistantError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(AssistantError::EmptyReply)?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<String>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            tracing::warn!(finish_reason = ?candidate.finish_reason, "Gemini candidate had no text");
            return Err(AssistantError::EmptyReply);
        }

        Ok(text)
    }
}

#[async_trait]
impl AssistantClient for Gemini {
    fn name(&self) -> AssistantName {
        AssistantName::Gemini
    }

    async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        if self.api_key.is_empty() {
            return Err(AssistantError::MissingCredential);
        }

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), model = %self.model, "Gemini request failed");

            return Err(match serde_json::from_str::<GeminiError>(&body) {
                Ok(err) => AssistantError::Service {
                    status: err.error.code,
                    message: err.error.message,
                },
                Err(_) => AssistantError::Service {
                    status: status.as_u16(),
                    message: format!("Request failed with status code {}", status.as_u16()),
                },
            });
        }

        let body = response.json::<GeminiResponse>().await?;
        Gemini::reply_text(body)
    }
}
