//! OpenAI Chat Completions gateway.
//!
//! One `POST {base_url}/chat/completions` per call, no retry. Error bodies are
//! relayed to the caller unchanged.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{CompletionError, CompletionGateway, CompletionSettings};
use crate::conversation::ConversationMessage;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`CompletionGateway`] backed by the OpenAI HTTP API.
#[derive(Debug, Clone)]
pub struct OpenAiCompletion {
    client: Client,
    settings: CompletionSettings,
}

impl OpenAiCompletion {
    pub fn new(settings: CompletionSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: CompletionSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionGateway for OpenAiCompletion {
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<String, CompletionError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredential)?;

        debug!(
            model = %self.settings.model,
            messages = messages.len(),
            "requesting completion"
        );

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model: &self.settings.model,
                messages,
                temperature: self.settings.temperature,
            })
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body: serde_json::Value = resp.json().await.map_err(|e| {
                CompletionError::Transport(format!("Unreadable error response ({status}): {e}"))
            })?;
            error!(status = status.as_u16(), body = %body, "completion service error");
            let error = body.get("error").cloned().unwrap_or(serde_json::Value::Null);
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                error,
            });
        }

        let data: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Transport(format!("Invalid completion response: {e}")))?;

        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Transport("Completion response has no content".into()))
    }
}
