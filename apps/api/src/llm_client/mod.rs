//! LLM client — the single point of entry for generative calls.
//!
//! No other module may talk to the completion provider directly; all rewrite
//! generation goes through here. The provider is OpenRouter's OpenAI-style
//! chat-completions API, so the model is caller-selectable: friendly keys
//! resolve through a fixed table, fully qualified `vendor/model` ids pass
//! through untouched.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const APP_TITLE: &str = "Resume Tailor AI";
const MAX_RETRIES: u32 = 3;

/// Friendly key used when the caller supplies no model or an unknown one.
pub const DEFAULT_MODEL_KEY: &str = "DEEPSEEK_R1_0528";

/// Friendly model keys exposed to the frontend, mapped to provider ids.
/// Extend here to offer more models.
const MODEL_TABLE: &[(&str, &str)] = &[
    ("DEEPSEEK_R1_0528", "deepseek/deepseek-r1-0528:free"),
    ("DEEPSEEK_V3_0324", "deepseek/deepseek-chat-v3-0324:free"),
    ("QWEN3_235B_A22B", "qwen/qwen3-235b-a22b:free"),
    ("Z.AI_GLM_4_5_AIR", "z-ai/glm-4.5-air:free"),
    ("DeepSeek R1T2", "tngtech/deepseek-r1t2-chimera:free"),
    ("MICROSOFT_MAI_DS_R1", "microsoft/mai-ds-r1:free"),
    (
        "MOONSHOTAI_KIMI_VL_A3B_THINKING",
        "moonshotai/kimi-vl-a3b-thinking:free",
    ),
];

/// Resolves a caller-supplied model selector to a provider model id.
///
/// Empty selector falls back to the default entry; a selector containing a
/// slash is treated as already fully qualified; anything else is looked up
/// in the friendly table, unknown keys also falling back to the default.
pub fn resolve_provider_model(selected: &str) -> String {
    let default = MODEL_TABLE
        .iter()
        .find(|(key, _)| *key == DEFAULT_MODEL_KEY)
        .map(|(_, id)| *id)
        .unwrap_or("deepseek/deepseek-r1-0528:free");

    if selected.is_empty() {
        return default.to_string();
    }
    if selected.contains('/') {
        return selected.to_string();
    }
    MODEL_TABLE
        .iter()
        .find(|(key, _)| *key == selected)
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single generative client shared by all handlers.
/// Wraps the chat-completions API with retry on 429/5xx.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Sends a system + user message pair and returns the completion text.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn complete(
        &self,
        prompt: &str,
        system: &str,
        model_id: &str,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .header("X-Title", APP_TITLE)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ProviderError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;
            let text = chat_response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|t| !t.trim().is_empty())
                .ok_or(LlmError::EmptyContent)?;

            debug!("LLM call succeeded (model {model_id})");
            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
