//! Client for the external completion service.
//!
//! Issues chat-completion requests and retries on two failure classes:
//! transport errors and HTTP 429 back off exponentially; structurally invalid
//! payloads are retried with a stricter prompt. Both share one attempt
//! ceiling. After the ceiling the error is surfaced to the caller; no partial
//! results are returned. The service itself is non-deterministic, so only the
//! response shape is guaranteed here.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::error::{ComemoraError, ComemoraResult};
use crate::prompt;
use crate::relevance::{self, RankedDate};

const BACKOFF_BASE_MS: u64 = 500;

/// Delay before retry `attempt` (the first attempt is 1 and never waits).
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_BASE_MS * 2u64.pow(attempt.saturating_sub(2)))
}

pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

enum RequestFailure {
    RateLimited,
    Transport(String),
    Fatal(String),
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> ComemoraResult<Self> {
        if config.api_key.is_empty() {
            return Err(ComemoraError::Config(
                "No completion API key configured. Set llm.api_key in config.toml \
                 or the COMEMORA_LLM__API_KEY environment variable"
                    .to_string(),
            ));
        }
        Ok(LlmClient {
            http: reqwest::Client::new(),
            config,
        })
    }

    /// Ask the model to rank the serialized candidate blocks.
    ///
    /// Returns structurally validated records, or the terminal error once the
    /// attempt ceiling is exhausted.
    pub async fn rank_dates(
        &self,
        labels: &[String],
        blocks: &str,
    ) -> ComemoraResult<Vec<RankedDate>> {
        let mut user = prompt::user_ranking(labels, blocks);
        let mut last_reason = String::from("no attempt completed");

        for attempt in 1..=self.config.max_attempts {
            if attempt > 1 {
                let delay = backoff_delay(attempt);
                debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying ranking request");
                tokio::time::sleep(delay).await;
            }

            let start = std::time::Instant::now();
            let content = match self.complete(&user).await {
                Ok(content) => content,
                Err(RequestFailure::RateLimited) => {
                    warn!(attempt, "rate limited by completion service");
                    last_reason = "rate limited".to_string();
                    continue;
                }
                Err(RequestFailure::Transport(reason)) => {
                    warn!(attempt, %reason, "transport failure");
                    last_reason = reason;
                    continue;
                }
                Err(RequestFailure::Fatal(reason)) => {
                    return Err(ComemoraError::LlmRequest(reason));
                }
            };
            debug!(
                attempt,
                duration_ms = start.elapsed().as_millis() as u64,
                response_chars = content.len(),
                "completion received"
            );

            match relevance::parse_ranked(&content) {
                Ok(ranked) => {
                    info!(attempt, dates = ranked.len(), "ranking response accepted");
                    return Ok(ranked);
                }
                Err(reason) => {
                    warn!(attempt, %reason, "structurally invalid ranking response");
                    user = prompt::user_ranking_strict(labels, blocks, &reason);
                    last_reason = reason;
                }
            }
        }

        Err(ComemoraError::LlmResponse {
            attempts: self.config.max_attempts,
            reason: last_reason,
        })
    }

    /// One completion round-trip, classified for the retry loop.
    async fn complete(&self, user: &str) -> Result<String, RequestFailure> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RequestFailure::RateLimited);
        }
        if status.is_server_error() {
            return Err(RequestFailure::Transport(format!(
                "completion service returned HTTP {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(RequestFailure::Fatal(format!(
                "completion service rejected the request with HTTP {}",
                status
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RequestFailure::Transport("completion response had no choices".to_string()))
    }
}
