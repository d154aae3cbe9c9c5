//! Chat-completion summarization client.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use giggle_core::{defaults, Error, Result};

/// Environment variable holding the summarization endpoint base URL.
pub const ENV_SUMMARY_URL: &str = "GIGGLE_SUMMARY_URL";

/// Environment variable holding the summarization API key.
pub const ENV_SUMMARY_API_KEY: &str = "GIGGLE_SUMMARY_API_KEY";

/// Environment variable overriding the summarization model slug.
pub const ENV_SUMMARY_MODEL: &str = "GIGGLE_SUMMARY_MODEL";

/// Environment variable overriding the request timeout in seconds.
pub const ENV_SUMMARY_TIMEOUT: &str = "GIGGLE_SUMMARY_TIMEOUT";

/// Environment variable for the HTTP-Referer attribution header.
pub const ENV_SUMMARY_REFERER: &str = "GIGGLE_SUMMARY_REFERER";

/// Environment variable for the X-Title attribution header.
pub const ENV_SUMMARY_TITLE: &str = "GIGGLE_SUMMARY_TITLE";

/// Produces a summary of captured text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Configuration for the chat-completion summarization client.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Base URL of the chat-completion API.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Model slug to request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// HTTP-Referer header for endpoint attribution (optional).
    pub http_referer: Option<String>,
    /// X-Title header naming the app at the endpoint (optional).
    pub x_title: Option<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::SUMMARY_BASE_URL.to_string(),
            api_key: None,
            model: defaults::SUMMARY_MODEL.to_string(),
            timeout_seconds: defaults::SUMMARY_TIMEOUT_SECS,
            http_referer: None,
            x_title: None,
        }
    }
}

impl SummaryConfig {
    /// Read configuration from the environment, with defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENV_SUMMARY_URL)
                .unwrap_or_else(|_| defaults::SUMMARY_BASE_URL.to_string()),
            api_key: std::env::var(ENV_SUMMARY_API_KEY).ok(),
            model: std::env::var(ENV_SUMMARY_MODEL)
                .unwrap_or_else(|_| defaults::SUMMARY_MODEL.to_string()),
            timeout_seconds: std::env::var(ENV_SUMMARY_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::SUMMARY_TIMEOUT_SECS),
            http_referer: std::env::var(ENV_SUMMARY_REFERER).ok(),
            x_title: std::env::var(ENV_SUMMARY_TITLE).ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Summarizer backed by a hosted chat-completion endpoint.
pub struct ChatSummarizer {
    client: Client,
    config: SummaryConfig,
}

impl ChatSummarizer {
    /// Create a new client with the given configuration.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initializing summarization client"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(SummaryConfig::from_env())
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    fn prompt(text: &str) -> String {
        format!(
            "Please provide a nice detailed summary and include all the \
             important points of the following text:\n\n{}",
            text
        )
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        debug!(model = %self.config.model, text_len = text.len(), "Summarizing selection");

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::prompt(text),
            }],
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let mut req = self.client.post(&url).header("Content-Type", "application/json");

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }
        if let Some(ref referer) = self.config.http_referer {
            req = req.header("HTTP-Referer", referer);
        }
        if let Some(ref title) = self.config.x_title {
            req = req.header("X-Title", title);
        }

        let response = req
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Summarize(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => "Unknown error".to_string(),
            };
            return Err(Error::Summarize(format!(
                "Endpoint returned {}: {}",
                status, message
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Summarize(format!("Failed to parse response: {}", e)))?;

        // The first choice's message content is the summary, verbatim.
        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Summarize("Endpoint returned no choices".to_string()))
    }
}

enum MockBehavior {
    Reply(String),
    Fail(String),
}

/// Scripted summarizer for tests.
pub struct MockSummarizer {
    behavior: MockBehavior,
    calls: Mutex<usize>,
}

impl MockSummarizer {
    /// Always reply with the given summary.
    pub fn replying(summary: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(summary.into()),
            calls: Mutex::new(0),
        }
    }

    /// Always fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fail(message.into()),
            calls: Mutex::new(0),
        }
    }

    /// Number of summarize calls received.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        match &self.behavior {
            MockBehavior::Reply(summary) => Ok(summary.clone()),
            MockBehavior::Fail(message) => Err(Error::Summarize(message.clone())),
        }
    }
}
