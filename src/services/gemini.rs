//! Google Gemini client over the public REST API.
//!
//! The REST endpoint is stateless, so a conversation is carried in the
//! [`ConversationHandle`] history and replayed on every turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::provider::{ConversationHandle, ConversationProvider, ProviderError, TurnRole};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.7, top_p: 0.95, top_k: 40, max_output_tokens: 4096 }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential);
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(&self, contents: Vec<Content<'_>>) -> Result<String, ProviderError> {
        let body = GenerateRequest { contents, generation_config: GenerationConfig::default() };
        let url = format!("{}/{}:generateContent", self.config.base_url, self.config.model);

        debug!(model = %self.config.model, turns = body.contents.len(), "sending request to Gemini");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Http(e.without_url()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ProviderError::Http(e.without_url()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "Gemini API returned an error");
            return Err(ProviderError::Status { status: status.as_u16(), body: text });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        let reply: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        info!(model = %self.config.model, chars = reply.len(), "received response from Gemini");
        Ok(reply)
    }
}

fn user_content(text: &str) -> Content<'_> {
    Content { role: "user", parts: vec![Part { text }] }
}

#[async_trait]
impl ConversationProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn start(&self) -> Result<ConversationHandle, ProviderError> {
        Ok(ConversationHandle::new())
    }

    async fn send(
        &self,
        handle: ConversationHandle,
        text: &str,
    ) -> Result<(String, ConversationHandle), ProviderError> {
        let mut contents: Vec<Content<'_>> = handle
            .history()
            .iter()
            .map(|turn| Content {
                role: match turn.role {
                    TurnRole::User => "user",
                    TurnRole::Model => "model",
                },
                parts: vec![Part { text: &turn.text }],
            })
            .collect();
        contents.push(user_content(text));

        let reply = self.generate_content(contents).await?;
        let next = handle.with_exchange(text, reply.clone());
        Ok((reply, next))
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.generate_content(vec![user_content(prompt)]).await
    }
}
