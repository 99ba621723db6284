// src/services/gateway.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    fallback::{fallback_analysis, fallback_chat_reply},
    json_extract::{JsonExtraction, extract_json},
    provider::{ConversationHandle, ConversationProvider, ProviderError},
    session_store::SessionStore,
};

const PROBE_PROMPT: &str = "Hello, please respond with 'API is working' if you can see this message.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PsychometricResult {
    pub score: f64,
    pub strengths: Vec<String>,
    pub areas_for_development: Vec<String>,
    pub advice: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ChatResult {
    pub text: String,
    pub handle: Option<ConversationHandle>,
    pub session_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message is required")]
    MissingMessage,
    #[error("Valid responses are required")]
    MissingResponses,
}

/// Front door to the language model: prompts, session handles, fallbacks.
#[derive(Clone)]
pub struct AdviceGateway {
    provider: Option<Arc<dyn ConversationProvider>>,
    sessions: Arc<dyn SessionStore>,
}

impl AdviceGateway {
    /// `provider` is `None` when no credential is configured; every call then
    /// answers with fallback content.
    pub fn new(
        provider: Option<Arc<dyn ConversationProvider>>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self { provider, sessions }
    }

    pub async fn send_chat(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResult, ValidationError> {
        if message.trim().is_empty() {
            return Err(ValidationError::MissingMessage);
        }

        let session_id = match session_id {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => mint_session_id(),
        };

        let prompt = financial_prompt(message);
        let outcome = match &self.provider {
            Some(provider) => self.converse(provider.as_ref(), &session_id, &prompt).await,
            None => Err(ProviderError::MissingCredential),
        };

        let (text, handle) = match outcome {
            Ok((text, handle)) => (text, Some(handle)),
            Err(ProviderError::MissingCredential) => {
                debug!(%session_id, "no provider configured, using canned reply");
                (fallback_chat_reply(message).to_string(), None)
            }
            Err(e) => {
                warn!(%session_id, error = %e, "chat provider failed, using canned reply");
                (fallback_chat_reply(message).to_string(), None)
            }
        };

        // A fallback reply leaves no handle, so the next turn starts fresh.
        match &handle {
            Some(h) => self.sessions.set(&session_id, h.clone()).await,
            None => {
                self.sessions.delete(&session_id).await;
            }
        }

        Ok(ChatResult { text, handle, session_id })
    }

    async fn converse(
        &self,
        provider: &dyn ConversationProvider,
        session_id: &str,
        prompt: &str,
    ) -> Result<(String, ConversationHandle), ProviderError> {
        let handle = match self.sessions.get(session_id).await {
            Some(handle) => {
                debug!(session_id, "continuing conversation");
                handle
            }
            None => {
                debug!(session_id, "starting conversation");
                provider.start().await?
            }
        };
        provider.send(handle, prompt).await
    }

    pub async fn analyze(&self, responses: &[Value]) -> Result<PsychometricResult, ValidationError> {
        if responses.is_empty() {
            return Err(ValidationError::MissingResponses);
        }

        let Some(provider) = &self.provider else {
            debug!("no provider configured, using fallback analysis");
            return Ok(fallback_analysis());
        };

        let prompt = psychometric_prompt(responses);
        let raw = match provider.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "psychometric analysis failed, using fallback");
                return Ok(fallback_analysis());
            }
        };

        Ok(parse_analysis(&raw).unwrap_or_else(fallback_analysis))
    }

    pub async fn test_provider(&self) -> bool {
        let Some(provider) = &self.provider else {
            info!("cannot probe provider: no credential configured");
            return false;
        };

        match provider.generate(PROBE_PROMPT).await {
            Ok(text) => {
                debug!(provider = provider.name(), reply = %text, "probe reply");
                text.contains("API is working") || text.chars().count() > 10
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "provider probe failed");
                false
            }
        }
    }
}

fn mint_session_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

fn parse_analysis(raw: &str) -> Option<PsychometricResult> {
    let result = match extract_json::<PsychometricResult>(raw) {
        JsonExtraction::Failed { reason } => {
            warn!(%reason, "analysis reply did not contain the expected JSON");
            return None;
        }
        extraction => extraction.into_value()?,
    };

    if !(1.0..=10.0).contains(&result.score) {
        warn!(score = result.score, "analysis score out of range");
        return None;
    }
    Some(result)
}

pub fn financial_prompt(message: &str) -> String {
    format!(
        "User Question: {message}

Context: You are a helpful financial planning assistant for microfinance customers and individuals from underserved communities in India. Provide personalized, simple, and practical financial advice tailored to the Indian context.

Consider these Indian-specific factors:
- Refer to currency in INR or Rupees (₹), never use $ signs
- Mention relevant Indian financial schemes like Jan Dhan Yojana, PM Jeevan Jyoti Bima Yojana, Atal Pension Yojana, etc. when appropriate
- Reference Indian financial institutions like SBI, post offices, small finance banks, and microfinance institutions
- Consider the reality of the informal economy and daily wage workers
- Acknowledge cultural aspects like family financial interdependence and gold as a store of value
- Mention digital payment options popular in India like UPI, BHIM, Google Pay, PhonePe, etc.

Focus on basic financial concepts, budgeting, saving, and responsible borrowing. Avoid complex investment strategies and focus on actionable, accessible advice for people with limited resources. Be empathetic and considerate of financial constraints while remaining positive and empowering. Use simple language and avoid jargon. Be conversational and friendly in your tone."
    )
}

pub fn psychometric_prompt(responses: &[Value]) -> String {
    let data = serde_json::to_string_pretty(responses).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Please analyze these psychometric test responses to assess entrepreneurial potential.

Response Data:
{data}

Please provide:
1. An overall entrepreneurial potential score (1-10)
2. Top 3 strengths
3. Top 3 areas for development
4. Specific actionable advice
5. Suggested resources or next steps

Format the response as JSON with these exact keys: score, strengths, areasForDevelopment, advice, resources"
    )
}
