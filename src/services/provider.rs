// src/services/provider.rs
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

#[derive(Clone, Debug)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

/// Opaque conversation state minted by a provider.
///
/// The gateway only stores and hands these back; what the history means is up
/// to the provider that created it. Cloning is cheap and keeps the identity.
#[derive(Clone, Debug)]
pub struct ConversationHandle {
    id: Uuid,
    turns: Arc<Vec<Turn>>,
}

impl Default for ConversationHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHandle {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), turns: Arc::new(Vec::new()) }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[Turn] {
        &self.turns
    }

    /// Same conversation, one exchange further along.
    pub fn with_exchange(&self, user: impl Into<String>, model: impl Into<String>) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 2);
        turns.extend(self.turns.iter().cloned());
        turns.push(Turn { role: TurnRole::User, text: user.into() });
        turns.push(Turn { role: TurnRole::Model, text: model.into() });
        Self { id: self.id, turns: Arc::new(turns) }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider returned no text")]
    EmptyResponse,
}

#[async_trait]
pub trait ConversationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Open a fresh conversation.
    async fn start(&self) -> Result<ConversationHandle, ProviderError>;

    /// Send `text` within `handle`'s conversation and return the reply together
    /// with the handle to use for the next turn.
    async fn send(
        &self,
        handle: ConversationHandle,
        text: &str,
    ) -> Result<(String, ConversationHandle), ProviderError>;

    /// One-shot generation with no conversation attached.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
