// src/state.rs
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::services::gateway::AdviceGateway;
use crate::services::gemini::GeminiClient;
use crate::services::provider::ConversationProvider;
use crate::services::session_store::{InMemorySessionStore, SessionStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub gateway: AdviceGateway,
}

impl AppState {
    pub fn new(gateway: AdviceGateway) -> Self {
        Self { gateway }
    }

    /// Wire the gateway from configuration. A missing or unusable Gemini key
    /// leaves the gateway in fallback mode rather than failing startup.
    pub fn from_config(config: &Config) -> Self {
        let provider: Option<Arc<dyn ConversationProvider>> = match config.gemini() {
            Some(gemini) => {
                info!(key_len = gemini.api_key.len(), model = %gemini.model, "GEMINI_API_KEY found");
                match GeminiClient::new(gemini) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn ConversationProvider>),
                    Err(e) => {
                        warn!(error = %e, "could not initialise Gemini client, using fallback responses");
                        None
                    }
                }
            }
            None => {
                warn!("GEMINI_API_KEY not set, using fallback responses");
                None
            }
        };

        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Self::new(AdviceGateway::new(provider, sessions))
    }

    /// Gateway with no provider and a fresh in-memory store.
    pub fn offline() -> Self {
        Self::new(AdviceGateway::new(None, Arc::new(InMemorySessionStore::new())))
    }
}
