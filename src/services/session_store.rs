// src/services/session_store.rs
use std::{collections::HashMap, fmt::Debug, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::provider::ConversationHandle;

/// Where conversation handles live between requests, keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<ConversationHandle>;

    async fn set(&self, session_id: &str, handle: ConversationHandle);

    /// Returns true if a handle was stored under this id.
    async fn delete(&self, session_id: &str) -> bool;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-memory store. Entries live until the process exits.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    inner: Arc<RwLock<HashMap<String, ConversationHandle>>>,
}

impl Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore").finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// List session ids
    pub async fn session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<ConversationHandle> {
        let guard = self.inner.read().await;
        guard.get(session_id).cloned()
    }

    async fn set(&self, session_id: &str, handle: ConversationHandle) {
        let mut guard = self.inner.write().await;
        guard.insert(session_id.to_string(), handle);
    }

    async fn delete(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}
