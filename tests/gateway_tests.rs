use advice_gateway::services::fallback::{AdviceTopic, canned_reply, fallback_analysis};
use advice_gateway::services::gateway::{AdviceGateway, ValidationError};
use advice_gateway::services::provider::{ConversationHandle, ConversationProvider, ProviderError};
use advice_gateway::services::session_store::{InMemorySessionStore, SessionStore};

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Replies with a fixed text and records what it was asked.
#[derive(Default)]
struct RecordingProvider {
    reply: String,
    started: Mutex<Vec<Uuid>>,
    sent_with: Mutex<Vec<Uuid>>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingProvider {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: reply.to_string(), ..Default::default() })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn start(&self) -> Result<ConversationHandle, ProviderError> {
        let handle = ConversationHandle::new();
        self.started.lock().unwrap().push(handle.id());
        Ok(handle)
    }

    async fn send(
        &self,
        handle: ConversationHandle,
        text: &str,
    ) -> Result<(String, ConversationHandle), ProviderError> {
        self.sent_with.lock().unwrap().push(handle.id());
        self.prompts.lock().unwrap().push(text.to_string());
        let next = handle.with_exchange(text, self.reply.clone());
        Ok((self.reply.clone(), next))
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call.
struct BrokenProvider;

#[async_trait]
impl ConversationProvider for BrokenProvider {
    fn name(&self) -> &str {
        "broken"
    }

    async fn start(&self) -> Result<ConversationHandle, ProviderError> {
        Ok(ConversationHandle::new())
    }

    async fn send(
        &self,
        _handle: ConversationHandle,
        _text: &str,
    ) -> Result<(String, ConversationHandle), ProviderError> {
        Err(ProviderError::Status { status: 503, body: "unavailable".to_string() })
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::EmptyResponse)
    }
}

fn gateway_with(
    provider: Option<Arc<dyn ConversationProvider>>,
) -> (AdviceGateway, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let sessions: Arc<dyn SessionStore> = store.clone();
    (AdviceGateway::new(provider, sessions), store)
}

#[tokio::test]
async fn test_chat_without_credential_uses_canned_budget_reply() {
    let (gateway, store) = gateway_with(None);
    let result = gateway.send_chat("Tell me about budgeting", None).await.unwrap();

    assert_eq!(result.text, canned_reply(AdviceTopic::Budget));
    assert!(result.handle.is_none());
    assert!(!result.session_id.is_empty());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_same_session_reuses_handle() {
    let provider = RecordingProvider::replying("Use UPI for small savings.");
    let (gateway, store) = gateway_with(Some(provider.clone()));

    let first = gateway.send_chat("How do I save?", Some("s-1")).await.unwrap();
    let second = gateway.send_chat("And then?", Some("s-1")).await.unwrap();

    assert_eq!(first.text, "Use UPI for small savings.");
    assert_eq!(provider.started.lock().unwrap().len(), 1);

    let sent_with = provider.sent_with.lock().unwrap().clone();
    assert_eq!(sent_with.len(), 2);
    assert_eq!(sent_with[0], sent_with[1]);

    let first_handle = first.handle.unwrap();
    let second_handle = second.handle.unwrap();
    assert_eq!(first_handle.id(), second_handle.id());
    assert_eq!(second_handle.history().len(), 4);
    assert_eq!(store.get("s-1").await.map(|h| h.id()), Some(first_handle.id()));
}

#[tokio::test]
async fn test_minted_session_id_resumes_state() {
    let provider = RecordingProvider::replying("Start with a small budget.");
    let (gateway, _store) = gateway_with(Some(provider.clone()));

    let first = gateway.send_chat("Where do I begin?", None).await.unwrap();
    let resumed = gateway
        .send_chat("What next?", Some(&first.session_id))
        .await
        .unwrap();

    assert_eq!(resumed.session_id, first.session_id);
    assert_eq!(provider.started.lock().unwrap().len(), 1);
    assert_eq!(
        resumed.handle.map(|h| h.id()),
        first.handle.map(|h| h.id())
    );
}

#[tokio::test]
async fn test_sessions_do_not_share_handles() {
    let provider = RecordingProvider::replying("ok, noted");
    let (gateway, _store) = gateway_with(Some(provider.clone()));

    let a = gateway.send_chat("hello", Some("a")).await.unwrap();
    let b = gateway.send_chat("hello", Some("b")).await.unwrap();

    assert_ne!(a.handle.unwrap().id(), b.handle.unwrap().id());
    assert_eq!(provider.started.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_prompt_is_framed_around_the_question() {
    let provider = RecordingProvider::replying("answer");
    let (gateway, _store) = gateway_with(Some(provider.clone()));

    gateway.send_chat("Is gold a good saving?", Some("p")).await.unwrap();

    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].starts_with("User Question: Is gold a good saving?"));
    assert!(prompts[0].contains("microfinance"));
}

#[tokio::test]
async fn test_provider_error_matches_no_credential_fallback() {
    let (offline, _) = gateway_with(None);
    let (broken, store) = gateway_with(Some(Arc::new(BrokenProvider)));

    for message in [
        "Tell me about budgeting",
        "how can I save money",
        "debt trouble",
        "should I invest",
        "emergency fund?",
        "what now",
    ] {
        let expected = offline.send_chat(message, None).await.unwrap().text;
        let got = broken.send_chat(message, Some("x")).await.unwrap();
        assert_eq!(got.text, expected, "message: {message}");
        assert!(got.handle.is_none());
    }
    assert!(store.get("x").await.is_none());
}

#[tokio::test]
async fn test_failed_turn_clears_stored_handle() {
    let (gateway, store) = gateway_with(Some(Arc::new(BrokenProvider)));
    store.set("stale", ConversationHandle::new()).await;

    gateway.send_chat("hi", Some("stale")).await.unwrap();
    assert!(store.get("stale").await.is_none());
}

#[tokio::test]
async fn test_empty_message_is_a_validation_error() {
    let provider = RecordingProvider::replying("unused");
    let (gateway, _) = gateway_with(Some(provider.clone()));

    let err = gateway.send_chat("   ", None).await.unwrap_err();
    assert_eq!(err, ValidationError::MissingMessage);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_analyze_empty_never_calls_provider() {
    let provider = RecordingProvider::replying("{}");
    let (gateway, _) = gateway_with(Some(provider.clone()));

    let err = gateway.analyze(&[]).await.unwrap_err();
    assert_eq!(err, ValidationError::MissingResponses);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_analyze_parses_provider_json() {
    let provider = RecordingProvider::replying(
        r#"{"score": 9, "strengths": ["Vision", "Grit", "Focus"], "areasForDevelopment": ["Delegation", "Finance", "Planning"], "advice": "Keep going", "resources": ["Mentor network"]}"#,
    );
    let (gateway, _) = gateway_with(Some(provider.clone()));

    let analysis = gateway.analyze(&[json!({"questionId": 1, "answer": "a"})]).await.unwrap();
    assert_eq!(analysis.score, 9.0);
    assert_eq!(analysis.strengths, vec!["Vision", "Grit", "Focus"]);
    assert_eq!(analysis.resources, vec!["Mentor network"]);

    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"answer\": \"a\""));
}

#[tokio::test]
async fn test_analyze_extracts_json_from_prose() {
    let provider = RecordingProvider::replying(
        "Here is the analysis:\n```json\n{\"score\": 6.5, \"strengths\": [\"a\"], \"areasForDevelopment\": [\"b\"], \"advice\": \"c\", \"resources\": []}\n```",
    );
    let (gateway, _) = gateway_with(Some(provider));

    let analysis = gateway.analyze(&[json!("x")]).await.unwrap();
    assert_eq!(analysis.score, 6.5);
    assert_eq!(analysis.advice, "c");
}

#[tokio::test]
async fn test_analyze_falls_back_on_unparseable_output() {
    let provider = RecordingProvider::replying("I'd rather not answer in JSON.");
    let (gateway, _) = gateway_with(Some(provider));
    assert_eq!(gateway.analyze(&[json!(1)]).await.unwrap(), fallback_analysis());

    let (broken, _) = gateway_with(Some(Arc::new(BrokenProvider)));
    assert_eq!(broken.analyze(&[json!(1)]).await.unwrap(), fallback_analysis());

    let (offline, _) = gateway_with(None);
    assert_eq!(offline.analyze(&[json!(1)]).await.unwrap(), fallback_analysis());
}

#[tokio::test]
async fn test_provider_reports_working_api() {
    let (working, _) = gateway_with(Some(RecordingProvider::replying("API is working")));
    assert!(working.test_provider().await);

    let (terse, _) = gateway_with(Some(RecordingProvider::replying("ok")));
    assert!(!terse.test_provider().await);

    let (broken, _) = gateway_with(Some(Arc::new(BrokenProvider)));
    assert!(!broken.test_provider().await);

    let (offline, _) = gateway_with(None);
    assert!(!offline.test_provider().await);
}

#[tokio::test]
async fn test_analyze_unwraps_result_from_json_array() {
    let provider = RecordingProvider::replying(
        r#"[{"score": 8, "strengths": ["a","b","c"], "areasForDevelopment": ["d","e","f"], "advice": "go", "resources": ["r"]}]"#,
    );
    let (gateway, _) = gateway_with(Some(provider));

    let analysis = gateway.analyze(&[json!({"questionId": 2, "answer": "c"})]).await.unwrap();
    assert_eq!(analysis.score, 8.0);
    assert_eq!(analysis.advice, "go");
    assert_ne!(analysis, fallback_analysis());
}

#[tokio::test]
async fn test_blank_session_id_gets_a_fresh_id() {
    let provider = RecordingProvider::replying("noted");
    let (gateway, store) = gateway_with(Some(provider));

    let result = gateway.send_chat("hello", Some("   ")).await.unwrap();
    assert_ne!(result.session_id.trim(), "");
    assert!(store.get("   ").await.is_none());
    assert!(store.get(&result.session_id).await.is_some());
}
