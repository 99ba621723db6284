use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ProviderTestResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let message = payload.message.unwrap_or_default();

    let result = state
        .gateway
        .send_chat(&message, payload.session_id.as_deref())
        .await?;

    Ok(Json(ChatResponse { response: result.text, session_id: result.session_id }))
}

pub async fn test_provider_handler(State(state): State<SharedState>) -> Json<ProviderTestResponse> {
    let success = state.gateway.test_provider().await;
    let message = if success {
        "Gemini API is working correctly"
    } else {
        "Gemini API is not working. The application is using mock responses."
    };

    Json(ProviderTestResponse { success, message: message.to_string() })
}
