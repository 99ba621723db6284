use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    error::AppError,
    message::{AnalyzeRequest, AnalyzeResponse, QuestionsResponse},
    services::{gateway::ValidationError, questions::questions},
    state::SharedState,
};

pub async fn analyze_handler(
    State(state): State<SharedState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(payload) = payload?;

    // Anything but a JSON array is treated like a missing field.
    let responses = match payload.responses {
        Some(Value::Array(items)) => items,
        _ => return Err(ValidationError::MissingResponses.into()),
    };

    let analysis = state.gateway.analyze(&responses).await?;
    Ok(Json(AnalyzeResponse { analysis }))
}

pub async fn questions_handler() -> Json<QuestionsResponse> {
    Json(QuestionsResponse { questions: questions() })
}
