// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::{gateway::PsychometricResult, questions::Question};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub responses: Option<Value>,
}

#[derive(Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: PsychometricResult,
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ProviderTestResponse {
    pub success: bool,
    pub message: String,
}
