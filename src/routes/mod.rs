// src/routes/mod.rs
pub mod financial;
pub mod psychometric;

use std::any::Any;

use crate::{
    config::RunMode,
    error::AppError,
    message::{HealthResponse, TestResponse},
    panic_hook,
    state::SharedState,
};
use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

const DEFAULT_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "https://financial-chatbot-app.netlify.app",
    "https://cosmic-hummingbird-6314a4.netlify.app",
];

pub fn create_router(mode: RunMode) -> Router<SharedState> {
    let financial_routes = Router::new()
        .route("/test-gemini", get(financial::test_provider_handler))
        .route("/chat", post(financial::chat_handler));

    let psychometric_routes = Router::new()
        .route("/analyze", post(psychometric::analyze_handler))
        .route("/questions", get(psychometric::questions_handler));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/test", get(test_handler))
        .nest("/api/financial", financial_routes)
        .nest("/api/psychometric", psychometric_routes)
        .fallback(not_found_handler);

    with_request_layers(router, mode)
}

/// Panic-to-500 conversion, request marking and tracing, outermost last.
pub fn with_request_layers(router: Router<SharedState>, mode: RunMode) -> Router<SharedState> {
    router
        .layer(CatchPanicLayer::custom(move |err: Box<dyn Any + Send + 'static>| {
            panic_response(err, mode)
        }))
        .layer(middleware::from_fn(panic_hook::mark_request))
        .layer(TraceLayer::new_for_http())
}

/// `CORS_ORIGIN` pins a single origin; otherwise the known frontends and any
/// Netlify deploy preview are allowed.
pub fn cors_layer(cors_origin: Option<&str>) -> CorsLayer {
    let allow_origin = match cors_origin.and_then(|o| HeaderValue::from_str(o).ok()) {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().map(is_default_origin).unwrap_or(false)
        }),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn is_default_origin(origin: &str) -> bool {
    DEFAULT_ORIGINS.contains(&origin)
        || origin.ends_with(".netlify.app")
        || origin.ends_with(".netlify.live")
}

async fn health_handler() -> Json<HealthResponse> {
    tracing::debug!("health check");
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn test_handler() -> Json<TestResponse> {
    Json(TestResponse { message: "Server is working!".to_string() })
}

async fn not_found_handler(uri: Uri) -> AppError {
    tracing::info!("404 Not Found: {}", uri);
    AppError::NotFound
}

fn panic_response(err: Box<dyn Any + Send + 'static>, mode: RunMode) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let body = json!({
        "message": "Something went wrong!",
        "error": if mode.exposes_errors() { Some(detail) } else { None },
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
