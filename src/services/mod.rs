// src/services/mod.rs
pub mod fallback;
pub mod gateway;
pub mod gemini;
pub mod json_extract;
pub mod provider;
pub mod questions;
pub mod session_store;
