// src/config.rs
use std::{env, time::Duration};

use anyhow::Context;

use crate::services::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};

pub const DEFAULT_PORT: u16 = 5002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
    Other,
}

impl RunMode {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => Self::Production,
            Some("development") => Self::Development,
            _ => Self::Other,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Whether 500 responses may carry the underlying error text.
    pub fn exposes_errors(self) -> bool {
        self == Self::Development
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub mode: RunMode,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_timeout", &self.gemini_timeout)
            .field("mode", &self.mode)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_timeout: Duration::from_secs(60),
            mode: RunMode::Other,
        }
    }
}

impl Config {
    /// Read settings from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().with_context(|| format!("invalid PORT: {raw}"))?,
            None => defaults.port,
        };

        let gemini_timeout = match non_empty("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid GEMINI_TIMEOUT_SECS: {raw}"))?,
            ),
            None => defaults.gemini_timeout,
        };

        Ok(Self {
            port,
            cors_origin: non_empty("CORS_ORIGIN"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: non_empty("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_timeout,
            mode: RunMode::parse(lookup("NODE_ENV").as_deref()),
        })
    }

    /// Gemini settings, or `None` when no key is configured.
    pub fn gemini(&self) -> Option<GeminiConfig> {
        let api_key = self.gemini_api_key.clone()?;
        Some(GeminiConfig {
            api_key,
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: self.gemini_timeout,
        })
    }
}
