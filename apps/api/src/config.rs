use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::GeminiConfig;

const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost,http://localhost:8000,http://127.0.0.1:8000,http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub model_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub static_dir: String,
    pub templates_dir: String,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let gemini_api_key = require_env("GEMINI_API_KEY")?;
        if gemini_api_key.trim().is_empty() {
            bail!("GEMINI_API_KEY is set but empty");
        }

        Ok(Config {
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_API_BASE),
            model_timeout_secs: env_or("MODEL_TIMEOUT_SECS", "120")
                .parse()
                .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            static_dir: env_or("STATIC_DIR", "static"),
            templates_dir: env_or("TEMPLATES_DIR", "templates"),
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", "10485760")
                .parse()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout: Duration::from_secs(self.model_timeout_secs),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
