use anyhow::{Context, Result};

use crate::layout::PageFormat;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Paper format for both the screen preview and the PDF.
    pub page_format: PageFormat,
    /// Upper bound on concurrently held resume sessions.
    pub max_sessions: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            page_format: env_or("RESUME_PAGE_FORMAT", "letter")
                .parse::<PageFormat>()
                .map_err(anyhow::Error::msg)
                .context("RESUME_PAGE_FORMAT must be letter or a4")?,
            max_sessions: env_or("MAX_SESSIONS", "1000")
                .parse::<usize>()
                .context("MAX_SESSIONS must be a positive integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
