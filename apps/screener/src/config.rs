use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::embedding::hash_encoder::DEFAULT_DIMENSION;
use crate::embedding::EmbeddingBackend;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub offer_letter_dir: PathBuf,
    pub embedding_backend: EmbeddingBackend,
    pub embedding_dimension: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            offer_letter_dir: std::env::var("OFFER_LETTER_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            embedding_backend: parse_env("EMBEDDING_BACKEND", EmbeddingBackend::default())?,
            embedding_dimension: parse_env("EMBEDDING_DIMENSION", DEFAULT_DIMENSION)
                .context("EMBEDDING_DIMENSION must be a positive integer")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value '{raw}' for '{key}': {e}")),
        Err(_) => Ok(default),
    }
}
