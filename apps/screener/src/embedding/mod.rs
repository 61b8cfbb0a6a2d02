//! Sentence encoders: turn free text into fixed-length vectors.
//!
//! Default: `FastEmbedEncoder` (pretrained MiniLM via ONNX, `fastembed` feature, on by default).
//! Opt-in: `HashSentenceEncoder` (deterministic feature hashing, no model files). Tests
//! inject it directly.
//!
//! The encoder is built once in `main` and carried in `AppState` as
//! `Arc<dyn SentenceEncoder>`; nothing in the crate holds a global model.

#[cfg(feature = "fastembed")]
pub mod fastembed_encoder;
pub mod hash_encoder;
pub mod similarity;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::errors::ScreeningError;

pub use hash_encoder::HashSentenceEncoder;
pub use similarity::cosine_similarity;

/// Encodes text into an embedding vector.
pub trait SentenceEncoder: Send + Sync {
    /// Backend label for logs ("hash", "fastembed").
    fn name(&self) -> &'static str;

    fn dimension(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vec<f32>, ScreeningError>;
}

/// Which encoder implementation to build at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hash,
    #[default]
    FastEmbed,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hash" => Ok(EmbeddingBackend::Hash),
            "fastembed" => Ok(EmbeddingBackend::FastEmbed),
            other => bail!("unknown embedding backend '{other}' (expected 'hash' or 'fastembed')"),
        }
    }
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::Hash => f.write_str("hash"),
            EmbeddingBackend::FastEmbed => f.write_str("fastembed"),
        }
    }
}

/// Builds the configured encoder. Loading a pretrained model happens here, once.
/// `dimension` only applies to the hash backend; the pretrained model fixes its own.
pub fn create_encoder(
    backend: EmbeddingBackend,
    dimension: usize,
) -> Result<Arc<dyn SentenceEncoder>> {
    match backend {
        EmbeddingBackend::Hash => Ok(Arc::new(HashSentenceEncoder::new(dimension))),
        EmbeddingBackend::FastEmbed => create_pretrained_encoder(),
    }
}

#[cfg(feature = "fastembed")]
fn create_pretrained_encoder() -> Result<Arc<dyn SentenceEncoder>> {
    Ok(Arc::new(fastembed_encoder::FastEmbedEncoder::new()?))
}

#[cfg(not(feature = "fastembed"))]
fn create_pretrained_encoder() -> Result<Arc<dyn SentenceEncoder>> {
    bail!("EMBEDDING_BACKEND=fastembed requires building with `--features fastembed`")
}
