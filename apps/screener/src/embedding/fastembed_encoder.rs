use anyhow::{Context, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::info;

use super::SentenceEncoder;
use crate::errors::ScreeningError;

/// MiniLM-L6 produces 384-dimensional sentence embeddings.
const MINILM_DIMENSION: usize = 384;

/// Pretrained sentence encoder (all-MiniLM-L6-v2 through ONNX Runtime).
/// The model is downloaded and loaded once, in `new`.
pub struct FastEmbedEncoder {
    model: TextEmbedding,
}

impl FastEmbedEncoder {
    pub fn new() -> Result<Self> {
        info!("Loading fastembed model AllMiniLML6V2...");
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .context("Failed to initialise fastembed model")?;
        info!("fastembed model loaded");
        Ok(Self { model })
    }
}

impl SentenceEncoder for FastEmbedEncoder {
    fn name(&self) -> &'static str {
        "fastembed"
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, ScreeningError> {
        let mut embeddings = self
            .model
            .embed(vec![text], None)
            .map_err(|e| ScreeningError::Encoding(e.to_string()))?;
        embeddings
            .pop()
            .ok_or_else(|| ScreeningError::Encoding("fastembed returned no embedding".to_string()))
    }
}
