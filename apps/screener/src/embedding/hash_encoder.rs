use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::SentenceEncoder;
use crate::errors::ScreeningError;

/// Fixed SipHash keys. Changing them changes every embedding.
const HASH_SEED_K0: u64 = 0x5eed_0f7e_571a_6e01;
const HASH_SEED_K1: u64 = 0x0dd5_ca1e_b00c_fa11;

pub const DEFAULT_DIMENSION: usize = 384;

const UNIGRAM_WEIGHT: f32 = 1.0;
const BIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic sentence encoder based on signed feature hashing.
///
/// - lowercase alphanumeric word unigrams and adjacent-word bigrams
/// - SipHash-1-3 with fixed keys, stable across Rust versions
/// - output is L2-normalised, so identical texts score exactly 1.0
pub struct HashSentenceEncoder {
    dimension: usize,
}

impl HashSentenceEncoder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(&self, feature: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        feature.hash(&mut hasher);
        hasher.finish()
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let h = self.hash(feature);
        let idx = (h % self.dimension as u64) as usize;
        // Top bit picks the sign so colliding features tend to cancel.
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        vector[idx] += sign * weight;
    }
}

impl Default for HashSentenceEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl SentenceEncoder for HashSentenceEncoder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, ScreeningError> {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dimension];

        for token in &tokens {
            self.add_feature(&mut vector, token, UNIGRAM_WEIGHT);
        }
        for pair in tokens.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), BIGRAM_WEIGHT);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Ok(vector)
    }
}

/// Lowercased alphanumeric runs.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
