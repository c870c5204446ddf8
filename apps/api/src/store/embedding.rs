//! Deterministic text embedding.
//!
//! Maps text into a fixed-dimension vector using seeded random token
//! projections: every token hashes to a seed, the seed drives a PRNG that
//! draws the token's vector, and the text vector is the L2-normalized sum.
//! The same text always produces the same vector, regardless of when or
//! where it is computed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Dimension of every produced vector.
pub const EMBEDDING_DIM: usize = 256;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("no embeddable tokens in input")]
    EmptyInput,
}

/// Stateless encoder; cheap to construct and share.
#[derive(Debug, Clone, Default)]
pub struct Embedder;

impl Embedder {
    pub fn new() -> Self {
        Embedder
    }

    /// Embeds `text` into a unit-length vector of [`EMBEDDING_DIM`] floats.
    ///
    /// Callers that want the degrade-gracefully behavior (empty vector, no
    /// matches) map the error explicitly; the failure never escapes the
    /// content store.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut sum = vec![0.0f32; EMBEDDING_DIM];
        let mut token_count = 0usize;

        for token in tokenize(text) {
            let mut rng = rand::rngs::StdRng::seed_from_u64(token_seed(token));
            for slot in sum.iter_mut() {
                *slot += rng.gen::<f32>() * 2.0 - 1.0;
            }
            token_count += 1;
        }

        if token_count == 0 {
            return Err(EmbedError::EmptyInput);
        }

        let norm = sum.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for slot in sum.iter_mut() {
                *slot /= norm;
            }
        }

        Ok(sum)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

fn token_seed(token: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    token.to_lowercase().hash(&mut hasher);
    hasher.finish()
}

/// Cosine distance between two vectors: `1 - cos(a, b)`.
///
/// Returns `None` when the vectors cannot be compared (dimension mismatch,
/// empty, or zero-length), so callers can skip rather than mis-rank.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(1.0 - dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = Embedder::new();
        let a = embedder.embed("distributed systems in Rust").unwrap();
        let b = embedder.embed("distributed systems in Rust").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embedding_has_fixed_dimension_and_unit_norm() {
        let embedder = Embedder::new();
        let v = embedder.embed("python backend developer").unwrap();
        assert_eq!(v.len(), EMBEDDING_DIM);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_shared_tokens_pull_texts_closer() {
        let embedder = Embedder::new();
        let query = embedder.embed("python web services").unwrap();
        let related = embedder.embed("python developer").unwrap();
        let unrelated = embedder.embed("ceramic glaze firing").unwrap();

        let near = cosine_distance(&query, &related).unwrap();
        let far = cosine_distance(&query, &unrelated).unwrap();
        assert!(near < far, "expected {near} < {far}");
    }

    #[test]
    fn test_tokenization_is_case_insensitive() {
        let embedder = Embedder::new();
        let a = embedder.embed("Python AWS").unwrap();
        let b = embedder.embed("python aws").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let embedder = Embedder::new();
        assert!(matches!(embedder.embed(""), Err(EmbedError::EmptyInput)));
        assert!(matches!(
            embedder.embed("   \t\n"),
            Err(EmbedError::EmptyInput)
        ));
    }

    #[test]
    fn test_cosine_distance_rejects_mismatched_vectors() {
        assert!(cosine_distance(&[1.0, 0.0], &[1.0]).is_none());
        assert!(cosine_distance(&[], &[]).is_none());
        assert!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).is_none());
    }

    #[test]
    fn test_cosine_distance_of_identical_vectors_is_zero() {
        let v = vec![0.3, -0.4, 0.5];
        let d = cosine_distance(&v, &v).unwrap();
        assert!(d.abs() < 1e-6);
    }
}
