//! Scorer trait definitions and implementations.
//!
//! A [`Scorer`] is the opaque model: it receives an encoded sequence and
//! returns the probability that the URL is malicious. The model weights,
//! architecture and runtime all live behind this trait.
//!
//! - [`http::HttpScorer`] calls a TensorFlow-Serving compatible REST endpoint.
//! - [`fixed::FixedScorer`] returns a constant, for dry runs and tests.

pub mod fixed;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while scoring a sequence.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("model request failed: {0}")]
    Transport(String),

    /// The model server answered with a non-success status.
    #[error("model server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response did not contain a usable probability.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// The scorer cannot serve requests.
    #[error("model not ready: {0}")]
    NotReady(String),
}

/// Trait for scoring encoded sequences.
///
/// Implementations must be `Send + Sync` so one instance can be shared
/// across request handlers.
#[async_trait]
pub trait Scorer: Send + Sync {
    /// Score one encoded sequence. The result is within `[0, 1]`.
    async fn score(&self, sequence: &[u32]) -> Result<f64, ScoreError>;

    /// Check that the backing model is loaded and reachable.
    ///
    /// Default implementation reports ready.
    async fn ready(&self) -> Result<(), ScoreError> {
        Ok(())
    }

    /// Return the name of this scorer for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
