//! Constant-output scorer.

use async_trait::async_trait;

use super::{ScoreError, Scorer};

/// Returns the same probability for every sequence.
///
/// Used by the `fixed` model backend to run the service without a model
/// server, and by tests that need a deterministic collaborator.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer {
    probability: f64,
}

impl FixedScorer {
    /// Create a scorer returning `probability`, clamped into `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

#[async_trait]
impl Scorer for FixedScorer {
    async fn score(&self, _sequence: &[u32]) -> Result<f64, ScoreError> {
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
