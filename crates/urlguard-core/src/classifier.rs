//! The classification pipeline: encode, score, decide, record.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use urlguard_types::PredictionRecord;

use crate::decision::DecisionRule;
use crate::encoder::Encoder;
use crate::scoring::{ScoreError, Scorer};
use crate::store::{PredictionStore, StoreError};

/// Errors from a single classification.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The model could not score the sequence. Nothing was recorded.
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// The prediction was made but could not be recorded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs one URL through encoder, scorer, decision rule and store.
///
/// All collaborators are supplied at construction; nothing is global.
#[derive(Clone)]
pub struct Classifier {
    encoder: Encoder,
    scorer: Arc<dyn Scorer>,
    rule: DecisionRule,
    store: Arc<dyn PredictionStore>,
}

impl Classifier {
    pub fn new(
        encoder: Encoder,
        scorer: Arc<dyn Scorer>,
        rule: DecisionRule,
        store: Arc<dyn PredictionStore>,
    ) -> Self {
        Self {
            encoder,
            scorer,
            rule,
            store,
        }
    }

    /// Classify `url` and append the result to the store.
    ///
    /// The record is returned only after the store accepted it.
    pub async fn classify(&self, url: &str) -> Result<PredictionRecord, ClassifyError> {
        let sequence = self.encoder.encode(url);
        debug!(
            url_len = url.chars().count(),
            truncated = self.encoder.truncates(url),
            unknown_chars = self.encoder.unknown_count(url),
            "encoded url"
        );

        let confidence = self
            .scorer
            .score(&sequence)
            .await
            .and_then(|p| checked_probability(p, self.scorer.name()))
            .inspect_err(|e| {
                warn!(scorer = self.scorer.name(), error = %e, "scoring failed");
            })?;
        let label = self.rule.decide(confidence);

        let record = PredictionRecord::new(url, label, confidence);
        self.store.append(&record).await.inspect_err(|e| {
            warn!(store = self.store.name(), error = %e, "failed to record prediction");
        })?;

        info!(label = %label, confidence, "url classified");
        Ok(record)
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn scorer(&self) -> &Arc<dyn Scorer> {
        &self.scorer
    }

    pub fn store(&self) -> &Arc<dyn PredictionStore> {
        &self.store
    }

    pub fn rule(&self) -> DecisionRule {
        self.rule
    }
}

/// Keep record confidences within `[0, 1]` whatever the scorer returned.
fn checked_probability(p: f64, scorer: &str) -> Result<f64, ScoreError> {
    if !p.is_finite() {
        return Err(ScoreError::MalformedResponse(format!(
            "scorer {scorer} returned non-finite probability {p}"
        )));
    }
    if !(0.0..=1.0).contains(&p) {
        warn!(scorer, raw = p, "probability outside [0, 1], clamping");
    }
    Ok(p.clamp(0.0, 1.0))
}
