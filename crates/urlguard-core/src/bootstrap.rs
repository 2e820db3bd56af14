//! Builds a [`Classifier`] from a [`Config`].
//!
//! Any failure here is fatal for the process: a missing vocabulary or an
//! unreachable model means the service must not start.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use urlguard_types::UrlguardError;
use urlguard_types::config::{
    Config, EncoderConfig, ModelBackend, ModelConfig, StorageBackend, StorageConfig,
};

use crate::classifier::Classifier;
use crate::decision::DecisionRule;
use crate::encoder::Encoder;
use crate::scoring::fixed::FixedScorer;
use crate::scoring::http::{HttpScorer, HttpScorerConfig};
use crate::scoring::{ScoreError, Scorer};
use crate::store::jsonl::JsonlStore;
use crate::store::memory::MemoryStore;
use crate::store::sqlite::SqliteStore;
use crate::store::{PredictionStore, StoreError};
use crate::vocab::{VocabError, Vocabulary};

/// Startup failures.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] UrlguardError),

    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error(transparent)]
    Model(#[from] ScoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Load the vocabulary and build an encoder.
pub fn load_encoder(cfg: &EncoderConfig) -> Result<Encoder, BootstrapError> {
    let vocab = Vocabulary::load(&cfg.vocab_path)?;
    Ok(Encoder::new(Arc::new(vocab), cfg.max_len)?)
}

/// Build the configured scorer. Does not contact the model server.
pub fn build_scorer(cfg: &ModelConfig) -> Result<Arc<dyn Scorer>, BootstrapError> {
    let scorer: Arc<dyn Scorer> = match cfg.backend {
        ModelBackend::Http => Arc::new(HttpScorer::new(HttpScorerConfig::from(cfg))?),
        ModelBackend::Fixed => Arc::new(FixedScorer::new(cfg.fixed_probability)),
    };
    Ok(scorer)
}

/// Open the configured prediction store.
pub fn open_store(cfg: &StorageConfig) -> Result<Arc<dyn PredictionStore>, BootstrapError> {
    let store: Arc<dyn PredictionStore> = match cfg.backend {
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&cfg.path)?),
        StorageBackend::Jsonl => Arc::new(JsonlStore::new(cfg.path.clone())),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

/// Build the full pipeline from configuration.
///
/// When `model.verify_on_start` is set, the scorer must report ready.
pub async fn build_classifier(config: &Config) -> Result<Classifier, BootstrapError> {
    config.validate()?;

    let encoder = load_encoder(&config.encoder)?;
    let scorer = build_scorer(&config.model)?;
    if config.model.verify_on_start {
        scorer.ready().await?;
    }
    let store = open_store(&config.storage)?;

    info!(
        max_len = encoder.max_len(),
        vocab_entries = encoder.vocabulary().len(),
        scorer = scorer.name(),
        store = store.name(),
        threshold = config.model.threshold,
        "classifier ready"
    );

    Ok(Classifier::new(
        encoder,
        scorer,
        DecisionRule::with_threshold(config.model.threshold),
        store,
    ))
}
