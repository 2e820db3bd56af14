//! # urlguard-core
//!
//! Core engine for the urlguard URL classifier.
//!
//! A submitted URL flows through four stages:
//!
//! ```text
//! url ──► Encoder ──► Scorer ──► DecisionRule ──► PredictionStore
//!         (vocab,     (opaque    (p > 0.5 →       (append-only)
//!          pad/trim)   model)     Malicious)
//! ```
//!
//! - **[`vocab`]** -- the `char -> code` [`Vocabulary`](vocab::Vocabulary)
//! - **[`encoder`]** -- fixed-length post-padded encoding
//! - **[`decision`]** -- strict-greater-than thresholding
//! - **[`scoring`]** -- the [`Scorer`](scoring::Scorer) trait and backends
//! - **[`store`]** -- the [`PredictionStore`](store::PredictionStore) trait and backends
//! - **[`classifier`]** -- the pipeline tying them together
//! - **[`bootstrap`]** -- building the pipeline from configuration

pub mod bootstrap;
pub mod classifier;
pub mod decision;
pub mod encoder;
pub mod scoring;
pub mod store;
pub mod vocab;

pub use classifier::{ClassifyError, Classifier};
pub use decision::{DecisionRule, decide};
pub use encoder::Encoder;
pub use vocab::Vocabulary;
