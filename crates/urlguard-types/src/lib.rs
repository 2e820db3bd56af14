//! # urlguard-types
//!
//! Core type definitions for the urlguard URL classifier.
//!
//! This crate is the foundation of the dependency graph -- all other
//! urlguard crates depend on it. It contains:
//!
//! - **[`error`]** -- [`UrlguardError`] and the crate-wide [`Result`] alias
//! - **[`config`]** -- Configuration schema (gateway, encoder, model, storage)
//! - **[`prediction`]** -- [`Label`] and the immutable [`PredictionRecord`]

pub mod config;
pub mod error;
pub mod prediction;

pub use error::{Result, UrlguardError};
pub use prediction::{Label, PredictionRecord};
