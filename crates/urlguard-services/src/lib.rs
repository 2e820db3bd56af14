//! Services for urlguard.
//!
//! Exposes the classification pipeline over HTTP: a form page, the JSON
//! prediction endpoint, a health check and a read-only view of recent
//! predictions. Everything is gated behind the `api` feature.

#[cfg(feature = "api")]
pub mod api;
