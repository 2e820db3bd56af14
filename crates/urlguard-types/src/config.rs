//! Configuration schema types.
//!
//! All structs accept both `snake_case` and `camelCase` field names in JSON
//! via `#[serde(alias)]`. Unknown fields are silently ignored, and every
//! field has a default so an empty object (`{}`) is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UrlguardError};

/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "URLGUARD_PORT";

/// Environment variable overriding the model server base URL.
pub const ENV_MODEL_URL: &str = "URLGUARD_MODEL_URL";

// ── Root config ──────────────────────────────────────────────────────────

/// Root configuration for urlguard.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Vocabulary and sequence length.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Inference backend.
    #[serde(default)]
    pub model: ModelConfig,

    /// Prediction log backend.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Parse a configuration from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup.
    ///
    /// Invalid values are reported rather than ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.gateway.port = port
                .trim()
                .parse()
                .map_err(|_| UrlguardError::config(format!("{ENV_PORT} is not a port: {port}")))?;
        }
        if let Some(url) = lookup(ENV_MODEL_URL) {
            self.model.base_url = url;
        }
        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.encoder.max_len == 0 {
            return Err(UrlguardError::config("encoder.max_len must be greater than 0"));
        }
        if !(0.0..=1.0).contains(&self.model.threshold) {
            return Err(UrlguardError::config(format!(
                "model.threshold must be within [0, 1], got {}",
                self.model.threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.model.fixed_probability) {
            return Err(UrlguardError::config(format!(
                "model.fixed_probability must be within [0, 1], got {}",
                self.model.fixed_probability
            )));
        }
        if self.model.timeout_secs == 0 {
            return Err(UrlguardError::config("model.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

// ── Gateway ──────────────────────────────────────────────────────────────

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind address.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Listen port.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty means permissive.
    #[serde(default, alias = "corsOrigins")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body size. Unset means no limit.
    #[serde(default, alias = "maxBodyBytes")]
    pub max_body_bytes: Option<usize>,
}

fn default_gateway_host() -> String {
    "0.0.0.0".into()
}
fn default_gateway_port() -> u16 {
    5000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            cors_origins: Vec::new(),
            max_body_bytes: None,
        }
    }
}

// ── Encoder ──────────────────────────────────────────────────────────────

/// Character vocabulary and fixed sequence length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Path to the `char -> code` JSON vocabulary.
    #[serde(default = "default_vocab_path", alias = "vocabPath")]
    pub vocab_path: PathBuf,

    /// Length of every encoded sequence.
    #[serde(default = "default_max_len", alias = "maxLen")]
    pub max_len: usize,
}

fn default_vocab_path() -> PathBuf {
    PathBuf::from("model/char_vocab.json")
}
fn default_max_len() -> usize {
    200
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            vocab_path: default_vocab_path(),
            max_len: default_max_len(),
        }
    }
}

// ── Model ────────────────────────────────────────────────────────────────

/// Which inference backend scores encoded sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// A TensorFlow-Serving compatible REST endpoint.
    #[default]
    Http,
    /// A constant probability (dry runs, tests).
    Fixed,
}

/// Inference backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub backend: ModelBackend,

    /// Model server base URL (e.g. `http://127.0.0.1:8501`).
    #[serde(default = "default_model_base_url", alias = "baseUrl")]
    pub base_url: String,

    /// Model name as registered with the server.
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs", alias = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Probabilities strictly above this are labelled malicious.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Probability returned by the `fixed` backend.
    #[serde(default, alias = "fixedProbability")]
    pub fixed_probability: f64,

    /// Refuse to start when the model server is not ready.
    #[serde(default = "default_true", alias = "verifyOnStart")]
    pub verify_on_start: bool,
}

fn default_model_base_url() -> String {
    "http://127.0.0.1:8501".into()
}
fn default_model_name() -> String {
    "url_cnn_lstm".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_threshold() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::default(),
            base_url: default_model_base_url(),
            name: default_model_name(),
            timeout_secs: default_timeout_secs(),
            threshold: default_threshold(),
            fixed_probability: 0.0,
            verify_on_start: true,
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────

/// Which prediction log backend is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Jsonl,
    Memory,
}

/// Prediction log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database or log file path. Ignored by the memory backend.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("urls.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}
