//! Scorer backed by a TensorFlow-Serving compatible REST endpoint.
//!
//! [`HttpScorer`] posts the encoded sequence as a single instance:
//!
//! ```text
//! POST {base_url}/v1/models/{model}:predict
//! {"instances": [[2, 3, 1, 0, ...]]}
//! ```
//!
//! and reads the probability from `predictions[0][0]` (a sigmoid head
//! with one unit) or `predictions[0]` (a squeezed output). Readiness is
//! checked with `GET {base_url}/v1/models/{model}`, which must list a
//! version in the `AVAILABLE` state.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use urlguard_types::config::ModelConfig;

use super::{ScoreError, Scorer};

/// Connection settings for [`HttpScorer`].
#[derive(Debug, Clone)]
pub struct HttpScorerConfig {
    /// Base URL of the model server (e.g. `http://127.0.0.1:8501`).
    pub base_url: String,
    /// Model name as registered with the server.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl From<&ModelConfig> for HttpScorerConfig {
    fn from(cfg: &ModelConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            model: cfg.name.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

/// Scores sequences by calling a remote model server.
pub struct HttpScorer {
    config: HttpScorerConfig,
    http: reqwest::Client,
}

impl HttpScorer {
    /// Create a scorer. Fails only if the HTTP client cannot be built.
    pub fn new(config: HttpScorerConfig) -> Result<Self, ScoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScoreError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn model_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/v1/models/{}", self.config.model)
    }

    fn predict_url(&self) -> String {
        format!("{}:predict", self.model_url())
    }
}

/// Pull the probability out of a `:predict` response body.
fn extract_probability(body: &Value) -> Result<f64, ScoreError> {
    let first = body
        .get("predictions")
        .and_then(Value::as_array)
        .and_then(|preds| preds.first())
        .ok_or_else(|| ScoreError::MalformedResponse("missing predictions[0]".into()))?;

    let raw = match first {
        Value::Array(outputs) => outputs.first().and_then(Value::as_f64),
        other => other.as_f64(),
    }
    .ok_or_else(|| ScoreError::MalformedResponse(format!("prediction is not a number: {first}")))?;

    if !raw.is_finite() {
        return Err(ScoreError::MalformedResponse(format!(
            "prediction is not finite: {raw}"
        )));
    }
    if !(0.0..=1.0).contains(&raw) {
        warn!(raw, "model output outside [0, 1], clamping");
    }
    Ok(raw.clamp(0.0, 1.0))
}

/// Require at least one model version in the `AVAILABLE` state.
///
/// The status endpoint answers 200 for models that are still loading or
/// that failed to load, so the HTTP status alone proves nothing.
fn check_available(body: &Value) -> Result<(), String> {
    let versions = body
        .get("model_version_status")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing model_version_status".to_string())?;

    if versions
        .iter()
        .any(|v| v.get("state").and_then(Value::as_str) == Some("AVAILABLE"))
    {
        return Ok(());
    }

    let detail = versions
        .iter()
        .map(|v| {
            let state = v.get("state").and_then(Value::as_str).unwrap_or("UNKNOWN");
            let message = v
                .get("status")
                .and_then(|s| s.get("error_message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty());
            match message {
                Some(message) => format!("{state}: {message}"),
                None => state.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    if detail.is_empty() {
        Err("no model versions loaded".into())
    } else {
        Err(format!("no available model version ({detail})"))
    }
}

#[async_trait]
impl Scorer for HttpScorer {
    async fn score(&self, sequence: &[u32]) -> Result<f64, ScoreError> {
        let url = self.predict_url();
        let body = serde_json::json!({ "instances": [sequence] });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ScoreError::Status {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ScoreError::MalformedResponse(e.to_string()))?;

        let probability = extract_probability(&json)?;
        debug!(probability, model = %self.config.model, "model scored sequence");
        Ok(probability)
    }

    async fn ready(&self) -> Result<(), ScoreError> {
        let url = self.model_url();
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoreError::NotReady(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreError::NotReady(format!("{url} returned HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScoreError::NotReady(format!("{url}: unreadable status body: {e}")))?;
        check_available(&body).map_err(|reason| ScoreError::NotReady(format!("{url}: {reason}")))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer_for(base_url: String) -> HttpScorer {
        HttpScorer::new(HttpScorerConfig {
            base_url,
            model: "url_cnn_lstm".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn extracts_nested_and_flat_predictions() {
        let nested = serde_json::json!({"predictions": [[0.91]]});
        assert_eq!(extract_probability(&nested).unwrap(), 0.91);

        let flat = serde_json::json!({"predictions": [0.12]});
        assert_eq!(extract_probability(&flat).unwrap(), 0.12);
    }

    #[test]
    fn clamps_out_of_range_output() {
        let body = serde_json::json!({"predictions": [[1.0000002]]});
        assert_eq!(extract_probability(&body).unwrap(), 1.0);
    }

    #[test]
    fn rejects_malformed_bodies() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({"predictions": []}),
            serde_json::json!({"predictions": [["x"]]}),
            serde_json::json!({"predictions": [[]]}),
            serde_json::json!({"outputs": [[0.3]]}),
        ] {
            assert!(
                matches!(extract_probability(&body), Err(ScoreError::MalformedResponse(_))),
                "expected malformed for {body}"
            );
        }
    }

    #[test]
    fn urls_tolerate_trailing_slash() {
        let scorer = scorer_for("http://tf:8501/".into());
        assert_eq!(scorer.model_url(), "http://tf:8501/v1/models/url_cnn_lstm");
        assert_eq!(
            scorer.predict_url(),
            "http://tf:8501/v1/models/url_cnn_lstm:predict"
        );
    }

    #[test]
    fn config_from_model_config() {
        let model = ModelConfig::default();
        let cfg = HttpScorerConfig::from(&model);
        assert_eq!(cfg.base_url, "http://127.0.0.1:8501");
        assert_eq!(cfg.model, "url_cnn_lstm");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn score_posts_single_instance() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/models/url_cnn_lstm:predict")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"instances": [[2, 3, 0, 0]]}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"predictions": [[0.87]]}"#)
            .create_async()
            .await;

        let scorer = scorer_for(server.url());
        let p = scorer.score(&[2, 3, 0, 0]).await.unwrap();
        assert_eq!(p, 0.87);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn score_surfaces_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/models/url_cnn_lstm:predict")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = scorer_for(server.url()).score(&[0; 4]).await.unwrap_err();
        match err {
            ScoreError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn score_rejects_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/models/url_cnn_lstm:predict")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = scorer_for(server.url()).score(&[0; 4]).await.unwrap_err();
        assert!(matches!(err, ScoreError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn ready_checks_model_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models/url_cnn_lstm")
            .with_status(200)
            .with_body(r#"{"model_version_status": [{"state": "AVAILABLE"}]}"#)
            .create_async()
            .await;

        scorer_for(server.url()).ready().await.unwrap();
    }

    #[tokio::test]
    async fn ready_rejects_model_that_failed_to_load() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models/url_cnn_lstm")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"model_version_status": [{"version": "1", "state": "END",
                    "status": {"error_code": "NOT_FOUND",
                               "error_message": "Could not find base path"}}]}"#,
            )
            .create_async()
            .await;

        let err = scorer_for(server.url()).ready().await.unwrap_err();
        match err {
            ScoreError::NotReady(reason) => {
                assert!(reason.contains("END"), "{reason}");
                assert!(reason.contains("Could not find base path"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn availability_requires_an_available_version() {
        let loading = serde_json::json!({"model_version_status": [
            {"version": "2", "state": "LOADING", "status": {"error_code": "OK", "error_message": ""}}
        ]});
        assert_eq!(check_available(&loading).unwrap_err(), "no available model version (LOADING)");

        let mixed = serde_json::json!({"model_version_status": [
            {"version": "1", "state": "END"},
            {"version": "2", "state": "AVAILABLE"}
        ]});
        assert!(check_available(&mixed).is_ok());

        let empty = serde_json::json!({"model_version_status": []});
        assert_eq!(check_available(&empty).unwrap_err(), "no model versions loaded");

        assert!(check_available(&serde_json::json!({})).is_err());
    }

    #[tokio::test]
    async fn ready_fails_for_missing_model() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models/url_cnn_lstm")
            .with_status(404)
            .create_async()
            .await;

        let err = scorer_for(server.url()).ready().await.unwrap_err();
        assert!(matches!(err, ScoreError::NotReady(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 (discard) is closed on test hosts.
        let err = scorer_for("http://127.0.0.1:9".into())
            .score(&[0; 4])
            .await
            .unwrap_err();
        assert!(matches!(err, ScoreError::Transport(_)));
    }
}
