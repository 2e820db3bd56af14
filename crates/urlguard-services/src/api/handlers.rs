//! HTTP request handlers for the REST API.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use urlguard_core::ClassifyError;
use urlguard_types::{Label, PredictionRecord};

use super::ApiState;

/// Error body returned when the request has no usable `url` field.
pub const MISSING_URL: &str = "URL not provided";

/// Records returned by `/api/predictions` when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Upper bound on `/api/predictions?limit=`.
pub const MAX_HISTORY_LIMIT: usize = 500;

const INDEX_HTML: &str = include_str!("index.html");

/// Build all routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/health", get(health_check))
        .route("/api/predictions", get(list_predictions))
}

/// JSON body of a successful `/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub url: String,
    pub prediction: Label,
    pub confidence: f64,
}

impl From<PredictionRecord> for PredictResponse {
    fn from(record: PredictionRecord) -> Self {
        Self {
            url: record.url,
            prediction: record.label,
            confidence: record.confidence,
        }
    }
}

/// Query string of `/api/predictions`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Pull a string `url` out of a JSON object body.
///
/// Anything else -- invalid JSON, a non-object, a missing or non-string
/// field -- is a client error.
fn extract_url(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("url")?.as_str().map(str::to_owned)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn predict(State(state): State<ApiState>, body: Bytes) -> Response {
    let Some(url) = extract_url(&body) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_URL);
    };

    match state.classifier.classify(&url).await {
        Ok(record) => Json(PredictResponse::from(record)).into_response(),
        Err(ClassifyError::Score(e)) => {
            error!(error = %e, "prediction failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
        Err(ClassifyError::Store(e)) => {
            error!(error = %e, "failed to log prediction");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn list_predictions(
    State(state): State<ApiState>,
    Query(params): Query<HistoryParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);

    match state.classifier.store().recent(limit).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error!(error = %e, "failed to read prediction log");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Returns basic health status, version, and uptime.
async fn health_check(State(state): State<ApiState>) -> Json<Value> {
    let uptime_secs = state.started.elapsed().as_secs();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime_secs
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_url_accepts_string_field() {
        assert_eq!(
            extract_url(br#"{"url": "http://a.example"}"#).as_deref(),
            Some("http://a.example")
        );
        assert_eq!(extract_url(br#"{"url": "", "extra": 1}"#).as_deref(), Some(""));
    }

    #[test]
    fn extract_url_rejects_bad_bodies() {
        let bodies: [&[u8]; 9] = [
            b"",
            b"not json",
            b"{}",
            b"[]",
            b"\"http://a\"",
            br#"{"uri": "http://a"}"#,
            br#"{"url": 42}"#,
            br#"{"url": null}"#,
            br#"{"url": ["http://a"]}"#,
        ];
        for body in bodies {
            assert!(extract_url(body).is_none(), "accepted {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn predict_response_drops_timestamp() {
        let record = PredictionRecord::new("http://x", Label::Malicious, 0.66);
        let json = serde_json::to_value(PredictResponse::from(record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://x", "prediction": "Malicious", "confidence": 0.66})
        );
    }

    #[test]
    fn index_page_posts_to_predict() {
        assert!(INDEX_HTML.contains("/predict"));
        assert!(INDEX_HTML.contains("<form"));
    }
}
