//! Classification labels and the persisted prediction record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical outcome of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Malicious,
    Benign,
}

impl Label {
    /// The wire / storage spelling of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Malicious => "Malicious",
            Label::Benign => "Benign",
        }
    }

    pub fn is_malicious(&self) -> bool {
        matches!(self, Label::Malicious)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown label string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError(pub String);

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label: {}", self.0)
    }
}

impl std::error::Error for ParseLabelError {}

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Malicious" => Ok(Label::Malicious),
            "Benign" => Ok(Label::Benign),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

/// The outcome of one classification request.
///
/// Created once per request and never mutated afterwards. Stores only
/// ever append these; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// The submitted string, exactly as received.
    pub url: String,

    /// The decided label.
    #[serde(rename = "prediction")]
    pub label: Label,

    /// Raw model probability in `[0, 1]`.
    pub confidence: f64,

    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    /// Build a record stamped with the current time.
    pub fn new(url: impl Into<String>, label: Label, confidence: f64) -> Self {
        Self::at(url, label, confidence, Utc::now())
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        url: impl Into<String>,
        label: Label,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            url: url.into(),
            label,
            confidence,
            timestamp,
        }
    }
}
