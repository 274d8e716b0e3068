//! Core data model shared by the scoring service and the client shell.

use serde::{Deserialize, Serialize};

/// One scored headline, aligned by index with the request that produced it.
///
/// `score` is `None` when the backend supplied no confidence information;
/// it serializes as JSON `null` so exports and re-normalization round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub score: Option<f64>,
}

impl ScoreRecord {
    /// Creates a record without a confidence score.
    pub fn labeled(headline: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            label: label.into(),
            score: None,
        }
    }

    /// Creates a record carrying a confidence score.
    pub fn scored(headline: impl Into<String>, label: impl Into<String>, score: f64) -> Self {
        Self {
            headline: headline.into(),
            label: label.into(),
            score: Some(score),
        }
    }
}
