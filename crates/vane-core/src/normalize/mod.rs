//! Response shape negotiation.
//!
//! Scoring backends answer in one of several shapes: `{"labels": [...]}`,
//! `{"labels": [...], "scores": [...]}`, `{"predictions": [...]}` (records
//! or plain labels), or a bare array of labels. [`normalize`] converts any
//! of them into one canonical ordered list of [`ScoreRecord`]s aligned with
//! the request, or a descriptive failure. It never panics on malformed
//! input; only the surrounding transport layer produces hard errors.

pub mod error;


pub use error::NormalizeError;

use serde_json::Value;

use crate::record::ScoreRecord;

/// Recognized backend response shapes, in negotiation priority order.
///
/// Richer shapes are probed before looser ones so that ambiguous payloads
/// resolve deterministically. The element probe for `predictions` looks at
/// the first entry only; an empty array therefore classifies as records.
#[derive(Debug)]
enum ResponseShape<'a> {
    /// `{"labels": [...], "scores": [...]}` with both values arrays.
    LabelsAndScores {
        labels: &'a [Value],
        scores: &'a [Value],
    },
    /// `{"labels": [...]}`.
    LabelsOnly { labels: &'a [Value] },
    /// `{"predictions": [...]}` holding ready-made record objects.
    PredictionRecords { records: &'a [Value] },
    /// `{"predictions": [...]}` holding plain label strings.
    PredictionLabels { labels: &'a [Value] },
    /// A bare array of label strings.
    BareLabels { labels: &'a [Value] },
    Unrecognized,
}

fn classify(raw: &Value) -> ResponseShape<'_> {
    match raw {
        Value::Object(map) => {
            let labels = map.get("labels").and_then(Value::as_array);
            let scores = map.get("scores").and_then(Value::as_array);
            if let (Some(labels), Some(scores)) = (labels, scores) {
                return ResponseShape::LabelsAndScores { labels, scores };
            }
            if let Some(labels) = labels {
                return ResponseShape::LabelsOnly { labels };
            }
            if let Some(predictions) = map.get("predictions").and_then(Value::as_array) {
                return match predictions.first() {
                    None | Some(Value::Object(_)) => ResponseShape::PredictionRecords {
                        records: predictions,
                    },
                    Some(Value::String(_)) => ResponseShape::PredictionLabels {
                        labels: predictions,
                    },
                    Some(_) => ResponseShape::Unrecognized,
                };
            }
            ResponseShape::Unrecognized
        }
        Value::Array(items) => match items.first() {
            None | Some(Value::String(_)) => ResponseShape::BareLabels { labels: items },
            Some(_) => ResponseShape::Unrecognized,
        },
        _ => ResponseShape::Unrecognized,
    }
}

/// Normalizes a raw backend response against the ordered input headlines.
///
/// Output order always matches input order. When zipping labels (and
/// optional scores) against headlines, the output is truncated to the
/// shortest of the aligned sequences; excess elements on either side are
/// dropped rather than rejected. Record-shaped `predictions` are passed
/// through as-is and are not re-validated against `headlines`.
pub fn normalize(
    raw: &Value,
    headlines: &[String],
) -> Result<Vec<ScoreRecord>, NormalizeError> {
    match classify(raw) {
        ResponseShape::LabelsAndScores { labels, scores } => {
            let n = headlines.len().min(labels.len()).min(scores.len());
            Ok((0..n)
                .map(|i| ScoreRecord {
                    headline: headlines[i].clone(),
                    label: label_text(&labels[i]),
                    score: scores[i].as_f64(),
                })
                .collect())
        }
        ResponseShape::LabelsOnly { labels }
        | ResponseShape::PredictionLabels { labels }
        | ResponseShape::BareLabels { labels } => Ok(zip_labels(headlines, labels)),
        ResponseShape::PredictionRecords { records } => {
            Ok(records.iter().filter_map(record_from_value).collect())
        }
        ResponseShape::Unrecognized => Err(NormalizeError::UnrecognizedShape {
            payload: raw.to_string(),
        }),
    }
}

fn zip_labels(headlines: &[String], labels: &[Value]) -> Vec<ScoreRecord> {
    headlines
        .iter()
        .zip(labels)
        .map(|(headline, label)| ScoreRecord {
            headline: headline.clone(),
            label: label_text(label),
            score: None,
        })
        .collect()
}

/// Lenient per-record extraction for the pass-through branch: missing or
/// non-string text fields become empty, non-numeric scores become `None`.
fn record_from_value(value: &Value) -> Option<ScoreRecord> {
    let map = value.as_object()?;
    Some(ScoreRecord {
        headline: map.get("headline").map(label_text).unwrap_or_default(),
        label: map.get("label").map(label_text).unwrap_or_default(),
        score: map.get("score").and_then(Value::as_f64),
    })
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
