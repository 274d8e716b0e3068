use serde::{Deserialize, Serialize};

/// Body of `POST /score_headlines`.
#[derive(Debug, Deserialize)]
pub struct ScoreHeadlinesRequest {
    pub headlines: Vec<String>,
}

/// Labels aligned with the request order; `scores` only when enabled.
#[derive(Debug, Serialize)]
pub struct ScoreHeadlinesResponse {
    pub labels: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
}
