use axum::{Json, extract::State};
use tracing::{error, info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{ScoreHeadlinesRequest, ScoreHeadlinesResponse};
use crate::gateway::state::HandlerState;

/// Scores a batch of headlines. Labels come back in request order; when
/// the service is configured for it, confidences ride along in a parallel
/// `scores` array.
#[instrument(skip(state, request), fields(count = request.headlines.len()))]
pub async fn score_headlines_handler(
    State(state): State<HandlerState>,
    Json(request): Json<ScoreHeadlinesRequest>,
) -> Result<Json<ScoreHeadlinesResponse>, GatewayError> {
    info!(count = request.headlines.len(), "Received scoring request");

    let predictions = state
        .scorer
        .score_batch(&request.headlines)
        .inspect_err(|e| error!(error = %e, "Scoring failed"))?;

    let labels = predictions.iter().map(|p| p.label.clone()).collect();
    let scores = state
        .include_scores
        .then(|| predictions.iter().map(|p| p.score).collect());

    Ok(Json(ScoreHeadlinesResponse { labels, scores }))
}
