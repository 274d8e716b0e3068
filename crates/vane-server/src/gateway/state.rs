use std::sync::Arc;

use vane::scoring::HeadlineScorer;

/// Shared state for gateway handlers.
#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<HeadlineScorer>,

    /// Attach per-item confidences to scoring responses.
    pub include_scores: bool,
}

impl HandlerState {
    pub fn new(scorer: Arc<HeadlineScorer>, include_scores: bool) -> Self {
        Self {
            scorer,
            include_scores,
        }
    }
}
