use thiserror::Error;

/// Errors surfaced by response shape negotiation.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// None of the accepted response shapes matched. The raw payload is
    /// embedded so the caller can show it for diagnostics.
    #[error("unexpected scoring response shape: {payload}")]
    UnrecognizedShape { payload: String },
}
