use thiserror::Error;

use crate::normalize::NormalizeError;

/// Errors from one scoring round trip: transport problems versus a 2xx
/// body that matched no accepted shape.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout, or non-2xx status from the service.
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered 2xx with an unrecognizable body.
    #[error(transparent)]
    UnexpectedShape(#[from] NormalizeError),
}
