use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("encoder produces {encoder_dim}-dim embeddings but the classifier expects {classifier_dim}")]
    DimensionMismatch {
        encoder_dim: usize,
        classifier_dim: usize,
    },
}
