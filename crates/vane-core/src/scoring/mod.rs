//! End-to-end headline scoring: encode, then classify.
//!
//! [`HeadlineScorer`] is what the service loads at startup; a load failure
//! here is fatal to the process, never a per-request error.

mod error;


pub use error::ScoringError;

use tracing::debug;

use crate::classifier::{ClassifierConfig, LinearClassifier};
use crate::embedding::{EncoderConfig, SentenceEncoder};

/// One prediction, aligned by index with the scored batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Sentence encoder plus linear head.
#[derive(Debug)]
pub struct HeadlineScorer {
    encoder: SentenceEncoder,
    classifier: LinearClassifier,
}

impl HeadlineScorer {
    /// Loads both model artifacts, verifying that their widths agree.
    pub fn load(
        encoder_config: EncoderConfig,
        classifier_config: ClassifierConfig,
    ) -> Result<Self, ScoringError> {
        let encoder = SentenceEncoder::load(encoder_config)?;
        let classifier = LinearClassifier::load(classifier_config)?;

        if let Some(classifier_dim) = classifier.input_dim() {
            if !encoder.is_stub() && classifier_dim != encoder.embedding_dim() {
                return Err(ScoringError::DimensionMismatch {
                    encoder_dim: encoder.embedding_dim(),
                    classifier_dim,
                });
            }
        }

        Ok(Self {
            encoder,
            classifier,
        })
    }

    /// Creates a fully stubbed scorer (never fails; no model files).
    pub fn stub() -> Self {
        Self {
            encoder: SentenceEncoder::stub(),
            classifier: LinearClassifier::stub(),
        }
    }

    /// Returns `true` if any stage runs in stub mode.
    pub fn is_stub(&self) -> bool {
        self.encoder.is_stub() || self.classifier.is_stub()
    }

    /// Scores a batch of headlines, one prediction per input, in order.
    pub fn score_batch(&self, headlines: &[String]) -> Result<Vec<Prediction>, ScoringError> {
        let texts: Vec<&str> = headlines.iter().map(String::as_str).collect();
        let embeddings = self.encoder.encode_batch(&texts)?;

        debug!(count = embeddings.len(), "Classifying embeddings");

        embeddings
            .iter()
            .map(|embedding| {
                let (label, score) = self.classifier.classify(embedding)?;
                Ok(Prediction { label, score })
            })
            .collect()
    }
}
