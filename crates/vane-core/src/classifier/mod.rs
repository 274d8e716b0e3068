//! Linear sentiment head over sentence embeddings.
//!
//! The production artifact is the original SVM exported to safetensors: a
//! `linear.weight [classes, dim]` matrix plus `linear.bias [classes]`, with
//! class names in a `labels.json` sidecar. Inference is a plain dot-product
//! sweep; candle is used only to read the artifact.

mod error;


pub use error::ClassifierError;

use std::path::PathBuf;

use candle_core::{DType, Device};
use tracing::{info, warn};

/// Class names served by the stub backend, in sklearn's sorted order.
pub const STUB_LABELS: [&str; 3] = ["Neutral", "Optimistic", "Pessimistic"];

/// Configuration for [`LinearClassifier`].
#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    /// Directory holding `head.safetensors` and `labels.json`.
    pub model_dir: PathBuf,
    /// If true, serve deterministic labels without artifact files.
    pub testing_stub: bool,
}

impl ClassifierConfig {
    /// Creates a config for an artifact directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            testing_stub: false,
        }
    }

    /// Creates a stub config (no artifact files required).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }
}

enum ClassifierBackend {
    Model {
        weight: Vec<Vec<f32>>,
        bias: Vec<f32>,
    },
    Stub,
}

/// Linear decision head mapping one embedding to a label and confidence.
pub struct LinearClassifier {
    backend: ClassifierBackend,
    labels: Vec<String>,
}

impl std::fmt::Debug for LinearClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClassifier")
            .field(
                "backend",
                &match &self.backend {
                    ClassifierBackend::Model { .. } => "Model",
                    ClassifierBackend::Stub => "Stub",
                },
            )
            .field("labels", &self.labels)
            .finish()
    }
}

impl LinearClassifier {
    /// Loads the head from an artifact directory (stub mode is supported).
    pub fn load(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        if config.testing_stub {
            warn!("Classifier running in STUB mode (testing only)");
            return Ok(Self::stub());
        }

        let dir = &config.model_dir;
        if !dir.exists() {
            return Err(ClassifierError::ArtifactNotFound { path: dir.clone() });
        }

        let labels_text = std::fs::read_to_string(dir.join("labels.json"))?;
        let labels: Vec<String> =
            serde_json::from_str(&labels_text).map_err(|e| ClassifierError::InvalidArtifact {
                reason: format!("failed to parse labels.json: {}", e),
            })?;
        if labels.is_empty() {
            return Err(ClassifierError::InvalidArtifact {
                reason: "labels.json holds no class names".to_string(),
            });
        }

        let tensors = candle_core::safetensors::load(dir.join("head.safetensors"), &Device::Cpu)?;
        let weight = tensors
            .get("linear.weight")
            .ok_or_else(|| ClassifierError::InvalidArtifact {
                reason: "missing tensor linear.weight".to_string(),
            })?
            .to_dtype(DType::F32)?
            .to_vec2::<f32>()?;
        let bias = tensors
            .get("linear.bias")
            .ok_or_else(|| ClassifierError::InvalidArtifact {
                reason: "missing tensor linear.bias".to_string(),
            })?
            .to_dtype(DType::F32)?
            .to_vec1::<f32>()?;

        if weight.len() != labels.len() || bias.len() != labels.len() {
            return Err(ClassifierError::InvalidArtifact {
                reason: format!(
                    "class count mismatch: {} labels, weight rows {}, bias {}",
                    labels.len(),
                    weight.len(),
                    bias.len()
                ),
            });
        }
        if weight.iter().any(|row| row.is_empty()) {
            return Err(ClassifierError::InvalidArtifact {
                reason: "weight matrix has an empty row".to_string(),
            });
        }

        info!(
            model_dir = %dir.display(),
            classes = labels.len(),
            dim = weight[0].len(),
            "Classifier head loaded"
        );

        Ok(Self {
            backend: ClassifierBackend::Model { weight, bias },
            labels,
        })
    }

    /// Creates a stub classifier directly (never fails).
    pub fn stub() -> Self {
        Self {
            backend: ClassifierBackend::Stub,
            labels: STUB_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Class names, in decision-row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Expected embedding width (`None` in stub mode).
    pub fn input_dim(&self) -> Option<usize> {
        match &self.backend {
            ClassifierBackend::Model { weight, .. } => Some(weight[0].len()),
            ClassifierBackend::Stub => None,
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, ClassifierBackend::Stub)
    }

    /// Classifies one embedding, returning the label and a confidence.
    ///
    /// Margins from a one-vs-rest linear head are not calibrated
    /// probabilities; the confidence is their softmax, a stable relative
    /// measure.
    pub fn classify(&self, embedding: &[f32]) -> Result<(String, f64), ClassifierError> {
        match &self.backend {
            ClassifierBackend::Model { weight, bias } => {
                let dim = weight[0].len();
                if embedding.len() != dim {
                    return Err(ClassifierError::DimensionMismatch {
                        expected: dim,
                        got: embedding.len(),
                    });
                }

                let margins: Vec<f32> = weight
                    .iter()
                    .zip(bias)
                    .map(|(row, b)| {
                        row.iter().zip(embedding).map(|(w, x)| w * x).sum::<f32>() + b
                    })
                    .collect();

                let best = argmax(&margins);
                Ok((self.labels[best].clone(), softmax_at(&margins, best)))
            }
            ClassifierBackend::Stub => {
                let index = stub_index(embedding, self.labels.len());
                // A fixed mid-range confidence keeps stub responses
                // recognizable in logs and tests.
                Ok((self.labels[index].clone(), 0.75))
            }
        }
    }
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

fn softmax_at(margins: &[f32], index: usize) -> f64 {
    let max = margins[argmax(margins)];
    let sum: f64 = margins.iter().map(|m| f64::from(m - max).exp()).sum();
    f64::from(margins[index] - max).exp() / sum
}

fn stub_index(embedding: &[f32], classes: usize) -> usize {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    for value in embedding {
        value.to_bits().hash(&mut hasher);
    }
    (hasher.finish() % classes as u64) as usize
}
