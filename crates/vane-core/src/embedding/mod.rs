//! Sentence embedding for headlines.
//!
//! [`SentenceEncoder`] wraps a MiniLM-class BERT encoder (safetensors +
//! tokenizer.json) with mean pooling and L2 normalization. Use
//! [`EncoderConfig::stub`] for tests and development without model files.

pub mod device;
mod error;


pub use error::EmbeddingError;

use std::path::PathBuf;

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use device::select_device;

/// Default maximum tokens per headline (MiniLM sequence limit).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Embedding width served by the stub backend (matches MiniLM-L6).
pub const STUB_EMBEDDING_DIM: usize = 384;

/// Configuration for [`SentenceEncoder`].
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Directory holding `config.json`, `tokenizer.json`, and
    /// `model.safetensors`.
    pub model_dir: PathBuf,
    /// Max tokens to consider per input.
    pub max_seq_len: usize,
    /// If true, produce deterministic embeddings without model files.
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files required).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.testing_stub {
            return Ok(());
        }
        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }
        if !self.model_dir.exists() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }
        Ok(())
    }
}

enum EncoderBackend {
    Model {
        model: BertModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Sentence encoder producing one normalized vector per headline.
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
    dim: usize,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("dim", &self.dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence encoder running in STUB mode (testing only)");
            return Ok(Self::stub_with_config(config));
        }

        let device = select_device();
        debug!(?device, "Selected compute device for sentence encoder");

        let (model, tokenizer, hidden_size) = Self::load_model(&config, &device)?;

        info!(
            model_dir = %config.model_dir.display(),
            hidden_size,
            max_seq_len = config.max_seq_len,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            dim: hidden_size,
            config,
        })
    }

    /// Creates a stub encoder directly (never fails).
    pub fn stub() -> Self {
        Self::stub_with_config(EncoderConfig::stub())
    }

    fn stub_with_config(config: EncoderConfig) -> Self {
        Self {
            backend: EncoderBackend::Stub,
            dim: STUB_EMBEDDING_DIM,
            config,
        }
    }

    fn load_model(
        config: &EncoderConfig,
        device: &Device,
    ) -> Result<(BertModel, Tokenizer, usize), EmbeddingError> {
        let dir = &config.model_dir;
        for required in ["config.json", "tokenizer.json", "model.safetensors"] {
            if !dir.join(required).exists() {
                return Err(EmbeddingError::ModelLoadFailed {
                    reason: format!("missing {} in {}", required, dir.display()),
                });
            }
        }

        let config_text = std::fs::read_to_string(dir.join("config.json"))?;
        let bert_config: BertConfig =
            serde_json::from_str(&config_text).map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("failed to parse config.json: {}", e),
            })?;

        let mut tokenizer = Tokenizer::from_file(dir.join("tokenizer.json")).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {}", e),
            }
        })?;
        let truncation = TruncationParams {
            max_length: config.max_seq_len,
            ..Default::default()
        };
        tokenizer
            .with_truncation(Some(truncation))
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("failed to configure truncation: {}", e),
            })?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[dir.join("model.safetensors")], DTYPE, device)
                .map_err(|e| EmbeddingError::ModelLoadFailed {
                    reason: format!("failed to map model.safetensors: {}", e),
                })?
        };

        // Sentence-transformers exports carry bare tensor names; HF
        // classifier checkpoints prefix them with the architecture.
        let model = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &bert_config)
        } else {
            BertModel::load(vb, &bert_config)
        }
        .map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to load BERT weights: {}", e),
        })?;

        Ok((model, tokenizer, bert_config.hidden_size))
    }

    /// Encodes a single headline.
    pub fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.encode_stub(text)),
        }
    }

    /// Encodes a batch of headlines, preserving order.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        // Sequential: batched inference would need padding-aware pooling.
        texts.iter().map(|text| self.encode(text)).collect()
    }

    fn encode_with_model(
        &self,
        text: &str,
        model: &BertModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(vec![0.0; self.dim]);
        }

        debug!(text_len = text.len(), token_count = ids.len(), "Encoding headline");

        let input_ids = Tensor::new(ids, device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let hidden = model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // A single unpadded sequence: plain mean over the token axis equals
        // the attention-masked mean.
        let pooled = hidden.mean(1)?;
        let embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;

        Ok(l2_normalize(embedding))
    }

    fn encode_stub(&self, text: &str) -> Vec<f32> {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut state = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(embedding)
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }
}

fn l2_normalize(mut embedding: Vec<f32>) -> Vec<f32> {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut embedding {
            *x /= norm;
        }
    }
    embedding
}
