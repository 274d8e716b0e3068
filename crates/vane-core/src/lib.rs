//! Vane: headline sentiment scoring.
//!
//! The crate has two halves that meet over one HTTP contract:
//!
//! - The **scoring pipeline** ([`embedding`], [`classifier`], [`scoring`])
//!   turns headlines into sentiment labels with optional confidences. The
//!   server crate wraps it in an axum gateway.
//! - The **client shell** ([`session`], [`client`], [`input`], [`export`])
//!   manages an editable headline list, sends it for scoring, and renders
//!   or exports the results.
//!
//! Between them sits [`normalize`]: backends answer in several JSON
//! shapes, and the normalizer converts any of them into one canonical
//! ordered list of [`ScoreRecord`](record::ScoreRecord)s aligned with the
//! request.
//!
//! Model loading and the encoder/classifier both support a deterministic
//! stub mode so tests and local development need no model files.

pub mod classifier;
pub mod client;
pub mod config;
pub mod embedding;
pub mod export;
pub mod input;
pub mod normalize;
pub mod record;
pub mod scoring;
pub mod session;

pub use classifier::{ClassifierConfig, ClassifierError, LinearClassifier, STUB_LABELS};
pub use client::{ApiClient, ClientError, StatusResponse};
pub use config::{ClientConfig, ConfigError, ServiceConfig};
pub use embedding::{EmbeddingError, EncoderConfig, STUB_EMBEDDING_DIM, SentenceEncoder};
pub use export::{export_filename, to_csv, write_csv};
pub use input::{InputError, headlines_from_text, load_headlines, load_headlines_from_path};
pub use normalize::{NormalizeError, normalize};
pub use record::ScoreRecord;
pub use scoring::{HeadlineScorer, Prediction, ScoringError};
pub use session::{HeadlineRow, Session, SessionError, SessionPhase};
