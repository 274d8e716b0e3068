//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VANE_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::classifier::ClassifierConfig;
use crate::embedding::EncoderConfig;

/// Scoring service configuration loaded from environment variables.
///
/// Use [`ServiceConfig::from_env`] to read `VANE_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP server port. Default: `8004`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the sentence encoder (`config.json`,
    /// `tokenizer.json`, `model.safetensors`).
    pub encoder_path: Option<PathBuf>,

    /// Directory holding the classifier head (`head.safetensors`,
    /// `labels.json`).
    pub classifier_path: Option<PathBuf>,

    /// Include per-item confidences in scoring responses. Default: off.
    pub include_scores: bool,

    /// Serve deterministic stub predictions without model files.
    pub stub_scorer: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8004,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            encoder_path: None,
            classifier_path: None,
            include_scores: false,
            stub_scorer: false,
        }
    }
}

impl ServiceConfig {
    pub const ENV_PORT: &'static str = "VANE_PORT";
    pub const ENV_BIND_ADDR: &'static str = "VANE_BIND_ADDR";
    pub const ENV_ENCODER_PATH: &'static str = "VANE_ENCODER_PATH";
    pub const ENV_CLASSIFIER_PATH: &'static str = "VANE_CLASSIFIER_PATH";
    pub const ENV_INCLUDE_SCORES: &'static str = "VANE_INCLUDE_SCORES";
    pub const ENV_STUB_SCORER: &'static str = "VANE_STUB_SCORER";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: parse_port_from_env(Self::ENV_PORT, defaults.port)?,
            bind_addr: parse_bind_addr_from_env(Self::ENV_BIND_ADDR, defaults.bind_addr)?,
            encoder_path: parse_optional_path_from_env(Self::ENV_ENCODER_PATH),
            classifier_path: parse_optional_path_from_env(Self::ENV_CLASSIFIER_PATH),
            include_scores: parse_bool_from_env(Self::ENV_INCLUDE_SCORES, defaults.include_scores),
            stub_scorer: parse_bool_from_env(Self::ENV_STUB_SCORER, defaults.stub_scorer),
        })
    }

    /// Validates path kinds (does not open the artifacts).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.encoder_path, &self.classifier_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Encoder config for the configured model directory.
    pub fn encoder_config(&self) -> Result<EncoderConfig, ConfigError> {
        let path = self.encoder_path.clone().ok_or(ConfigError::MissingEnvVar {
            name: Self::ENV_ENCODER_PATH,
        })?;
        Ok(EncoderConfig::new(path))
    }

    /// Classifier config for the configured artifact directory.
    pub fn classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        let path = self
            .classifier_path
            .clone()
            .ok_or(ConfigError::MissingEnvVar {
                name: Self::ENV_CLASSIFIER_PATH,
            })?;
        Ok(ClassifierConfig::new(path))
    }
}

/// Client shell configuration: where the scoring service lives and how
/// long one round trip may take.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL. Default: `http://127.0.0.1:8004`.
    pub base_url: String,

    /// Scoring route. Default: `/score_headlines`.
    pub path: String,

    /// Upper bound on one scoring round trip. Default: 45 seconds.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8004".to_string(),
            path: "/score_headlines".to_string(),
            timeout: Duration::from_secs(45),
        }
    }
}

impl ClientConfig {
    pub const ENV_BASE_URL: &'static str = "VANE_API_BASE_URL";
    pub const ENV_PATH: &'static str = "VANE_API_PATH";
    pub const ENV_TIMEOUT_SECS: &'static str = "VANE_TIMEOUT_SECS";

    /// Loads client configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout_secs = parse_u64_from_env(Self::ENV_TIMEOUT_SECS, defaults.timeout.as_secs());
        Self {
            base_url: parse_string_from_env(Self::ENV_BASE_URL, defaults.base_url),
            path: parse_string_from_env(Self::ENV_PATH, defaults.path),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Full scoring endpoint, with slash placement normalized.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }

    /// Liveness endpoint derived from the base URL.
    pub fn status_url(&self) -> String {
        format!("{}/status", self.base_url.trim_end_matches('/'))
    }
}

fn parse_port_from_env(var_name: &str, default: u16) -> Result<u16, ConfigError> {
    match env::var(var_name) {
        Ok(value) => {
            let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                value: value.clone(),
                source: e,
            })?;
            if port == 0 {
                return Err(ConfigError::InvalidPort { value });
            }
            Ok(port)
        }
        Err(_) => Ok(default),
    }
}

fn parse_bind_addr_from_env(var_name: &str, default: IpAddr) -> Result<IpAddr, ConfigError> {
    match env::var(var_name) {
        Ok(value) => value
            .parse()
            .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
        Err(_) => Ok(default),
    }
}

fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn parse_string_from_env(var_name: &str, default: String) -> String {
    env::var(var_name).unwrap_or(default)
}

fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
    env::var(var_name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
