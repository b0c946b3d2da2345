//! Application configuration
//!
//! Loaded from an optional TOML file; every key has a default so an empty
//! file is valid. The binary layers CLI flags and environment on top.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:3000"
//!
//! [gemini]
//! model = "gemini-flash-latest"
//!
//! [store]
//! backend = "sqlite"
//! path = "uxlens.db"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uxlens_gemini::GeminiConfig;
use uxlens_store::{AnalysisStore, MemoryStore, SqliteStore, StoreResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Model backend
    pub gemini: GeminiConfig,
    /// Analysis limits
    pub pipeline: PipelineConfig,
    /// Persistence backend
    pub store: StoreBackend,
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Read`] when the file is unreadable, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With model configuration
    #[inline]
    #[must_use]
    pub fn with_gemini(mut self, gemini: GeminiConfig) -> Self {
        self.gemini = gemini;
        self
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.server.bind = bind;
        self
    }

    /// With store backend
    #[inline]
    #[must_use]
    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// With pipeline limits
    #[inline]
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// Largest accepted request body
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Per-run limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Deadline for both stages plus persistence
    pub timeout_secs: u64,
    /// Largest accepted decoded image
    pub max_image_bytes: usize,
}

impl PipelineConfig {
    /// With deadline
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// With image size limit
    #[inline]
    #[must_use]
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Where analyses are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; lost on restart
    #[default]
    Memory,
    /// SQLite file
    Sqlite {
        /// Database file
        path: PathBuf,
    },
}

impl StoreBackend {
    /// Open the configured store
    ///
    /// # Errors
    /// Store errors from opening or migrating the database.
    pub fn open(&self) -> StoreResult<Arc<dyn AnalysisStore>> {
        let store: Arc<dyn AnalysisStore> = match self {
            Self::Memory => Arc::new(MemoryStore::new()),
            Self::Sqlite { path } => Arc::new(SqliteStore::open(path)?),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.bind, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.gemini.model, uxlens_gemini::DEFAULT_MODEL);
    }

    #[test]
    fn reads_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            bind = "0.0.0.0:8080"

            [gemini]
            model = "gemini-2.0-flash"
            timeout_secs = 30

            [pipeline]
            timeout_secs = 45

            [store]
            backend = "sqlite"
            path = "/var/lib/uxlens/analyses.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout_secs, 30);
        assert_eq!(config.pipeline.timeout_secs, 45);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from("/var/lib/uxlens/analyses.db")
            }
        );
    }

    #[test]
    fn bad_types_are_rejected() {
        let err = AppConfig::from_toml_str("[pipeline]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::from_toml_file("/nonexistent/uxlens.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/uxlens.toml"));
    }
}
