//! Analysis identifiers

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Unique analysis identifier (ULID for sortability)
///
/// Issued by the store when a record is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub Ulid);

impl AnalysisId {
    /// Generate new analysis ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Malformed identifier text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid analysis id '{input}'")]
pub struct IdError {
    /// The rejected input
    pub input: String,
}

impl FromStr for AnalysisId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(Self)
            .map_err(|_| IdError {
                input: s.to_string(),
            })
    }
}
