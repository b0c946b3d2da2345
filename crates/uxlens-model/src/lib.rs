//! UX Lens Model
//!
//! Typed records for UI design analyses.
//!
//! # Core Concepts
//!
//! - [`raw`]: loosely shaped responses as a generative model produces them.
//!   Every field is optional and numbers are read leniently.
//! - [`ElementInventory`] / [`BehaviorReport`]: validated outputs of the two
//!   analysis stages.
//! - [`Analysis`]: the persisted record, identified by an [`AnalysisId`].
//!
//! Conversion from raw to validated types lives in `uxlens-normalize`; this
//! crate only defines shapes.
//!
//! # Example
//!
//! ```rust
//! use uxlens_model::{AnalysisId, Impact};
//! use std::str::FromStr;
//!
//! let id = AnalysisId::new();
//! let parsed = AnalysisId::from_str(&id.to_string()).unwrap();
//! assert_eq!(id, parsed);
//!
//! assert_eq!(Impact::parse_lenient("HIGH"), Impact::High);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod analysis;
mod element;
mod id;
pub mod lenient;
mod metrics;
pub mod raw;

pub use analysis::{Analysis, BehaviorReport, Hotspot, Impact, Insight, NewAnalysis};
pub use element::{Coordinates, ElementInventory, ElementKind, UiElement, VisualHierarchy};
pub use id::{AnalysisId, IdError};
pub use metrics::{BehaviorMetrics, DesignScores, ElementBreakdown, Metrics};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with analysis records
    pub use crate::{
        Analysis, AnalysisId, BehaviorMetrics, BehaviorReport, DesignScores, ElementBreakdown,
        ElementInventory, Hotspot, Impact, Insight, Metrics, NewAnalysis,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
