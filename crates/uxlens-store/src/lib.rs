//! UX Lens analysis persistence
//!
//! [`AnalysisStore`] is the seam between the pipeline and storage. Two
//! backends ship with the workspace:
//!
//! - [`MemoryStore`]: `DashMap`-backed, for tests and throwaway servers
//! - [`SqliteStore`]: one JSON document per row in a SQLite file
//!
//! # Example
//!
//! ```rust,ignore
//! use uxlens_store::{AnalysisStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let stored = store.insert(new_analysis).await?;
//! assert_eq!(store.get(&stored.id).await?, Some(stored));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod memory;
mod sqlite;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::AnalysisStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
