//! Store interface

use crate::error::StoreResult;
use async_trait::async_trait;
use uxlens_model::{Analysis, AnalysisId, NewAnalysis};

/// Document store for analysis records
///
/// The store owns identity: [`insert`](Self::insert) issues the id and the
/// timestamps. Records are immutable once written.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist a new record and return it with its issued id
    async fn insert(&self, analysis: NewAnalysis) -> StoreResult<Analysis>;

    /// Look up a record by id
    async fn get(&self, id: &AnalysisId) -> StoreResult<Option<Analysis>>;

    /// Number of stored records
    async fn count(&self) -> StoreResult<usize>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}
