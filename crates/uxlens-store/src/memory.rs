//! In-process store

use crate::error::StoreResult;
use crate::store::AnalysisStore;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uxlens_model::{Analysis, AnalysisId, NewAnalysis};

/// Concurrent in-memory store; contents are lost on restart
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<AnalysisId, Analysis>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn insert(&self, analysis: NewAnalysis) -> StoreResult<Analysis> {
        let record = analysis.into_analysis(AnalysisId::new(), Utc::now());
        self.records.insert(record.id, record.clone());
        tracing::debug!(id = %record.id, backend = "memory", "analysis stored");
        Ok(record)
    }

    async fn get(&self, id: &AnalysisId) -> StoreResult<Option<Analysis>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.len())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxlens_model::Metrics;

    fn draft(name: &str) -> NewAnalysis {
        NewAnalysis {
            file_name: name.to_string(),
            image_url: "data:image/png;base64,AAAA".to_string(),
            metrics: Metrics::default(),
            hotspots: Vec::new(),
            insights: Vec::new(),
            user_path: None,
            element_breakdown: None,
            strengths: Vec::new(),
            drop_off_points: Vec::new(),
        }
    }

    #[tokio::test]
    async fn insert_issues_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert(draft("a.png")).await.unwrap();
        let b = store.insert(draft("b.png")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn get_returns_stored_record() {
        let store = MemoryStore::new();
        let stored = store.insert(draft("home.png")).await.unwrap();

        let fetched = store.get(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(store.get(&AnalysisId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.insert(draft("x.png")).await.unwrap();
        assert_eq!(other.count().await.unwrap(), 1);
    }
}
