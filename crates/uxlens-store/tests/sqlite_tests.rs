//! SqliteStore persistence tests

use futures::future::join_all;
use std::sync::Arc;
use uxlens_model::{
    BehaviorMetrics, ElementBreakdown, Hotspot, Impact, Insight, Metrics, NewAnalysis,
};
use uxlens_store::{AnalysisStore, SqliteStore};

fn sample() -> NewAnalysis {
    NewAnalysis {
        file_name: "checkout.png".to_string(),
        image_url: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        metrics: Metrics {
            funnel: BehaviorMetrics {
                expected_conversion_rate: Some(3.0),
                click_through_rate: Some(12.0),
                bounce_rate: Some(40.0),
                engagement_score: Some(60.0),
            },
            ..Metrics::default()
        },
        hotspots: vec![Hotspot {
            x: 50.0,
            y: 20.0,
            intensity: 90.0,
            label: "Buy now".to_string(),
        }],
        insights: vec![Insight {
            title: "Shorten the form".to_string(),
            description: "Seven fields before payment".to_string(),
            impact: Impact::High,
            category: Some("forms".to_string()),
            recommendation: None,
            expected_improvement: "+8% conversion rate".to_string(),
            confidence: Some(80.0),
        }],
        user_path: Some("F-pattern detected".to_string()),
        element_breakdown: Some(ElementBreakdown {
            cta_buttons: 2,
            forms: 1,
            ..ElementBreakdown::default()
        }),
        strengths: vec!["Clear primary action".to_string()],
        drop_off_points: vec!["Shipping form".to_string()],
    }
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analyses.db");

    let stored = {
        let store = SqliteStore::open(&path).unwrap();
        store.insert(sample()).await.unwrap()
    };

    let reopened = SqliteStore::open(&path).unwrap();
    let fetched = reopened.get(&stored.id).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(reopened.count().await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_inserts_are_all_kept() {
    let store: Arc<dyn AnalysisStore> = Arc::new(SqliteStore::in_memory().unwrap());

    let handles = (0..16).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.insert(sample()).await.unwrap().id })
    });

    let mut ids: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 16);
    assert_eq!(store.count().await.unwrap(), 16);
    assert_eq!(store.backend(), "sqlite");
}
