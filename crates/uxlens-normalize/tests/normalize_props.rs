//! Property tests for the response normalizer
//!
//! Invariants that must hold for every model response:
//! - engagement ends up in [40, 85]
//! - the funnel strictly decreases: conversion < click-through < engagement
//! - bounce is exactly clamp(100 - engagement, 15, 85)
//! - fencing a payload does not change what is parsed
//! - text without a JSON span is a format error, never a silent default

use proptest::prelude::*;
use serde_json::{json, Value};
use uxlens_model::{BehaviorMetrics, DesignScores};
use uxlens_normalize::{
    complete_design_scores, extract_object, normalize_behavior, repair_funnel, NormalizeError,
};

fn any_percentish() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        (-50.0f64..200.0).prop_map(Some),
        (0u32..120).prop_map(|v| Some(f64::from(v))),
    ]
}

proptest! {
    #[test]
    fn prop_engagement_in_range(
        engagement in -1000.0f64..1000.0,
        ctr in any_percentish(),
        conversion in any_percentish(),
    ) {
        let out = repair_funnel(BehaviorMetrics {
            engagement_score: Some(engagement),
            click_through_rate: ctr,
            expected_conversion_rate: conversion,
            bounce_rate: None,
        });

        let engagement = out.engagement_score.unwrap();
        prop_assert!((40.0..=85.0).contains(&engagement));
    }

    #[test]
    fn prop_funnel_strictly_decreases(
        engagement in -100.0f64..300.0,
        ctr in proptest::option::of(-100.0f64..300.0),
        conversion in -100.0f64..300.0,
    ) {
        let out = repair_funnel(BehaviorMetrics {
            engagement_score: Some(engagement),
            click_through_rate: ctr,
            expected_conversion_rate: Some(conversion),
            bounce_rate: None,
        });

        let engagement = out.engagement_score.unwrap();
        let conversion = out.expected_conversion_rate.unwrap();
        prop_assert!(conversion >= 0.0);
        prop_assert!(conversion < engagement, "conversion {} !< engagement {}", conversion, engagement);
        if let Some(ctr) = out.click_through_rate {
            prop_assert!(ctr < engagement, "ctr {} !< engagement {}", ctr, engagement);
            prop_assert!(conversion < ctr, "conversion {} !< ctr {}", conversion, ctr);
        }
    }

    #[test]
    fn prop_bounce_derived_exactly(
        engagement in -100.0f64..300.0,
        bounce in any_percentish(),
    ) {
        let out = repair_funnel(BehaviorMetrics {
            engagement_score: Some(engagement),
            bounce_rate: bounce,
            ..BehaviorMetrics::default()
        });

        let engagement = out.engagement_score.unwrap();
        prop_assert_eq!(out.bounce_rate, Some((100.0 - engagement).clamp(15.0, 85.0)));
    }

    #[test]
    fn prop_repair_is_idempotent(
        engagement in any_percentish(),
        ctr in any_percentish(),
        conversion in any_percentish(),
        bounce in any_percentish(),
    ) {
        let once = repair_funnel(BehaviorMetrics {
            engagement_score: engagement,
            click_through_rate: ctr,
            expected_conversion_rate: conversion,
            bounce_rate: bounce,
        });
        prop_assert_eq!(repair_funnel(once), once);
    }

    #[test]
    fn prop_overall_is_rounded_mean_of_present_axes(
        axes in proptest::collection::vec(proptest::option::of(0u32..=100), 6),
    ) {
        let values: Vec<Option<f64>> = axes.iter().map(|a| a.map(f64::from)).collect();
        let scores = DesignScores {
            visual_hierarchy: values[0],
            cta_clarity: values[1],
            information_density: values[2],
            color_harmony: values[3],
            whitespace_usage: values[4],
            mobile_readiness: values[5],
            overall_score: None,
        };

        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let expected = if present.is_empty() {
            None
        } else {
            Some((present.iter().sum::<f64>() / present.len() as f64).round())
        };
        prop_assert_eq!(complete_design_scores(scores).overall_score, expected);
    }

    #[test]
    fn prop_fenced_and_bare_payloads_parse_identically(
        engagement in 0u32..200,
        label in "[a-zA-Z ]{0,20}",
        prose in "[a-zA-Z .,!]{0,40}",
    ) {
        let payload = json!({
            "metrics": {"engagementScore": engagement},
            "hotspots": [{"x": 10, "y": 20, "intensity": 30, "label": label}]
        });
        let bare = serde_json::to_string_pretty(&payload).unwrap();
        let fenced = format!("{prose}\n```json\n{bare}\n```\n{prose}");

        let from_bare = extract_object(&bare).unwrap();
        let from_fenced = extract_object(&fenced).unwrap();
        prop_assert_eq!(&from_bare, &from_fenced);
        prop_assert_eq!(from_bare, payload);
    }

    #[test]
    fn prop_text_without_braces_is_format_error(text in "[a-zA-Z0-9 .,!?:;\n-]{0,200}") {
        let err = normalize_behavior(&text).unwrap_err();
        prop_assert!(err.is_format_error());
    }
}

#[test]
fn engagement_sixty_recomputes_click_through_to_thirty_six() {
    let report = normalize_behavior(
        r#"{"metrics": {"engagementScore": 60, "clickThroughRate": 64, "expectedConversionRate": 50}}"#,
    )
    .unwrap();
    let funnel = report.metrics.unwrap().funnel;

    assert_eq!(funnel.click_through_rate, Some(36.0));
    assert_eq!(funnel.expected_conversion_rate, Some(10.0));
    assert_eq!(funnel.bounce_rate, Some(40.0));
}

#[test]
fn overall_score_example() {
    let report = normalize_behavior(
        r#"{"metrics": {"visualHierarchy": 80, "ctaClarity": 60, "informationDensity": 40,
            "colorHarmony": 100, "whitespaceUsage": 70, "mobileReadiness": 50}}"#,
    )
    .unwrap();
    assert_eq!(report.metrics.unwrap().design.overall_score, Some(67.0));
}

#[test]
fn non_numeric_sub_scores_are_skipped_from_mean() {
    let report = normalize_behavior(
        r#"{"designScores": {"visualHierarchy": 90, "ctaClarity": "excellent", "colorHarmony": 70}}"#,
    )
    .unwrap();
    let design = report.metrics.unwrap().design;
    assert_eq!(design.cta_clarity, None);
    assert_eq!(design.overall_score, Some(80.0));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = normalize_behavior("{\"metrics\": [}").unwrap_err();
    assert!(matches!(err, NormalizeError::Parse(_)));
}

#[test]
fn extracted_object_is_value() {
    let value = extract_object("```json\n{\"a\": [1, 2]}\n```").unwrap();
    assert_eq!(value, Value::Object(serde_json::from_str("{\"a\": [1, 2]}").unwrap()));
}
