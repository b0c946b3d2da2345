//! Numeric repair of predicted metrics
//!
//! Rules applied to the conversion funnel once an engagement score is known:
//!
//! - engagement lies in `[40, 85]`; above the range it becomes 75, below it
//!   becomes 50
//! - `0 < clickThroughRate < engagementScore`, otherwise
//!   `floor(engagement * 0.6)`
//! - `0 <= expectedConversionRate < clickThroughRate`, otherwise
//!   `floor(clickThroughRate * 0.3)`
//! - `bounceRate = clamp(100 - engagement, 15, 85)`
//! - with no click-through, `0 <= expectedConversionRate < engagementScore`,
//!   otherwise `floor(floor(engagement * 0.6) * 0.3)`
//!
//! Without an engagement score the remaining values are only bounded to
//! `[0, 100]` and conversion is still kept below click-through.

use uxlens_model::{BehaviorMetrics, DesignScores, Metrics};

/// Lowest accepted engagement score
pub const ENGAGEMENT_MIN: f64 = 40.0;
/// Highest accepted engagement score
pub const ENGAGEMENT_MAX: f64 = 85.0;
/// Replacement for engagement above [`ENGAGEMENT_MAX`]
pub const ENGAGEMENT_ABOVE_RANGE: f64 = 75.0;
/// Replacement for engagement below [`ENGAGEMENT_MIN`]
pub const ENGAGEMENT_BELOW_RANGE: f64 = 50.0;
/// Click-through derived from engagement when out of order
pub const CLICK_THROUGH_RATIO: f64 = 0.6;
/// Conversion derived from click-through when out of order
pub const CONVERSION_RATIO: f64 = 0.3;
/// Bounce rate bounds
pub const BOUNCE_MIN: f64 = 15.0;
/// Bounce rate bounds
pub const BOUNCE_MAX: f64 = 85.0;

const PERCENT_MAX: f64 = 100.0;

/// Bring an engagement score into range
#[must_use]
pub fn repair_engagement(engagement: f64) -> f64 {
    if engagement > ENGAGEMENT_MAX {
        ENGAGEMENT_ABOVE_RANGE
    } else if engagement < ENGAGEMENT_MIN {
        ENGAGEMENT_BELOW_RANGE
    } else {
        engagement
    }
}

/// Repair the conversion funnel
///
/// Absent values stay absent; nothing is invented except the bounce rate,
/// which is always derived from engagement when engagement is present.
#[must_use]
pub fn repair_funnel(metrics: BehaviorMetrics) -> BehaviorMetrics {
    let mut out = metrics;

    match out.engagement_score.map(repair_engagement) {
        Some(engagement) => {
            out.engagement_score = Some(engagement);
            out.bounce_rate = Some((PERCENT_MAX - engagement).clamp(BOUNCE_MIN, BOUNCE_MAX));
            out.click_through_rate = out.click_through_rate.map(|ctr| {
                if ctr > 0.0 && ctr < engagement {
                    ctr
                } else {
                    (engagement * CLICK_THROUGH_RATIO).floor()
                }
            });
        }
        None => {
            out.bounce_rate = out.bounce_rate.map(clamp_percent);
            out.click_through_rate = out.click_through_rate.map(clamp_percent);
        }
    }

    out.expected_conversion_rate = match (out.click_through_rate, out.engagement_score) {
        (Some(ctr), _) => out
            .expected_conversion_rate
            .map(|conversion| bounded_conversion(conversion, ctr)),
        (None, Some(engagement)) => out.expected_conversion_rate.map(|conversion| {
            if conversion >= 0.0 && conversion < engagement {
                conversion
            } else {
                derived_conversion((engagement * CLICK_THROUGH_RATIO).floor())
            }
        }),
        (None, None) => out.expected_conversion_rate.map(clamp_percent),
    };

    if out != metrics {
        tracing::debug!(before = ?metrics, after = ?out, "repaired funnel metrics");
    }
    out
}

fn bounded_conversion(conversion: f64, ctr: f64) -> f64 {
    if conversion >= 0.0 && conversion < ctr {
        conversion
    } else {
        derived_conversion(ctr)
    }
}

fn derived_conversion(ctr: f64) -> f64 {
    (ctr * CONVERSION_RATIO).floor().max(0.0)
}

/// Clamp design axes to `[0, 100]` and derive the overall score
///
/// When the overall score is absent it becomes the mean of the axes that are
/// present, rounded to the nearest integer. With no axes present it stays
/// absent.
#[must_use]
pub fn complete_design_scores(scores: DesignScores) -> DesignScores {
    let mut out = scores;
    for axis in out.axes_mut() {
        *axis = axis.map(clamp_percent);
    }

    out.overall_score = match out.overall_score {
        Some(overall) => Some(clamp_percent(overall)),
        None => mean_score(&out.axes()),
    };
    out
}

/// Rounded mean of the present values, `None` when none are present
#[must_use]
pub fn mean_score(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    Some(mean.round())
}

/// Repair both metric groups
#[must_use]
pub fn repair_metrics(metrics: Metrics) -> Metrics {
    Metrics {
        funnel: repair_funnel(metrics.funnel),
        design: complete_design_scores(metrics.design),
    }
}

/// Clamp a percentage to `[0, 100]`
#[inline]
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, PERCENT_MAX)
}
