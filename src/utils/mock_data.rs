use crate::application::models::insights::{AnalyticsSnapshot, Period};
use rand::Rng;

/// Plausible weekly numbers for when live analytics are unavailable.
pub fn synthetic_snapshot<R: Rng + ?Sized>(rng: &mut R) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        reach: rng.gen_range(5_000..15_000),
        impressions: rng.gen_range(8_000..23_000),
        profile_views: rng.gen_range(1_000..4_000),
        website_clicks: rng.gen_range(100..600),
        engagement_rate: rng.gen_range(2.0..12.0),
        period: Period::Week,
    }
}
