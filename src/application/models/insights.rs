use crate::utils::analytics::engagement_rate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

/// Aggregated account counters over a fixed window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub reach: u64,
    pub impressions: u64,
    pub profile_views: u64,
    pub website_clicks: u64,
    /// reach / impressions × 100, or 0 without impressions
    pub engagement_rate: f64,
    pub period: Period,
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsSource {
    Live,
    /// Produced by the synthetic fallback; not real account data.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub snapshot: AnalyticsSnapshot,
    pub source: AnalyticsSource,
}

impl AnalyticsReport {
    pub fn is_synthetic(&self) -> bool {
        self.source == AnalyticsSource::Synthetic
    }
}

/// Body of `GET /{ig-user-id}/insights`
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub data: Vec<InsightMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightMetric {
    pub name: String,
    pub period: Option<String>,
    #[serde(default)]
    pub values: Vec<InsightValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightValue {
    #[serde(default)]
    pub value: u64,
    pub end_time: Option<String>,
}

impl InsightsResponse {
    /// Sum of the daily values of `name`, saturating at `u64::MAX`; 0 when
    /// the metric is absent.
    pub fn total(&self, name: &str) -> u64 {
        self.data
            .iter()
            .find(|metric| metric.name == name)
            .map(|metric| {
                metric
                    .values
                    .iter()
                    .fold(0u64, |acc, v| acc.saturating_add(v.value))
            })
            .unwrap_or(0)
    }

    pub fn into_snapshot(self, period: Period) -> AnalyticsSnapshot {
        let reach = self.total("reach");
        let impressions = self.total("impressions");
        AnalyticsSnapshot {
            reach,
            impressions,
            profile_views: self.total("profile_views"),
            website_clicks: self.total("website_clicks"),
            engagement_rate: engagement_rate(reach, impressions),
            period,
        }
    }
}
