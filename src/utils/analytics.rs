// src/utils/analytics.rs
//
// Analytics calculation utilities

/// Share of impressions that reached a unique account, as a percentage
///
/// # Arguments
///
/// * `reach` - Unique accounts reached over the window
/// * `impressions` - Total impressions over the same window
///
/// # Returns
///
/// * `f64` - `reach / impressions * 100`, or exactly `0.0` when there are no impressions
pub fn engagement_rate(reach: u64, impressions: u64) -> f64 {
    // Avoid division by zero
    if impressions == 0 {
        return 0.0;
    }

    (reach as f64 / impressions as f64) * 100.0
}
