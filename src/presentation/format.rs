use crate::application::models::account::{Account, AccountType};
use crate::application::models::insights::{AnalyticsSnapshot, Period};
use std::fmt;

/// `1234567` → `"1,234,567"`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One decimal place and a percent sign.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Business => write!(f, "BUSINESS"),
            AccountType::Creator => write!(f, "CREATOR"),
            AccountType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl fmt::Display for AnalyticsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reach {} | impressions {} | profile views {} | website clicks {} | engagement {} ({})",
            format_count(self.reach),
            format_count(self.impressions),
            format_count(self.profile_views),
            format_count(self.website_clicks),
            format_rate(self.engagement_rate),
            self.period
        )
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{} [{}] {} posts, {} followers, {} following",
            self.username,
            self.account_type,
            format_count(self.media_count),
            format_count(self.followers_count),
            format_count(self.follows_count)
        )
    }
}
