use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    application::models::insights::{AnalyticsReport, AnalyticsSource, InsightsResponse, Period},
    config::Config,
    constants::{ANALYTICS_WINDOW_DAYS, INSIGHT_METRICS},
    error::AppError,
    session::interface::SessionProvider,
    transport::http_client::GraphHttpClient,
    utils::mock_data::synthetic_snapshot,
};

/// What `fetch_analytics` does when live data cannot be had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsFallback {
    /// Errors propagate like any other resource call.
    Disabled,
    /// A missing session or a failed fetch yields a synthetic snapshot
    /// tagged [`AnalyticsSource::Synthetic`], so dashboards keep rendering.
    SyntheticData,
}

impl AnalyticsFallback {
    pub fn from_config(config: &Config) -> Self {
        if config.analytics.use_mock_on_failure {
            AnalyticsFallback::SyntheticData
        } else {
            AnalyticsFallback::Disabled
        }
    }
}

/// Weekly account insights
#[async_trait]
pub trait InsightsService: Send + Sync {
    /// Sums the last seven days of reach, impressions, profile views and
    /// website clicks. Never cached.
    async fn fetch_analytics(&self) -> Result<AnalyticsReport, AppError>;
}

pub struct InsightsServiceImpl<T: GraphHttpClient, S: SessionProvider> {
    config: Arc<Config>,
    client: Arc<T>,
    sessions: Arc<S>,
    fallback: AnalyticsFallback,
}

impl<T: GraphHttpClient, S: SessionProvider> InsightsServiceImpl<T, S> {
    /// Fallback policy is taken from `analytics.use_mock_on_failure`.
    pub fn new(config: Arc<Config>, client: Arc<T>, sessions: Arc<S>) -> Self {
        let fallback = AnalyticsFallback::from_config(&config);
        Self {
            config,
            client,
            sessions,
            fallback,
        }
    }

    pub fn with_fallback(mut self, fallback: AnalyticsFallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> AnalyticsFallback {
        self.fallback
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    async fn fetch_live(&self) -> Result<AnalyticsReport, AppError> {
        let session = self.sessions.require_session().await?;

        let until = Utc::now();
        let since = until - Duration::days(ANALYTICS_WINDOW_DAYS);
        info!("Fetching insights from {} to {}", since, until);

        let path = format!("{}/insights", session.business_account_id);
        let response: InsightsResponse = self
            .client
            .get(
                &path,
                &[
                    ("metric", INSIGHT_METRICS.to_string()),
                    ("period", "day".to_string()),
                    ("since", since.timestamp().to_string()),
                    ("until", until.timestamp().to_string()),
                    ("access_token", session.page_token.clone()),
                ],
            )
            .await?;

        let snapshot = response.into_snapshot(Period::Week);
        debug!("Insights: {:?}", snapshot);
        Ok(AnalyticsReport {
            snapshot,
            source: AnalyticsSource::Live,
        })
    }
}

fn synthetic_report() -> AnalyticsReport {
    AnalyticsReport {
        snapshot: synthetic_snapshot(&mut rand::thread_rng()),
        source: AnalyticsSource::Synthetic,
    }
}

#[async_trait]
impl<T: GraphHttpClient + 'static, S: SessionProvider + 'static> InsightsService
    for InsightsServiceImpl<T, S>
{
    async fn fetch_analytics(&self) -> Result<AnalyticsReport, AppError> {
        match self.fetch_live().await {
            Ok(report) => Ok(report),
            Err(e) => match self.fallback {
                AnalyticsFallback::SyntheticData => {
                    warn!("Live analytics unavailable, serving synthetic data: {}", e);
                    Ok(synthetic_report())
                }
                AnalyticsFallback::Disabled => Err(e),
            },
        }
    }
}
