use std::sync::Arc;
use tracing::debug;

use crate::{
    application::services::{
        account_service::AccountServiceImpl, insights_service::InsightsServiceImpl,
        media_service::MediaServiceImpl,
    },
    config::Config,
    error::AppError,
    session::auth::SessionResolver,
    storage::token_store::{FileTokenStore, TokenStore},
    transport::http_client::GraphHttpClientImpl,
};

pub type Resolver = SessionResolver<GraphHttpClientImpl>;

/// Explicitly wired resolver and resource services sharing one transport
/// and one session. Build one per account connection; there is no global
/// instance.
pub struct InstagramClient {
    pub resolver: Arc<Resolver>,
    pub accounts: AccountServiceImpl<GraphHttpClientImpl, Resolver>,
    pub media: MediaServiceImpl<GraphHttpClientImpl, Resolver>,
    pub insights: InsightsServiceImpl<GraphHttpClientImpl, Resolver>,
}

impl InstagramClient {
    pub fn new(config: Config, store: Arc<dyn TokenStore>) -> Result<Self, AppError> {
        let config = Arc::new(config);
        let client = Arc::new(GraphHttpClientImpl::new(&config.rest_api)?);
        let resolver = Arc::new(SessionResolver::new(config.clone(), client.clone(), store));

        Ok(Self {
            accounts: AccountServiceImpl::new(config.clone(), client.clone(), resolver.clone()),
            media: MediaServiceImpl::new(config.clone(), client.clone(), resolver.clone()),
            insights: InsightsServiceImpl::new(config, client, resolver.clone()),
            resolver,
        })
    }

    /// Persists the token in the file named by `storage.token_path`.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        debug!("Using token store at {}", config.storage.token_path.display());
        let store = Arc::new(FileTokenStore::new(config.storage.token_path.clone()));
        Self::new(config, store)
    }
}
