use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    application::models::account::{Account, ProfileResponse},
    config::Config,
    constants::PROFILE_FIELDS,
    error::AppError,
    session::interface::SessionProvider,
    transport::http_client::GraphHttpClient,
};

/// Profile reads for the connected business account
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Fetches the current profile snapshot
    ///
    /// # Returns
    /// * `Ok(Account)` with absent counts zeroed and the placeholder avatar
    ///   substituted for a missing picture
    /// * `Err(AppError::SessionNotEstablished)` before any request when no
    ///   session is held
    async fn fetch_profile(&self) -> Result<Account, AppError>;
}

pub struct AccountServiceImpl<T: GraphHttpClient, S: SessionProvider> {
    config: Arc<Config>,
    client: Arc<T>,
    sessions: Arc<S>,
}

impl<T: GraphHttpClient, S: SessionProvider> AccountServiceImpl<T, S> {
    pub fn new(config: Arc<Config>, client: Arc<T>, sessions: Arc<S>) -> Self {
        Self {
            config,
            client,
            sessions,
        }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn set_config(&mut self, config: Arc<Config>) {
        self.config = config;
    }
}

#[async_trait]
impl<T: GraphHttpClient + 'static, S: SessionProvider + 'static> AccountService
    for AccountServiceImpl<T, S>
{
    async fn fetch_profile(&self) -> Result<Account, AppError> {
        let session = self.sessions.require_session().await?;
        info!("Fetching profile for {}", session.business_account_id);

        let raw: ProfileResponse = self
            .client
            .get(
                &session.business_account_id,
                &[
                    ("fields", PROFILE_FIELDS.to_string()),
                    ("access_token", session.page_token.clone()),
                ],
            )
            .await?;

        let account = Account::from(raw);
        debug!(
            "Profile fetched: @{} with {} followers",
            account.username, account.followers_count
        );
        Ok(account)
    }
}
