use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    application::models::{
        media::{MediaItem, MediaPage},
        publish::{ContainerRequest, CreatedResource, PublishRequest},
    },
    config::Config,
    constants::{MAX_MEDIA_LIMIT, MEDIA_FIELDS},
    error::AppError,
    session::interface::SessionProvider,
    transport::http_client::GraphHttpClient,
    utils::caption::validate_caption,
};

/// Media listing and two-step publishing
#[async_trait]
pub trait MediaService: Send + Sync {
    /// First page of the account's media, at most `limit` items, in API order
    ///
    /// # Arguments
    /// * `limit` - Page size, between 1 and 100
    ///
    /// # Returns
    /// * `Ok(Vec<MediaItem>)` possibly empty
    /// * `Err(AppError::InvalidInput)` for an out-of-range limit, before any request
    async fn fetch_media(&self, limit: u32) -> Result<Vec<MediaItem>, AppError>;

    /// Creates a media container for `image_url` and publishes it.
    ///
    /// # Arguments
    /// * `image_url` - Publicly reachable image the Graph API will download
    /// * `caption` - Post text, hashtags included
    ///
    /// # Returns
    /// `Ok(true)` when the publish step returned an id. The post is not
    /// checked for public visibility.
    async fn publish_media(&self, image_url: &str, caption: &str) -> Result<bool, AppError>;
}

pub struct MediaServiceImpl<T: GraphHttpClient, S: SessionProvider> {
    config: Arc<Config>,
    client: Arc<T>,
    sessions: Arc<S>,
}

impl<T: GraphHttpClient, S: SessionProvider> MediaServiceImpl<T, S> {
    pub fn new(config: Arc<Config>, client: Arc<T>, sessions: Arc<S>) -> Self {
        Self {
            config,
            client,
            sessions,
        }
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }
}

fn validate_limit(limit: u32) -> Result<(), AppError> {
    if limit == 0 || limit > MAX_MEDIA_LIMIT {
        return Err(AppError::InvalidInput(format!(
            "media limit must be between 1 and {MAX_MEDIA_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

#[async_trait]
impl<T: GraphHttpClient + 'static, S: SessionProvider + 'static> MediaService
    for MediaServiceImpl<T, S>
{
    async fn fetch_media(&self, limit: u32) -> Result<Vec<MediaItem>, AppError> {
        validate_limit(limit)?;
        let session = self.sessions.require_session().await?;
        info!("Fetching up to {} media items", limit);

        let path = format!("{}/media", session.business_account_id);
        let page: MediaPage = self
            .client
            .get(
                &path,
                &[
                    ("fields", MEDIA_FIELDS.to_string()),
                    ("limit", limit.to_string()),
                    ("access_token", session.page_token.clone()),
                ],
            )
            .await?;

        let items: Vec<MediaItem> = page
            .data
            .into_iter()
            .take(limit as usize)
            .map(MediaItem::from)
            .collect();

        debug!("Fetched {} media items", items.len());
        Ok(items)
    }

    async fn publish_media(&self, image_url: &str, caption: &str) -> Result<bool, AppError> {
        Url::parse(image_url)
            .map_err(|e| AppError::InvalidInput(format!("invalid image url {image_url}: {e}")))?;
        validate_caption(caption)?;
        let session = self.sessions.require_session().await?;

        info!("Creating media container");
        let container: CreatedResource = self
            .client
            .post(
                &format!("{}/media", session.business_account_id),
                &ContainerRequest {
                    image_url,
                    caption,
                    access_token: &session.page_token,
                },
            )
            .await?;

        let Some(creation_id) = container.created_id() else {
            warn!("Container response carried no id, nothing to publish");
            return Ok(false);
        };

        info!("Publishing container {}", creation_id);
        let published: CreatedResource = self
            .client
            .post(
                &format!("{}/media_publish", session.business_account_id),
                &PublishRequest {
                    creation_id,
                    access_token: &session.page_token,
                },
            )
            .await?;

        match published.created_id() {
            Some(media_id) => {
                info!("Published media {}", media_id);
                Ok(true)
            }
            None => {
                warn!("Publish response carried no id");
                Ok(false)
            }
        }
    }
}
