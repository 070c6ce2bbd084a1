use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
    CarouselAlbum,
    #[serde(other)]
    Unknown,
}

/// A published post, as fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub media_type: MediaType,
    pub media_url: String,
    pub permalink: String,
    pub caption: String,
    pub timestamp: String,
    pub likes_count: u64,
    pub comments_count: u64,
    pub thumbnail_url: Option<String>,
}

/// One page of `GET /{ig-user-id}/media`. Paging cursors are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaPage {
    #[serde(default)]
    pub data: Vec<RawMedia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMedia {
    pub id: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub media_url: String,
    #[serde(default)]
    pub permalink: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    pub like_count: Option<u64>,
    pub comments_count: Option<u64>,
    pub thumbnail_url: Option<String>,
}

impl From<RawMedia> for MediaItem {
    fn from(raw: RawMedia) -> Self {
        MediaItem {
            id: raw.id,
            media_type: raw.media_type,
            media_url: raw.media_url,
            permalink: raw.permalink,
            caption: raw.caption.unwrap_or_default(),
            timestamp: raw.timestamp,
            likes_count: raw.like_count.unwrap_or(0),
            comments_count: raw.comments_count.unwrap_or(0),
            thumbnail_url: raw.thumbnail_url,
        }
    }
}

/// Items whose caption contains `term`, ignoring case. Order is kept and an
/// empty term keeps everything.
pub fn filter_media<'a>(items: &'a [MediaItem], term: &str) -> Vec<&'a MediaItem> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.caption.to_lowercase().contains(&needle))
        .collect()
}
