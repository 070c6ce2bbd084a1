/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/9/24
******************************************************************************/

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v18.0";
pub const DEFAULT_OAUTH_DIALOG_URL: &str = "https://www.facebook.com/v18.0/dialog/oauth";
pub const DEFAULT_REST_TIMEOUT: u64 = 30;

/// Permissions requested on the consent screen, in this order.
pub const OAUTH_SCOPES: [&str; 7] = [
    "instagram_business_basic",
    "instagram_business_manage_messages",
    "instagram_business_manage_comments",
    "instagram_business_content_publish",
    "instagram_business_manage_insights",
    "pages_read_engagement",
    "pages_show_list",
];

/// Storage key of the persisted long-lived token.
pub const ACCESS_TOKEN_KEY: &str = "instagram_access_token";

pub(crate) const LONG_LIVED_GRANT_TYPE: &str = "fb_exchange_token";

pub(crate) const PAGE_FIELDS: &str = "id,name,access_token,instagram_business_account";
pub(crate) const PROFILE_FIELDS: &str = "id,username,account_type,media_count,followers_count,follows_count,profile_picture_url,biography,website";
pub(crate) const MEDIA_FIELDS: &str = "id,media_type,media_url,permalink,caption,timestamp,like_count,comments_count,thumbnail_url";
pub(crate) const INSIGHT_METRICS: &str = "reach,impressions,profile_views,website_clicks";

pub const PLACEHOLDER_AVATAR_URL: &str = "/placeholder-avatar.jpg";

pub const DEFAULT_MEDIA_LIMIT: u32 = 20;
pub const MAX_MEDIA_LIMIT: u32 = 100;

pub const ANALYTICS_WINDOW_DAYS: i64 = 7;

pub const MAX_CAPTION_LENGTH: usize = 2200;
pub const MAX_HASHTAGS: usize = 30;
