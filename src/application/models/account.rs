/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 13/5/25
******************************************************************************/
use crate::constants::PLACEHOLDER_AVATAR_URL;
use serde::{Deserialize, Serialize};

/// Kind of professional account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    #[default]
    Business,
    #[serde(alias = "MEDIA_CREATOR")]
    Creator,
    /// Any kind this client does not model yet
    #[serde(other)]
    Unknown,
}

/// Profile snapshot of the connected business account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    pub account_type: AccountType,
    pub media_count: u64,
    pub followers_count: u64,
    pub follows_count: u64,
    pub profile_picture_url: String,
    pub biography: Option<String>,
    pub website: Option<String>,
}

/// Profile as returned by `GET /{ig-user-id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub account_type: Option<AccountType>,
    pub media_count: Option<u64>,
    pub followers_count: Option<u64>,
    pub follows_count: Option<u64>,
    pub profile_picture_url: Option<String>,
    pub biography: Option<String>,
    pub website: Option<String>,
}

impl From<ProfileResponse> for Account {
    fn from(raw: ProfileResponse) -> Self {
        Account {
            id: raw.id,
            username: raw.username,
            account_type: raw.account_type.unwrap_or_default(),
            media_count: raw.media_count.unwrap_or(0),
            followers_count: raw.followers_count.unwrap_or(0),
            follows_count: raw.follows_count.unwrap_or(0),
            profile_picture_url: raw
                .profile_picture_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_AVATAR_URL.to_string()),
            biography: raw.biography,
            website: raw.website,
        }
    }
}
