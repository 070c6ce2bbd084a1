/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 7/9/24
 ******************************************************************************/
use serde::Deserialize;
use std::fmt;

/// Body of `oauth/access_token`, for both the code and the long-lived grant.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// Body of `me/accounts`.
#[derive(Debug, Deserialize)]
pub struct PagesResponse {
    #[serde(default)]
    pub data: Vec<Page>,
}

#[derive(Deserialize)]
pub struct Page {
    pub id: String,
    pub name: Option<String>,
    pub access_token: Option<String>,
    pub instagram_business_account: Option<BusinessAccountRef>,
}

#[derive(Debug, Deserialize)]
pub struct BusinessAccountRef {
    pub id: String,
}

fn redacted(token: &Option<String>) -> Option<&'static str> {
    token.as_ref().map(|_| "[REDACTED]")
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &redacted(&self.access_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("access_token", &redacted(&self.access_token))
            .field("instagram_business_account", &self.instagram_business_account)
            .finish()
    }
}

impl PagesResponse {
    /// First page that links a business account, in response order.
    pub fn first_linked(&self) -> Option<&Page> {
        self.data
            .iter()
            .find(|page| page.instagram_business_account.is_some())
    }
}
