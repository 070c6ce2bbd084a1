/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 12/5/25
 ******************************************************************************/
use reqwest::StatusCode;
use thiserror::Error;

/// Every failure the client can surface.
///
/// Resolver operations return these untouched. Resource operations do too,
/// except analytics when the synthetic fallback is enabled.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required setting is missing. Detected before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A token exchange step returned a non-success status or a malformed body.
    #[error("auth exchange error: {0}")]
    AuthExchange(String),

    /// The authenticated identity has no linked business account.
    #[error("no Instagram Business Account found; connect your Instagram account to a Facebook Page")]
    BusinessAccountNotFound,

    /// A resource call was attempted without a resolved session.
    #[error("session not established")]
    SessionNotEstablished,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected http status: {status}, body: {body}")]
    Unexpected { status: StatusCode, body: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// True when retrying without user action cannot succeed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppError::BusinessAccountNotFound | AppError::Configuration(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}
