use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;

/// Resolved credential bundle required by every authenticated call.
///
/// A value always carries the page token and business account id together;
/// "no session" is `Option::None` on the holder's side.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub long_lived_token: String,
    pub page_token: String,
    pub business_account_id: String,
}

impl Session {
    pub fn new(
        long_lived_token: impl Into<String>,
        page_token: impl Into<String>,
        business_account_id: impl Into<String>,
    ) -> Self {
        Self {
            long_lived_token: long_lived_token.into(),
            page_token: page_token.into(),
            business_account_id: business_account_id.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("long_lived_token", &"[REDACTED]")
            .field("page_token", &"[REDACTED]")
            .field("business_account_id", &self.business_account_id)
            .finish()
    }
}

/// Source of the current session for resource calls.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Option<Session>;

    async fn require_session(&self) -> Result<Session, AppError> {
        self.current_session()
            .await
            .ok_or(AppError::SessionNotEstablished)
    }
}
