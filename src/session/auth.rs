use crate::config::Config;
use crate::constants::{ACCESS_TOKEN_KEY, LONG_LIVED_GRANT_TYPE, PAGE_FIELDS};
use crate::error::AppError;
use crate::session::authorization::authorization_url;
use crate::session::interface::{Session, SessionProvider};
use crate::session::session_response::{PagesResponse, TokenResponse};
use crate::storage::token_store::TokenStore;
use crate::transport::http_client::GraphHttpClient;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Performs the OAuth code exchange and business account resolution, and
/// owns the resulting session.
///
/// The in-memory session and its persisted token are written only here:
/// by [`exchange_authorization_code`](Self::exchange_authorization_code),
/// [`restore_session`](Self::restore_session) and
/// [`clear_session`](Self::clear_session). No step is retried.
pub struct SessionResolver<C: GraphHttpClient> {
    config: Arc<Config>,
    client: Arc<C>,
    store: Arc<dyn TokenStore>,
    session: RwLock<Option<Session>>,
}

impl<C: GraphHttpClient> SessionResolver<C> {
    pub fn new(config: Arc<Config>, client: Arc<C>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            client,
            store,
            session: RwLock::new(None),
        }
    }

    pub fn get_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Builds the OAuth dialog URL the user is sent to.
    ///
    /// # Returns
    /// * `Ok(Url)` carrying client id, redirect URI, scopes and `response_type=code`
    /// * `Err(AppError::Configuration)` when the client id or redirect URI is unset
    pub fn build_authorization_url(&self) -> Result<Url, AppError> {
        authorization_url(&self.config)
    }

    /// Code → short-lived token → long-lived token → business account.
    ///
    /// On success the session is cached and the long-lived token persisted.
    /// On failure nothing is persisted and any previous session is kept.
    ///
    /// # Arguments
    /// * `code` - Authorization code taken from the redirect
    ///
    /// # Returns
    /// * `Ok(Session)` once all three steps succeed
    /// * `Err(AppError::AuthExchange)` when a token step is rejected
    /// * `Err(AppError::BusinessAccountNotFound)` when no page links a business account
    #[instrument(skip(self, code))]
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<Session, AppError> {
        if code.trim().is_empty() {
            return Err(AppError::InvalidInput("authorization code is empty".to_string()));
        }
        let credentials = &self.config.credentials;
        let client_id = credentials.require_client_id()?;
        let client_secret = credentials.require_client_secret()?;
        let redirect_uri = credentials.require_redirect_uri()?;

        info!("Exchanging authorization code for a short-lived token");
        let short_lived = self
            .request_token(&[
                ("client_id", client_id.to_string()),
                ("client_secret", client_secret.to_string()),
                ("redirect_uri", redirect_uri.to_string()),
                ("code", code.to_string()),
            ])
            .await?;

        info!("Upgrading to a long-lived token");
        let long_lived = self
            .request_token(&[
                ("grant_type", LONG_LIVED_GRANT_TYPE.to_string()),
                ("client_id", client_id.to_string()),
                ("client_secret", client_secret.to_string()),
                ("fb_exchange_token", short_lived),
            ])
            .await?;

        let session = self.resolve_business_account(long_lived).await?;

        self.store.set(ACCESS_TOKEN_KEY, &session.long_lived_token)?;
        *self.session.write().await = Some(session.clone());

        info!(
            "Session established for business account {}",
            session.business_account_id
        );
        Ok(session)
    }

    /// Re-resolves the business account from a persisted token.
    ///
    /// Returns `Ok(None)` when nothing is persisted, or when the persisted
    /// token no longer resolves; in that case the token is discarded.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<Option<Session>, AppError> {
        let token = match self.store.get(ACCESS_TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => {
                debug!("No persisted token to restore");
                return Ok(None);
            }
        };

        match self.resolve_business_account(token).await {
            Ok(session) => {
                *self.session.write().await = Some(session.clone());
                info!(
                    "Session restored for business account {}",
                    session.business_account_id
                );
                Ok(Some(session))
            }
            Err(e) => {
                warn!("Persisted token is no longer valid, discarding it: {}", e);
                *self.session.write().await = None;
                self.store.remove(ACCESS_TOKEN_KEY)?;
                Ok(None)
            }
        }
    }

    /// Drops the in-memory session and deletes the persisted token.
    pub async fn clear_session(&self) -> Result<(), AppError> {
        *self.session.write().await = None;
        self.store.remove(ACCESS_TOKEN_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    async fn request_token(&self, query: &[(&str, String)]) -> Result<String, AppError> {
        let response: TokenResponse = self
            .client
            .get("oauth/access_token", query)
            .await
            .map_err(|e| match e {
                AppError::Unexpected { status, body } => {
                    AppError::AuthExchange(format!("token endpoint returned {status}: {body}"))
                }
                AppError::Json(e) => {
                    AppError::AuthExchange(format!("malformed token response: {e}"))
                }
                other => other,
            })?;

        match response.access_token {
            Some(token) if !token.is_empty() => {
                debug!(
                    "Token received (type {:?}, expires in {:?}s)",
                    response.token_type, response.expires_in
                );
                Ok(token)
            }
            _ => Err(AppError::AuthExchange(
                "token response has no access_token".to_string(),
            )),
        }
    }

    async fn resolve_business_account(&self, long_lived_token: String) -> Result<Session, AppError> {
        debug!("Enumerating linked pages");
        let pages: PagesResponse = self
            .client
            .get(
                "me/accounts",
                &[
                    ("access_token", long_lived_token.clone()),
                    ("fields", PAGE_FIELDS.to_string()),
                ],
            )
            .await?;

        let page = pages.first_linked().ok_or(AppError::BusinessAccountNotFound)?;
        let business_account_id = page
            .instagram_business_account
            .as_ref()
            .map(|account| account.id.clone())
            .ok_or(AppError::BusinessAccountNotFound)?;
        let page_token = page.access_token.clone().ok_or_else(|| {
            AppError::AuthExchange(format!("page {} has no access token", page.id))
        })?;

        debug!(
            "Page {} ({:?}) links business account {}",
            page.id, page.name, business_account_id
        );
        Ok(Session {
            long_lived_token,
            page_token,
            business_account_id,
        })
    }
}

#[async_trait]
impl<C: GraphHttpClient> SessionProvider for SessionResolver<C> {
    async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }
}

#[cfg(test)]
mod tests_session_resolver {
    use super::*;
    use crate::config::Credentials;
    use crate::storage::token_store::{MemoryTokenStore, MockTokenStore};
    use crate::transport::http_client::GraphHttpClientImpl;
    use crate::utils::logger::setup_logger;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn test_config(server: &ServerGuard) -> Arc<Config> {
        let mut config = Config::new();
        config.rest_api.base_url = server.url();
        config.rest_api.timeout = 5;
        config.credentials = Credentials {
            client_id: Some("app-123".to_string()),
            client_secret: Some("s3cret".to_string()),
            redirect_uri: Some("https://app.example.com/".to_string()),
        };
        Arc::new(config)
    }

    fn resolver(
        server: &ServerGuard,
        store: Arc<dyn TokenStore>,
    ) -> SessionResolver<GraphHttpClientImpl> {
        let config = test_config(server);
        let client = Arc::new(GraphHttpClientImpl::new(&config.rest_api).unwrap());
        SessionResolver::new(config, client, store)
    }

    async fn mock_code_exchange(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
        server
            .mock("GET", "/oauth/access_token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "abc123".into()),
                Matcher::UrlEncoded("client_id".into(), "app-123".into()),
                Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
                Matcher::UrlEncoded("redirect_uri".into(), "https://app.example.com/".into()),
            ]))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_long_lived(server: &mut ServerGuard, body: &str) -> Mock {
        server
            .mock("GET", "/oauth/access_token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "fb_exchange_token".into()),
                Matcher::UrlEncoded("fb_exchange_token".into(), "SHORT".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_pages(server: &mut ServerGuard, token: &str, body: &str) -> Mock {
        server
            .mock("GET", "/me/accounts")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("access_token".into(), token.into()),
                Matcher::UrlEncoded(
                    "fields".into(),
                    "id,name,access_token,instagram_business_account".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    const LINKED_PAGES: &str = r#"{"data":[
        {"id":"100","name":"Blog","access_token":"OTHER"},
        {"id":"200","name":"Shop","access_token":"P","instagram_business_account":{"id":"17841"}}
    ]}"#;

    #[tokio::test]
    async fn test_exchange_runs_three_steps_in_order() {
        setup_logger();
        let mut server = Server::new_async().await;
        let step1 = mock_code_exchange(&mut server, 200, r#"{"access_token":"SHORT"}"#).await;
        let step2 = mock_long_lived(&mut server, r#"{"access_token":"T","expires_in":5183944}"#).await;
        let step3 = mock_pages(&mut server, "T", LINKED_PAGES).await;

        let store = Arc::new(MemoryTokenStore::new());
        let resolver = resolver(&server, store.clone());

        let session = resolver.exchange_authorization_code("abc123").await.unwrap();

        assert_eq!(session, Session::new("T", "P", "17841"));
        assert_eq!(resolver.current_session().await, Some(session));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("T"));
        step1.assert_async().await;
        step2.assert_async().await;
        step3.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_business_account_persists_nothing() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _s1 = mock_code_exchange(&mut server, 200, r#"{"access_token":"SHORT"}"#).await;
        let _s2 = mock_long_lived(&mut server, r#"{"access_token":"T"}"#).await;
        let _s3 = mock_pages(
            &mut server,
            "T",
            r#"{"data":[{"id":"100","name":"Blog","access_token":"OTHER"}]}"#,
        )
        .await;

        let store = Arc::new(MemoryTokenStore::new());
        let resolver = resolver(&server, store.clone());

        let err = resolver.exchange_authorization_code("abc123").await.unwrap_err();

        assert!(matches!(err, AppError::BusinessAccountNotFound));
        assert!(err.is_terminal());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(resolver.current_session().await, None);
    }

    #[tokio::test]
    async fn test_rejected_code_stops_before_second_step() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _s1 = mock_code_exchange(
            &mut server,
            400,
            r#"{"error":{"message":"Invalid verification code format."}}"#,
        )
        .await;
        let step2 = server
            .mock("GET", "/oauth/access_token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "fb_exchange_token".into()))
            .expect(0)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let resolver = resolver(&server, store.clone());

        let err = resolver.exchange_authorization_code("abc123").await.unwrap_err();
        assert!(matches!(err, AppError::AuthExchange(msg) if msg.contains("400")));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        step2.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_access_token_field() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _s1 = mock_code_exchange(&mut server, 200, r#"{"token_type":"bearer"}"#).await;

        let resolver = resolver(&server, Arc::new(MemoryTokenStore::new()));
        let err = resolver.exchange_authorization_code("abc123").await.unwrap_err();
        assert!(matches!(err, AppError::AuthExchange(msg) if msg.contains("access_token")));
    }

    #[tokio::test]
    async fn test_missing_secret_fails_before_network() {
        let mut server = Server::new_async().await;
        let any = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut config = (*test_config(&server)).clone();
        config.credentials.client_secret = None;
        let config = Arc::new(config);
        let client = Arc::new(GraphHttpClientImpl::new(&config.rest_api).unwrap());
        let resolver = SessionResolver::new(config, client, Arc::new(MemoryTokenStore::new()));

        let err = resolver.exchange_authorization_code("abc123").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        any.assert_async().await;
    }

    #[tokio::test]
    async fn test_store_failure_leaves_no_session() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _s1 = mock_code_exchange(&mut server, 200, r#"{"access_token":"SHORT"}"#).await;
        let _s2 = mock_long_lived(&mut server, r#"{"access_token":"T"}"#).await;
        let _s3 = mock_pages(&mut server, "T", LINKED_PAGES).await;

        let mut store = MockTokenStore::new();
        store
            .expect_set()
            .times(1)
            .returning(|_, _| Err(AppError::Storage("disk full".to_string())));

        let resolver = resolver(&server, Arc::new(store));
        let err = resolver.exchange_authorization_code("abc123").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(!resolver.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_with_shared_store() {
        setup_logger();
        let mut server = Server::new_async().await;
        let pages = mock_pages(&mut server, "T", LINKED_PAGES).await;

        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "T").unwrap();

        let resolver = resolver(&server, store.clone());
        let restored = resolver.restore_session().await.unwrap();

        assert_eq!(restored, Some(Session::new("T", "P", "17841")));
        assert!(resolver.is_authenticated().await);
        pages.assert_async().await;
    }

    #[tokio::test]
    async fn test_restore_without_token() {
        let server = Server::new_async().await;
        let resolver = resolver(&server, Arc::new(MemoryTokenStore::new()));
        assert_eq!(resolver.restore_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_discards_invalid_token() {
        setup_logger();
        let mut server = Server::new_async().await;
        let _pages = server
            .mock("GET", "/me/accounts")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":{"message":"Session has expired"}}"#)
            .create_async()
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "EXPIRED").unwrap();

        let resolver = resolver(&server, store.clone());
        assert_eq!(resolver.restore_session().await.unwrap(), None);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_then_restore_yields_none() {
        setup_logger();
        let mut server = Server::new_async().await;
        let pages = mock_pages(&mut server, "T", LINKED_PAGES).await;

        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "T").unwrap();
        let resolver = resolver(&server, store.clone());
        assert!(resolver.restore_session().await.unwrap().is_some());

        resolver.clear_session().await.unwrap();
        resolver.clear_session().await.unwrap();

        assert_eq!(resolver.current_session().await, None);
        assert_eq!(resolver.restore_session().await.unwrap(), None);
        pages.assert_async().await;
    }

    #[tokio::test]
    async fn test_restore_discards_token_without_business_account() {
        setup_logger();
        let mut server = Server::new_async().await;
        let pages = mock_pages(
            &mut server,
            "T",
            r#"{"data":[
                {"id":"100","name":"Blog","access_token":"OTHER"},
                {"id":"101","name":"Club","access_token":"OTHER2"}
            ]}"#,
        )
        .await;

        let store = Arc::new(MemoryTokenStore::new());
        store.set(ACCESS_TOKEN_KEY, "T").unwrap();

        let resolver = resolver(&server, store.clone());
        assert_eq!(resolver.restore_session().await.unwrap(), None);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(!resolver.is_authenticated().await);
        pages.assert_async().await;
    }

    #[tokio::test]
    async fn test_debug_logs_never_contain_tokens() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut server = Server::new_async().await;
        let _s1 = mock_code_exchange(&mut server, 200, r#"{"access_token":"SHORT"}"#).await;
        let _s2 = mock_long_lived(&mut server, r#"{"access_token":"long-lived-9f3a"}"#).await;
        let _s3 = mock_pages(
            &mut server,
            "long-lived-9f3a",
            r#"{"data":[{"id":"200","name":"Shop","access_token":"page-tok-7c21","instagram_business_account":{"id":"17841"}}]}"#,
        )
        .await;

        let resolver = resolver(&server, Arc::new(MemoryTokenStore::new()));
        let session = resolver.exchange_authorization_code("abc123").await.unwrap();
        assert_eq!(session.page_token, "page-tok-7c21");

        let output = logs.contents();
        assert!(output.contains("Response Body"));
        assert!(output.contains("[REDACTED]"));
        for secret in ["SHORT", "long-lived-9f3a", "page-tok-7c21", "s3cret", "abc123"] {
            assert!(!output.contains(secret), "{secret} leaked into logs");
        }
    }
}
