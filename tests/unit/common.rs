use ig_graph_client::config::{Config, Credentials};
use mockito::{Matcher, Mock, ServerGuard};

pub fn test_config(server: &ServerGuard) -> Config {
    let mut config = Config::new();
    config.rest_api.base_url = server.url();
    config.rest_api.timeout = 5;
    config.credentials = Credentials {
        client_id: Some("app-123".to_string()),
        client_secret: Some("s3cret".to_string()),
        redirect_uri: Some("https://app.example.com/".to_string()),
    };
    config.analytics.use_mock_on_failure = false;
    config
}

/// Mocks the three exchange steps for code `abc123`, yielding
/// `Session { "T", "P", "17841" }`.
pub async fn mock_exchange(server: &mut ServerGuard) -> Vec<Mock> {
    let code = server
        .mock("GET", "/oauth/access_token")
        .match_query(Matcher::UrlEncoded("code".into(), "abc123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"SHORT","token_type":"bearer"}"#)
        .create_async()
        .await;
    let long_lived = server
        .mock("GET", "/oauth/access_token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "fb_exchange_token".into()),
            Matcher::UrlEncoded("fb_exchange_token".into(), "SHORT".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"T","token_type":"bearer","expires_in":5183944}"#)
        .create_async()
        .await;
    let pages = mock_pages(server).await;
    vec![code, long_lived, pages]
}

pub async fn mock_pages(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/me/accounts")
        .match_query(Matcher::UrlEncoded("access_token".into(), "T".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data":[{"id":"200","name":"Shop","access_token":"P","instagram_business_account":{"id":"17841"}}]}"#,
        )
        .create_async()
        .await
}
