use crate::common::{mock_exchange, test_config};
use ig_graph_client::application::client::InstagramClient;
use ig_graph_client::application::models::insights::AnalyticsSource;
use ig_graph_client::application::services::account_service::AccountService;
use ig_graph_client::application::services::insights_service::{
    AnalyticsFallback, InsightsService,
};
use ig_graph_client::application::services::media_service::MediaService;
use ig_graph_client::error::AppError;
use ig_graph_client::session::authorization::extract_authorization_code;
use ig_graph_client::session::interface::{Session, SessionProvider};
use ig_graph_client::storage::token_store::MemoryTokenStore;
use ig_graph_client::utils::logger::setup_logger;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn test_login_profile_publish() {
    setup_logger();
    let mut server = Server::new_async().await;
    let exchange = mock_exchange(&mut server).await;
    let profile = server
        .mock("GET", "/17841")
        .match_query(Matcher::UrlEncoded("access_token".into(), "P".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"17841","username":"demo","account_type":"BUSINESS","media_count":3}"#)
        .create_async()
        .await;
    let container = server
        .mock("POST", "/17841/media")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "image_url": "https://img/x.jpg",
            "caption": "hello"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"c-1"}"#)
        .create_async()
        .await;
    let publish = server
        .mock("POST", "/17841/media_publish")
        .match_body(Matcher::PartialJson(serde_json::json!({"creation_id": "c-1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"m-1"}"#)
        .create_async()
        .await;

    let client =
        InstagramClient::new(test_config(&server), Arc::new(MemoryTokenStore::new())).unwrap();

    let code = extract_authorization_code("https://app.example.com/?code=abc123#_=_").unwrap();
    let session = client.resolver.exchange_authorization_code(&code).await.unwrap();
    assert_eq!(session, Session::new("T", "P", "17841"));

    let account = client.accounts.fetch_profile().await.unwrap();
    assert_eq!(account.id, "17841");
    assert_eq!(account.username, "demo");

    assert!(client
        .media
        .publish_media("https://img/x.jpg", "hello")
        .await
        .unwrap());

    for mock in exchange {
        mock.assert_async().await;
    }
    profile.assert_async().await;
    container.assert_async().await;
    publish.assert_async().await;
}

#[tokio::test]
async fn test_publish_reports_false_without_publish_id() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _exchange = mock_exchange(&mut server).await;
    let _container = server
        .mock("POST", "/17841/media")
        .with_status(200)
        .with_body(r#"{"id":"c-1"}"#)
        .create_async()
        .await;
    let _publish = server
        .mock("POST", "/17841/media_publish")
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let client =
        InstagramClient::new(test_config(&server), Arc::new(MemoryTokenStore::new())).unwrap();
    client.resolver.exchange_authorization_code("abc123").await.unwrap();

    assert!(!client
        .media
        .publish_media("https://img/x.jpg", "hello")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_resource_calls_before_login() {
    let server = Server::new_async().await;
    let mut config = test_config(&server);
    config.analytics.use_mock_on_failure = true;
    let client = InstagramClient::new(config, Arc::new(MemoryTokenStore::new())).unwrap();

    assert_eq!(client.resolver.current_session().await, None);
    assert!(matches!(
        client.accounts.fetch_profile().await,
        Err(AppError::SessionNotEstablished)
    ));
    assert!(matches!(
        client.media.fetch_media(20).await,
        Err(AppError::SessionNotEstablished)
    ));
    assert!(matches!(
        client.media.publish_media("https://img/x.jpg", "hi").await,
        Err(AppError::SessionNotEstablished)
    ));

    assert_eq!(client.insights.fallback(), AnalyticsFallback::SyntheticData);
    let report = client.insights.fetch_analytics().await.unwrap();
    assert_eq!(report.source, AnalyticsSource::Synthetic);
    assert!(report.snapshot.engagement_rate >= 0.0);
}
