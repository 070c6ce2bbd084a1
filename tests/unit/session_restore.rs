use crate::common::{mock_exchange, mock_pages, test_config};
use ig_graph_client::application::client::InstagramClient;
use ig_graph_client::constants::ACCESS_TOKEN_KEY;
use ig_graph_client::session::interface::SessionProvider;
use ig_graph_client::storage::token_store::{FileTokenStore, TokenStore};
use ig_graph_client::utils::logger::setup_logger;
use mockito::Server;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn test_fresh_client_restores_from_shared_storage() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _exchange = mock_exchange(&mut server).await;
    let dir = tempdir().unwrap();
    let token_path = dir.path().join("tokens.json");

    let mut config = test_config(&server);
    config.storage.token_path = token_path.clone();

    let first = InstagramClient::from_config(config.clone()).unwrap();
    let session = first
        .resolver
        .exchange_authorization_code("abc123")
        .await
        .unwrap();
    assert_eq!(
        FileTokenStore::new(&token_path)
            .get(ACCESS_TOKEN_KEY)
            .unwrap()
            .as_deref(),
        Some("T")
    );

    // a new client sees only what is on disk
    let second = InstagramClient::from_config(config).unwrap();
    assert_eq!(second.resolver.current_session().await, None);
    let restored = second.resolver.restore_session().await.unwrap();
    assert_eq!(restored, Some(session));
}

#[tokio::test]
async fn test_clear_then_restore_is_none() {
    setup_logger();
    let mut server = Server::new_async().await;
    let _pages = mock_pages(&mut server).await;
    let dir = tempdir().unwrap();
    let token_path = dir.path().join("tokens.json");
    FileTokenStore::new(&token_path)
        .set(ACCESS_TOKEN_KEY, "T")
        .unwrap();

    let mut config = test_config(&server);
    config.storage.token_path = token_path.clone();
    let client = InstagramClient::from_config(config).unwrap();

    assert!(client.resolver.restore_session().await.unwrap().is_some());
    client.resolver.clear_session().await.unwrap();

    assert_eq!(client.resolver.restore_session().await.unwrap(), None);
    assert_eq!(
        FileTokenStore::new(&token_path).get(ACCESS_TOKEN_KEY).unwrap(),
        None
    );
}
