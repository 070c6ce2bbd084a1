use anyhow::Result;
use ig_graph_client::application::client::InstagramClient;
use ig_graph_client::application::models::media::filter_media;
use ig_graph_client::application::services::account_service::AccountService;
use ig_graph_client::application::services::insights_service::InsightsService;
use ig_graph_client::application::services::media_service::MediaService;
use ig_graph_client::config::Config;
use ig_graph_client::constants::DEFAULT_MEDIA_LIMIT;
use ig_graph_client::presentation::format::format_count;
use ig_graph_client::utils::logger::setup_logger;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    let client = InstagramClient::from_config(Config::new())?;
    if client.resolver.restore_session().await?.is_none() {
        eprintln!("Not connected. Run the auth_flow example first.");
        return Ok(());
    }

    let profile = client.accounts.fetch_profile().await?;
    println!("{profile}");

    let report = client.insights.fetch_analytics().await?;
    if report.is_synthetic() {
        println!("(sample data, live insights unavailable)");
    }
    println!("{}", report.snapshot);

    let media = client.media.fetch_media(DEFAULT_MEDIA_LIMIT).await?;
    let term = env::args().nth(1).unwrap_or_default();
    for item in filter_media(&media, &term) {
        println!(
            "{} {:?} {} likes, {} comments  {}",
            item.timestamp,
            item.media_type,
            format_count(item.likes_count),
            format_count(item.comments_count),
            item.permalink
        );
    }

    Ok(())
}
