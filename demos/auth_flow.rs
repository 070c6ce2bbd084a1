/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 4/9/24
 ******************************************************************************/
use anyhow::Result;
use ig_graph_client::application::client::InstagramClient;
use ig_graph_client::config::Config;
use ig_graph_client::session::authorization::extract_authorization_code;
use ig_graph_client::utils::logger::setup_logger;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger();

    let config = Config::new();
    let client = InstagramClient::from_config(config)?;

    if let Some(session) = client.resolver.restore_session().await? {
        println!(
            "Already connected to business account {}",
            session.business_account_id
        );
        return Ok(());
    }

    println!("Open this URL and approve access:");
    println!("{}", client.resolver.build_authorization_url()?);
    print!("Paste the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut redirect = String::new();
    io::stdin().lock().read_line(&mut redirect)?;
    let code = extract_authorization_code(redirect.trim())?;

    match client.resolver.exchange_authorization_code(&code).await {
        Ok(session) => {
            println!(
                "Connected to business account {}",
                session.business_account_id
            );
        }
        Err(e) if e.is_terminal() => {
            eprintln!("Cannot connect: {e}");
        }
        Err(e) => {
            eprintln!("Login failed, try again: {e}");
        }
    }

    Ok(())
}
