/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 3/9/24
******************************************************************************/

//! Client for an Instagram Business account reached through the Facebook
//! Graph API.
//!
//! [`session::auth::SessionResolver`] runs the OAuth code exchange and
//! resolves the business account; the services in
//! [`application::services`] read the profile, media and insights and
//! publish posts with the resolved session.
//!
//! ```no_run
//! use ig_graph_client::application::client::InstagramClient;
//! use ig_graph_client::application::services::account_service::AccountService;
//! use ig_graph_client::config::Config;
//!
//! # async fn run() -> Result<(), ig_graph_client::error::AppError> {
//! let client = InstagramClient::from_config(Config::new())?;
//! if client.resolver.restore_session().await?.is_none() {
//!     println!("Log in at {}", client.resolver.build_authorization_url()?);
//!     return Ok(());
//! }
//! let profile = client.accounts.fetch_profile().await?;
//! println!("{profile}");
//! # Ok(())
//! # }
//! ```

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod presentation;

pub mod session;

pub mod storage;

pub mod transport;

pub mod utils;
