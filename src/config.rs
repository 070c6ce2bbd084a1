use crate::constants::{DEFAULT_GRAPH_BASE_URL, DEFAULT_OAUTH_DIALOG_URL, DEFAULT_REST_TIMEOUT};
use crate::error::AppError;
use crate::storage::config::StorageConfig;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::error;

/// OAuth application credentials. Each one is only required by the call
/// paths that use it, so all of them are optional here.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub rest_api: RestApiConfig,
    pub oauth: OAuthConfig,
    pub storage: StorageConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfig {
    pub dialog_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Serve synthetic analytics instead of failing when the live fetch fails.
    pub use_mock_on_failure: bool,
}

impl Credentials {
    pub fn require_client_id(&self) -> Result<&str, AppError> {
        require(&self.client_id, "client_id (IG_CLIENT_ID)")
    }

    pub fn require_client_secret(&self) -> Result<&str, AppError> {
        require(&self.client_secret, "client_secret (IG_CLIENT_SECRET)")
    }

    pub fn require_redirect_uri(&self) -> Result<&str, AppError> {
        require(&self.redirect_uri, "redirect_uri (IG_REDIRECT_URI)")
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Configuration(format!("missing required setting {name}"))),
    }
}

fn json_opt(value: &Option<String>) -> String {
    value
        .as_ref()
        .map_or("null".to_string(), |v| serde_json::Value::String(v.clone()).to_string())
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"client_id\":{},\"client_secret\":{},\"redirect_uri\":{}}}",
            json_opt(&self.client_id),
            self.client_secret
                .as_ref()
                .map_or("null".to_string(), |_| "\"[REDACTED]\"".to_string()),
            json_opt(&self.redirect_uri)
        )
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"oauth\":{},\"storage\":{},\"analytics\":{}}}",
            self.credentials, self.rest_api, self.oauth, self.storage, self.analytics
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{}}}",
            self.base_url, self.timeout
        )
    }
}

impl fmt::Display for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"dialog_url\":\"{}\"}}", self.dialog_url)
    }
}

impl fmt::Display for AnalyticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"use_mock_on_failure\":{}}}", self.use_mock_on_failure)
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

/// Unset and blank variables are both `None`.
pub fn get_env_opt(env_var: &str) -> Option<String> {
    env::var(env_var).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            credentials: Credentials {
                client_id: get_env_opt("IG_CLIENT_ID"),
                client_secret: get_env_opt("IG_CLIENT_SECRET"),
                redirect_uri: get_env_opt("IG_REDIRECT_URI"),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "IG_GRAPH_BASE_URL",
                    String::from(DEFAULT_GRAPH_BASE_URL),
                ),
                timeout: get_env_or_default("IG_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
            },
            oauth: OAuthConfig {
                dialog_url: get_env_or_default(
                    "IG_OAUTH_DIALOG_URL",
                    String::from(DEFAULT_OAUTH_DIALOG_URL),
                ),
            },
            storage: StorageConfig {
                token_path: get_env_or_default(
                    "IG_TOKEN_STORE_PATH",
                    StorageConfig::default_token_path(),
                ),
            },
            analytics: AnalyticsConfig {
                use_mock_on_failure: get_env_or_default("IG_USE_MOCK_ON_FAILURE", true),
            },
        }
    }
}
