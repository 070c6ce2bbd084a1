use crate::config::RestApiConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Query and body keys whose values never reach the logs.
const SECRET_KEYS: [&str; 4] = ["access_token", "client_secret", "fb_exchange_token", "code"];

/// Transport seam for the Graph API. Paths are relative to the configured
/// base URL; tokens travel as query or body parameters.
#[async_trait]
pub trait GraphHttpClient: Send + Sync {
    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, AppError>
    where
        T: DeserializeOwned + Debug + Send;

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned + Debug + Send,
        B: Serialize + Send + Sync;
}

/// `reqwest`-backed Graph API client.
#[derive(Debug, Clone)]
pub struct GraphHttpClientImpl {
    client: Client,
    base_url: String,
}

impl GraphHttpClientImpl {
    /// Builds a client with the configured request timeout. No retries are
    /// layered on top.
    pub fn new(config: &RestApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("ig-graph-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned + Debug>(response: Response) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            debug!("Response Body: {:?}", body);
            Ok(body)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(AppError::Unexpected {
                status,
                body: body_text,
            })
        }
    }
}

pub(crate) fn redact_query(query: &[(&str, String)]) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(k, v)| {
            let value = if SECRET_KEYS.contains(k) {
                "[REDACTED]".to_string()
            } else {
                v.clone()
            };
            (k.to_string(), value)
        })
        .collect()
}

fn redact_body<B: Serialize>(body: &B) -> serde_json::Value {
    let mut value = serde_json::to_value(body).unwrap_or(serde_json::Value::Null);
    if let Some(map) = value.as_object_mut() {
        for key in SECRET_KEYS {
            if let Some(v) = map.get_mut(key) {
                *v = serde_json::Value::String("[REDACTED]".to_string());
            }
        }
    }
    value
}

#[async_trait]
impl GraphHttpClient for GraphHttpClientImpl {
    #[instrument(skip(self, query))]
    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, AppError>
    where
        T: DeserializeOwned + Debug + Send,
    {
        let url = self.url(path);
        debug!("Sending GET request to {} with {:?}", url, redact_query(query));

        let response = match self.client.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send GET request: {:?}", e);
                return Err(AppError::Network(e));
            }
        };

        Self::handle_response(response).await
    }

    #[instrument(skip(self, body))]
    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned + Debug + Send,
        B: Serialize + Send + Sync,
    {
        let url = self.url(path);
        debug!("Sending POST request to {} with {}", url, redact_body(body));

        let response = match self.client.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to send POST request: {:?}", e);
                return Err(AppError::Network(e));
            }
        };

        Self::handle_response(response).await
    }
}
