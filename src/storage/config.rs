use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Where the long-lived token is persisted between runs.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub token_path: PathBuf,
}

impl StorageConfig {
    /// `<config dir>/ig-graph-client/tokens.json`, or the working directory
    /// when the platform has no config dir.
    pub fn default_token_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ig-graph-client")
            .join("tokens.json")
    }
}

impl fmt::Display for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"token_path\":{}}}",
            serde_json::Value::String(self.token_path.display().to_string())
        )
    }
}
