use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::EasyVariant;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "tictactoe_client_config.yaml";
const MAX_REQUEST_TIMEOUT_MS: u64 = 60_000;

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer>;

pub fn get_config_manager() -> ClientConfigManager {
    config_manager_at(CONFIG_FILE)
}

pub fn config_manager_at(path: impl Into<PathBuf>) -> ClientConfigManager {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the move service. `None` computes every AI move locally.
    pub server_url: Option<String>,
    pub request_timeout_ms: u64,
    /// Send the request a second time after a timeout or transport failure.
    pub retry_on_failure: bool,
    /// Compute the move locally when the service stays unreachable.
    pub fallback_to_local: bool,
    /// Used for locally computed easy moves.
    pub easy_variant: EasyVariant,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: Some("http://localhost:8000".to_string()),
            request_timeout_ms: 3_000,
            retry_on_failure: true,
            fallback_to_local: true,
            easy_variant: EasyVariant::Tactical,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.server_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(format!("server_url '{}' must start with http:// or https://", url));
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        if self.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(format!(
                "request_timeout_ms must not exceed {}",
                MAX_REQUEST_TIMEOUT_MS
            ));
        }
        Ok(())
    }
}
