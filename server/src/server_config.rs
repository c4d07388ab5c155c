use common::config::Validate;
use common::games::tictactoe::EasyVariant;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "server_config.yaml";
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// `"*"` anywhere in the list allows every origin.
    pub allowed_origins: Vec<String>,
    pub easy_variant: EasyVariant,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                ANY_ORIGIN.to_string(),
            ],
            easy_variant: EasyVariant::Tactical,
        }
    }
}

impl ServerConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }

    /// Applies a `--bind` value from the command line on top of the loaded config.
    pub fn with_bind_override(mut self, bind: Option<String>) -> Result<Self, String> {
        if let Some(bind) = bind {
            self.bind_address = bind;
            self.validate()?;
        }
        Ok(self)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!(
                "bind_address '{}' is not a valid socket address",
                self.bind_address
            ));
        }
        if self.allowed_origins.is_empty() {
            return Err("allowed_origins must list at least one origin".to_string());
        }
        if let Some(origin) = self.allowed_origins.iter().find(|origin| origin.trim().is_empty()) {
            return Err(format!("allowed_origins contains an empty origin '{}'", origin));
        }
        Ok(())
    }
}
