use std::time::Duration;

use common::games::tictactoe::{MoveRequest, MoveResponse};
use common::{log, log_error};
use serde::Deserialize;

use crate::client_config::ClientConfig;
use crate::error::ClientError;
use crate::move_source::{LocalMoveSource, MoveSource};

const AI_MOVE_PATH: &str = "/api/ai-move";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the move service. Retries once on transient failures and can fall back to the local engine.
pub struct RemoteMoveSource {
    client: reqwest::Client,
    endpoint: String,
    retry_on_failure: bool,
    fallback: Option<LocalMoveSource>,
}

impl RemoteMoveSource {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from_reqwest)?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), AI_MOVE_PATH),
            retry_on_failure: false,
            fallback: None,
        })
    }

    /// `None` when the config has no server URL, which means local play only.
    pub fn from_config(config: &ClientConfig) -> Result<Option<Self>, ClientError> {
        let Some(server_url) = &config.server_url else {
            return Ok(None);
        };

        let mut source = Self::new(server_url, Duration::from_millis(config.request_timeout_ms))?
            .with_retry(config.retry_on_failure);
        if config.fallback_to_local {
            source = source.with_fallback(LocalMoveSource::new(config.easy_variant));
        }
        Ok(Some(source))
    }

    pub fn with_retry(mut self, retry_on_failure: bool) -> Self {
        self.retry_on_failure = retry_on_failure;
        self
    }

    pub fn with_fallback(mut self, fallback: LocalMoveSource) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<MoveResponse>().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else {
                ClientError::InvalidResponse(e.to_string())
            }
        })
    }

    async fn send_with_retry(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        match self.send_once(request).await {
            Err(err) if self.retry_on_failure && err.is_transient() => {
                log!("[remote] {} failed ({}), retrying once", self.endpoint, err);
                self.send_once(request).await
            }
            result => result,
        }
    }
}

impl MoveSource for RemoteMoveSource {
    async fn request_move(&self, request: &MoveRequest) -> Result<MoveResponse, ClientError> {
        match self.send_with_retry(request).await {
            Err(err) if err.is_transient() => match &self.fallback {
                Some(local) => {
                    log!("[remote] {} unavailable ({}), computing move locally", self.endpoint, err);
                    local.compute(request)
                }
                None => {
                    log_error!("[remote] {} unavailable: {}", self.endpoint, err);
                    Err(err)
                }
            },
            result => result,
        }
    }
}
