use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use common::games::tictactoe::EasyVariant;
use common::{log, log_error};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::move_handler::{ai_move_handler, health_handler, root_handler};
use crate::server_config::ServerConfig;

#[derive(Clone)]
pub struct WebServerState {
    pub easy_variant: EasyVariant,
}

impl WebServerState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            easy_variant: config.easy_variant,
        }
    }
}

pub fn build_cors(config: &ServerConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    log_error!("Ignoring unusable CORS origin '{}'", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/ai-move", post(ai_move_handler))
        .layer(build_cors(config))
        .with_state(WebServerState::from_config(config))
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(config);
    if let Ok(addr) = listener.local_addr() {
        log!("Tic Tac Toe AI server listening on {}", addr);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn run_web_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind_address).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    serve(listener, &config, shutdown_signal).await
}
