pub mod ai_turn;
pub mod client_config;
pub mod error;
pub mod move_source;
pub mod remote;

pub use ai_turn::play_ai_turn;
pub use client_config::{ClientConfig, ClientConfigManager, config_manager_at, get_config_manager};
pub use error::ClientError;
pub use move_source::{LocalMoveSource, MoveSource};
pub use remote::RemoteMoveSource;
