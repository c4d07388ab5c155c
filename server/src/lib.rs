pub mod move_handler;
pub mod server_config;
pub mod web_server;
