use std::path::PathBuf;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, logger};
use tictactoe_server::server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use tictactoe_server::web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server", version)]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides `bind_address` from the config file.
    #[arg(long)]
    bind: Option<String>,

    /// Writes the default config to `--config` if the file does not exist, then exits.
    #[arg(long)]
    write_default_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<_, ServerConfig> = ConfigManager::from_yaml_file(&args.config);

    if args.write_default_config {
        if config_manager.write_default_if_missing()? {
            log!("Wrote default config to {}", args.config.display());
        } else {
            log!("Config {} already exists, left untouched", args.config.display());
        }
        return Ok(());
    }

    let config = config_manager.get_config()?.with_bind_override(args.bind)?;

    log!(
        "Starting with easy variant {:?}, origins {:?}",
        config.easy_variant,
        config.allowed_origins
    );

    run_web_server(config).await?;

    log!("Server shut down gracefully");

    Ok(())
}
