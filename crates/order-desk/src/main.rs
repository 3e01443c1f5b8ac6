use actor_framework::tracing::setup_tracing;
use clap::Parser;
use order_desk::config::AppConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "order-desk", version, about = "Order and customer management server")]
struct Cli {
    /// TOML config file; defaults apply when omitted
    #[arg(short, long, env = "ORDER_DESK_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides server.host
    #[arg(long)]
    host: Option<String>,

    /// Overrides server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    setup_tracing(&config.log.filter);
    info!(config = ?cli.config, "Starting order desk");

    order_desk::server::run(config).await?;

    info!("Order desk stopped");
    Ok(())
}
