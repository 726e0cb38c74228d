use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use printwatch_server::configs::{Overrides, Settings};
use printwatch_server::run;

#[derive(Parser, Debug)]
#[command(
    name = "printwatch",
    version,
    about = "Monitors a networked 3D printer over TCP and republishes its status over HTTP"
)]
struct Cli {
    /// Path to a TOML config file (defaults to configs/default.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Printer hostname or IP address.
    #[arg(long)]
    host: Option<String>,

    /// Printer TCP port.
    #[arg(long)]
    port: Option<u16>,

    /// Polling interval in milliseconds.
    #[arg(long, value_name = "MS")]
    poll: Option<u64>,

    /// HTTP listen port for the /status endpoint.
    #[arg(long)]
    apiport: Option<u16>,

    /// Disable per-frame printer status logs.
    #[arg(long)]
    silent: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(Overrides {
        host: cli.host,
        port: cli.port,
        poll_interval_ms: cli.poll,
        api_port: cli.apiport,
        silent: cli.silent,
    });
    settings.validate()?;
    let settings = Arc::new(settings);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level},tower_http={level}").into()
        }))
        .init();

    run(&settings).await
}
