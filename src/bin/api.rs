use anyhow::Context;
use clap::Parser;
use inventory_stats::{
    api::{ApiConfig, ApiState, serve_api},
    config::{Config, read_config_file},
    store,
    util::EnvOverrides,
};
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Read-only reporting API over the virtualization inventory")]
struct Args {
    /// Config file (JSON); defaults are used when omitted
    #[arg(short, long)]
    file: Option<String>,

    /// Bind address, overrides the config file and INVENTORY_ADDR
    #[arg(long)]
    bind: Option<std::net::SocketAddr>,
}

fn init() {
    dotenv::dotenv().ok();

    let filter = filter::Targets::new().with_targets(vec![
        ("inventory_stats", LevelFilter::DEBUG),
        ("inventory_api", LevelFilter::TRACE),
        ("tower_http", LevelFilter::DEBUG),
        ("mongodb", LevelFilter::WARN),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)
            .with_context(|| format!("failed to read config file {path}"))?,
        None => Config::default(),
    };
    let mut config = config.with_overrides(EnvOverrides::from_env());
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let store = store::open(&config.store)
        .await
        .context("failed to open inventory store")?;

    serve_api(ApiConfig::from(&config), ApiState::new(store), shutdown_signal()).await
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
