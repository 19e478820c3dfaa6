use clap::Parser;

#[derive(Parser)]
#[command(name = "conduitd", about = "Event processing daemon")]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(long, default_value = "config.toml", env = "CONDUITD_CONFIG")]
    config: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    tracing::info!(config = %cli.config, "loading configuration");
    let config = match conduit_engine::EngineConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    tracing::info!(
        inputs = config.inputs.len(),
        filters = config.filters.len(),
        outputs = config.outputs.len(),
        "bootstrapping engine"
    );
    let engine = match conduit_engine::Engine::bootstrap(config).await {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(error = %e, "failed to bootstrap engine");
            std::process::exit(1);
        }
    };

    tracing::info!("conduitd started, press Ctrl+C to stop");
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down...");

    if let Err(e) = engine.shutdown().await {
        tracing::error!(error = %e, "error during shutdown");
        std::process::exit(1);
    }
}
