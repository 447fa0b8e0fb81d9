//! aircast server binary.

use clap::Parser;
use tracing::info;

use aircast::forecast::{EngineConfigBuilder, ForecastEngine};
use aircast::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "aircast")]
#[command(about = "Air-quality index forecast HTTP service")]
struct Args {
    /// Server host
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Number of trees in the random forest
    #[arg(long, default_value = "200")]
    n_estimators: usize,

    /// Seed for the train/held-out split and the bootstrap draws
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Logging level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    let config = EngineConfigBuilder::new()
        .n_estimators(args.n_estimators)
        .random_seed(args.seed)
        .build();
    let engine = ForecastEngine::new(config);

    info!(
        "starting aircast v{} on {}:{} ({} estimators, seed {})",
        aircast::VERSION,
        args.host,
        args.port,
        args.n_estimators,
        args.seed
    );

    server::serve(
        ServerConfig {
            host: args.host,
            port: args.port,
        },
        engine,
    )
    .await?;

    Ok(())
}
