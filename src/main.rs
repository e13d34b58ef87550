use clap::Parser;
use tracing_subscriber::EnvFilter;

use favourite_movies_api::config::{AppConfig, StoreBackend};
use favourite_movies_api::{app, AppState};

#[derive(Parser)]
#[command(name = "favourite-movies-api")]
#[command(about = "Favourite movies API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Store backend: postgres or memory (overrides DATABASE_BACKEND)")]
    backend: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config: AppConfig = favourite_movies_api::config::config().clone();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(backend) = args.backend {
        config.database.backend = backend;
    }

    let default_filter = if config.api.enable_request_logging {
        "info,favourite_movies_api=debug,tower_http=debug,sqlx=warn"
    } else {
        "info,favourite_movies_api=debug,sqlx=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    config.validate()?;
    tracing::info!("Starting favourite movies API in {:?} mode", config.environment);

    let state = AppState::from_config(&config).await?;
    let app = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
