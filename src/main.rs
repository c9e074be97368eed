use std::env;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pic2pdf::config::Config;
use pic2pdf::handlers::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pic2pdf=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting pic2pdf conversion service");
    tracing::info!("Max file size: {}MB", config.max_file_size_mb);
    tracing::info!("Page size: {:?}", config.page_size);
    tracing::info!("Max concurrent requests: {}", config.max_concurrent_requests);

    let app = create_router(&config);

    // Determine port from environment (Railway compatibility)
    let port = env::var("PORT")
        .unwrap_or_else(|_| config.server_port.to_string())
        .parse::<u16>()
        .unwrap_or(config.server_port);

    let addr = format!("{}:{}", config.server_host, port);

    tracing::info!("Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
