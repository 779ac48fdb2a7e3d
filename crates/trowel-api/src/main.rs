use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with structured logging
    tracing_subscriber::fmt()
        .with_env_filter("trowel=debug,info")
        .with_target(false)
        .init();

    info!(version = "0.1.0", "Starting trowel estimating server");

    // Environment-based configuration
    let host = env::var("TROWEL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("TROWEL_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    info!(?host, ?port, "Configuring web server");

    let app = trowel_api::create_app();
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("trowel estimating server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
