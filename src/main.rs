use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use zenvibe::{load_data, load_quotes, router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = load_data(&config.data_path).await;
    let quotes = load_quotes(config.quotes_path.as_deref()).await;
    info!(
        days = data.days.len(),
        streak = data.streak.streak,
        quotes = quotes.len(),
        "loaded check-in store"
    );

    let app = router(AppState::new(config.data_path.clone(), data, quotes));

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
