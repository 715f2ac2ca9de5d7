use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use vitalife::{AppState, Config, FileStorage, Store, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let store = Store::load(FileStorage::new(&config.data_dir));
    info!(
        data_dir = %config.data_dir.display(),
        onboarded = store.profile().is_some(),
        "store ready"
    );
    let app = router(AppState::new(store));

    info!("listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
