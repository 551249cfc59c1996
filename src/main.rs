/// API сервер для модели сна

use anyhow::Context;
use clap::Parser;

use restimator::api::{router, AppState};
use restimator::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    restimator::init_tracing();

    let config = ServerConfig::parse();

    // Модель загружается один раз; без неё сервер стартует в деградированном режиме
    let state = AppState::load(&config.model_path);

    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
