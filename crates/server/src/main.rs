//! `server` binary

use std::process::ExitCode;

use credit_default_server::{router, AppState, ReadyContext, ServerConfig, ServingError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run() -> Result<(), ServingError> {
    let config = ServerConfig::from_env()?;
    let ready = ReadyContext::load(&config.slot)?;
    let app = router(AppState::new(ready, config.predict_timeout));

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "credit-default-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}
