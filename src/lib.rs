pub mod api;
pub mod commands;
pub mod core;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::core::error::{SkinPackError, SkinPackResult};
use crate::core::state::{AppState, Settings};

/// Structured logging for every entry point. `RUST_LOG` wins when set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,skinpack_lib=debug,tower_http=debug")),
        )
        .try_init();
}

/// Bind the configured address and serve the skin API until the process ends.
pub async fn serve(settings: Settings) -> SkinPackResult<()> {
    let addr = settings.socket_addr()?;
    let state = AppState::from_settings(settings)?;
    let router = api::create_router(state);

    let listener = TcpListener::bind(addr).await.map_err(|source| SkinPackError::Io {
        path: addr.to_string().into(),
        source,
    })?;
    tracing::info!("Skin API listening on http://{addr}{}", api::SKIN_PATH);

    axum::serve(listener, router).await?;
    Ok(())
}
