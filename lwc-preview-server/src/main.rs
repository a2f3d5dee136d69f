//! LWC Preview Server
//!
//! A local HTTP server that:
//! - Serves project static resources and content assets on /assets/*
//! - Resolves custom labels on /api/labels/*
//! - Proxies Apex calls to a live org on /api/apex/execute
//!
//! Access via: http://localhost:3333

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = cli.server_config()?;

    info!("🚀 LWC Preview Server starting on port {}...", config.port);

    let state = AppState::new(&config)?;
    info!("✅ Project resolved at {}", state.project().project_dir.display());

    let app = router::build_router(state, config.port);
    let listener = server_utils::create_listener(&config.bind_address()).await?;

    info!("🌐 Server listening on http://{}", config.bind_address());
    info!("🔌 API available at http://localhost:{}/api/", config.port);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}
