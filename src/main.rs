//! Task manager backend: CORS registration in front of the `/tasks` API.
//!
//! Usage: `task-manager-cors [config.yaml]`. Without a file the built-in
//! development defaults apply (listen on 127.0.0.1:8082, allow
//! http://localhost:5173 with credentials).

use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use task_manager_cors::config::{self, AppConfig};
use task_manager_cors::error::Result;
use task_manager_cors::tasks::TaskStore;
use task_manager_cors::{WebConfig, register, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "task-manager-cors stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "loading config");
            config::load_from_file(&path)?
        }
        None => AppConfig::default(),
    };
    let listen = cfg.server.listen_addr()?;

    let mappings = register(&WebConfig::from_config(&cfg.cors))?;
    let app = router::build_router(mappings, Arc::new(TaskStore::new()));

    tracing::info!(%listen, "task-manager-cors starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
