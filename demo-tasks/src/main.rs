use std::sync::Arc;

use dotenvy::dotenv;

use oz_stack_axum::{AppState, AuthConfig, Authenticator, TaskStore, oz_stack_router};

mod protected;
mod server;
use server::{init_tracing, listen_addr, spawn_http_server, spawn_https_server};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_port(key: &str, default: u16) -> Result<u16, Box<dyn std::error::Error>> {
    match std::env::var(key) {
        Ok(value) => Ok(value
            .parse::<u16>()
            .map_err(|e| format!("Invalid {key} {value:?}: {e}"))?),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenv().ok();
    init_tracing("demo_tasks");

    let auth = Authenticator::new(AuthConfig::from_env()?);
    if auth.config().is_disabled() {
        tracing::warn!("AUTH_DISABLED is set: every request is treated as authenticated");
    }

    let tasks = TaskStore::from_env()?;
    tasks.init().await?;

    let state = AppState::new(auth, tasks);
    let app = oz_stack_router(state.clone()).merge(protected::router(Arc::clone(&state.auth)));

    let host = env_or("HOST", "0.0.0.0");
    let http_addr = listen_addr(&host, env_port("PORT", 8000)?).await?;
    let mut servers = vec![spawn_http_server(http_addr, app.clone())];

    match (std::env::var("TLS_CERT_PATH"), std::env::var("TLS_KEY_PATH")) {
        (Ok(cert), Ok(key)) => {
            let https_addr = listen_addr(&host, env_port("HTTPS_PORT", 8443)?).await?;
            servers.push(spawn_https_server(https_addr, app, &cert, &key).await?);
        }
        _ => tracing::info!("TLS_CERT_PATH/TLS_KEY_PATH not set, HTTPS disabled"),
    }

    for server in servers {
        server.await??;
    }
    Ok(())
}
