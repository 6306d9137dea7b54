use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Resolve `host` (an IP address or a hostname such as `localhost`) to the first bind address.
pub(crate) async fn listen_addr(host: &str, port: u16) -> std::io::Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await?
        .next()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("HOST {host:?} did not resolve to any address"),
            )
        })
}

pub(crate) fn spawn_http_server(addr: SocketAddr, app: Router) -> JoinHandle<std::io::Result<()>> {
    tokio::spawn(async move {
        tracing::info!("HTTP server listening on http://{}", addr);
        axum_server::bind(addr).serve(app.into_make_service()).await
    })
}

pub(crate) async fn spawn_https_server(
    addr: SocketAddr,
    app: Router,
    cert_path: &str,
    key_path: &str,
) -> std::io::Result<JoinHandle<std::io::Result<()>>> {
    let config = RustlsConfig::from_pem_file(cert_path, key_path).await?;

    Ok(tokio::spawn(async move {
        tracing::info!("HTTPS server listening on https://{}", addr);
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
    }))
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("oz_stack_axum=trace,oz_stack=trace,{app_name}=trace,tower_http=debug,info")
                .into()
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = app_name;
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!("Debug build: detailed logs are on by default");
    tracing::info!("Set RUST_LOG to change verbosity, e.g. RUST_LOG=debug ./demo-tasks");
}
