use std::net::SocketAddr;

use anyhow::Context;

use todo_api::{
    config::AppConfig, db::connection, logging::init_tracing, routes::app,
    services::ServiceContext, state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        eprintln!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging);

    let database = cfg
        .database
        .as_ref()
        .context("missing database config; set APP_DATABASE__URL")?;
    let auth = cfg
        .auth
        .as_ref()
        .context("missing auth config; set APP_AUTH__JWT_SECRET")?;

    let db = connection::connect(database).await?;
    let services =
        ServiceContext::new(&db, auth).context("failed to initialize services")?;

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid listen address {}:{}",
                cfg.general.host, cfg.general.port
            )
        })?;
    let environment = cfg.general.environment;
    let state = AppState::new(cfg, services);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(?environment, "listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await.context("failed to close database pool")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
