use crate::cli::commands::ServeArgs;
use crate::config::ReportConfig;
use crate::errors::ReportError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, mut config: ReportConfig) -> Result<(), ReportError> {
    args.storage.apply(&mut config)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(host = %config.server.host, port = config.server.port, "Starting API server");

    let state = api::create_app_state(&config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ReportError::Internal(format!("Server error: {}", e)))?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
