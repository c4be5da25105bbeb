use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{HeaderValue, Method, header};
use clinex::config::LogLevel;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use clinex_server::cli::CliArgs;
use clinex_server::config::ServerConfig;
use clinex_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;

    let mut clinex_config = server_config.load_clinex_config()?;
    if let Some(level) = &server_config.log_level {
        clinex_config.logging.level = level.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }

    let note_manager = clinex::init(clinex_config).await?;
    info!("Starting Clinex server v{}", clinex::VERSION);

    for status in note_manager.tagger_status() {
        if status.loaded {
            info!(role = %status.role, provider = %status.provider, "Tagger ready");
        } else {
            warn!(
                role = %status.role,
                provider = %status.provider,
                "Tagger unavailable, extraction requests will return 503: {}",
                status.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let app_state = Arc::new(AppState::new(note_manager, server_config.clone()));

    let app = create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server_config)?)
            .map_response(|res: axum::response::Response<_>| res.map(axum::body::Body::new))
            .layer(RequestBodyLimitLayer::new(server_config.max_request_size)),
    );

    let addr: SocketAddr = format!("{}:{}", server_config.host, server_config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(layer.allow_origin(origins))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
