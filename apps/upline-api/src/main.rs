//! Upline escalation service API.
//!
//! Serves the feedback escalation workflow over HTTP, backed by PostgreSQL:
//! escalation creation and lifecycle actions, filtered listing, and SLA
//! compliance metrics.

mod config;
mod health;
mod logging;
mod openapi;
mod state;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use upline_api_escalations::{escalations_router, EscalationMatrix, SlaPolicy};
use upline_db::DbPool;

use config::Config;
use health::{health_handler, livez_handler, readyz_handler};
use state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        env = %config.app_env,
        "Starting upline API"
    );

    match config.validate_security_config() {
        Ok(warnings) => {
            for warning in &warnings {
                tracing::warn!(target: "security", "{}", warning);
            }
        }
        Err(errors) => {
            for error in &errors {
                tracing::error!(target: "security", "{}", error);
            }
            eprintln!(
                "FATAL: {} insecure setting(s) detected in production mode.",
                errors.len()
            );
            std::process::exit(1);
        }
    }

    // Create database connection pool
    let db_pool = match DbPool::connect(&config.database_url).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = upline_db::run_migrations(&db_pool).await {
        eprintln!("FATAL: Database migration failed: {e}");
        std::process::exit(1);
    }

    let pool = db_pool.inner().clone();

    let app_state = AppState::new(pool.clone(), config.health_db_timeout_secs);
    let shutting_down = app_state.shutting_down.clone();

    let cors = build_cors_layer(&config.cors_origins);

    // Matrix and SLA tables are built once here and injected; deployments
    // that need different routing override this assembly point.
    let escalation_routes =
        escalations_router(pool, EscalationMatrix::default(), SlaPolicy::default());

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/livez", get(livez_handler))
        .route("/readyz", get(readyz_handler))
        .route("/openapi.json", get(openapi::openapi_handler))
        .with_state(app_state)
        .nest("/escalations", escalation_routes)
        .layer(tower_http::limit::RequestBodyLimitLayer::new(1_048_576))
        .layer(cors);

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutting_down))
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Build CORS layer from configured origins.
///
/// When explicit origins are configured (non-wildcard), enables
/// `allow_credentials(true)` for cookie/auth header support.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    use tower_http::cors::AllowOrigin;

    let is_wildcard = origins.len() == 1 && origins[0] == "*";

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(3600));

    if is_wildcard {
        layer = layer
            .allow_origin(AllowOrigin::any())
            .allow_methods(Any)
            .allow_headers(Any);
    } else {
        use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
        use axum::http::Method;

        let allowed: Vec<axum::http::HeaderValue> =
            origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer = layer
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                AUTHORIZATION,
                CONTENT_TYPE,
                ACCEPT,
                ORIGIN,
                axum::http::HeaderName::from_static("x-actor-id"),
                axum::http::HeaderName::from_static("x-requested-with"),
            ])
            .allow_credentials(true);
    }

    layer
}

/// Graceful shutdown signal handler.
///
/// Sets the `shutting_down` flag before returning so the readiness probe
/// returns 503 to drain traffic before Axum stops accepting connections.
async fn shutdown_signal(shutting_down: Arc<AtomicBool>) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    shutting_down.store(true, Ordering::Release);
    info!("Readiness probe set to unhealthy, draining traffic");
}
