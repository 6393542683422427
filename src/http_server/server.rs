//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::errors::{ApiError, AVAILABLE_ENDPOINTS};
use super::health_routes::health_routes;
use super::inquiry_routes::inquiry_routes;
use super::property_routes::property_routes;
use super::stats_routes::stats_routes;
use super::AppState;
use crate::config::AppConfig;
use crate::store::ListingStore;

/// HTTP server for the listings API
pub struct HttpServer {
    config: AppConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`
    pub fn with_config(config: AppConfig, store: Arc<dyn ListingStore>) -> Self {
        let router = Self::build_router(&config, AppState::new(store));
        Self { config, router }
    }

    fn cors_layer(config: &AppConfig) -> CorsLayer {
        if config.cors_origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let api = Router::new()
            .merge(property_routes(state.clone()))
            .merge(inquiry_routes(state.clone()))
            .merge(stats_routes(state.clone()));

        Router::new()
            .merge(health_routes(state))
            .nest("/api", api)
            .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
            .fallback(route_not_found)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(Self::cors_layer(config)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            addr = %listener.local_addr()?,
            uploads = %self.config.uploads_dir.display(),
            "listings API listening"
        );
        for endpoint in AVAILABLE_ENDPOINTS {
            info!("  {}", endpoint);
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
