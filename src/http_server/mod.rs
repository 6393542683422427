//! # HTTP Server Module
//!
//! Axum routers for the listings API, combined by [`HttpServer`].
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/propiedades` - Property CRUD and filtered listing
//! - `/api/consultas` - Inquiry CRUD, filtered listing and statistics
//! - `/api/stats` - Combined statistics
//! - `/uploads` - Static listing images

pub mod errors;
pub mod health_routes;
pub mod inquiry_routes;
pub mod property_routes;
pub mod response;
pub mod server;
pub mod stats_routes;

pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;

use std::sync::Arc;

use crate::store::ListingStore;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }
}
