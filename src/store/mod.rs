//! # Listing Storage
//!
//! The [`ListingStore`] trait is the seam between HTTP handlers and
//! persistence. Two implementations are provided:
//! - [`MemoryStore`] keeps both collections in process (non-production fallback)
//! - [`SupabaseStore`] talks to a hosted PostgREST backend
//!
//! Handlers receive the store through router state, so tests can build an
//! isolated store per case.

pub mod errors;
pub mod memory;
pub mod postgrest;
pub mod seed;
pub mod supabase;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgrest::PostgrestClient;
pub use supabase::SupabaseStore;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::{AppConfig, BackendKind};
use crate::filter::{InquiryFilter, PropertyFilter};
use crate::models::{Inquiry, InquiryPatch, NewInquiry, NewProperty, Property, PropertyPatch};
use crate::stats::{InquiryStats, PropertyStats};

/// Persistence operations for properties and inquiries.
///
/// Lookups that find nothing return `Ok(None)` (or `Ok(false)` for deletes);
/// `Err` is reserved for storage failures.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Short backend label reported by the health check
    fn backend_name(&self) -> &'static str;

    /// Matching properties, newest first
    async fn list_properties(&self, filter: &PropertyFilter) -> StoreResult<Vec<Property>>;

    async fn get_property(&self, id: i64) -> StoreResult<Option<Property>>;

    async fn create_property(&self, new: NewProperty) -> StoreResult<Property>;

    /// Merge `patch` into the stored record; `None` if the id is unknown
    async fn update_property(&self, id: i64, patch: PropertyPatch)
        -> StoreResult<Option<Property>>;

    /// `false` if the id is unknown
    async fn delete_property(&self, id: i64) -> StoreResult<bool>;

    async fn property_stats(&self) -> StoreResult<PropertyStats>;

    /// Matching inquiries, newest first
    async fn list_inquiries(&self, filter: &InquiryFilter) -> StoreResult<Vec<Inquiry>>;

    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<Inquiry>>;

    async fn create_inquiry(&self, new: NewInquiry) -> StoreResult<Inquiry>;

    async fn update_inquiry(&self, id: i64, patch: InquiryPatch) -> StoreResult<Option<Inquiry>>;

    async fn delete_inquiry(&self, id: i64) -> StoreResult<bool>;

    async fn inquiry_stats(&self) -> StoreResult<InquiryStats>;
}

/// Build the store selected by `config`.
///
/// Missing hosted-backend credentials do not fail startup; the store is
/// created unconfigured and every call reports [`StoreError::NotConfigured`].
pub fn from_config(config: &AppConfig) -> Arc<dyn ListingStore> {
    match config.backend {
        BackendKind::Memory => {
            let store = if config.seed_demo_data {
                MemoryStore::with_demo_data()
            } else {
                MemoryStore::new()
            };
            info!(seeded = config.seed_demo_data, "Using in-memory store");
            Arc::new(store)
        }
        BackendKind::Supabase => match config.supabase.credentials() {
            Some((url, key)) => {
                info!(url = %url, "Using Supabase store");
                Arc::new(SupabaseStore::new(PostgrestClient::new(url, key)))
            }
            None => {
                warn!("Supabase credentials missing; backend calls will fail until configured");
                Arc::new(SupabaseStore::unconfigured())
            }
        },
    }
}
