//! # In-Memory Store
//!
//! Process-local collections for development and tests. Data is lost on
//! restart. A single mutex guards both collections and their id counters, and
//! every mutation completes inside one lock scope.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::errors::StoreResult;
use super::seed::demo_listings;
use super::ListingStore;
use crate::filter::{Criteria, InquiryFilter, PropertyFilter};
use crate::models::{Inquiry, InquiryPatch, NewInquiry, NewProperty, Property, PropertyPatch};
use crate::stats::{InquiryStats, PropertyStats};

#[derive(Debug)]
struct Collections {
    properties: Vec<Property>,
    inquiries: Vec<Inquiry>,
    next_property_id: i64,
    next_inquiry_id: i64,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            inquiries: Vec::new(),
            next_property_id: 1,
            next_inquiry_id: 1,
        }
    }
}

impl Collections {
    fn insert_property(&mut self, new: NewProperty, created_at: DateTime<Utc>) -> Property {
        let id = self.next_property_id;
        self.next_property_id += 1;
        let property = Property::from_new(id, new, created_at);
        self.properties.push(property.clone());
        property
    }

    fn insert_inquiry(&mut self, new: NewInquiry) -> Inquiry {
        let id = self.next_inquiry_id;
        self.next_inquiry_id += 1;
        let inquiry = Inquiry::from_new(id, new, Utc::now());
        self.inquiries.push(inquiry.clone());
        inquiry
    }
}

/// In-process [`ListingStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the demo listings at their fixed creation times
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for (new, created_at) in demo_listings() {
                inner.insert_property(new, created_at);
            }
        }
        store
    }

    pub fn property_count(&self) -> usize {
        self.inner.lock().properties.len()
    }

    pub fn inquiry_count(&self) -> usize {
        self.inner.lock().inquiries.len()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> StoreResult<Vec<Property>> {
        let snapshot = self.inner.lock().properties.clone();
        Ok(filter.apply(snapshot))
    }

    async fn get_property(&self, id: i64) -> StoreResult<Option<Property>> {
        let inner = self.inner.lock();
        Ok(inner.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn create_property(&self, new: NewProperty) -> StoreResult<Property> {
        Ok(self.inner.lock().insert_property(new, Utc::now()))
    }

    async fn update_property(
        &self,
        id: i64,
        patch: PropertyPatch,
    ) -> StoreResult<Option<Property>> {
        let mut inner = self.inner.lock();
        Ok(inner.properties.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply_patch(patch, Utc::now());
            p.clone()
        }))
    }

    async fn delete_property(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        let before = inner.properties.len();
        inner.properties.retain(|p| p.id != id);
        Ok(inner.properties.len() != before)
    }

    async fn property_stats(&self) -> StoreResult<PropertyStats> {
        let inner = self.inner.lock();
        Ok(PropertyStats::collect(
            inner
                .properties
                .iter()
                .map(|p| (p.offering, p.category.as_str(), p.price)),
        ))
    }

    async fn list_inquiries(&self, filter: &InquiryFilter) -> StoreResult<Vec<Inquiry>> {
        let snapshot = self.inner.lock().inquiries.clone();
        Ok(filter.apply(snapshot))
    }

    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<Inquiry>> {
        let inner = self.inner.lock();
        Ok(inner.inquiries.iter().find(|i| i.id == id).cloned())
    }

    async fn create_inquiry(&self, new: NewInquiry) -> StoreResult<Inquiry> {
        Ok(self.inner.lock().insert_inquiry(new))
    }

    async fn update_inquiry(&self, id: i64, patch: InquiryPatch) -> StoreResult<Option<Inquiry>> {
        let mut inner = self.inner.lock();
        Ok(inner.inquiries.iter_mut().find(|i| i.id == id).map(|i| {
            i.apply_patch(patch, Utc::now());
            i.clone()
        }))
    }

    async fn delete_inquiry(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        let before = inner.inquiries.len();
        inner.inquiries.retain(|i| i.id != id);
        Ok(inner.inquiries.len() != before)
    }

    async fn inquiry_stats(&self) -> StoreResult<InquiryStats> {
        let inner = self.inner.lock();
        Ok(InquiryStats::collect(
            inner.inquiries.iter().map(|i| {
                (
                    &i.status,
                    i.service_type.as_str(),
                    i.priority,
                    i.created_at,
                )
            }),
            Utc::now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::filter::DateRange;
    use crate::store::seed::migration_listings;
    use crate::models::{InquiryDraft, InquiryStatus, OfferingType};

    fn new_inquiry(service: &str) -> NewInquiry {
        let draft: InquiryDraft = serde_json::from_value(json!({
            "nombre": "Ana", "apellido": "Pérez", "email": "ana@example.cl",
            "telefono": "123", "tipoServicio": service
        }))
        .unwrap();
        draft.validate().unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MemoryStore::new();
        let listings = migration_listings();

        let first = store.create_property(listings[0].clone()).await.unwrap();
        let second = store.create_property(listings[1].clone()).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(store.delete_property(2).await.unwrap());
        let third = store.create_property(listings[2].clone()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_demo_data_is_listed_newest_first() {
        let store = MemoryStore::with_demo_data();
        let listed = store
            .list_properties(&PropertyFilter::default())
            .await
            .unwrap();

        assert_eq!(listed.len(), 3);
        assert!(listed
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[tokio::test]
    async fn test_demo_data_keeps_seed_timestamps() {
        let store = MemoryStore::with_demo_data();
        let filter = PropertyFilter {
            created: DateRange {
                from: Some("2024-12-01T10:30:00Z".parse().unwrap()),
                to: Some("2024-12-01T11:00:00Z".parse().unwrap()),
            },
            ..Default::default()
        };

        let listed = store.list_properties(&filter).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 2);
        assert_eq!(listed[0].created_at, listed[0].updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = MemoryStore::with_demo_data();
        let patch = PropertyPatch {
            offering: Some(OfferingType::Sale),
            ..Default::default()
        };

        assert!(store.update_property(42, patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_keeps_length() {
        let store = MemoryStore::with_demo_data();

        assert!(!store.delete_property(42).await.unwrap());
        assert_eq!(store.property_count(), 3);
    }

    #[tokio::test]
    async fn test_inquiry_lifecycle() {
        let store = MemoryStore::new();
        let created = store.create_inquiry(new_inquiry("compra")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.status, InquiryStatus::New);

        let patch = InquiryPatch {
            status: Some(InquiryStatus::InProgress),
            ..Default::default()
        };
        let updated = store.update_inquiry(1, patch).await.unwrap().unwrap();
        assert_eq!(updated.status, InquiryStatus::InProgress);
        assert_eq!(updated.created_at, created.created_at);

        let stats = store.inquiry_stats().await.unwrap();
        assert_eq!(stats.by_status.get("en_proceso"), Some(&1));

        assert!(store.delete_inquiry(1).await.unwrap());
        assert_eq!(store.inquiry_count(), 0);
    }
}
