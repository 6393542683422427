//! # Supabase Store
//!
//! [`ListingStore`] backed by the hosted `propiedades` and `consultas` tables.
//! Listing criteria are pushed down as PostgREST predicates and rows are run
//! through the shape translator on the way in and out.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use super::errors::{StoreError, StoreResult};
use super::postgrest::{PostgrestClient, Query};
use super::ListingStore;
use crate::filter::{DateRange, InquiryFilter, PropertyFilter};
use crate::models::{Inquiry, InquiryPatch, NewInquiry, NewProperty, Property, PropertyPatch};
use crate::stats::{InquiryStats, PropertyStats};
use crate::translate::{inquiry, property, InquiryRow, InquiryStatsRow, PropertyRow, PropertyStatsRow};

const PROPERTIES: &str = "propiedades";
const INQUIRIES: &str = "consultas";
const CREATED_AT: &str = "fecha_creacion";

/// Hosted [`ListingStore`]
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Option<PostgrestClient>,
}

impl SupabaseStore {
    pub fn new(client: PostgrestClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A store whose every call fails with [`StoreError::NotConfigured`]
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    fn client(&self) -> StoreResult<&PostgrestClient> {
        self.client.as_ref().ok_or(StoreError::NotConfigured)
    }
}

/// Keeps sub-second precision so bounds stay exactly inclusive
fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn created_within<'a>(mut query: Query<'a>, range: &DateRange) -> Query<'a> {
    if let Some(from) = range.from {
        query = query.gte(CREATED_AT, timestamp(from));
    }
    if let Some(to) = range.to {
        query = query.lte(CREATED_AT, timestamp(to));
    }
    query
}

/// Render property criteria as backend predicates, newest first
pub fn property_query<'a>(client: &'a PostgrestClient, filter: &PropertyFilter) -> Query<'a> {
    let mut query = client
        .from(PROPERTIES)
        .select("*")
        .order(CREATED_AT, false);

    if let Some(offering) = filter.offering {
        query = query.eq("estado", offering);
    }
    if let Some(category) = &filter.category {
        query = query.eq("tipo", category);
    }
    if let Some(district) = &filter.district {
        query = query.ilike_contains("comuna", district);
    }
    if let Some(min) = filter.min_price {
        query = query.gte("precio", min);
    }
    if let Some(max) = filter.max_price {
        query = query.lte("precio", max);
    }
    if let Some(bedrooms) = filter.min_bedrooms {
        query = query.gte("dormitorios", bedrooms);
    }
    if let Some(bathrooms) = filter.min_bathrooms {
        query = query.gte("banos", bathrooms);
    }
    created_within(query, &filter.created)
}

/// Render inquiry criteria as backend predicates, newest first
pub fn inquiry_query<'a>(client: &'a PostgrestClient, filter: &InquiryFilter) -> Query<'a> {
    let mut query = client
        .from(INQUIRIES)
        .select("*")
        .order(CREATED_AT, false);

    if let Some(status) = &filter.status {
        query = query.eq("estado", status);
    }
    if let Some(service) = &filter.service_type {
        query = query.eq("tipo_servicio", service);
    }
    if let Some(priority) = filter.priority {
        query = query.eq("prioridad", priority);
    }
    created_within(query, &filter.created)
}

#[async_trait]
impl ListingStore for SupabaseStore {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn list_properties(&self, filter: &PropertyFilter) -> StoreResult<Vec<Property>> {
        let rows: Vec<PropertyRow> = property_query(self.client()?, filter).fetch().await?;
        Ok(rows.into_iter().map(property::to_external).collect())
    }

    async fn get_property(&self, id: i64) -> StoreResult<Option<Property>> {
        let rows: Vec<PropertyRow> = self
            .client()?
            .from(PROPERTIES)
            .select("*")
            .eq("id", id)
            .fetch()
            .await?;
        Ok(rows.into_iter().next().map(property::to_external))
    }

    async fn create_property(&self, new: NewProperty) -> StoreResult<Property> {
        let columns = property::to_storage(&new, Utc::now());
        let rows: Vec<PropertyRow> = self
            .client()?
            .from(PROPERTIES)
            .insert(&[columns])
            .await?;
        rows.into_iter()
            .next()
            .map(property::to_external)
            .ok_or_else(|| StoreError::Backend {
                status: 200,
                message: "insert returned no rows".to_string(),
            })
    }

    async fn update_property(
        &self,
        id: i64,
        patch: PropertyPatch,
    ) -> StoreResult<Option<Property>> {
        let columns = property::patch_to_storage(&patch, Utc::now());
        let rows: Vec<PropertyRow> = self
            .client()?
            .from(PROPERTIES)
            .eq("id", id)
            .update(&columns)
            .await?;
        Ok(rows.into_iter().next().map(property::to_external))
    }

    async fn delete_property(&self, id: i64) -> StoreResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .client()?
            .from(PROPERTIES)
            .eq("id", id)
            .delete()
            .await?;
        Ok(!rows.is_empty())
    }

    async fn property_stats(&self) -> StoreResult<PropertyStats> {
        let rows: Vec<PropertyStatsRow> = self
            .client()?
            .from(PROPERTIES)
            .select(PropertyStatsRow::COLUMNS)
            .fetch()
            .await?;
        Ok(PropertyStats::collect(
            rows.iter()
                .map(|r| (r.offering, r.category.as_str(), r.price)),
        ))
    }

    async fn list_inquiries(&self, filter: &InquiryFilter) -> StoreResult<Vec<Inquiry>> {
        let rows: Vec<InquiryRow> = inquiry_query(self.client()?, filter).fetch().await?;
        Ok(rows.into_iter().map(inquiry::to_external).collect())
    }

    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<Inquiry>> {
        let rows: Vec<InquiryRow> = self
            .client()?
            .from(INQUIRIES)
            .select("*")
            .eq("id", id)
            .fetch()
            .await?;
        Ok(rows.into_iter().next().map(inquiry::to_external))
    }

    async fn create_inquiry(&self, new: NewInquiry) -> StoreResult<Inquiry> {
        let columns = inquiry::to_storage(&new, Utc::now());
        let rows: Vec<InquiryRow> = self
            .client()?
            .from(INQUIRIES)
            .insert(&[columns])
            .await?;
        rows.into_iter()
            .next()
            .map(inquiry::to_external)
            .ok_or_else(|| StoreError::Backend {
                status: 200,
                message: "insert returned no rows".to_string(),
            })
    }

    async fn update_inquiry(&self, id: i64, patch: InquiryPatch) -> StoreResult<Option<Inquiry>> {
        let columns = inquiry::patch_to_storage(&patch, Utc::now());
        let rows: Vec<InquiryRow> = self
            .client()?
            .from(INQUIRIES)
            .eq("id", id)
            .update(&columns)
            .await?;
        Ok(rows.into_iter().next().map(inquiry::to_external))
    }

    async fn delete_inquiry(&self, id: i64) -> StoreResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .client()?
            .from(INQUIRIES)
            .eq("id", id)
            .delete()
            .await?;
        Ok(!rows.is_empty())
    }

    async fn inquiry_stats(&self) -> StoreResult<InquiryStats> {
        let rows: Vec<InquiryStatsRow> = self
            .client()?
            .from(INQUIRIES)
            .select(InquiryStatsRow::COLUMNS)
            .fetch()
            .await?;
        Ok(InquiryStats::collect(
            rows.iter().map(|r| {
                (
                    &r.status,
                    r.service_type.as_str(),
                    r.priority,
                    r.created_at,
                )
            }),
            Utc::now(),
        ))
    }
}
