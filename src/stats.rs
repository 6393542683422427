//! # Aggregate Statistics
//!
//! Summaries computed from a full scan of each collection. Both storage
//! variants feed the same accumulators so the output shape is identical.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{InquiryStatus, OfferingType, Priority};

/// Window counted as "recent" for inquiries
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Rounded mean listing price per offering type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AveragePrices {
    #[serde(rename = "venta")]
    pub sale: i64,
    #[serde(rename = "arriendo")]
    pub lease: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyStats {
    pub total: usize,
    #[serde(rename = "enVenta")]
    pub for_sale: usize,
    #[serde(rename = "enArriendo")]
    pub for_lease: usize,
    #[serde(rename = "porTipo")]
    pub by_category: BTreeMap<String, usize>,
    #[serde(rename = "precioPromedio")]
    pub average_price: AveragePrices,
}

/// Rounded mean; an empty group averages to zero.
fn rounded_mean(sum: f64, count: usize) -> i64 {
    if count == 0 {
        0
    } else {
        (sum / count as f64).round() as i64
    }
}

impl PropertyStats {
    /// Accumulate `(offering, category, price)` triples
    pub fn collect<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = (OfferingType, &'a str, f64)>,
    {
        let mut stats = PropertyStats::default();
        let (mut sale_sum, mut lease_sum) = (0.0, 0.0);

        for (offering, category, price) in listings {
            stats.total += 1;
            *stats.by_category.entry(category.to_string()).or_insert(0) += 1;
            match offering {
                OfferingType::Sale => {
                    stats.for_sale += 1;
                    sale_sum += price;
                }
                OfferingType::Lease => {
                    stats.for_lease += 1;
                    lease_sum += price;
                }
            }
        }

        stats.average_price = AveragePrices {
            sale: rounded_mean(sale_sum, stats.for_sale),
            lease: rounded_mean(lease_sum, stats.for_lease),
        };
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InquiryStats {
    pub total: usize,
    #[serde(rename = "porEstado")]
    pub by_status: BTreeMap<String, usize>,
    #[serde(rename = "porTipoServicio")]
    pub by_service: BTreeMap<String, usize>,
    #[serde(rename = "porPrioridad")]
    pub by_priority: BTreeMap<String, usize>,
    /// Created within the last [`RECENT_WINDOW_DAYS`] days
    #[serde(rename = "recientes")]
    pub recent: usize,
}

impl InquiryStats {
    /// Accumulate `(status, service type, priority, created_at)` tuples
    pub fn collect<'a, I>(inquiries: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (&'a InquiryStatus, &'a str, Option<Priority>, DateTime<Utc>)>,
    {
        let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let mut stats = InquiryStats::default();
        // Every priority bucket is reported, even when empty
        for priority in Priority::ALL {
            stats.by_priority.insert(priority.to_string(), 0);
        }

        for (status, service, priority, created_at) in inquiries {
            stats.total += 1;
            *stats.by_status.entry(status.to_string()).or_insert(0) += 1;
            *stats.by_service.entry(service.to_string()).or_insert(0) += 1;
            if let Some(priority) = priority {
                *stats.by_priority.entry(priority.to_string()).or_insert(0) += 1;
            }
            if created_at >= cutoff {
                stats.recent += 1;
            }
        }
        stats
    }
}

/// Combined summary served by `GET /api/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingStats {
    #[serde(rename = "propiedades")]
    pub properties: PropertyStats,
    #[serde(rename = "consultas")]
    pub inquiries: InquiryStats,
}
