//! # Listing Filter Engine
//!
//! Conjunctive criteria over properties and inquiries. A record is kept only
//! when it satisfies every supplied criterion; absent criteria impose no
//! constraint. Results are ordered newest first with a stable sort, so
//! records sharing a creation time keep their original relative order.

pub mod inquiry;
pub mod parser;
pub mod property;

pub use inquiry::InquiryFilter;
pub use parser::{FilterError, FilterResult};
pub use property::PropertyFilter;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Inquiry, Property};

/// Records that carry a server-assigned creation time
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Timestamped for Property {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timestamped for Inquiry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A set of criteria evaluated against records of type `T`
pub trait Criteria<T: Timestamped> {
    /// Check if a record satisfies every supplied criterion
    fn matches(&self, record: &T) -> bool;

    /// Keep matching records, newest first
    fn apply<I>(&self, records: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut kept: Vec<T> = records.into_iter().filter(|r| self.matches(r)).collect();
        sort_newest_first(&mut kept);
        kept
    }
}

/// Stable sort by creation time, descending
pub fn sort_newest_first<T: Timestamped>(records: &mut [T]) {
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

/// Inclusive creation-time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(rename = "fechaDesde", skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(rename = "fechaHasta", skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| ts >= from) && self.to.map_or(true, |to| ts <= to)
    }
}
