//! Property listing criteria.

use std::collections::HashMap;

use serde::Serialize;

use super::parser::{param, parse_count, parse_number, parse_timestamp, FilterError, FilterResult};
use super::{Criteria, DateRange};
use crate::models::{OfferingType, Property};

/// Criteria accepted by `GET /api/propiedades`.
///
/// Serializes back to the query-parameter names so it can be echoed in the
/// response metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyFilter {
    /// Exact offering type
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub offering: Option<OfferingType>,

    /// Exact, case-sensitive category
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Case-insensitive substring of the district
    #[serde(rename = "comuna", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(rename = "precioMin", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    #[serde(rename = "precioMax", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    #[serde(rename = "dormitorios", skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<u32>,

    #[serde(rename = "banos", skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<u32>,

    #[serde(flatten)]
    pub created: DateRange,
}

impl PropertyFilter {
    /// Parse criteria from raw query parameters. Unknown keys are ignored.
    pub fn parse(params: &HashMap<String, String>) -> FilterResult<Self> {
        let offering = param(params, &["estado"])
            .map(|v| {
                OfferingType::parse(v).ok_or_else(|| FilterError::NotAllowed {
                    name: "estado",
                    allowed: "venta, arriendo",
                    value: v.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            offering,
            category: param(params, &["tipo"]).map(str::to_string),
            district: param(params, &["comuna"]).map(str::to_string),
            min_price: param(params, &["precioMin", "minPrecio"])
                .map(|v| parse_number("precioMin", v))
                .transpose()?,
            max_price: param(params, &["precioMax", "maxPrecio"])
                .map(|v| parse_number("precioMax", v))
                .transpose()?,
            min_bedrooms: param(params, &["dormitorios"])
                .map(|v| parse_count("dormitorios", v))
                .transpose()?,
            min_bathrooms: param(params, &["banos"])
                .map(|v| parse_count("banos", v))
                .transpose()?,
            created: DateRange {
                from: param(params, &["fechaDesde"])
                    .map(|v| parse_timestamp("fechaDesde", v))
                    .transpose()?,
                to: param(params, &["fechaHasta"])
                    .map(|v| parse_timestamp("fechaHasta", v))
                    .transpose()?,
            },
        })
    }
}

/// Absent counts never satisfy a lower bound.
fn at_least(value: Option<u32>, bound: Option<u32>) -> bool {
    match bound {
        None => true,
        Some(bound) => value.map_or(false, |v| v >= bound),
    }
}

impl Criteria<Property> for PropertyFilter {
    fn matches(&self, p: &Property) -> bool {
        if self.offering.is_some_and(|o| o != p.offering) {
            return false;
        }
        if self.category.as_ref().is_some_and(|c| c != &p.category) {
            return false;
        }
        if let Some(needle) = &self.district {
            let needle = needle.to_lowercase();
            let found = p
                .location
                .district
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| p.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| p.price > max) {
            return false;
        }
        at_least(p.attributes.bedrooms, self.min_bedrooms)
            && at_least(p.attributes.bathrooms, self.min_bathrooms)
            && self.created.contains(p.created_at)
    }
}
