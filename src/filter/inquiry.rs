//! Inquiry listing criteria.

use std::collections::HashMap;

use serde::Serialize;

use super::parser::{param, parse_timestamp, FilterError, FilterResult};
use super::{Criteria, DateRange};
use crate::models::{Inquiry, InquiryStatus, Priority};

/// Criteria accepted by `GET /api/consultas`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InquiryFilter {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<InquiryStatus>,

    #[serde(rename = "tipoServicio", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    #[serde(rename = "prioridad", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(flatten)]
    pub created: DateRange,
}

impl InquiryFilter {
    pub fn parse(params: &HashMap<String, String>) -> FilterResult<Self> {
        let priority = param(params, &["prioridad"])
            .map(|v| {
                Priority::parse(v).ok_or_else(|| FilterError::NotAllowed {
                    name: "prioridad",
                    allowed: "alta, media, baja",
                    value: v.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            status: param(params, &["estado"]).map(|v| InquiryStatus::from(v.to_string())),
            service_type: param(params, &["tipoServicio"]).map(str::to_string),
            priority,
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

impl Criteria<Inquiry> for InquiryFilter {
    fn matches(&self, inquiry: &Inquiry) -> bool {
        self.status.as_ref().map_or(true, |s| s == &inquiry.status)
            && self
                .service_type
                .as_ref()
                .map_or(true, |t| t == &inquiry.service_type)
            && self.priority.map_or(true, |p| Some(p) == inquiry.priority)
            && self.created.contains(inquiry.created_at)
    }
}
