//! # Response Formatting
//!
//! Standard success envelopes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Single record response, with an optional confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: &'static str) -> Self {
        Self {
            data,
            message: Some(message),
        }
    }
}

/// List metadata: result count and the criteria that produced it
#[derive(Debug, Clone, Serialize)]
pub struct ListMeta<F: Serialize> {
    pub total: usize,
    #[serde(rename = "filtros")]
    pub filters: F,
}

/// Filtered list response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize, F: Serialize> {
    pub data: Vec<T>,
    pub meta: ListMeta<F>,
}

impl<T: Serialize, F: Serialize> ListResponse<T, F> {
    pub fn new(data: Vec<T>, filters: F) -> Self {
        let total = data.len();
        Self {
            data,
            meta: ListMeta { total, filters },
        }
    }
}

/// Message-only response (deletes)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimestampMeta {
    pub timestamp: DateTime<Utc>,
}

/// Aggregate response stamped with the time it was computed
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse<T: Serialize> {
    pub data: T,
    pub meta: TimestampMeta,
}

impl<T: Serialize> StatsResponse<T> {
    pub fn now(data: T) -> Self {
        Self {
            data,
            meta: TimestampMeta {
                timestamp: Utc::now(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_serialization() {
        let response = ListResponse::new(
            vec![json!({"id": 1}), json!({"id": 2})],
            json!({"estado": "venta"}),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["meta"]["total"], 2);
        assert_eq!(json["meta"]["filtros"]["estado"], "venta");
    }

    #[test]
    fn test_data_response_omits_missing_message() {
        let json = serde_json::to_value(DataResponse::new(json!({"id": 1}))).unwrap();
        assert_eq!(json["data"]["id"], 1);
        assert!(json.get("message").is_none());

        let json =
            serde_json::to_value(DataResponse::with_message(json!({}), "ok")).unwrap();
        assert_eq!(json["message"], "ok");
    }
}
