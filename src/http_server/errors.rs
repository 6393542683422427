//! # API Errors
//!
//! Every handler failure funnels into [`ApiError`], which owns the mapping to
//! an HTTP status and the JSON error envelope:
//!
//! ```json
//! { "error": "...", "details": "...", "required": ["..."] }
//! ```

use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::filter::FilterError;
use crate::models::ValidationError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Routes advertised by the unmatched-route response
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /api/propiedades",
    "GET /api/propiedades/:id",
    "POST /api/propiedades",
    "PUT /api/propiedades/:id",
    "DELETE /api/propiedades/:id",
    "POST /api/consultas",
    "GET /api/consultas",
    "GET /api/consultas/:id",
    "PUT /api/consultas/:id",
    "DELETE /api/consultas/:id",
    "GET /api/stats",
    "GET /api/consultas/stats",
    "GET /health",
    "GET /uploads/*",
];

/// The resource a path id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Property,
    Inquiry,
}

impl Resource {
    fn noun(self) -> &'static str {
        match self {
            Resource::Property => "propiedad",
            Resource::Inquiry => "consulta",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Resource::Property => "Propiedad",
            Resource::Inquiry => "Consulta",
        }
    }

    /// Parse a path segment into a numeric id
    pub fn parse_id(self, raw: &str) -> ApiResult<i64> {
        raw.trim().parse().map_err(|_| ApiError::InvalidId(self))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Parámetros de búsqueda inválidos")]
    InvalidQuery(#[from] FilterError),

    #[error("Cuerpo de la solicitud inválido")]
    InvalidBody(String),

    #[error("Solicitud inválida")]
    InvalidRequest(String),

    #[error("ID de {0} inválido")]
    InvalidId(Resource),

    #[error("{} no encontrada", .0.title())]
    NotFound(Resource),

    #[error("Ruta no encontrada")]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Error interno del servidor")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::InvalidQuery(_)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidRequest(_)
            | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,

            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,

            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<&'static [&'static str]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,

    #[serde(rename = "availableEndpoints", skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<&'static [&'static str]>,
}

impl ErrorResponse {
    fn new(error: String) -> Self {
        Self {
            error,
            details: None,
            required: None,
            missing: None,
            available_endpoints: None,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let mut body = ErrorResponse::new(err.to_string());
        match err {
            ApiError::Validation(ValidationError::MissingFields { required, missing }) => {
                body.error = "Faltan campos requeridos".to_string();
                body.required = Some(required);
                body.missing = Some(missing);
            }
            ApiError::Validation(_) | ApiError::InvalidId(_) | ApiError::NotFound(_) => {}
            ApiError::InvalidQuery(source) => body.details = Some(source.to_string()),
            ApiError::InvalidBody(details) | ApiError::InvalidRequest(details) => {
                body.details = Some(details)
            }
            ApiError::RouteNotFound => body.available_endpoints = Some(AVAILABLE_ENDPOINTS),
            ApiError::Store(source) => {
                body.details = Some(
                    match source {
                        StoreError::NotConfigured => "Base de datos no configurada",
                        _ => "Error al acceder a la base de datos",
                    }
                    .to_string(),
                );
            }
        }
        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Store(source) = &self {
            error!(error = %source, "store operation failed");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// JSON body extractor whose rejections use the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with the same error envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor with the same error envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
