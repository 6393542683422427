//! Inquiry HTTP Routes
//!
//! Contact inquiries under `/api/consultas`.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use super::errors::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult, Resource};
use super::response::{DataResponse, ListResponse, MessageResponse, StatsResponse};
use super::AppState;
use crate::filter::InquiryFilter;
use crate::models::{Inquiry, InquiryDraft, InquiryPatch};
use crate::stats::InquiryStats;

/// Create inquiry routes
pub fn inquiry_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/consultas",
            get(list_inquiries_handler).post(create_inquiry_handler),
        )
        // Static segment wins over the `:id` capture
        .route("/consultas/stats", get(inquiry_stats_handler))
        .route(
            "/consultas/:id",
            get(get_inquiry_handler)
                .put(update_inquiry_handler)
                .delete(delete_inquiry_handler),
        )
        .with_state(state)
}

async fn create_inquiry_handler(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<InquiryDraft>,
) -> ApiResult<(StatusCode, Json<DataResponse<Inquiry>>)> {
    let new = draft.validate()?;
    let inquiry = state.store.create_inquiry(new).await?;
    info!(
        id = inquiry.id,
        tipo_servicio = %inquiry.service_type,
        "inquiry received"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            inquiry,
            "Consulta enviada exitosamente. Te contactaremos pronto.",
        )),
    ))
}

async fn list_inquiries_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Inquiry, InquiryFilter>>> {
    let filter = InquiryFilter::parse(&params)?;
    let inquiries = state.store.list_inquiries(&filter).await?;
    Ok(Json(ListResponse::new(inquiries, filter)))
}

async fn get_inquiry_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<DataResponse<Inquiry>>> {
    let id = Resource::Inquiry.parse_id(&id)?;
    let inquiry = state
        .store
        .get_inquiry(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::Inquiry))?;
    Ok(Json(DataResponse::new(inquiry)))
}

async fn update_inquiry_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<InquiryPatch>,
) -> ApiResult<Json<DataResponse<Inquiry>>> {
    let id = Resource::Inquiry.parse_id(&id)?;
    let patch = patch.validate()?;
    let inquiry = state
        .store
        .update_inquiry(id, patch)
        .await?
        .ok_or(ApiError::NotFound(Resource::Inquiry))?;
    info!(id, estado = %inquiry.status, "inquiry updated");

    Ok(Json(DataResponse::with_message(
        inquiry,
        "Consulta actualizada exitosamente",
    )))
}

async fn delete_inquiry_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = Resource::Inquiry.parse_id(&id)?;
    if !state.store.delete_inquiry(id).await? {
        return Err(ApiError::NotFound(Resource::Inquiry));
    }
    info!(id, "inquiry deleted");

    Ok(Json(MessageResponse {
        message: "Consulta eliminada exitosamente",
    }))
}

async fn inquiry_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<StatsResponse<InquiryStats>>> {
    let stats = state.store.inquiry_stats().await?;
    Ok(Json(StatsResponse::now(stats)))
}
