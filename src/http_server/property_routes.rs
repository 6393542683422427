//! Property HTTP Routes
//!
//! CRUD endpoints for `/api/propiedades`.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use super::errors::{ApiError, ApiJson, ApiPath, ApiQuery, ApiResult, Resource};
use super::response::{DataResponse, ListResponse, MessageResponse};
use super::AppState;
use crate::filter::PropertyFilter;
use crate::models::{Property, PropertyDraft, PropertyPatch};

/// Create property routes
pub fn property_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/propiedades",
            get(list_properties_handler).post(create_property_handler),
        )
        .route(
            "/propiedades/:id",
            get(get_property_handler)
                .put(update_property_handler)
                .delete(delete_property_handler),
        )
        .with_state(state)
}

async fn list_properties_handler(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse<Property, PropertyFilter>>> {
    let filter = PropertyFilter::parse(&params)?;
    let properties = state.store.list_properties(&filter).await?;
    Ok(Json(ListResponse::new(properties, filter)))
}

async fn get_property_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<DataResponse<Property>>> {
    let id = Resource::Property.parse_id(&id)?;
    let property = state
        .store
        .get_property(id)
        .await?
        .ok_or(ApiError::NotFound(Resource::Property))?;
    Ok(Json(DataResponse::new(property)))
}

async fn create_property_handler(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<PropertyDraft>,
) -> ApiResult<(StatusCode, Json<DataResponse<Property>>)> {
    let new = draft.validate()?;
    let property = state.store.create_property(new).await?;
    info!(id = property.id, tipo = %property.category, "property created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            property,
            "Propiedad creada exitosamente",
        )),
    ))
}

async fn update_property_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<PropertyPatch>,
) -> ApiResult<Json<DataResponse<Property>>> {
    let id = Resource::Property.parse_id(&id)?;
    let property = state
        .store
        .update_property(id, patch)
        .await?
        .ok_or(ApiError::NotFound(Resource::Property))?;
    info!(id, "property updated");

    Ok(Json(DataResponse::with_message(
        property,
        "Propiedad actualizada exitosamente",
    )))
}

async fn delete_property_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = Resource::Property.parse_id(&id)?;
    if !state.store.delete_property(id).await? {
        return Err(ApiError::NotFound(Resource::Property));
    }
    info!(id, "property deleted");

    Ok(Json(MessageResponse {
        message: "Propiedad eliminada exitosamente",
    }))
}
