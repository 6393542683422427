//! Statistics HTTP Routes

use axum::{extract::State, routing::get, Json, Router};

use super::errors::ApiResult;
use super::response::StatsResponse;
use super::AppState;
use crate::stats::ListingStats;

/// Create the combined statistics route
pub fn stats_routes(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(listing_stats_handler))
        .with_state(state)
}

async fn listing_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<StatsResponse<ListingStats>>> {
    let (properties, inquiries) =
        tokio::try_join!(state.store.property_stats(), state.store.inquiry_stats())?;

    Ok(Json(StatsResponse::now(ListingStats {
        properties,
        inquiries,
    })))
}
