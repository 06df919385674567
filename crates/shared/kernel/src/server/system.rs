use crate::server::error::ApiError;
use crate::server::state::ApiState;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use hbnb_derive::{api_handler, api_model};
use hbnb_domain::constants::SYSTEM_TAG;
use hbnb_domain::models::EntityKind;

#[api_model]
/// Liveness of the API.
pub struct StatusResponse {
    /// Always `OK`
    pub status: String,
}

#[api_model]
#[derive(Default, PartialEq, Eq)]
/// Number of stored entities per collection.
pub struct StatsResponse {
    pub amenities: usize,
    pub cities: usize,
    pub places: usize,
    pub reviews: usize,
    pub states: usize,
    pub users: usize,
}

#[api_handler(
    get,
    path = "/status",
    responses((status = OK, description = "API is up", body = StatusResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn status() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"), (header::PRAGMA, "no-cache")],
        Json(StatusResponse { status: "OK".to_owned() }),
    )
}

#[api_handler(
    get,
    path = "/stats",
    responses((status = OK, description = "Entity counts per collection", body = StatsResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn stats(State(state): State<ApiState>) -> Json<StatsResponse> {
    let count = |kind| state.storage.count(Some(kind));
    Json(StatsResponse {
        amenities: count(EntityKind::Amenity),
        cities: count(EntityKind::City),
        places: count(EntityKind::Place),
        reviews: count(EntityKind::Review),
        states: count(EntityKind::State),
        users: count(EntityKind::User),
    })
}

/// Fallback for unknown routes: `404 {"error": "Not found"}`.
#[allow(clippy::unused_async)]
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
