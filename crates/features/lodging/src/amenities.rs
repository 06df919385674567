use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::PLACES_TAG;
use hbnb_kernel::domain::models::{Amenity, Place};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity};
use serde_json::{Map, Value};
use tracing::info;

#[api_handler(
    get,
    path = "/places/{place_id}/amenities",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = OK, description = "Amenities linked to the place", body = [Amenity]),
        (status = NOT_FOUND, description = "Unknown place"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn list_place_amenities(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
) -> Result<Entities<Amenity>, ApiError> {
    api.storage.amenities_of(&place_id).map(Entities).ok_or_else(ApiError::not_found)
}

/// `201` when the link is new, `200` when it already existed.
#[api_handler(
    post,
    path = "/places/{place_id}/amenities/{amenity_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("amenity_id" = String, Path, description = "Amenity id"),
    ),
    responses(
        (status = CREATED, description = "Amenity linked", body = Amenity),
        (status = OK, description = "Amenity was already linked", body = Amenity),
        (status = NOT_FOUND, description = "Unknown place or amenity"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn link_amenity(
    State(api): State<ApiState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    api.ensure::<Place>(&place_id)?;
    let amenity = api.fetch::<Amenity>(&amenity_id)?;

    let linked =
        api.storage.link_amenity(&place_id, &amenity_id).ok_or_else(ApiError::not_found)?;
    if !linked {
        return Ok(Entity(amenity).into_response());
    }

    api.commit().await?;
    info!(place = %place_id, amenity = %amenity_id, "Amenity linked");
    Ok(Created(amenity).into_response())
}

#[api_handler(
    delete,
    path = "/places/{place_id}/amenities/{amenity_id}",
    params(
        ("place_id" = String, Path, description = "Place id"),
        ("amenity_id" = String, Path, description = "Amenity id"),
    ),
    responses(
        (status = OK, description = "Link removed; empty object"),
        (status = NOT_FOUND, description = "Unknown place or amenity, or not linked"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn unlink_amenity(
    State(api): State<ApiState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    api.ensure::<Place>(&place_id)?;
    api.ensure::<Amenity>(&amenity_id)?;

    match api.storage.unlink_amenity(&place_id, &amenity_id) {
        Some(true) => {
            api.commit().await?;
            info!(place = %place_id, amenity = %amenity_id, "Amenity unlinked");
            Ok(Json(Value::Object(Map::new())))
        },
        _ => Err(ApiError::not_found()),
    }
}
