use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::AMENITIES_TAG;
use hbnb_kernel::domain::models::{Amenity, AmenityPatch, NewAmenity};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/amenities",
    responses((status = OK, description = "Every amenity", body = [Amenity])),
    tag = AMENITIES_TAG,
)]
pub(crate) async fn list_amenities(State(api): State<ApiState>) -> Entities<Amenity> {
    Entities(api.storage.all::<Amenity>())
}

#[api_handler(
    post,
    path = "/amenities",
    request_body = NewAmenity,
    responses(
        (status = CREATED, description = "Amenity created", body = Amenity),
        (status = BAD_REQUEST, description = "Not a JSON, or Missing name"),
    ),
    tag = AMENITIES_TAG,
)]
pub(crate) async fn create_amenity(
    State(api): State<ApiState>,
    body: JsonBody,
) -> Result<Created<Amenity>, ApiError> {
    body.require("name")?;
    let draft: NewAmenity = body.decode()?;
    crud::create(&api, Amenity::new(draft)).await
}

#[api_handler(
    get,
    path = "/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity id")),
    responses(
        (status = OK, description = "The amenity", body = Amenity),
        (status = NOT_FOUND, description = "Unknown amenity"),
    ),
    tag = AMENITIES_TAG,
)]
pub(crate) async fn get_amenity(
    State(api): State<ApiState>,
    Path(amenity_id): Path<String>,
) -> Result<Entity<Amenity>, ApiError> {
    crud::show(&api, &amenity_id)
}

#[api_handler(
    put,
    path = "/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity id")),
    request_body = AmenityPatch,
    responses(
        (status = OK, description = "Updated amenity", body = Amenity),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown amenity"),
    ),
    tag = AMENITIES_TAG,
)]
pub(crate) async fn update_amenity(
    State(api): State<ApiState>,
    Path(amenity_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<Amenity>, ApiError> {
    crud::update(&api, &amenity_id, body).await
}

/// Under the cascade policy the amenity is also unlinked from every place.
#[api_handler(
    delete,
    path = "/amenities/{amenity_id}",
    params(("amenity_id" = String, Path, description = "Amenity id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown amenity"),
    ),
    tag = AMENITIES_TAG,
)]
pub(crate) async fn delete_amenity(
    State(api): State<ApiState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<Amenity>(&api, &amenity_id).await
}
