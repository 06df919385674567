use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::PLACES_TAG;
use hbnb_kernel::domain::models::{City, NewPlace, Place, PlacePatch, User};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/cities/{city_id}/places",
    params(("city_id" = String, Path, description = "City id")),
    responses(
        (status = OK, description = "Places of the city", body = [Place]),
        (status = NOT_FOUND, description = "Unknown city"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn list_places(
    State(api): State<ApiState>,
    Path(city_id): Path<String>,
) -> Result<Entities<Place>, ApiError> {
    api.ensure::<City>(&city_id)?;
    Ok(Entities(api.storage.children::<City, Place>(&city_id)))
}

/// Checks run in a fixed order: city, body, `user_id`, the user itself, then `name`.
#[api_handler(
    post,
    path = "/cities/{city_id}/places",
    params(("city_id" = String, Path, description = "City id")),
    request_body = NewPlace,
    responses(
        (status = CREATED, description = "Place created", body = Place),
        (status = BAD_REQUEST, description = "Not a JSON, Missing user_id, or Missing name"),
        (status = NOT_FOUND, description = "Unknown city or user"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn create_place(
    State(api): State<ApiState>,
    Path(city_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Created<Place>, ApiError> {
    api.ensure::<City>(&city_id)?;
    let body = body?;
    api.ensure::<User>(body.require_str("user_id")?)?;
    body.require("name")?;
    let draft: NewPlace = body.decode()?;
    crud::create(&api, Place::new(city_id, draft)).await
}

#[api_handler(
    get,
    path = "/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = OK, description = "The place", body = Place),
        (status = NOT_FOUND, description = "Unknown place"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn get_place(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
) -> Result<Entity<Place>, ApiError> {
    crud::show(&api, &place_id)
}

#[api_handler(
    put,
    path = "/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    request_body = PlacePatch,
    responses(
        (status = OK, description = "Updated place; owner, city and amenity links never change", body = Place),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown place"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn update_place(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<Place>, ApiError> {
    crud::update(&api, &place_id, body).await
}

#[api_handler(
    delete,
    path = "/places/{place_id}",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown place"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn delete_place(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<Place>(&api, &place_id).await
}
