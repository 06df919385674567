use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::CITIES_TAG;
use hbnb_kernel::domain::models::{self, City, CityPatch, NewCity};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/states/{state_id}/cities",
    params(("state_id" = String, Path, description = "State id")),
    responses(
        (status = OK, description = "Cities of the state", body = [City]),
        (status = NOT_FOUND, description = "Unknown state"),
    ),
    tag = CITIES_TAG,
)]
pub(crate) async fn list_cities(
    State(api): State<ApiState>,
    Path(state_id): Path<String>,
) -> Result<Entities<City>, ApiError> {
    api.ensure::<models::State>(&state_id)?;
    Ok(Entities(api.storage.children::<models::State, City>(&state_id)))
}

#[api_handler(
    post,
    path = "/states/{state_id}/cities",
    params(("state_id" = String, Path, description = "State id")),
    request_body = NewCity,
    responses(
        (status = CREATED, description = "City created", body = City),
        (status = BAD_REQUEST, description = "Not a JSON, or Missing name"),
        (status = NOT_FOUND, description = "Unknown state"),
    ),
    tag = CITIES_TAG,
)]
pub(crate) async fn create_city(
    State(api): State<ApiState>,
    Path(state_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Created<City>, ApiError> {
    api.ensure::<models::State>(&state_id)?;
    let body = body?;
    body.require("name")?;
    let draft: NewCity = body.decode()?;
    crud::create(&api, City::new(state_id, draft)).await
}

#[api_handler(
    get,
    path = "/cities/{city_id}",
    params(("city_id" = String, Path, description = "City id")),
    responses(
        (status = OK, description = "The city", body = City),
        (status = NOT_FOUND, description = "Unknown city"),
    ),
    tag = CITIES_TAG,
)]
pub(crate) async fn get_city(
    State(api): State<ApiState>,
    Path(city_id): Path<String>,
) -> Result<Entity<City>, ApiError> {
    crud::show(&api, &city_id)
}

#[api_handler(
    put,
    path = "/cities/{city_id}",
    params(("city_id" = String, Path, description = "City id")),
    request_body = CityPatch,
    responses(
        (status = OK, description = "Updated city; state_id never changes", body = City),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown city"),
    ),
    tag = CITIES_TAG,
)]
pub(crate) async fn update_city(
    State(api): State<ApiState>,
    Path(city_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<City>, ApiError> {
    crud::update(&api, &city_id, body).await
}

#[api_handler(
    delete,
    path = "/cities/{city_id}",
    params(("city_id" = String, Path, description = "City id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown city"),
    ),
    tag = CITIES_TAG,
)]
pub(crate) async fn delete_city(
    State(api): State<ApiState>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<City>(&api, &city_id).await
}
