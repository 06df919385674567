use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::STATES_TAG;
use hbnb_kernel::domain::models::{self, NewState};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/states",
    responses((status = OK, description = "Every state", body = [models::State])),
    tag = STATES_TAG,
)]
pub(crate) async fn list_states(State(api): State<ApiState>) -> Entities<models::State> {
    Entities(api.storage.all::<models::State>())
}

#[api_handler(
    post,
    path = "/states",
    request_body = NewState,
    responses(
        (status = CREATED, description = "State created", body = models::State),
        (status = BAD_REQUEST, description = "Not a JSON, or Missing name"),
    ),
    tag = STATES_TAG,
)]
pub(crate) async fn create_state(
    State(api): State<ApiState>,
    body: JsonBody,
) -> Result<Created<models::State>, ApiError> {
    body.require("name")?;
    let draft: NewState = body.decode()?;
    crud::create(&api, models::State::new(draft)).await
}

#[api_handler(
    get,
    path = "/states/{state_id}",
    params(("state_id" = String, Path, description = "State id")),
    responses(
        (status = OK, description = "The state", body = models::State),
        (status = NOT_FOUND, description = "Unknown state"),
    ),
    tag = STATES_TAG,
)]
pub(crate) async fn get_state(
    State(api): State<ApiState>,
    Path(state_id): Path<String>,
) -> Result<Entity<models::State>, ApiError> {
    crud::show(&api, &state_id)
}

#[api_handler(
    put,
    path = "/states/{state_id}",
    params(("state_id" = String, Path, description = "State id")),
    request_body = models::StatePatch,
    responses(
        (status = OK, description = "Updated state", body = models::State),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown state"),
    ),
    tag = STATES_TAG,
)]
pub(crate) async fn update_state(
    State(api): State<ApiState>,
    Path(state_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<models::State>, ApiError> {
    crud::update(&api, &state_id, body).await
}

#[api_handler(
    delete,
    path = "/states/{state_id}",
    params(("state_id" = String, Path, description = "State id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown state"),
    ),
    tag = STATES_TAG,
)]
pub(crate) async fn delete_state(
    State(api): State<ApiState>,
    Path(state_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<models::State>(&api, &state_id).await
}
