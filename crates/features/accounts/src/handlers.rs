use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::USERS_TAG;
use hbnb_kernel::domain::models::{NewUser, User, UserPatch};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/users",
    responses((status = OK, description = "Every user, without passwords", body = [User])),
    tag = USERS_TAG,
)]
pub(crate) async fn list_users(State(api): State<ApiState>) -> Entities<User> {
    Entities(api.storage.all::<User>())
}

#[api_handler(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = CREATED, description = "User created", body = User),
        (status = BAD_REQUEST, description = "Not a JSON, Missing email, or Missing password"),
    ),
    tag = USERS_TAG,
)]
pub(crate) async fn create_user(
    State(api): State<ApiState>,
    body: JsonBody,
) -> Result<Created<User>, ApiError> {
    body.require("email")?;
    body.require("password")?;
    let draft: NewUser = body.decode()?;
    crud::create(&api, User::new(draft)).await
}

#[api_handler(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = OK, description = "The user", body = User),
        (status = NOT_FOUND, description = "Unknown user"),
    ),
    tag = USERS_TAG,
)]
pub(crate) async fn get_user(
    State(api): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Entity<User>, ApiError> {
    crud::show(&api, &user_id)
}

#[api_handler(
    put,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = OK, description = "Updated user; the email never changes", body = User),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown user"),
    ),
    tag = USERS_TAG,
)]
pub(crate) async fn update_user(
    State(api): State<ApiState>,
    Path(user_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<User>, ApiError> {
    crud::update(&api, &user_id, body).await
}

#[api_handler(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown user"),
    ),
    tag = USERS_TAG,
)]
pub(crate) async fn delete_user(
    State(api): State<ApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<User>(&api, &user_id).await
}
