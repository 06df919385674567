use axum::Json;
use axum::extract::{Path, State};
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::REVIEWS_TAG;
use hbnb_kernel::domain::models::{NewReview, Place, Review, ReviewPatch, User};
use hbnb_kernel::server::{ApiError, ApiState, Created, Entities, Entity, JsonBody, crud};
use serde_json::Value;

#[api_handler(
    get,
    path = "/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place id")),
    responses(
        (status = OK, description = "Reviews of the place", body = [Review]),
        (status = NOT_FOUND, description = "Unknown place"),
    ),
    tag = REVIEWS_TAG,
)]
pub(crate) async fn list_reviews(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
) -> Result<Entities<Review>, ApiError> {
    api.ensure::<Place>(&place_id)?;
    Ok(Entities(api.storage.children::<Place, Review>(&place_id)))
}

#[api_handler(
    post,
    path = "/places/{place_id}/reviews",
    params(("place_id" = String, Path, description = "Place id")),
    request_body = NewReview,
    responses(
        (status = CREATED, description = "Review created", body = Review),
        (status = BAD_REQUEST, description = "Not a JSON, Missing user_id, or Missing text"),
        (status = NOT_FOUND, description = "Unknown place or user"),
    ),
    tag = REVIEWS_TAG,
)]
pub(crate) async fn create_review(
    State(api): State<ApiState>,
    Path(place_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Created<Review>, ApiError> {
    api.ensure::<Place>(&place_id)?;
    let body = body?;
    api.ensure::<User>(body.require_str("user_id")?)?;
    body.require("text")?;
    let draft: NewReview = body.decode()?;
    crud::create(&api, Review::new(place_id, draft)).await
}

#[api_handler(
    get,
    path = "/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review id")),
    responses(
        (status = OK, description = "The review", body = Review),
        (status = NOT_FOUND, description = "Unknown review"),
    ),
    tag = REVIEWS_TAG,
)]
pub(crate) async fn get_review(
    State(api): State<ApiState>,
    Path(review_id): Path<String>,
) -> Result<Entity<Review>, ApiError> {
    crud::show(&api, &review_id)
}

#[api_handler(
    put,
    path = "/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review id")),
    request_body = ReviewPatch,
    responses(
        (status = OK, description = "Updated review", body = Review),
        (status = BAD_REQUEST, description = "Not a JSON"),
        (status = NOT_FOUND, description = "Unknown review"),
    ),
    tag = REVIEWS_TAG,
)]
pub(crate) async fn update_review(
    State(api): State<ApiState>,
    Path(review_id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<Review>, ApiError> {
    crud::update(&api, &review_id, body).await
}

#[api_handler(
    delete,
    path = "/reviews/{review_id}",
    params(("review_id" = String, Path, description = "Review id")),
    responses(
        (status = OK, description = "Deleted; empty object"),
        (status = NOT_FOUND, description = "Unknown review"),
    ),
    tag = REVIEWS_TAG,
)]
pub(crate) async fn delete_review(
    State(api): State<ApiState>,
    Path(review_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    crud::delete::<Review>(&api, &review_id).await
}
