//! The read/update/delete/create steps every entity route shares.

use crate::server::body::JsonBody;
use crate::server::error::ApiError;
use crate::server::present::{Created, Entity};
use crate::server::state::ApiState;
use axum::Json;
use hbnb_domain::models::Model;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// `GET /<collection>/{id}`.
///
/// # Errors
/// `404` when absent.
pub fn show<T: Model>(api: &ApiState, id: &str) -> Result<Entity<T>, ApiError> {
    api.fetch::<T>(id).map(Entity)
}

/// Registers a new entity, saves, and answers `201`.
///
/// # Errors
/// `500` when the snapshot cannot be written; the entity is then dropped from the registry.
pub async fn create<T: Model>(api: &ApiState, model: T) -> Result<Created<T>, ApiError> {
    api.storage.register(&model);
    if let Err(err) = api.commit().await {
        api.storage.delete::<T>(model.id());
        warn!(kind = %T::KIND, id = model.id(), "Create rolled back: {err}");
        return Err(err);
    }
    info!(kind = %T::KIND, id = model.id(), "Created");
    Ok(Created(model))
}

/// `PUT /<collection>/{id}`: 404 first, then the body; immutable keys are ignored.
///
/// # Errors
/// `404`, `400 Not a JSON`, `400` for badly typed values, `500` on save failure.
pub async fn update<T: Model>(
    api: &ApiState,
    id: &str,
    body: Result<JsonBody, ApiError>,
) -> Result<Entity<T>, ApiError> {
    api.ensure::<T>(id)?;
    let patch = body?.into_patch::<T>()?;
    let updated =
        api.storage.update::<T>(id, |model| model.apply(patch)).ok_or_else(ApiError::not_found)?;
    api.commit().await?;
    Ok(Entity(updated))
}

/// `DELETE /<collection>/{id}`: answers `200 {}`.
///
/// # Errors
/// `404` when absent, `500` on save failure.
pub async fn delete<T: Model>(api: &ApiState, id: &str) -> Result<Json<Value>, ApiError> {
    api.storage.delete::<T>(id).ok_or_else(ApiError::not_found)?;
    api.commit().await?;
    info!(kind = %T::KIND, id, "Deleted");
    Ok(Json(Value::Object(Map::new())))
}
