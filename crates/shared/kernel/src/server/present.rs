//! Response bodies: the serialized record (with `__class__`) minus the private fields.

use crate::server::error::ApiError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hbnb_domain::models::{Model, Record};
use serde_json::Value;

/// Serializes `model` the way clients see it.
///
/// # Errors
/// [`ApiError::Internal`] if serialization fails.
pub fn public<T: Model>(model: T) -> Result<Value, ApiError> {
    let record: Record = model.into();
    let mut value = serde_json::to_value(record)
        .map_err(|e| ApiError::from(format!("Failed to serialize {}: {e}", T::KIND)))?;
    if let Value::Object(map) = &mut value {
        for field in T::PRIVATE_FIELDS {
            map.remove(*field);
        }
    }
    Ok(value)
}

/// `200` with one entity.
#[derive(Debug)]
pub struct Entity<T>(pub T);

/// `201` with the created entity.
#[derive(Debug)]
pub struct Created<T>(pub T);

/// `200` with a JSON array of entities.
#[derive(Debug)]
pub struct Entities<T>(pub Vec<T>);

impl<T: Model> IntoResponse for Entity<T> {
    fn into_response(self) -> Response {
        match public(self.0) {
            Ok(value) => Json(value).into_response(),
            Err(err) => err.into_response(),
        }
    }
}

impl<T: Model> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        match public(self.0) {
            Ok(value) => (StatusCode::CREATED, Json(value)).into_response(),
            Err(err) => err.into_response(),
        }
    }
}

impl<T: Model> IntoResponse for Entities<T> {
    fn into_response(self) -> Response {
        match self.0.into_iter().map(public).collect::<Result<Vec<_>, _>>() {
            Ok(values) => Json(values).into_response(),
            Err(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::models::{NewUser, User};

    #[test]
    fn private_fields_are_stripped() {
        let user = User::new(NewUser {
            email: "ada@hbnb.io".to_owned(),
            password: "hunter2".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
        });
        let value = public(user).unwrap();

        assert_eq!(value["__class__"], "User");
        assert_eq!(value["email"], "ada@hbnb.io");
        assert_eq!(value["last_name"], Value::Null);
        assert!(value.get("password").is_none());
    }
}
