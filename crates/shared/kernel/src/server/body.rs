//! Request bodies: must be a JSON object; required keys are checked before decoding.

use crate::server::error::ApiError;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use hbnb_domain::constants::BASE_IMMUTABLE_FIELDS;
use hbnb_domain::models::Model;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A request body that parsed as a JSON object.
///
/// Anything else (empty body, invalid JSON, an array, a scalar) is rejected with
/// `400 Not a JSON`. Take it as `Result<JsonBody, ApiError>` when a path lookup must fail
/// with 404 before the body is judged.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| ApiError::not_a_json())?;
        Self::parse(&bytes)
    }
}

impl JsonBody {
    /// # Errors
    /// `400 Not a JSON` unless `bytes` hold a JSON object.
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(ApiError::not_a_json()),
        }
    }

    /// # Errors
    /// `400 Missing <field>` when the key is absent.
    pub fn require(&self, field: &str) -> Result<&Value, ApiError> {
        self.0.get(field).ok_or_else(|| ApiError::missing(field))
    }

    /// A required key holding a string, typically a referenced id.
    ///
    /// # Errors
    /// `400 Missing <field>` when absent, `400` when not a string.
    pub fn require_str(&self, field: &str) -> Result<&str, ApiError> {
        self.require(field)?
            .as_str()
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {field}: expected a string")))
    }

    /// Decodes the whole object; unknown keys are ignored.
    ///
    /// # Errors
    /// `400` with the decoder message when a known key has the wrong type.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| ApiError::bad_request(e.to_string()))
    }

    /// Decodes an update after dropping every key the entity forbids changing.
    ///
    /// # Errors
    /// See [`JsonBody::decode`].
    pub fn into_patch<T: Model>(mut self) -> Result<T::Patch, ApiError> {
        for key in BASE_IMMUTABLE_FIELDS.iter().chain(T::IMMUTABLE_FIELDS) {
            self.0.remove(*key);
        }
        self.decode()
    }
}
