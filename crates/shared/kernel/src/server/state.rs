use crate::server::error::ApiError;
use axum::extract::FromRef;
use hbnb_domain::config::ApiConfig;
use hbnb_domain::models::Model;
use hbnb_storage::Storage;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[hbnb_derive::hbnb_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub storage: Storage,
}

/// Shared state of every handler: the configuration and the storage engine.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    /// Loads an entity or fails with `404`.
    ///
    /// # Errors
    /// [`ApiError::NotFound`] when no `T` has this id.
    pub fn fetch<T: Model>(&self, id: &str) -> Result<T, ApiError> {
        self.storage.get::<T>(id).ok_or_else(ApiError::not_found)
    }

    /// Fails with `404` unless a `T` with this id exists.
    ///
    /// # Errors
    /// [`ApiError::NotFound`] when no `T` has this id.
    pub fn ensure<T: Model>(&self, id: &str) -> Result<(), ApiError> {
        if self.storage.exists::<T>(id) { Ok(()) } else { Err(ApiError::not_found()) }
    }

    /// Persists the registry; every mutating handler calls this before answering.
    ///
    /// # Errors
    /// [`ApiError::Storage`] when the snapshot cannot be written.
    pub async fn commit(&self) -> Result<(), ApiError> {
        Ok(self.storage.save().await?)
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Storage {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.storage.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    storage: Option<Storage>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// # Errors
    /// [`ApiStateError::Validation`] when the storage engine was not provided.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let storage = self.storage.ok_or_else(|| ApiStateError::Validation {
            message: "Storage not provided".into(),
            context: None,
        })?;
        let config = self.config.unwrap_or_default();

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, storage }) })
    }
}
