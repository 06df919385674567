//! User accounts.
//!
//! Passwords are accepted on create and update but never returned.

#[cfg(feature = "server")]
mod handlers;

#[cfg(feature = "server")]
use hbnb_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes of the slice, relative to the API prefix.
#[cfg(feature = "server")]
pub fn router() -> OpenApiRouter<ApiState> {
    tracing::debug!("Mounting accounts routes");
    OpenApiRouter::new()
        .routes(routes!(handlers::list_users, handlers::create_user))
        .routes(routes!(handlers::get_user, handlers::update_user, handlers::delete_user))
}
