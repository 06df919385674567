//! Amenities: standalone entities that places link to.

#[cfg(feature = "server")]
mod handlers;

#[cfg(feature = "server")]
use hbnb_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes of the slice, relative to the API prefix.
#[cfg(feature = "server")]
pub fn router() -> OpenApiRouter<ApiState> {
    tracing::debug!("Mounting amenities routes");
    OpenApiRouter::new()
        .routes(routes!(handlers::list_amenities, handlers::create_amenity))
        .routes(routes!(handlers::get_amenity, handlers::update_amenity, handlers::delete_amenity))
}
