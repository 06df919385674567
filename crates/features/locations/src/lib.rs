//! States and the cities they contain.
//!
//! Cities are created under their state (`/states/{state_id}/cities`) and addressed
//! directly afterwards (`/cities/{city_id}`).

#[cfg(feature = "server")]
mod cities;
#[cfg(feature = "server")]
mod states;

#[cfg(feature = "server")]
use hbnb_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes of the slice, relative to the API prefix.
#[cfg(feature = "server")]
pub fn router() -> OpenApiRouter<ApiState> {
    tracing::debug!("Mounting locations routes");
    OpenApiRouter::new()
        .routes(routes!(states::list_states, states::create_state))
        .routes(routes!(states::get_state, states::update_state, states::delete_state))
        .routes(routes!(cities::list_cities, cities::create_city))
        .routes(routes!(cities::get_city, cities::update_city, cities::delete_city))
}
