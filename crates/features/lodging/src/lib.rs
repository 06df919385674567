//! Places, their reviews and amenity links, and the place search.
//!
//! Places are created under a city (`/cities/{city_id}/places`) by an existing user;
//! reviews are created under a place by an existing user.

#[cfg(feature = "server")]
mod amenities;
#[cfg(feature = "server")]
mod places;
#[cfg(feature = "server")]
mod reviews;
#[cfg(feature = "server")]
mod search;

#[cfg(feature = "server")]
use hbnb_kernel::server::ApiState;
#[cfg(feature = "server")]
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes of the slice, relative to the API prefix.
#[cfg(feature = "server")]
pub fn router() -> OpenApiRouter<ApiState> {
    tracing::debug!("Mounting lodging routes");
    OpenApiRouter::new()
        .routes(routes!(places::list_places, places::create_place))
        .routes(routes!(places::get_place, places::update_place, places::delete_place))
        .routes(routes!(reviews::list_reviews, reviews::create_review))
        .routes(routes!(reviews::get_review, reviews::update_review, reviews::delete_review))
        .routes(routes!(amenities::list_place_amenities))
        .routes(routes!(amenities::link_amenity, amenities::unlink_amenity))
        .routes(routes!(search::places_search))
}
