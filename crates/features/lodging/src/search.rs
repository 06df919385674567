use axum::extract::State;
use hbnb_derive::api_handler;
use hbnb_kernel::domain::constants::PLACES_TAG;
use hbnb_kernel::domain::models::{Place, PlaceFilter};
use hbnb_kernel::server::{ApiError, ApiState, Entities, JsonBody};

/// Places in any listed state or city that carry every listed amenity.
/// An empty filter returns every place.
#[api_handler(
    post,
    path = "/places_search",
    request_body = PlaceFilter,
    responses(
        (status = OK, description = "Matching places", body = [Place]),
        (status = BAD_REQUEST, description = "Not a JSON"),
    ),
    tag = PLACES_TAG,
)]
pub(crate) async fn places_search(
    State(api): State<ApiState>,
    body: JsonBody,
) -> Result<Entities<Place>, ApiError> {
    let filter: PlaceFilter = body.decode()?;
    Ok(Entities(api.storage.search_places(&filter)))
}
