//! Multi-criteria place search.

use crate::engine::Storage;
use fxhash::FxHashSet;
use hbnb_domain::models::{Amenity, City, PlaceFilter, Place, State};
use std::collections::BTreeMap;
use tracing::debug;

impl Storage {
    /// Places matching `filter`, ordered by id.
    ///
    /// 1. With no state and no city, the candidates are all places.
    /// 2. Otherwise the candidates are the places of every listed city plus the places of every
    ///    city of every listed state. Ids that do not resolve contribute nothing. A place reached
    ///    through both its state and its city appears once.
    /// 3. Amenities filter last: a candidate must be linked to every listed amenity. An amenity
    ///    id that does not resolve can never be satisfied, so it empties the result.
    ///
    /// The whole computation observes a single registry state.
    #[must_use]
    pub fn search_places(&self, filter: &PlaceFilter) -> Vec<Place> {
        let registry = self.registry.read();
        let places = registry.models::<Place>();

        let candidates: BTreeMap<&str, &Place> = if filter.has_location() {
            let mut city_ids: FxHashSet<&str> = filter
                .cities
                .iter()
                .filter(|id| registry.find::<City>(id).is_some())
                .map(String::as_str)
                .collect();

            let state_ids: FxHashSet<&str> = filter
                .states
                .iter()
                .filter(|id| registry.find::<State>(id).is_some())
                .map(String::as_str)
                .collect();
            if !state_ids.is_empty() {
                city_ids.extend(
                    registry
                        .models::<City>()
                        .filter(|city| state_ids.contains(city.state_id.as_str()))
                        .map(|city| city.meta.id.as_str()),
                );
            }

            places
                .filter(|place| city_ids.contains(place.city_id.as_str()))
                .map(|place| (place.meta.id.as_str(), place))
                .collect()
        } else {
            places.map(|place| (place.meta.id.as_str(), place)).collect()
        };

        let required: Vec<&str> = filter.amenities.iter().map(String::as_str).collect();
        if required.iter().any(|id| registry.find::<Amenity>(id).is_none()) {
            debug!(?filter, "Unknown amenity requested; no place can match");
            return Vec::new();
        }

        let matches: Vec<Place> = candidates
            .into_values()
            .filter(|place| place.has_all_amenities(required.iter().copied()))
            .cloned()
            .collect();

        debug!(
            states = filter.states.len(),
            cities = filter.cities.len(),
            amenities = filter.amenities.len(),
            matches = matches.len(),
            "Place search"
        );
        matches
    }
}
