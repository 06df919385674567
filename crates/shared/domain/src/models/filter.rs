use hbnb_derive::api_model;
use serde::{Deserialize, Deserializer};

/// Body of `POST /places_search`. Every axis is optional; a missing, `null` or empty axis
/// does not filter.
#[api_model]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PlaceFilter {
    #[serde(default, deserialize_with = "absent_as_empty")]
    pub states: Vec<String>,
    #[serde(default, deserialize_with = "absent_as_empty")]
    pub cities: Vec<String>,
    /// A place must carry every listed amenity.
    #[serde(default, deserialize_with = "absent_as_empty")]
    pub amenities: Vec<String>,
}

impl PlaceFilter {
    #[must_use]
    pub fn has_location(&self) -> bool {
        !self.states.is_empty() || !self.cities.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_location() && self.amenities.is_empty()
    }
}

fn absent_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
