use super::{BelongsTo, City, EntityKind, Metadata, Model, User, nullable, record_access};
use hbnb_derive::api_model;
use std::collections::BTreeSet;

#[api_model]
#[derive(Clone)]
pub struct Place {
    #[serde(flatten)]
    pub meta: Metadata,
    pub name: String,
    pub city_id: String,
    pub user_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Linked amenities; a set, so linking twice is a no-op.
    #[serde(default)]
    pub amenity_ids: BTreeSet<String>,
}

/// Body of `POST /cities/{city_id}/places`.
#[api_model]
#[derive(Clone)]
pub struct NewPlace {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub number_rooms: u32,
    #[serde(default)]
    pub number_bathrooms: u32,
    #[serde(default)]
    pub max_guest: u32,
    #[serde(default)]
    pub price_by_night: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[api_model]
#[derive(Clone, Default)]
pub struct PlacePatch {
    pub name: Option<String>,
    /// `null` clears the description.
    #[serde(default, deserialize_with = "nullable")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>))]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[cfg_attr(feature = "server", schema(value_type = Option<f64>))]
    pub longitude: Option<Option<f64>>,
}

impl Place {
    #[must_use]
    pub fn new(city_id: impl Into<String>, draft: NewPlace) -> Self {
        let NewPlace {
            user_id,
            name,
            description,
            number_rooms,
            number_bathrooms,
            max_guest,
            price_by_night,
            latitude,
            longitude,
        } = draft;

        Self {
            meta: Metadata::new(),
            name,
            city_id: city_id.into(),
            user_id,
            description,
            number_rooms,
            number_bathrooms,
            max_guest,
            price_by_night,
            latitude,
            longitude,
            amenity_ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.contains(amenity_id)
    }

    /// True when every amenity id in `required` is linked to this place.
    pub fn has_all_amenities<'a>(&self, mut required: impl Iterator<Item = &'a str>) -> bool {
        required.all(|id| self.has_amenity(id))
    }
}

impl Model for Place {
    const KIND: EntityKind = EntityKind::Place;
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["city_id", "user_id", "amenity_ids"];

    type Patch = PlacePatch;

    record_access!(Place);

    fn apply(&mut self, patch: PlacePatch) {
        let PlacePatch {
            name,
            description,
            number_rooms,
            number_bathrooms,
            max_guest,
            price_by_night,
            latitude,
            longitude,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.number_rooms = number_rooms.unwrap_or(self.number_rooms);
        self.number_bathrooms = number_bathrooms.unwrap_or(self.number_bathrooms);
        self.max_guest = max_guest.unwrap_or(self.max_guest);
        self.price_by_night = price_by_night.unwrap_or(self.price_by_night);
        if let Some(latitude) = latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = longitude {
            self.longitude = longitude;
        }
    }
}

impl BelongsTo<City> for Place {
    fn owner_id(&self) -> &str {
        &self.city_id
    }
}

impl BelongsTo<User> for Place {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
