//! The six HBnB entities and the closed [`Record`] sum over them.
//!
//! Every entity is a plain struct with a flattened [`Metadata`] block; [`Record`] is what the
//! storage registry holds and what the snapshot file contains (tagged by `__class__`).

mod amenity;
mod city;
mod filter;
mod place;
mod review;
mod state;
mod user;

pub use amenity::{Amenity, AmenityPatch, NewAmenity};
pub use city::{City, CityPatch, NewCity};
pub use filter::PlaceFilter;
pub use place::{NewPlace, Place, PlacePatch};
pub use review::{NewReview, Review, ReviewPatch};
pub use state::{NewState, State, StatePatch};
pub use user::{NewUser, User, UserPatch};

use crate::id;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Patch field decoder for nullable attributes: an absent key stays `None`, an explicit `null`
/// becomes `Some(None)` and clears the attribute.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The six entity types.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl EntityKind {
    /// The class name written to `__class__` and used in registry keys.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::State => "State",
            Self::User => "User",
        }
    }

    /// Plural collection name, as reported by `/stats`.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Amenity => "amenities",
            Self::City => "cities",
            Self::Place => "places",
            Self::Review => "reviews",
            Self::State => "states",
            Self::User => "users",
        }
    }

    /// All kinds in class-name order.
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

/// Identity and timestamps common to every entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Metadata {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Metadata {
    /// Fresh identifier, `created_at == updated_at == now`.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self { id: id::generate(), created_at: now, updated_at: now }
    }

    /// Refreshes `updated_at`; it never moves backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Behaviour shared by the six entity structs.
pub trait Model: Clone + Send + Sync + Into<Record> + 'static {
    const KIND: EntityKind;

    /// Keys of an update mapping that are dropped before decoding [`Model::Patch`].
    /// The base keys (`id`, `created_at`, `updated_at`, `__class__`) are always dropped too.
    const IMMUTABLE_FIELDS: &'static [&'static str] = &[];

    /// Keys stored but never returned over HTTP.
    const PRIVATE_FIELDS: &'static [&'static str] = &[];

    /// Partial update with all fields optional.
    type Patch: DeserializeOwned + Send;

    fn meta(&self) -> &Metadata;

    fn meta_mut(&mut self) -> &mut Metadata;

    fn from_record(record: &Record) -> Option<&Self>;

    fn from_record_mut(record: &mut Record) -> Option<&mut Self>;

    /// Applies the present fields of `patch`. Does not touch `updated_at`.
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn touch(&mut self) {
        self.meta_mut().touch();
    }
}

/// A child entity holding the identifier of its `Owner`.
pub trait BelongsTo<Owner: Model>: Model {
    fn owner_id(&self) -> &str;
}

/// Any stored entity, tagged by its class name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Record {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Amenity(_) => EntityKind::Amenity,
            Self::City(_) => EntityKind::City,
            Self::Place(_) => EntityKind::Place,
            Self::Review(_) => EntityKind::Review,
            Self::State(_) => EntityKind::State,
            Self::User(_) => EntityKind::User,
        }
    }

    #[must_use]
    pub const fn meta(&self) -> &Metadata {
        match self {
            Self::Amenity(m) => &m.meta,
            Self::City(m) => &m.meta,
            Self::Place(m) => &m.meta,
            Self::Review(m) => &m.meta,
            Self::State(m) => &m.meta,
            Self::User(m) => &m.meta,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// Identity of the record: two records are the same entity iff their keys match.
    #[must_use]
    pub fn key(&self) -> (EntityKind, &str) {
        (self.kind(), self.id())
    }

    /// Foreign keys of this record as `(owner kind, owner id)` pairs.
    #[must_use]
    pub fn owners(&self) -> Vec<(EntityKind, &str)> {
        match self {
            Self::City(city) => vec![(EntityKind::State, city.state_id.as_str())],
            Self::Place(place) => vec![
                (EntityKind::City, place.city_id.as_str()),
                (EntityKind::User, place.user_id.as_str()),
            ],
            Self::Review(review) => vec![
                (EntityKind::Place, review.place_id.as_str()),
                (EntityKind::User, review.user_id.as_str()),
            ],
            Self::Amenity(_) | Self::State(_) | Self::User(_) => Vec::new(),
        }
    }

    /// `"<Class>.<id>"`, the key used by the snapshot file and `all_records`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.kind().class_name(), self.id())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Record {}

/// Wires an entity struct into [`Record`] and gives it identifier equality.
macro_rules! entity {
    ($ty:ident) => {
        impl From<$ty> for Record {
            fn from(model: $ty) -> Self {
                Self::$ty(model)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.meta.id == other.meta.id
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.meta.id.hash(state);
            }
        }
    };
}

/// The `Model` methods that only differ by variant name.
macro_rules! record_access {
    ($ty:ident) => {
        fn meta(&self) -> &$crate::models::Metadata {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut $crate::models::Metadata {
            &mut self.meta
        }

        fn from_record(record: &$crate::models::Record) -> Option<&Self> {
            match record {
                $crate::models::Record::$ty(model) => Some(model),
                _ => None,
            }
        }

        fn from_record_mut(record: &mut $crate::models::Record) -> Option<&mut Self> {
            match record {
                $crate::models::Record::$ty(model) => Some(model),
                _ => None,
            }
        }
    };
}

pub(crate) use record_access;

entity!(Amenity);
entity!(City);
entity!(Place);
entity!(Review);
entity!(State);
entity!(User);
