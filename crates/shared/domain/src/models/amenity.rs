use super::{EntityKind, Metadata, Model, record_access};
use hbnb_derive::api_model;

#[api_model]
#[derive(Clone)]
pub struct Amenity {
    #[serde(flatten)]
    pub meta: Metadata,
    pub name: String,
}

#[api_model]
#[derive(Clone)]
pub struct NewAmenity {
    pub name: String,
}

#[api_model]
#[derive(Clone, Default)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

impl Amenity {
    #[must_use]
    pub fn new(draft: NewAmenity) -> Self {
        Self { meta: Metadata::new(), name: draft.name }
    }
}

impl Model for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    type Patch = AmenityPatch;

    record_access!(Amenity);

    fn apply(&mut self, patch: AmenityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
