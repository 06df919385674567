use super::{BelongsTo, EntityKind, Metadata, Model, State, record_access};
use hbnb_derive::api_model;

#[api_model]
#[derive(Clone)]
pub struct City {
    #[serde(flatten)]
    pub meta: Metadata,
    pub name: String,
    pub state_id: String,
}

/// Body of `POST /states/{state_id}/cities`; the state comes from the path.
#[api_model]
#[derive(Clone)]
pub struct NewCity {
    pub name: String,
}

#[api_model]
#[derive(Clone, Default)]
pub struct CityPatch {
    pub name: Option<String>,
}

impl City {
    #[must_use]
    pub fn new(state_id: impl Into<String>, draft: NewCity) -> Self {
        Self { meta: Metadata::new(), name: draft.name, state_id: state_id.into() }
    }
}

impl Model for City {
    const KIND: EntityKind = EntityKind::City;
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["state_id"];

    type Patch = CityPatch;

    record_access!(City);

    fn apply(&mut self, patch: CityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl BelongsTo<State> for City {
    fn owner_id(&self) -> &str {
        &self.state_id
    }
}
