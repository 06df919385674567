use super::{EntityKind, Metadata, Model, record_access};
use hbnb_derive::api_model;

#[api_model]
#[derive(Clone)]
pub struct State {
    #[serde(flatten)]
    pub meta: Metadata,
    pub name: String,
}

/// Body of `POST /states`.
#[api_model]
#[derive(Clone)]
pub struct NewState {
    pub name: String,
}

#[api_model]
#[derive(Clone, Default)]
pub struct StatePatch {
    pub name: Option<String>,
}

impl State {
    #[must_use]
    pub fn new(draft: NewState) -> Self {
        Self { meta: Metadata::new(), name: draft.name }
    }
}

impl Model for State {
    const KIND: EntityKind = EntityKind::State;

    type Patch = StatePatch;

    record_access!(State);

    fn apply(&mut self, patch: StatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}
