use super::{BelongsTo, EntityKind, Metadata, Model, Place, User, record_access};
use hbnb_derive::api_model;

#[api_model]
#[derive(Clone)]
pub struct Review {
    #[serde(flatten)]
    pub meta: Metadata,
    pub text: String,
    pub place_id: String,
    pub user_id: String,
}

/// Body of `POST /places/{place_id}/reviews`.
#[api_model]
#[derive(Clone)]
pub struct NewReview {
    pub user_id: String,
    pub text: String,
}

#[api_model]
#[derive(Clone, Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
}

impl Review {
    #[must_use]
    pub fn new(place_id: impl Into<String>, draft: NewReview) -> Self {
        Self {
            meta: Metadata::new(),
            text: draft.text,
            place_id: place_id.into(),
            user_id: draft.user_id,
        }
    }
}

impl Model for Review {
    const KIND: EntityKind = EntityKind::Review;
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["place_id", "user_id"];

    type Patch = ReviewPatch;

    record_access!(Review);

    fn apply(&mut self, patch: ReviewPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
    }
}

impl BelongsTo<Place> for Review {
    fn owner_id(&self) -> &str {
        &self.place_id
    }
}

impl BelongsTo<User> for Review {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}
