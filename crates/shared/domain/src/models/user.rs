use super::{EntityKind, Metadata, Model, nullable, record_access};
use hbnb_derive::api_model;

#[api_model]
#[derive(Clone)]
pub struct User {
    #[serde(flatten)]
    pub meta: Metadata,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[api_model]
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// The email is the account identity and cannot be changed.
#[api_model]
#[derive(Clone, Default)]
pub struct UserPatch {
    pub password: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub last_name: Option<Option<String>>,
}

impl User {
    #[must_use]
    pub fn new(draft: NewUser) -> Self {
        let NewUser { email, password, first_name, last_name } = draft;
        Self { meta: Metadata::new(), email, password, first_name, last_name }
    }
}

impl Model for User {
    const KIND: EntityKind = EntityKind::User;
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["email"];
    const PRIVATE_FIELDS: &'static [&'static str] = &["password"];

    type Patch = UserPatch;

    record_access!(User);

    fn apply(&mut self, patch: UserPatch) {
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
    }
}
