/// Prefix of every REST route.
pub const API_PREFIX: &str = "/api/v1";

// OpenAPI tags.
pub const SYSTEM_TAG: &str = "System";
pub const STATES_TAG: &str = "States";
pub const CITIES_TAG: &str = "Cities";
pub const AMENITIES_TAG: &str = "Amenities";
pub const USERS_TAG: &str = "Users";
pub const PLACES_TAG: &str = "Places";
pub const REVIEWS_TAG: &str = "Reviews";

/// Key carrying the entity type in every serialized record.
pub const CLASS_KEY: &str = "__class__";

/// Keys no update request may change, whatever the entity.
pub const BASE_IMMUTABLE_FIELDS: &[&str] = &["id", "created_at", "updated_at", CLASS_KEY];
