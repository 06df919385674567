//! Facade crate for the HBnB feature slices and shared modules.
//! Re-exports domain/kernel primitives and composes the feature routers.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `hbnb` with the `server` feature.
//! - Mount [`server::api_router`] under [`domain::constants::API_PREFIX`].

pub use hbnb_domain as domain;
pub use hbnb_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    use hbnb_kernel::server::ApiState;
    use utoipa_axum::router::OpenApiRouter;

    pub mod router {
        pub use hbnb_kernel::server::router::system_router;
    }

    /// Every REST route: `/status`, `/stats` and the entity collections.
    pub fn api_router() -> OpenApiRouter<ApiState> {
        OpenApiRouter::new()
            .merge(router::system_router())
            .merge(crate::features::locations::router())
            .merge(crate::features::amenities::router())
            .merge(crate::features::accounts::router())
            .merge(crate::features::lodging::router())
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use hbnb_accounts as accounts;
    pub use hbnb_amenities as amenities;
    pub use hbnb_locations as locations;
    pub use hbnb_lodging as lodging;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "server")]
        "locations",
        #[cfg(feature = "server")]
        "amenities",
        #[cfg(feature = "server")]
        "accounts",
        #[cfg(feature = "server")]
        "lodging",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
