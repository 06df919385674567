//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading plus the HTTP plumbing every feature
//! slice needs (state, error mapping, JSON body handling, system endpoints).
//!
//! ## Config loading (non-wasm)
//! ```rust,no_run
//! use hbnb_kernel::config::load_config;
//! use hbnb_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap_or_default();
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use hbnb_domain as domain;
#[cfg(feature = "server")]
pub use hbnb_storage as storage;
