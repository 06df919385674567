//! HTTP plumbing shared by the feature slices.

pub mod body;
pub mod crud;
pub mod error;
pub mod present;
pub mod router;
pub mod state;
mod system;

pub use body::JsonBody;
pub use error::{ApiError, ApiErrorExt};
pub use present::{Created, Entities, Entity, public};
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
pub use system::{StatsResponse, StatusResponse, not_found};
