//! The HBnB storage engine.
//!
//! A single live registry of every entity, shared by all request handlers, with explicit
//! lifecycle: [`StorageBuilder::connect`] loads the persisted snapshot, [`Storage::save`] writes
//! it back atomically and [`Storage::close`] flushes and releases the engine.
//!
//! # Core Features
//!
//! - **Typed Repository**: `register`/`get`/`all`/`update`/`delete` over the six entity types,
//!   plus untyped `all_records`/`count` keyed by `"<Class>.<id>"`.
//! - **Atomic Snapshots**: unique temp write + `fsync` + `rename`; a reader never sees a partial file.
//! - **Transparent Compression**: optional LZ4 snapshot compression.
//! - **Relationship Resolver**: live reverse lookups computed from foreign keys.
//! - **Place Search**: union of location filters, then an amenity superset filter.
//! - **Self-Healing**: stale temp snapshots left by a crash are removed on connect.
//!
//! # Examples
//!
//! ```rust
//! use hbnb_domain::models::{NewState, State};
//! use hbnb_storage::{Compression, Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder()
//!         .root(tmp.path())
//!         .compression(Compression::Lz4)
//!         .connect()
//!         .await?;
//!
//!     let state = State::new(NewState { name: "Oregon".to_owned() });
//!     storage.register(&state);
//!     storage.save().await?;
//!     storage.close().await?;
//!
//!     let reopened = Storage::builder()
//!         .root(tmp.path())
//!         .compression(Compression::Lz4)
//!         .connect()
//!         .await?;
//!     assert_eq!(reopened.count(None), 1);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod persistence;
mod registry;
mod relations;
mod search;

pub use builder::{ConfiguredBuilder, InMemory, NoRoot, StorageBuilder, WithRoot};
pub use engine::{Storage, StorageInner};
pub use error::{StorageError, StorageErrorExt};
pub use hbnb_domain::config::DeletePolicy;
pub use persistence::Compression;
