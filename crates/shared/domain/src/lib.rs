//! # Domain Models
//!
//! The six HBnB entities (State, City, Amenity, User, Place, Review), the drafts and patches
//! used to create and update them, and the configuration types shared by every crate.
//! Keep it lean: no I/O, no locking, no HTTP. Relationship traversal lives in `hbnb-storage`.

pub mod config;
pub mod constants;
pub mod id;
pub mod models;
