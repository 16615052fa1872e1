//! Content storage subsystem.
//!
//! Posts live in an in-memory concurrent map; durable backends (SQL, cache,
//! blob storage) are external collaborators this service does not own.

pub mod posts;

pub use posts::{Post, PostStore};
