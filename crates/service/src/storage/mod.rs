//! Storage abstractions for service layer
//!
//! A `StorageBackend` reads and writes whole named resources as bytes.
//! `CollectionStore<T>` layers JSON encoding, identity assignment and
//! validation on top, so the blog and user stores share one code path.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod collection_store;
pub mod in_memory;
pub mod json_file;

pub use collection_store::{CollectionStore, Creatable, Patchable, Record};
pub use in_memory::InMemoryBackend;
pub use json_file::JsonFileBackend;

/// Port over durable storage of named resources.
/// Implementations can be file-backed, in-memory, or a remote KV.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Full contents of `resource`, or `None` if it has never been written.
    async fn read(&self, resource: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    /// Replace the full contents of `resource`.
    async fn write(&self, resource: &str, bytes: Vec<u8>) -> Result<(), ServiceError>;
}
