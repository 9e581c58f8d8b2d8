//! Service layer: file-backed collections for blog posts and user accounts.
//! - `storage` holds the generic `CollectionStore` and its backend port.
//! - `file` holds the typed blog/user stores built on top of it.
//! - Validation rules and record types live in the `models` crate.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
