//! Record types persisted by the blog and user collections, plus the
//! draft/patch value objects that request bodies are parsed into.

pub mod errors;
pub mod timestamp;
pub mod blog;
pub mod user;

/// A text field counts as supplied only when present and non-empty.
pub(crate) fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
