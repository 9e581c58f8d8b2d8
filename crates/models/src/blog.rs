use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, supplied, timestamp};

pub const MSG_REQUIRED: &str = "Title, content, and author are required.";
pub const MSG_EMPTY_PATCH: &str = "At least one of title, content, or author must be provided.";

/// A persisted blog post.
///
/// `updated_at` stays `None` (and is omitted from JSON) until the first update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// `1 + max(id)`, or `1` for an empty collection. `None` once the
    /// largest stored id is `u64::MAX`.
    ///
    /// Deleting the max-id post and creating another hands out the same id again.
    pub fn next_id(existing: &[BlogPost]) -> Option<u64> {
        match existing.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Replace only the supplied fields and stamp `updated_at`.
    pub fn apply(&mut self, patch: BlogPostPatch, now: DateTime<Utc>) {
        let BlogPostPatch { title, content, author } = patch;
        if let Some(title) = title.filter(|s| !s.is_empty()) {
            self.title = title;
        }
        if let Some(content) = content.filter(|s| !s.is_empty()) {
            self.content = content;
        }
        if let Some(author) = author.filter(|s| !s.is_empty()) {
            self.author = author;
        }
        self.updated_at = Some(now);
    }
}

/// Create input. Every field is optional at the parse stage so that a missing
/// field surfaces as a validation message rather than a malformed body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NewBlogPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewBlogPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self { title: Some(title.into()), content: Some(content.into()), author: Some(author.into()) }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match (supplied(&self.title), supplied(&self.content), supplied(&self.author)) {
            (Some(_), Some(_), Some(_)) => Ok(()),
            _ => Err(ModelError::validation(MSG_REQUIRED)),
        }
    }

    /// Validate and build a post. The id is left at `0`; the collection assigns it.
    pub fn into_post(self, now: DateTime<Utc>) -> Result<BlogPost, ModelError> {
        self.validate()?;
        match (self.title, self.content, self.author) {
            (Some(title), Some(content), Some(author)) => Ok(BlogPost {
                id: 0,
                title,
                content,
                author,
                created_at: now,
                updated_at: None,
            }),
            _ => Err(ModelError::validation(MSG_REQUIRED)),
        }
    }
}

/// Update input; absent or empty fields keep their stored values.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BlogPostPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl BlogPostPatch {
    pub fn is_empty(&self) -> bool {
        supplied(&self.title).is_none()
            && supplied(&self.content).is_none()
            && supplied(&self.author).is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.is_empty() {
            return Err(ModelError::validation(MSG_EMPTY_PATCH));
        }
        Ok(())
    }
}
