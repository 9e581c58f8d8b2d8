use std::sync::Arc;

use chrono::{DateTime, Utc};
use models::blog::{BlogPost, BlogPostPatch, NewBlogPost};

use crate::errors::ServiceError;
use crate::storage::{CollectionStore, Creatable, Patchable, Record, StorageBackend};

pub const BLOGS_RESOURCE: &str = "blogs";

impl Record for BlogPost {
    type Id = u64;
    const LABEL: &'static str = "Blog post";
    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Creatable for BlogPost {
    type Draft = NewBlogPost;

    fn from_draft(draft: NewBlogPost, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        Ok(draft.into_post(now)?)
    }

    fn assign_identity(&mut self, existing: &[Self]) -> Result<(), ServiceError> {
        self.id = BlogPost::next_id(existing)
            .ok_or_else(|| ServiceError::Storage(format!("{BLOGS_RESOURCE}: no id left after {}", u64::MAX)))?;
        Ok(())
    }
}

impl Patchable for BlogPost {
    type Patch = BlogPostPatch;

    fn validate_patch(patch: &BlogPostPatch) -> Result<(), ServiceError> {
        Ok(patch.validate()?)
    }

    fn apply_patch(&mut self, patch: BlogPostPatch, now: DateTime<Utc>) {
        self.apply(patch, now);
    }
}

/// Blog post collection: full CRUD over `blogs.json`.
pub struct BlogStore {
    store: CollectionStore<BlogPost>,
}

impl BlogStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        Arc::new(Self { store: CollectionStore::new(backend, BLOGS_RESOURCE) })
    }

    pub async fn list(&self) -> Result<Vec<BlogPost>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: u64) -> Result<BlogPost, ServiceError> {
        self.store.get(&id).await
    }

    pub async fn create(&self, input: NewBlogPost) -> Result<BlogPost, ServiceError> {
        self.store.create(input).await
    }

    pub async fn update(&self, id: u64, patch: BlogPostPatch) -> Result<BlogPost, ServiceError> {
        self.store.update(&id, patch).await
    }

    pub async fn delete(&self, id: u64) -> Result<BlogPost, ServiceError> {
        self.store.delete(&id).await
    }
}
