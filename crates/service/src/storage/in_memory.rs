//! InMemoryBackend - HashMap-backed storage for tests and throwaway runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StorageBackend;
use crate::errors::ServiceError;

#[derive(Clone, Default)]
pub struct InMemoryBackend {
    resources: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Raw bytes currently held for `resource`.
    pub async fn snapshot(&self, resource: &str) -> Option<Vec<u8>> {
        self.resources.read().await.get(resource).cloned()
    }

    /// Overwrite `resource` directly, bypassing any collection logic.
    pub async fn seed(&self, resource: &str, bytes: impl Into<Vec<u8>>) {
        self.resources.write().await.insert(resource.to_string(), bytes.into());
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn read(&self, resource: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        Ok(self.snapshot(resource).await)
    }

    async fn write(&self, resource: &str, bytes: Vec<u8>) -> Result<(), ServiceError> {
        self.seed(resource, bytes).await;
        Ok(())
    }
}
