use std::{fmt, marker::PhantomData, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::StorageBackend;
use crate::errors::ServiceError;

/// A record type that can live in a [`CollectionStore`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The identity a record is looked up by (`u64` for blogs, `str` for users).
    type Id: PartialEq + fmt::Display + Send + Sync + ?Sized;

    /// Human label used in messages, e.g. `"Blog post"`.
    const LABEL: &'static str;

    fn id(&self) -> &Self::Id;
}

/// Records that can be created from a client-supplied draft.
pub trait Creatable: Record {
    type Draft: Send;

    /// Required-field presence then field-specific constraints, first failure wins.
    fn from_draft(draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, ServiceError>;

    /// Uniqueness against the current collection. Runs after `from_draft`.
    fn ensure_unique(&self, _existing: &[Self]) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Fill server-assigned identity before the record is appended.
    fn assign_identity(&mut self, _existing: &[Self]) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Records that support partial in-place updates.
pub trait Patchable: Record {
    type Patch: Send;

    /// Reject patches that would change nothing.
    fn validate_patch(patch: &Self::Patch) -> Result<(), ServiceError>;

    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Generic, ordered, persisted collection of `T`.
///
/// Every operation loads the complete collection from the backend; every
/// mutation rewrites it in full. Order is insertion order and deletion
/// removes in place. Mutations on one store are serialized by `write_lock`
/// so concurrent creates cannot lose each other's records. Processes that
/// edit the same backing file concurrently are not coordinated.
pub struct CollectionStore<T> {
    backend: Arc<dyn StorageBackend>,
    resource: String,
    write_lock: Mutex<()>,
    clock: fn() -> DateTime<Utc>,
    _records: PhantomData<fn() -> T>,
}

/// JSON array, 4-space indentation.
pub(crate) fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

impl<T: Record> CollectionStore<T> {
    pub fn new(backend: Arc<dyn StorageBackend>, resource: impl Into<String>) -> Self {
        Self::with_clock(backend, resource, models::timestamp::now)
    }

    /// Same as [`new`](Self::new) with an injectable clock for timestamps.
    pub fn with_clock(
        backend: Arc<dyn StorageBackend>,
        resource: impl Into<String>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        Self {
            backend,
            resource: resource.into(),
            write_lock: Mutex::new(()),
            clock,
            _records: PhantomData,
        }
    }

    /// Read the full collection. A missing resource is an empty collection.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let Some(bytes) = self.backend.read(&self.resource).await? else {
            return Ok(Vec::new());
        };
        let records: Vec<T> = serde_json::from_slice(&bytes).map_err(|e| {
            error!(resource = %self.resource, error = %e, "backing resource is not a valid collection");
            ServiceError::corrupt(&self.resource, e)
        })?;
        debug!(resource = %self.resource, count = records.len(), "collection loaded");
        Ok(records)
    }

    async fn persist(&self, records: &[T]) -> Result<(), ServiceError> {
        let bytes = encode_pretty(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        self.backend.write(&self.resource, bytes).await
    }

    /// Full collection in stored order.
    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        self.load().await
    }

    pub async fn get(&self, id: &T::Id) -> Result<T, ServiceError> {
        self.find(|r| r.id() == id)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::LABEL))
    }

    /// First record matching `pred`, if any.
    pub async fn find<P>(&self, pred: P) -> Result<Option<T>, ServiceError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.load().await?.into_iter().find(|r| pred(r)))
    }

    /// Remove the record with `id` and persist; returns the removed record.
    pub async fn delete(&self, id: &T::Id) -> Result<T, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let idx = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        let removed = records.remove(idx);
        self.persist(&records).await?;
        info!(resource = %self.resource, id = %id, remaining = records.len(), "record deleted");
        Ok(removed)
    }
}

impl<T: Creatable> CollectionStore<T> {
    /// Validate, assign identity, append and persist.
    pub async fn create(&self, draft: T::Draft) -> Result<T, ServiceError> {
        let mut record = T::from_draft(draft, (self.clock)())?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        record.ensure_unique(&records)?;
        record.assign_identity(&records)?;
        records.push(record.clone());
        self.persist(&records).await?;
        info!(resource = %self.resource, id = %record.id(), count = records.len(), "record created");
        Ok(record)
    }
}

impl<T: Patchable> CollectionStore<T> {
    /// Apply the supplied fields of `patch` to the record with `id` and persist.
    pub async fn update(&self, id: &T::Id, patch: T::Patch) -> Result<T, ServiceError> {
        T::validate_patch(&patch)?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        record.apply_patch(patch, (self.clock)());
        let updated = record.clone();
        self.persist(&records).await?;
        info!(resource = %self.resource, id = %id, "record updated");
        Ok(updated)
    }
}
