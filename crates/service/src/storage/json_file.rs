use std::{io::ErrorKind, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::StorageBackend;
use crate::errors::ServiceError;

/// Stores each resource as `<data_dir>/<resource>.json`.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so readers never see a half-written file.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Initialize the backend, creating `data_dir` if missing.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, ServiceError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        Ok(Arc::new(Self { data_dir }))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, resource: &str) -> PathBuf {
        self.data_dir.join(format!("{resource}.json"))
    }
}

/// Rename `temp` over `dest`. Some platforms refuse to rename onto an existing
/// file, so on failure the destination is removed and the rename retried once.
async fn replace_file(temp: &Path, dest: &Path) -> std::io::Result<()> {
    if let Err(initial) = fs::rename(temp, dest).await {
        let _ = fs::remove_file(dest).await;
        if let Err(retry) = fs::rename(temp, dest).await {
            let _ = fs::remove_file(temp).await;
            return Err(std::io::Error::new(
                retry.kind(),
                format!("replace failed (initial: {initial}, retry: {retry})"),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn read(&self, resource: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let path = self.path_for(resource);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "resource file missing; treating as empty");
                Ok(None)
            }
            Err(e) => Err(ServiceError::Storage(format!("read {}: {e}", path.display()))),
        }
    }

    async fn write(&self, resource: &str, bytes: Vec<u8>) -> Result<(), ServiceError> {
        let path = self.path_for(resource);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, &bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", temp.display())))?;
        replace_file(&temp, &path)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", path.display())))?;
        debug!(path = %path.display(), bytes = bytes.len(), "resource written");
        Ok(())
    }
}
