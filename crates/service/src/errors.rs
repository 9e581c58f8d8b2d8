use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client-supplied data failed a check; the message is returned verbatim.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// The backing resource exists but does not parse as a JSON array of records.
    #[error("storage corrupt: {resource}: {reason}")]
    StorageCorrupt { resource: String, reason: String },
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(label: &str) -> Self {
        Self::NotFound(format!("{} not found.", label))
    }

    pub fn corrupt(resource: &str, reason: impl ToString) -> Self {
        Self::StorageCorrupt { resource: resource.to_string(), reason: reason.to_string() }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
