use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::JsonApiError;

/// JSON request body that ignores `Content-Type` and rejects with
/// `400 {"error": "Invalid JSON data"}` when the body does not parse.
///
/// Missing fields are not a parse failure for the draft/patch types (all
/// their fields are optional), so those reach validation instead.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            debug!(error = %e, "request body unreadable");
            JsonApiError::malformed_body()
        })?;
        serde_json::from_slice::<T>(&bytes).map(JsonBody).map_err(|e| {
            debug!(error = %e, "request body is not valid JSON for this route");
            JsonApiError::malformed_body()
        })
    }
}
