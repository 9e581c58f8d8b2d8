use axum::{extract::State, http::StatusCode, Json};
use models::user::{NewUserAccount, UserProfile};
use serde::Serialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::ServerState;

pub const MSG_REGISTERED: &str = "User registered successfully!";

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: UserProfile,
}

/// Served at both `/register` and `/users`. The echoed profile never
/// includes the password.
#[utoipa::path(
    post, path = "/register", tag = "users",
    request_body = crate::openapi::NewUserAccountDoc,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation Error, duplicate username, or malformed body")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<NewUserAccount>,
) -> Result<(StatusCode, Json<UserEnvelope>), JsonApiError> {
    let account = state.users.register(input).await?;
    info!(username = %account.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope { message: MSG_REGISTERED, user: UserProfile::from(&account) }),
    ))
}
