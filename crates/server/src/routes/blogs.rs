use axum::{extract::{Path, State}, http::StatusCode, Json};
use common::types::MessageBody;
use models::blog::{BlogPost, BlogPostPatch, NewBlogPost};
use serde::Serialize;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::routes::ServerState;

pub const MSG_CREATED: &str = "Blog post created successfully!";
pub const MSG_UPDATED: &str = "Blog post updated successfully!";
pub const MSG_DELETED: &str = "Blog post deleted successfully.";

#[derive(Debug, Serialize)]
pub struct BlogEnvelope {
    pub message: &'static str,
    pub blog: BlogPost,
}

/// Ids are positive, so anything that is not a `u64` maps to `0` and falls
/// through to the usual not-found handling.
fn parse_id(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

#[utoipa::path(get, path = "/blogs", tag = "blogs", responses((status = 200, description = "All blog posts in stored order")))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BlogPost>>, JsonApiError> {
    let posts = state.blogs.list().await?;
    info!(count = posts.len(), "list blog posts");
    Ok(Json(posts))
}

#[utoipa::path(
    post, path = "/blogs", tag = "blogs",
    request_body = crate::openapi::NewBlogPostDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error or malformed body"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogEnvelope>), JsonApiError> {
    let blog = state.blogs.create(input).await?;
    Ok((StatusCode::CREATED, Json(BlogEnvelope { message: MSG_CREATED, blog })))
}

#[utoipa::path(
    get, path = "/blogs/{id}", tag = "blogs",
    params(("id" = u64, Path, description = "Blog post id")),
    responses((status = 200, description = "Found"), (status = 404, description = "Blog post not found."))
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, JsonApiError> {
    Ok(Json(state.blogs.get(parse_id(&id)).await?))
}

#[utoipa::path(
    put, path = "/blogs/{id}", tag = "blogs",
    params(("id" = u64, Path, description = "Blog post id")),
    request_body = crate::openapi::BlogPostPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No updatable field supplied, or malformed body"),
        (status = 404, description = "Blog post not found.")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<BlogPostPatch>,
) -> Result<Json<BlogEnvelope>, JsonApiError> {
    let blog = state.blogs.update(parse_id(&id), patch).await?;
    Ok(Json(BlogEnvelope { message: MSG_UPDATED, blog }))
}

#[utoipa::path(
    delete, path = "/blogs/{id}", tag = "blogs",
    params(("id" = u64, Path, description = "Blog post id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Blog post not found."))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, JsonApiError> {
    state.blogs.delete(parse_id(&id)).await?;
    Ok(Json(MessageBody { message: MSG_DELETED.to_string() }))
}
