use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::file::{blogs::BlogStore, users::UserStore};
use service::storage::StorageBackend;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

pub mod blogs;
pub mod users;

#[derive(Clone)]
pub struct ServerState {
    pub blogs: Arc<BlogStore>,
    pub users: Arc<UserStore>,
}

impl ServerState {
    /// Both collections share one backend, each under its own resource name.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            blogs: BlogStore::new(Arc::clone(&backend)),
            users: UserStore::new(backend),
        }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Unmatched paths and unsupported methods.
pub async fn not_found() -> JsonApiError {
    JsonApiError::route_not_found()
}

fn resource_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/blogs",
            get(blogs::list).post(blogs::create).fallback(not_found),
        )
        .route(
            "/blogs/:id",
            get(blogs::get)
                .put(blogs::update)
                .delete(blogs::delete)
                .fallback(not_found),
        )
        .route("/register", post(users::register).fallback(not_found))
        .route("/users", post(users::register).fallback(not_found))
}

/// Build the full application router: health, the blog/user resources at the
/// root and again under `/api`, the OpenAPI docs, and a JSON 404 fallback.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(resource_routes())
        .nest("/api", resource_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
