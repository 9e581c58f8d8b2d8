use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct NewBlogPostDoc { pub title: String, pub content: String, pub author: String }

/// At least one field must be non-empty; the rest keep their stored values.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct BlogPostPatchDoc {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

#[derive(ToSchema)]
#[allow(dead_code, non_snake_case)]
pub struct NewUserAccountDoc {
    pub username: String,
    pub password: String,
    pub fullName: Option<String>,
    /// Any JSON number; when supplied it must be at least 10.
    pub age: Option<f64>,
    pub email: String,
    pub gender: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::blogs::list,
        crate::routes::blogs::create,
        crate::routes::blogs::get,
        crate::routes::blogs::update,
        crate::routes::blogs::delete,
        crate::routes::users::register,
    ),
    components(
        schemas(
            HealthResponse,
            NewBlogPostDoc,
            BlogPostPatchDoc,
            NewUserAccountDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "blogs"),
        (name = "users")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/blogs", "/blogs/{id}", "/register"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
