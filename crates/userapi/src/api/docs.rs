//! Generated OpenAPI document and the Swagger UI page that renders it.

use axum::{response::Html, routing::get, Json, Router};
use utoipa::OpenApi;

use super::error::ErrorBody;
use super::handlers;
use crate::user::{NewUser, UpdateUser, User};

/// Path of the served OpenAPI document.
pub const OPENAPI_PATH: &str = "/swagger/openapi.json";

/// OpenAPI description of the user routes.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "User CRUD API",
        description = "In-memory user store with list, create, read, update and delete operations.",
        contact(name = "API Support", url = "http://www.swagger.io/support", email = "support@swagger.io"),
        license(name = "Apache 2.0", url = "http://www.apache.org/licenses/LICENSE-2.0.html")
    ),
    paths(
        handlers::list_users,
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(User, NewUser, UpdateUser, ErrorBody)),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;

// The page pulls swagger-ui-dist from unpkg, so rendering needs network
// access from the browser. The JSON document itself is served locally.
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>User CRUD API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/swagger/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// Routes serving the document and the UI.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/swagger", get(swagger_ui))
        .route("/swagger/", get(swagger_ui))
        .route(OPENAPI_PATH, get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_operations() {
        let doc = ApiDoc::openapi();

        let collection = doc.paths.paths.get("/api/v1/users").unwrap();
        assert!(collection.get.is_some());
        assert!(collection.post.is_some());

        let item = doc.paths.paths.get("/api/v1/users/{id}").unwrap();
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
    }

    #[test]
    fn test_document_has_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().unwrap().schemas;

        for name in ["User", "NewUser", "UpdateUser", "ErrorBody"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }

    #[test]
    fn test_document_info() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "User CRUD API");
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_ui_points_at_document() {
        assert!(SWAGGER_UI_HTML.contains(OPENAPI_PATH));
    }

    #[test]
    fn test_ui_page_is_complete() {
        assert!(SWAGGER_UI_HTML.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI_HTML.ends_with("</html>\n"));
    }
}
