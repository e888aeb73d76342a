//! GraphQL HTTP exposure for a schema built from the resolver factories

use anyhow::Result;
use async_graphql::dynamic::Schema;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::AuthContext;

/// Header carrying the authenticated user id (set by an upstream gateway)
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the comma-separated roles of the authenticated user
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// GraphQL API exposure implementation
///
/// Serves:
/// - `POST /graphql` - query endpoint
/// - `GET /graphql/playground` - GraphQL playground
/// - `GET /graphql/schema` - schema SDL
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router for a finished schema
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let schema = register_scalars(Schema::build("Query", None, None))
    ///     .register(query)
    ///     .data(loaders)
    ///     .finish()?;
    /// let app = GraphQLExposure::build_router(schema)?;
    /// ```
    pub fn build_router(schema: Schema) -> Result<Router> {
        let router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/playground", get(graphql_playground))
            .route("/graphql/schema", get(graphql_schema))
            .layer(Extension(schema))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Ok(router)
    }
}

/// Derive the request identity from gateway headers
///
/// A user with the `admin` role is an administrator; no (valid) user id means anonymous.
pub fn auth_from_headers(headers: &HeaderMap) -> AuthContext {
    let Some(user_id) = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
    else {
        return AuthContext::Anonymous;
    };

    let roles: Vec<String> = headers
        .get(USER_ROLES_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if roles.iter().any(|r| r == "admin") {
        AuthContext::Admin { admin_id: user_id }
    } else {
        AuthContext::User { user_id, roles }
    }
}

/// Handler for GraphQL queries
async fn graphql_handler(
    Extension(schema): Extension<Schema>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let auth = auth_from_headers(&headers);
    tracing::debug!(?auth, "Executing GraphQL request");
    schema.execute(request.into_inner().data(auth)).await.into()
}

/// Handler for GraphQL playground UI
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Handler for GraphQL schema SDL export
async fn graphql_schema(Extension(schema): Extension<Schema>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        schema.sdl(),
    )
}
