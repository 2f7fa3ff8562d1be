//! Route definitions for the API.

use std::path::PathBuf;

use axum::{
    extract::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::require_jwt;
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::login,
        handlers::get_current_user,
    ),
    components(schemas(
        crate::api::types::LoginRequest,
        crate::api::types::LoginResponse,
        crate::api::types::MeResponse,
        crate::api::types::UserInfo,
        crate::api::types::HealthResponse,
        crate::error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Administrator login and token check"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Contact Desk API",
        version = "0.1.0",
        description = "Administrator login gate for the Contact Desk client",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// When `frontend_dist` is given, paths outside `/api` and `/auth` fall back
/// to the client bundle with `index.html` as the catch-all.
pub fn build_router(state: AppState, frontend_dist: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Each protected route is registered under both the prefixed path and
    // the bare alias the older client uses.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::get_current_user))
        .route("/auth/me", get(handlers::get_current_user))
        .layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            require_jwt,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/auth/login", post(handlers::login))
        .route("/auth/login", post(handlers::login))
        .with_state(state);

    let router = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let router = match frontend_dist {
        Some(dir) => {
            let bundle = ServeDir::new(&dir).fallback(ServeFile::new(dir.join("index.html")));
            router.fallback(move |request: Request| serve_bundle(bundle.clone(), request))
        }
        None => router.fallback(handlers::not_found),
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

fn is_api_path(path: &str) -> bool {
    path.starts_with("/api") || path.starts_with("/auth")
}

/// Serve the client bundle, keeping unmatched API paths as JSON 404s.
async fn serve_bundle(bundle: ServeDir<ServeFile>, request: Request) -> Response {
    if is_api_path(request.uri().path()) {
        return handlers::not_found(request.uri().clone())
            .await
            .into_response();
    }
    match bundle.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
