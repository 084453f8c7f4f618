pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

pub use crate::config::AppConfig;

/// Build the full application router over `state`.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()));

    let mut router = Router::new()
        .route("/", get(root))
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(
            // CorsLayer needs a `Default` response body, so it sits inside the body limit.
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(state.config.api.max_request_size_bytes))
                .layer(cors_layer(&state.config.security)),
        );

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{content, health, login, seed, services};

    Router::new()
        .route("/health", get(health::health))
        .route("/admin/login", post(login::login))
        .route("/services", get(services::list))
        .route("/services/:slug", get(services::show))
        .route("/services/:slug/submit", post(services::submit))
        .route("/posts", get(content::list_posts))
        .route("/posts/:slug", get(content::show_post))
        .route("/courses", get(content::list_courses))
        .route("/init-demo", post(seed::init_demo))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{dashboard, posts, session, submissions};

    Router::new()
        .route("/admin/verify-token", post(session::verify_token))
        .route("/admin/dashboard/stats", get(dashboard::stats))
        .route("/admin/submissions", get(submissions::list))
        .route("/admin/submissions/:id", put(submissions::update_status))
        .route("/admin/posts", get(posts::list).post(posts::create))
        .route("/admin/posts/:id", put(posts::update))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    use axum::routing::delete;
    use handlers::elevated::posts;

    // Layers run bottom-up: the bearer gate first, then the role check.
    Router::new()
        .route("/admin/posts/:id", delete(posts::delete))
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

/// CORS from the configured origin list; `*` allows any origin.
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Agency API",
        "version": version,
        "endpoints": {
            "health": "/api/v1/health (public)",
            "services": "/api/v1/services[/:slug] (public)",
            "submit": "/api/v1/services/:slug/submit (public)",
            "content": "/api/v1/posts[/:slug], /api/v1/courses (public)",
            "login": "/api/v1/admin/login (public - token acquisition)",
            "seed": "/api/v1/init-demo (public, disabled in production)",
            "admin": "/api/v1/admin/* (bearer token)",
        }
    }))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
