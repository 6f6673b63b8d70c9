//! Route configuration and setup

use crate::handlers::{get_courses, upload_course};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Policy applied to served course content: inline scripts/styles typical of
/// exported packages are allowed, but the content cannot reach or be embedded
/// outside its own origin.
pub const COURSE_CONTENT_CSP: &str = "default-src 'self'; script-src 'self' 'unsafe-inline' 'unsafe-eval'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'self';";

/// Slack on top of the configured upload cap so multipart framing overhead
/// does not reject an archive that is exactly at the limit.
const BODY_LIMIT_SLACK_BYTES: u64 = 1024 * 1024;

/// Setup all application routes
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = setup_cors(&state.config.cors_origins);
    let body_limit = (state.config.max_upload_size_bytes + BODY_LIMIT_SLACK_BYTES) as usize;

    // Extracted course trees, served statically behind the content policy.
    let course_content = Router::new()
        .fallback_service(ServeDir::new(state.config.storage_root.clone()))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(COURSE_CONTENT_CSP),
        ));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/upload",
            post(upload_course).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/api/courses", get(get_courses))
        .nest_service("/courses", course_content)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn setup_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        cors.allow_origin(parsed)
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
