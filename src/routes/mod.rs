use axum::http::HeaderValue;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod cases;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod notes;
pub mod users;

// Generous router-level cap; the ingestion workflow enforces its own 10 MiB
// ceiling so oversized uploads get a classified error rather than a framework
// rejection.
const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router<()> {
    let cors = if let Some(origins) = state.config.cors_allowed_origin.as_ref() {
        let headers: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| {
                    trimmed
                        .parse::<HeaderValue>()
                        .expect("invalid CORS allowed origin")
                })
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(headers))
            .allow_methods(tower_http::cors::AllowMethods::mirror_request())
            .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(tower_http::cors::AllowMethods::mirror_request())
            .allow_headers(tower_http::cors::AllowHeaders::mirror_request())
            .allow_credentials(true)
    };

    let cases_routes = Router::new()
        .route("/", get(cases::list_cases).post(cases::create_case))
        .route("/:id", get(cases::get_case).put(cases::update_case))
        .route("/:id/status", patch(cases::update_case_status))
        .route(
            "/:id/documents",
            get(documents::list_documents).post(documents::upload_document),
        )
        .route("/:id/documents/:doc_id", delete(documents::delete_document))
        .route("/:id/notes", get(notes::list_notes).post(notes::add_note));

    let users_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/:id", get(users::get_user));

    Router::new()
        .nest("/api/cases", cases_routes)
        .nest("/api/users", users_routes)
        .route("/api/dashboard/stats", get(dashboard::dashboard_stats))
        .route("/api/health", get(health::health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
