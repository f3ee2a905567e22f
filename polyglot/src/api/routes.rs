use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_size);

    Router::new()
        .route("/translate", post(handlers::translate_text))
        .route("/file_translate", post(handlers::file_translate))
        .route("/voice_translate", post(handlers::voice_translate))
        .route("/upload_file", post(handlers::upload_file))
        .route("/health", get(handlers::health_check))
        .route("/languages", get(handlers::list_languages))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
