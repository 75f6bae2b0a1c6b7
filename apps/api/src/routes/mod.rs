pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume sessions
        .route("/api/v1/resumes", post(handlers::handle_create))
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get)
                .put(handlers::handle_replace)
                .delete(handlers::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/sections/reorder",
            post(handlers::handle_reorder),
        )
        // Layout outputs
        .route("/api/v1/resumes/:id/pages", get(handlers::handle_pages))
        .route("/api/v1/resumes/:id/preview", get(handlers::handle_preview))
        .route("/api/v1/resumes/:id/pdf", get(handlers::handle_pdf))
        .route("/api/v1/render/pdf", post(handlers::handle_render_pdf))
        .with_state(state)
}
