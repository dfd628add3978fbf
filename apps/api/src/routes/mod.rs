pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::eligibility::handlers as eligibility;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring
        .route(
            "/api/v1/eligibility",
            post(eligibility::handle_compute_eligibility),
        )
        .route("/api/v1/screen", post(screening::handle_screen))
        .route("/api/v1/screen/export", post(screening::handle_export))
        // Weights
        .route("/api/v1/weights", get(eligibility::handle_get_weights))
        .route(
            "/api/v1/weights/reload",
            post(eligibility::handle_reload_weights),
        )
        .with_state(state)
}
