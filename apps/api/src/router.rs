use std::sync::Arc;

use axum::{routing::get, Router};

use doctor_cell::router::{doctor_routes, matching_routes};
use shared_config::AppConfig;
use symptom_analysis_cell::router::symptom_analysis_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "MedMatch API is running!" }))
        .nest("/match", matching_routes(state.clone()))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/symptom-analysis", symptom_analysis_routes(state))
}
