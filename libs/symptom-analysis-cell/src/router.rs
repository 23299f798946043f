use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Mounted under `/symptom-analysis`.
pub fn symptom_analysis_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::analyze_symptoms))
        .route("/{analysis_id}", get(handlers::get_analysis))
        .route("/patient/{patient_id}", get(handlers::get_patient_analyses))
        .route("/appointment/{appointment_id}", get(handlers::get_appointment_analysis))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
