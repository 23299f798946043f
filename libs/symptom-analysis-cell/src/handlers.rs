use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::require_any_role;

use crate::models::{SymptomAnalysisRequest, SymptomAnalysisResponse};
use crate::services::analysis::SymptomAnalysisService;

const SUBMIT_ROLES: &[&str] = &["patient", "admin"];
const READ_ROLES: &[&str] = &["patient", "doctor", "admin"];

/// Patients analyse for themselves unless the body names someone else.
fn resolve_patient_id(user: &User, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match requested {
        Some(patient_id) => Ok(patient_id),
        None => Uuid::parse_str(&user.id)
            .map_err(|_| AppError::BadRequest("patient_id is required".to_string())),
    }
}

#[axum::debug_handler]
pub async fn analyze_symptoms(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<SymptomAnalysisRequest>,
) -> Result<Json<SymptomAnalysisResponse>, AppError> {
    require_any_role(&user, SUBMIT_ROLES)?;
    request.validate()?;
    let patient_id = resolve_patient_id(&user, request.patient_id)?;

    let service = SymptomAnalysisService::new(&state, auth.token());
    let response = service.analyze_symptoms(patient_id, request).await?;

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_analysis(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(analysis_id): Path<Uuid>,
) -> Result<Json<SymptomAnalysisResponse>, AppError> {
    require_any_role(&user, READ_ROLES)?;

    let service = SymptomAnalysisService::new(&state, auth.token());
    Ok(Json(service.get_analysis(analysis_id).await?))
}

#[axum::debug_handler]
pub async fn get_patient_analyses(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<SymptomAnalysisResponse>>, AppError> {
    require_any_role(&user, READ_ROLES)?;

    let service = SymptomAnalysisService::new(&state, auth.token());
    Ok(Json(service.get_patient_analyses(patient_id).await?))
}

#[axum::debug_handler]
pub async fn get_appointment_analysis(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<SymptomAnalysisResponse>, AppError> {
    require_any_role(&user, READ_ROLES)?;

    let service = SymptomAnalysisService::new(&state, auth.token());
    Ok(Json(service.get_analysis_for_appointment(appointment_id).await?))
}
