use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::require_any_role;

use crate::models::{AvailabilityQuery, MatchRequest, SlotAvailability};
use crate::services::matching::DoctorMatchingService;

const MATCHING_ROLES: &[&str] = &["patient", "admin"];

#[axum::debug_handler]
pub async fn match_doctors(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&user, MATCHING_ROLES)?;
    debug!("User {} requested doctor matching", user.id);

    let matching_service = DoctorMatchingService::new(&state, auth.token());
    let matches = matching_service.match_doctors(request).await?;

    Ok(Json(json!({
        "total": matches.len(),
        "matches": matches,
    })))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<SlotAvailability>, AppError> {
    let matching_service = DoctorMatchingService::new(&state, auth.token());
    let checker = matching_service.availability();

    let availability = match query.time {
        Some(time) => checker.check_slot(doctor_id, query.date, time).await?,
        None => checker.check_day(doctor_id, query.date).await?,
    };

    Ok(Json(availability))
}
