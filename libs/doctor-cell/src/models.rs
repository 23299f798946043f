use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::{Specialty, Weekday};

use crate::services::geo::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialty: Specialty,
    pub clinic_name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub teleconsultation: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub deleted: bool,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    /// Practice location, only when both coordinates are known.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Recurring weekly opening window of a doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Temporarily unavailable when false.
    pub available: bool,
    /// Soft-disabled when false.
    pub active: bool,
}

impl TimeSlot {
    pub fn is_open(&self) -> bool {
        self.active && self.available
    }

    /// Half-open: the end time itself is not covered.
    pub fn covers(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub symptoms: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    #[serde(default)]
    pub desired_date: Option<NaiveDate>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl MatchRequest {
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<(), MatchingError> {
        if self.symptoms.trim().is_empty() {
            return Err(MatchingError::InvalidRequest("Symptoms are required".to_string()));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(MatchingError::InvalidRequest("Latitude and longitude are required".to_string()));
        }
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(MatchingError::InvalidRequest("Search radius must be a positive number of km".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub doctor: Doctor,
    pub score_total: f64,
    pub score_symptoms: f64,
    pub score_distance: f64,
    pub score_availability: f64,
    pub distance_km: Option<f64>,
    /// True when the doctor has a slot on the desired date, or when no date was asked for.
    pub available: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotAvailability {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub available: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum MatchingError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<MatchingError> for AppError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::InvalidRequest(msg) => AppError::BadRequest(msg),
            MatchingError::DoctorNotFound(id) => AppError::NotFound(format!("Doctor not found: {}", id)),
            MatchingError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> MatchRequest {
        MatchRequest {
            symptoms: "douleur thoracique".to_string(),
            tags: None,
            specialty: None,
            latitude: 36.8065,
            longitude: 10.1815,
            radius_km: 10.0,
            desired_date: None,
            limit: None,
        }
    }

    #[test]
    fn slot_covers_is_half_open() {
        let slot = TimeSlot {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            day: Weekday::Lundi,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            available: true,
            active: true,
        };

        assert!(slot.covers(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert!(slot.covers(NaiveTime::from_hms_opt(11, 59, 0).unwrap()));
        assert!(!slot.covers(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
        assert!(!slot.covers(NaiveTime::from_hms_opt(8, 59, 0).unwrap()));
    }

    #[test]
    fn validation_rejects_blank_symptoms_and_bad_radius() {
        assert!(request().validate().is_ok());

        let mut blank = request();
        blank.symptoms = "   ".to_string();
        assert_matches!(blank.validate(), Err(MatchingError::InvalidRequest(_)));

        let mut no_radius = request();
        no_radius.radius_km = 0.0;
        assert_matches!(no_radius.validate(), Err(MatchingError::InvalidRequest(_)));

        let mut nan = request();
        nan.latitude = f64::NAN;
        assert_matches!(nan.validate(), Err(MatchingError::InvalidRequest(_)));
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let parsed: MatchRequest = serde_json::from_value(serde_json::json!({
            "symptoms": "fièvre",
            "latitude": 36.8,
            "longitude": 10.18,
            "radius_km": 5.0,
            "specialty": "MEDECINE_GENERALE"
        }))
        .unwrap();

        assert_eq!(parsed.specialty, Some(Specialty::MedecineGenerale));
        assert!(parsed.tags.is_none());
        assert!(parsed.limit.is_none());
    }

    #[test]
    fn location_requires_both_coordinates() {
        let doctor: Doctor = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "first_name": "Sami",
            "last_name": "Trabelsi",
            "specialty": "CARDIOLOGIE",
            "clinic_name": null,
            "address": null,
            "latitude": 36.8,
            "longitude": null
        }))
        .unwrap();

        assert!(doctor.location().is_none());
        assert_eq!(doctor.full_name(), "Dr. Sami Trabelsi");
    }
}
