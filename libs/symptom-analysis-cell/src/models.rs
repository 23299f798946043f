use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::Specialty;

/// Attached to every analysis returned to a client. Never stored.
pub const SAFETY_WARNING: &str = "⚠️ IMPORTANT: Cette analyse n'est pas un diagnostic médical. Consultez toujours un professionnel de santé pour un diagnostic précis.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAnalysisRequest {
    pub description: String,
    /// Defaults to the authenticated caller when omitted.
    #[serde(default)]
    pub patient_id: Option<Uuid>,
    #[serde(default)]
    pub appointment_id: Option<Uuid>,
}

impl SymptomAnalysisRequest {
    /// Request-level check applied by the HTTP handler. The analysis itself
    /// accepts any text.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.description.trim().is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "La description des symptômes est obligatoire".to_string(),
            ));
        }
        Ok(())
    }
}

/// Row written to `symptom_analyses`; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSymptomAnalysis {
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub original_description: String,
    pub symptoms: Vec<String>,
    pub severity: Option<u8>,
    pub duration_days: Option<u32>,
    pub red_flags: Vec<String>,
    pub suggested_specialties: Vec<Specialty>,
    pub questions: Vec<String>,
    pub summary: String,
    pub urgent: bool,
    pub recommendation_message: String,
}

impl NewSymptomAnalysis {
    pub fn into_stored(self, id: Uuid, created_at: DateTime<Utc>) -> SymptomAnalysis {
        SymptomAnalysis {
            id,
            patient_id: self.patient_id,
            appointment_id: self.appointment_id,
            original_description: self.original_description,
            symptoms: self.symptoms,
            severity: self.severity,
            duration_days: self.duration_days,
            red_flags: self.red_flags,
            suggested_specialties: self.suggested_specialties,
            questions: self.questions,
            summary: self.summary,
            urgent: self.urgent,
            recommendation_message: self.recommendation_message,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomAnalysis {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub original_description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub severity: Option<u8>,
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub suggested_specialties: Vec<Specialty>,
    #[serde(default)]
    pub questions: Vec<String>,
    pub summary: String,
    pub urgent: bool,
    pub recommendation_message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomAnalysisResponse {
    #[serde(flatten)]
    pub analysis: SymptomAnalysis,
    pub safety_warning: String,
}

impl From<SymptomAnalysis> for SymptomAnalysisResponse {
    fn from(analysis: SymptomAnalysis) -> Self {
        Self {
            analysis,
            safety_warning: SAFETY_WARNING.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Patient non trouvé avec l'ID: {0}")]
    PatientNotFound(Uuid),

    #[error("Rendez-vous non trouvé avec l'ID: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Analyse non trouvée: {0}")]
    AnalysisNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidRequest(msg) => AppError::BadRequest(msg),
            AnalysisError::Store(e) => AppError::Database(e.to_string()),
            not_found => AppError::NotFound(not_found.to_string()),
        }
    }
}
