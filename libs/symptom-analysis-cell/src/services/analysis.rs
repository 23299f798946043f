use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_utils::specialty_map::specialties_in_phrases;

use crate::models::{AnalysisError, NewSymptomAnalysis, SymptomAnalysisRequest, SymptomAnalysisResponse};
use crate::services::extractor::extract;
use crate::services::report::{build_summary, generate_questions, is_urgent, recommendation_message};
use crate::services::store::{AnalysisStore, PatientStore, SupabaseAnalysisStore, SupabasePatientStore};

pub struct SymptomAnalysisService {
    patients: Arc<dyn PatientStore>,
    analyses: Arc<dyn AnalysisStore>,
}

impl SymptomAnalysisService {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self::with_stores(
            Arc::new(SupabasePatientStore::new(config, auth_token)),
            Arc::new(SupabaseAnalysisStore::new(config, auth_token)),
        )
    }

    pub fn with_stores(patients: Arc<dyn PatientStore>, analyses: Arc<dyn AnalysisStore>) -> Self {
        Self { patients, analyses }
    }

    /// Analyse a free-text description for `patient_id` and store the result.
    ///
    /// The patient (and the appointment, when given) must exist. Apart from
    /// that, analysis never fails: an empty or unrecognisable description
    /// still yields a result with clarification questions.
    pub async fn analyze_symptoms(
        &self,
        patient_id: Uuid,
        request: SymptomAnalysisRequest,
    ) -> Result<SymptomAnalysisResponse, AnalysisError> {
        if !self.patients.patient_exists(patient_id).await? {
            return Err(AnalysisError::PatientNotFound(patient_id));
        }
        if let Some(appointment_id) = request.appointment_id {
            if !self.patients.appointment_exists(appointment_id).await? {
                return Err(AnalysisError::AppointmentNotFound(appointment_id));
            }
        }

        let extraction = extract(&request.description);
        debug!(
            "Extracted {} symptoms, {} red flags, severity {:?}, duration {:?}",
            extraction.symptoms.len(),
            extraction.red_flags.len(),
            extraction.severity,
            extraction.duration_days
        );

        let specialties = specialties_in_phrases(
            std::iter::once(request.description.as_str())
                .chain(extraction.symptoms.iter().map(String::as_str)),
        );
        let questions = generate_questions(&extraction);
        let summary = build_summary(&extraction, &specialties);
        let urgent = is_urgent(&extraction);
        let recommendation = recommendation_message(urgent, &extraction.red_flags);

        let symptom_count = extraction.symptoms.len();
        let red_flag_count = extraction.red_flags.len();

        let analysis = NewSymptomAnalysis {
            patient_id,
            appointment_id: request.appointment_id,
            original_description: request.description,
            symptoms: extraction.symptoms,
            severity: extraction.severity,
            duration_days: extraction.duration_days,
            red_flags: extraction.red_flags,
            suggested_specialties: specialties,
            questions,
            summary,
            urgent,
            recommendation_message: recommendation.to_string(),
        };

        let stored = self.analyses.insert(analysis).await.map_err(|e| {
            error!("Failed to store symptom analysis for patient {}: {}", patient_id, e);
            AnalysisError::Store(e)
        })?;

        info!(
            "Symptom analysis {} created for patient {}: {} symptoms, {} red flags",
            stored.id, patient_id, symptom_count, red_flag_count
        );

        Ok(stored.into())
    }

    pub async fn get_analysis(&self, analysis_id: Uuid) -> Result<SymptomAnalysisResponse, AnalysisError> {
        self.analyses
            .get(analysis_id)
            .await?
            .map(SymptomAnalysisResponse::from)
            .ok_or_else(|| AnalysisError::AnalysisNotFound(analysis_id.to_string()))
    }

    pub async fn get_patient_analyses(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<SymptomAnalysisResponse>, AnalysisError> {
        let analyses = self.analyses.list_for_patient(patient_id).await?;
        Ok(analyses.into_iter().map(SymptomAnalysisResponse::from).collect())
    }

    pub async fn get_analysis_for_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<SymptomAnalysisResponse, AnalysisError> {
        self.analyses
            .get_for_appointment(appointment_id)
            .await?
            .map(SymptomAnalysisResponse::from)
            .ok_or_else(|| {
                AnalysisError::AnalysisNotFound(format!("aucune analyse pour le rendez-vous {}", appointment_id))
            })
    }
}
