use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{NewSymptomAnalysis, SymptomAnalysis};

/// Existence checks against patients and appointments. Soft-deleted rows
/// count as missing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn patient_exists(&self, patient_id: Uuid) -> Result<bool>;

    async fn appointment_exists(&self, appointment_id: Uuid) -> Result<bool>;
}

/// Append-only storage of symptom analyses.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn insert(&self, analysis: NewSymptomAnalysis) -> Result<SymptomAnalysis>;

    async fn get(&self, analysis_id: Uuid) -> Result<Option<SymptomAnalysis>>;

    /// Newest first.
    async fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<SymptomAnalysis>>;

    /// Latest analysis attached to the appointment.
    async fn get_for_appointment(&self, appointment_id: Uuid) -> Result<Option<SymptomAnalysis>>;
}

pub struct SupabasePatientStore {
    supabase: SupabaseClient,
    auth_token: String,
}

impl SupabasePatientStore {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.to_string(),
        }
    }

    async fn exists(&self, table: &str, id: Uuid) -> Result<bool> {
        let path = format!("/rest/v1/{}?id=eq.{}&deleted=eq.false&select=id", table, id);
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(&self.auth_token), None)
            .await?;

        debug!("{} {} exists: {}", table, id, !rows.is_empty());
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl PatientStore for SupabasePatientStore {
    async fn patient_exists(&self, patient_id: Uuid) -> Result<bool> {
        self.exists("patients", patient_id).await
    }

    async fn appointment_exists(&self, appointment_id: Uuid) -> Result<bool> {
        self.exists("appointments", appointment_id).await
    }
}

pub struct SupabaseAnalysisStore {
    supabase: SupabaseClient,
    auth_token: String,
}

impl SupabaseAnalysisStore {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.to_string(),
        }
    }

    async fn select(&self, filter: &str) -> Result<Vec<SymptomAnalysis>> {
        let path = format!("/rest/v1/symptom_analyses?{}", filter);
        self.supabase
            .request(Method::GET, &path, Some(&self.auth_token), None)
            .await
    }
}

#[async_trait]
impl AnalysisStore for SupabaseAnalysisStore {
    async fn insert(&self, analysis: NewSymptomAnalysis) -> Result<SymptomAnalysis> {
        let row = serde_json::to_value(&analysis).context("Failed to serialize symptom analysis")?;

        self.supabase
            .insert("symptom_analyses", Some(&self.auth_token), row)
            .await
            .context("Failed to store symptom analysis")
    }

    async fn get(&self, analysis_id: Uuid) -> Result<Option<SymptomAnalysis>> {
        let rows = self.select(&format!("id=eq.{}", analysis_id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_for_patient(&self, patient_id: Uuid) -> Result<Vec<SymptomAnalysis>> {
        self.select(&format!("patient_id=eq.{}&order=created_at.desc", patient_id))
            .await
    }

    async fn get_for_appointment(&self, appointment_id: Uuid) -> Result<Option<SymptomAnalysis>> {
        let rows = self
            .select(&format!(
                "appointment_id=eq.{}&order=created_at.desc&limit=1",
                appointment_id
            ))
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use shared_models::Specialty;
    use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

    fn new_analysis(patient_id: Uuid) -> NewSymptomAnalysis {
        NewSymptomAnalysis {
            patient_id,
            appointment_id: None,
            original_description: "fièvre depuis 2 jours".to_string(),
            symptoms: vec!["fièvre".to_string()],
            severity: None,
            duration_days: Some(2),
            red_flags: vec![],
            suggested_specialties: vec![Specialty::MedecineGenerale],
            questions: vec![],
            summary: "Résumé".to_string(),
            urgent: false,
            recommendation_message: "ok".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_returns_stored_representation() {
        let mock_server = MockServer::start().await;
        let config = TestConfig::with_supabase_url(mock_server.uri()).to_app_config();
        let patient_id = Uuid::new_v4();
        let stored = new_analysis(patient_id).into_stored(Uuid::new_v4(), Utc::now());

        Mock::given(method("POST"))
            .and(path("/rest/v1/symptom_analyses"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(json!({
                "patient_id": patient_id,
                "duration_days": 2,
                "suggested_specialties": ["MEDECINE_GENERALE"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([stored])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = SupabaseAnalysisStore::new(&config, "token");
        let result = store.insert(new_analysis(patient_id)).await.unwrap();

        assert_eq!(result, stored);
    }

    #[tokio::test]
    async fn patient_lookup_filters_deleted_rows() {
        let mock_server = MockServer::start().await;
        let config = TestConfig::with_supabase_url(mock_server.uri()).to_app_config();
        let patient_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/rest/v1/patients"))
            .and(query_param("id", format!("eq.{}", patient_id)))
            .and(query_param("deleted", "eq.false"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([MockSupabaseResponses::patient_row(&patient_id.to_string())])),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let store = SupabasePatientStore::new(&config, "token");
        assert!(store.patient_exists(patient_id).await.unwrap());
        assert!(!store.appointment_exists(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn patient_history_is_ordered_newest_first() {
        let mock_server = MockServer::start().await;
        let config = TestConfig::with_supabase_url(mock_server.uri()).to_app_config();
        let patient_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/rest/v1/symptom_analyses"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = SupabaseAnalysisStore::new(&config, "token");
        assert!(store.list_for_patient(patient_id).await.unwrap().is_empty());
    }
}
