use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Method;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::{Specialty, Weekday};

use crate::models::{Doctor, TimeSlot};
use crate::services::geo::GeoPoint;

/// Read access to doctors, their weekly slots and their booked appointments.
/// Implementations never return soft-deleted doctors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DoctorStore: Send + Sync {
    /// Doctors with a known location within `radius_km` of `origin`,
    /// optionally restricted to one specialty.
    async fn find_within_radius(
        &self,
        origin: GeoPoint,
        radius_km: f64,
        specialty: Option<Specialty>,
    ) -> Result<Vec<Doctor>>;

    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>>;

    /// Slots that are both active and available on `day`.
    async fn find_available_slots(&self, doctor_id: Uuid, day: Weekday) -> Result<Vec<TimeSlot>>;

    /// Whether a pending or confirmed appointment already holds this date and time.
    async fn has_active_appointment_at(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool>;
}

pub struct SupabaseDoctorStore {
    supabase: SupabaseClient,
    auth_token: String,
}

impl SupabaseDoctorStore {
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            auth_token: auth_token.to_string(),
        }
    }
}

#[async_trait]
impl DoctorStore for SupabaseDoctorStore {
    async fn find_within_radius(
        &self,
        origin: GeoPoint,
        radius_km: f64,
        specialty: Option<Specialty>,
    ) -> Result<Vec<Doctor>> {
        debug!(
            "Searching doctors within {} km of ({}, {}), specialty {:?}",
            radius_km, origin.latitude, origin.longitude, specialty
        );

        let doctors: Vec<Doctor> = self
            .supabase
            .rpc(
                "doctors_within_radius",
                Some(&self.auth_token),
                json!({
                    "lat": origin.latitude,
                    "lng": origin.longitude,
                    "radius_km": radius_km,
                    "specialty": specialty.map(|s| s.as_str()),
                }),
            )
            .await?;

        Ok(doctors
            .into_iter()
            .filter(|doctor| !doctor.deleted && doctor.location().is_some())
            .collect())
    }

    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>> {
        let path = format!("/rest/v1/doctors?id=eq.{}&deleted=eq.false", doctor_id);
        let doctors: Vec<Doctor> = self
            .supabase
            .request(Method::GET, &path, Some(&self.auth_token), None)
            .await?;

        Ok(doctors.into_iter().next())
    }

    async fn find_available_slots(&self, doctor_id: Uuid, day: Weekday) -> Result<Vec<TimeSlot>> {
        let path = format!(
            "/rest/v1/time_slots?doctor_id=eq.{}&day=eq.{}&available=eq.true&active=eq.true&order=start_time.asc",
            doctor_id, day
        );

        self.supabase
            .request(Method::GET, &path, Some(&self.auth_token), None)
            .await
    }

    async fn has_active_appointment_at(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<bool> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&date=eq.{}&time=eq.{}&status=in.(PENDING,CONFIRMED)&deleted=eq.false&select=id",
            doctor_id,
            date.format("%Y-%m-%d"),
            time.format("%H:%M:%S")
        );

        let rows: Vec<serde_json::Value> = self
            .supabase
            .request(Method::GET, &path, Some(&self.auth_token), None)
            .await?;

        Ok(!rows.is_empty())
    }
}
