use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, error, info};

use shared_config::{AppConfig, MatchingConfig};
use shared_utils::specialty_map::suggest_specialties;

use crate::models::{MatchRequest, MatchResult, MatchingError};
use crate::services::availability::AvailabilityChecker;
use crate::services::doctor::{DoctorStore, SupabaseDoctorStore};
use crate::services::geo::distance_km;
use crate::services::scoring::{build_match_message, MatchScorer};

pub struct DoctorMatchingService {
    store: Arc<dyn DoctorStore>,
    scorer: MatchScorer,
    availability: AvailabilityChecker,
}

impl DoctorMatchingService {
    /// Service backed by Supabase, acting with the caller's token.
    pub fn new(config: &AppConfig, auth_token: &str) -> Self {
        Self::with_store(
            Arc::new(SupabaseDoctorStore::new(config, auth_token)),
            config.matching.clone(),
        )
    }

    pub fn with_store(store: Arc<dyn DoctorStore>, matching: MatchingConfig) -> Self {
        Self {
            availability: AvailabilityChecker::new(store.clone()),
            scorer: MatchScorer::new(matching),
            store,
        }
    }

    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Rank doctors near the patient for a symptom description.
    ///
    /// Results are sorted by total score (highest first, ties broken by doctor
    /// id), exclude doctors scoring zero and hold at most `limit` entries.
    pub async fn match_doctors(&self, request: MatchRequest) -> Result<Vec<MatchResult>, MatchingError> {
        request.validate()?;

        let suggested = match request.specialty {
            Some(specialty) => vec![specialty],
            None => suggest_specialties(&request.symptoms, request.tags.as_deref().unwrap_or_default()),
        };
        debug!("Matching doctors for specialties {:?} within {} km", suggested, request.radius_km);

        let origin = request.origin();
        let candidates = self
            .store
            .find_within_radius(origin, request.radius_km, request.specialty)
            .await
            .map_err(|e| {
                error!("Failed to load candidate doctors: {}", e);
                MatchingError::Store(e)
            })?;

        debug!("Scoring {} candidate doctors", candidates.len());

        let mut results = Vec::with_capacity(candidates.len());
        for doctor in candidates {
            let distance = distance_km(Some(origin), doctor.location());

            let available_on_date = match request.desired_date {
                Some(date) => Some(self.availability.has_slot_on(doctor.id, date).await),
                None => None,
            };

            let breakdown = self.scorer.score(
                doctor.specialty,
                &suggested,
                distance,
                Some(request.radius_km),
                available_on_date,
            );
            if breakdown.total <= 0.0 {
                continue;
            }

            let available = available_on_date.unwrap_or(true);
            let message = build_match_message(doctor.specialty, distance, available, breakdown.symptoms);

            results.push(MatchResult {
                doctor,
                score_total: breakdown.total,
                score_symptoms: breakdown.symptoms,
                score_distance: breakdown.distance,
                score_availability: breakdown.availability,
                distance_km: distance,
                available,
                message,
            });
        }

        rank(&mut results);

        let limit = match request.limit {
            Some(limit) if limit > 0 => limit,
            _ => self.scorer.config().default_limit,
        };
        results.truncate(limit);

        info!("Matched {} doctors", results.len());
        Ok(results)
    }
}

fn rank(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.score_total
            .partial_cmp(&a.score_total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doctor.id.cmp(&b.doctor.id))
    });
}
