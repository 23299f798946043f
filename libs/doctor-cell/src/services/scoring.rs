use shared_config::MatchingConfig;
use shared_models::Specialty;

/// Specialty score when the doctor practises a suggested specialty.
pub const EXACT_SPECIALTY_SCORE: f64 = 1.0;
/// Specialty score granted to specialists when general medicine is among
/// the suggestions.
pub const GENERALIST_FALLBACK_SCORE: f64 = 0.7;
/// Symptom scores at or above this earn the "perfect match" phrase.
pub const PERFECT_MATCH_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub symptoms: f64,
    pub distance: f64,
    pub availability: f64,
    pub total: f64,
}

/// Weighted doctor relevance: specialty fit, proximity and availability.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    config: MatchingConfig,
}

impl MatchScorer {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn symptom_score(&self, doctor_specialty: Specialty, suggested: &[Specialty]) -> f64 {
        if suggested.is_empty() {
            return self.config.neutral_score;
        }
        if suggested.contains(&doctor_specialty) {
            return EXACT_SPECIALTY_SCORE;
        }
        if suggested.contains(&Specialty::MedecineGenerale) && !doctor_specialty.is_general_medicine() {
            return GENERALIST_FALLBACK_SCORE;
        }
        0.0
    }

    /// `1 - min(d / r, 1)`; neutral when either side is unknown.
    pub fn distance_score(&self, distance_km: Option<f64>, radius_km: Option<f64>) -> f64 {
        match (distance_km, radius_km) {
            (Some(distance), Some(radius)) if radius > 0.0 && distance.is_finite() => {
                1.0 - (distance.max(0.0) / radius).min(1.0)
            }
            _ => self.config.neutral_score,
        }
    }

    /// `None` means no date was asked for.
    pub fn availability_score(&self, available_on_date: Option<bool>) -> f64 {
        match available_on_date {
            Some(true) => 1.0,
            Some(false) => 0.0,
            None => self.config.neutral_score,
        }
    }

    pub fn combine(&self, symptoms: f64, distance: f64, availability: f64) -> ScoreBreakdown {
        let total = symptoms * self.config.symptom_weight
            + distance * self.config.distance_weight
            + availability * self.config.availability_weight;

        ScoreBreakdown {
            symptoms,
            distance,
            availability,
            total,
        }
    }

    pub fn score(
        &self,
        doctor_specialty: Specialty,
        suggested: &[Specialty],
        distance_km: Option<f64>,
        radius_km: Option<f64>,
        available_on_date: Option<bool>,
    ) -> ScoreBreakdown {
        self.combine(
            self.symptom_score(doctor_specialty, suggested),
            self.distance_score(distance_km, radius_km),
            self.availability_score(available_on_date),
        )
    }
}

/// Explanation shown next to a ranked doctor.
pub fn build_match_message(
    specialty: Specialty,
    distance_km: Option<f64>,
    available: bool,
    symptom_score: f64,
) -> String {
    let mut message = format!("Spécialité: {}", specialty.display_name());

    if let Some(distance) = distance_km {
        message.push_str(&format!(" - Distance: {:.2} km", distance));
    }

    if available {
        message.push_str(" - Disponible");
    } else {
        message.push_str(" - Non disponible à la date souhaitée");
    }

    if symptom_score >= PERFECT_MATCH_THRESHOLD {
        message.push_str(" - Correspondance parfaite avec vos symptômes");
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scorer() -> MatchScorer {
        MatchScorer::new(MatchingConfig::default())
    }

    #[test]
    fn symptom_score_rules() {
        let s = scorer();
        assert_eq!(s.symptom_score(Specialty::Cardiologie, &[]), 0.5);
        assert_eq!(s.symptom_score(Specialty::Cardiologie, &[Specialty::Cardiologie]), 1.0);
        assert_eq!(
            s.symptom_score(Specialty::Dermatologie, &[Specialty::Cardiologie, Specialty::Dermatologie]),
            1.0
        );
        assert_eq!(s.symptom_score(Specialty::Cardiologie, &[Specialty::MedecineGenerale]), 0.7);
        assert_eq!(
            s.symptom_score(Specialty::MedecineGenerale, &[Specialty::MedecineGenerale]),
            1.0
        );
        assert_eq!(s.symptom_score(Specialty::MedecineGenerale, &[Specialty::Cardiologie]), 0.0);
        assert_eq!(s.symptom_score(Specialty::Urologie, &[Specialty::Neurologie]), 0.0);
    }

    #[test]
    fn distance_score_is_linear_and_floored() {
        let s = scorer();
        assert_eq!(s.distance_score(Some(0.0), Some(10.0)), 1.0);
        assert!((s.distance_score(Some(2.5), Some(10.0)) - 0.75).abs() < EPS);
        assert_eq!(s.distance_score(Some(10.0), Some(10.0)), 0.0);
        assert_eq!(s.distance_score(Some(42.0), Some(10.0)), 0.0);
    }

    #[test]
    fn distance_score_is_neutral_when_unknown() {
        let s = scorer();
        assert_eq!(s.distance_score(None, Some(10.0)), 0.5);
        assert_eq!(s.distance_score(Some(3.0), None), 0.5);
        assert_eq!(s.distance_score(Some(3.0), Some(0.0)), 0.5);
    }

    #[test]
    fn distance_at_or_beyond_radius_scores_zero() {
        let s = scorer();
        for radius in [0.5, 1.0, 7.3, 50.0] {
            for factor in [1.0, 1.01, 2.0, 100.0] {
                assert_eq!(s.distance_score(Some(radius * factor), Some(radius)), 0.0);
            }
        }
    }

    #[test]
    fn availability_score_rules() {
        let s = scorer();
        assert_eq!(s.availability_score(Some(true)), 1.0);
        assert_eq!(s.availability_score(Some(false)), 0.0);
        assert_eq!(s.availability_score(None), 0.5);
    }

    #[test]
    fn total_is_weighted_sum_within_unit_interval() {
        let s = scorer();
        let components = [0.0, 0.5, 0.7, 1.0];
        for a in components {
            for b in [0.0, 0.25, 0.5, 1.0] {
                for c in [0.0, 0.5, 1.0] {
                    let breakdown = s.combine(a, b, c);
                    assert!((breakdown.total - (0.4 * a + 0.3 * b + 0.3 * c)).abs() < EPS);
                    assert!((0.0..=1.0 + EPS).contains(&breakdown.total));
                }
            }
        }
    }

    #[test]
    fn doctor_next_door_without_date_scores_085() {
        let breakdown = scorer().score(
            Specialty::Cardiologie,
            &[Specialty::Cardiologie],
            Some(0.0),
            Some(10.0),
            None,
        );

        assert_eq!(breakdown.distance, 1.0);
        assert_eq!(breakdown.symptoms, 1.0);
        assert_eq!(breakdown.availability, 0.5);
        assert!((breakdown.total - 0.85).abs() < EPS);
    }

    #[test]
    fn weights_come_from_config() {
        let scorer = MatchScorer::new(MatchingConfig {
            symptom_weight: 1.0,
            distance_weight: 0.0,
            availability_weight: 0.0,
            neutral_score: 0.2,
            default_limit: 5,
        });

        assert_eq!(scorer.score(Specialty::Urologie, &[], None, None, None).total, 0.2);
    }

    #[test]
    fn message_format() {
        assert_eq!(
            build_match_message(Specialty::MedecineGenerale, Some(2.5), true, 1.0),
            "Spécialité: MEDECINE GENERALE - Distance: 2.50 km - Disponible - Correspondance parfaite avec vos symptômes"
        );
        assert_eq!(
            build_match_message(Specialty::Cardiologie, None, false, 0.7),
            "Spécialité: CARDIOLOGIE - Non disponible à la date souhaitée"
        );
    }
}
