use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub bind_addr: String,
    pub matching: MatchingConfig,
}

/// Tuning knobs for doctor ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub symptom_weight: f64,
    pub distance_weight: f64,
    pub availability_weight: f64,
    /// Score used when a component cannot be evaluated.
    pub neutral_score: f64,
    pub default_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            symptom_weight: 0.4,
            distance_weight: 0.3,
            availability_weight: 0.3,
            neutral_score: 0.5,
            default_limit: 10,
        }
    }
}

impl MatchingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            symptom_weight: parse_or("MATCH_WEIGHT_SYMPTOMS", defaults.symptom_weight),
            distance_weight: parse_or("MATCH_WEIGHT_DISTANCE", defaults.distance_weight),
            availability_weight: parse_or("MATCH_WEIGHT_AVAILABILITY", defaults.availability_weight),
            neutral_score: parse_or("MATCH_NEUTRAL_SCORE", defaults.neutral_score),
            default_limit: parse_or("MATCH_DEFAULT_LIMIT", defaults.default_limit),
        }
        .validated()
    }

    pub fn total_weight(&self) -> f64 {
        self.symptom_weight + self.distance_weight + self.availability_weight
    }

    /// Keeps total scores within [0, 1]: each weight must be finite and
    /// non-negative, their sum at most 1, and the neutral score in [0, 1].
    /// Offending values are replaced by the defaults.
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let weights = [self.symptom_weight, self.distance_weight, self.availability_weight];

        let weights_ok = weights.iter().all(|w| w.is_finite() && *w >= 0.0)
            && self.total_weight() <= 1.0 + 1e-9;
        let neutral_ok = (0.0..=1.0).contains(&self.neutral_score);

        let mut config = self;
        if !weights_ok {
            warn!(
                "Invalid matching weights {:?}, using defaults {}/{}/{}",
                weights, defaults.symptom_weight, defaults.distance_weight, defaults.availability_weight
            );
            config.symptom_weight = defaults.symptom_weight;
            config.distance_weight = defaults.distance_weight;
            config.availability_weight = defaults.availability_weight;
        }
        if !neutral_ok {
            warn!(
                "Invalid neutral score {}, using default {}",
                config.neutral_score, defaults.neutral_score
            );
            config.neutral_score = defaults.neutral_score;
        }
        config
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has an unparseable value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            matching: MatchingConfig::from_env(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let matching = MatchingConfig::default();
        assert!((matching.total_weight() - 1.0).abs() < 1e-12);
        assert_eq!(matching.neutral_score, 0.5);
        assert_eq!(matching.default_limit, 10);
    }

    #[test]
    fn valid_overrides_are_kept() {
        let matching = MatchingConfig {
            symptom_weight: 0.6,
            distance_weight: 0.2,
            availability_weight: 0.1,
            neutral_score: 0.0,
            default_limit: 5,
        };
        assert_eq!(matching.clone().validated(), matching);
    }

    #[test]
    fn out_of_range_weights_fall_back_to_defaults() {
        let defaults = MatchingConfig::default();

        let negative = MatchingConfig {
            symptom_weight: -0.2,
            default_limit: 5,
            ..MatchingConfig::default()
        }
        .validated();
        assert_eq!(negative.symptom_weight, defaults.symptom_weight);
        assert_eq!(negative.default_limit, 5);

        let oversized = MatchingConfig {
            symptom_weight: 0.9,
            distance_weight: 0.9,
            ..MatchingConfig::default()
        }
        .validated();
        assert_eq!(oversized, defaults);

        let not_a_number = MatchingConfig {
            availability_weight: f64::NAN,
            ..MatchingConfig::default()
        }
        .validated();
        assert_eq!(not_a_number, defaults);
    }

    #[test]
    fn out_of_range_neutral_score_falls_back() {
        let matching = MatchingConfig {
            neutral_score: 1.5,
            ..MatchingConfig::default()
        }
        .validated();
        assert_eq!(matching.neutral_score, 0.5);
    }

    #[test]
    fn unconfigured_when_supabase_missing() {
        let config = AppConfig {
            supabase_url: String::new(),
            supabase_anon_key: "anon".to_string(),
            supabase_jwt_secret: "secret".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            matching: MatchingConfig::default(),
        };
        assert!(!config.is_configured());
    }
}
