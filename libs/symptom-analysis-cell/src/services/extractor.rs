//! Keyword and pattern extraction over a French symptom description.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use shared_utils::text::normalize;

/// Phrase found in the normalized description, and the label it is reported as.
static SYMPTOM_KEYWORDS: &[(&str, &str)] = &[
    ("douleur thoracique", "douleur thoracique"),
    ("douleur poitrine", "douleur thoracique"),
    ("essoufflement", "essoufflement"),
    ("difficulté respirer", "essoufflement"),
    ("maux de tête", "maux de tête"),
    ("céphalée", "maux de tête"),
    ("fièvre", "fièvre"),
    ("toux", "toux"),
    ("nausée", "nausées"),
    ("vomissement", "vomissements"),
    ("douleur ventre", "douleur abdominale"),
    ("douleur estomac", "douleur abdominale"),
    ("diarrhée", "diarrhée"),
    ("constipation", "constipation"),
    ("vertige", "vertiges"),
    ("fatigue", "fatigue"),
    ("douleur articulation", "douleur articulaire"),
    ("rougeur", "rougeur"),
    ("démangeaison", "démangeaisons"),
    ("éruption", "éruption cutanée"),
];

/// Phrases that call for urgent attention.
static RED_FLAG_KEYWORDS: &[(&str, &str)] = &[
    ("douleur thoracique sévère", "douleur thoracique sévère"),
    ("essoufflement repos", "essoufflement au repos"),
    ("perte connaissance", "perte de conscience"),
    ("saignement important", "saignement important"),
    ("traumatisme crânien", "traumatisme crânien"),
    ("fièvre élevée", "fièvre élevée (>39°C)"),
    ("douleur insupportable", "douleur insupportable"),
];

/// "7/10", "7 sur 10". A trailing "/<digit>" means a date, not a score.
static SCORE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\b(10|[1-9])\s*(?:/|sur)\s*10\b(\s*/\s*\d)?"));

/// A digit right after a severity word: "douleur à 6", "intensité: 7".
/// A trailing time unit means a duration, not a score.
static RATED_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"\b(?:douleur|intensité|niveau|sévérité|note)\s*(?:(?:de|à|a|est|:|=)\s*)*(10|[1-9])\b(\s*(?:jours?|semaines?|mois|ans?|heures?|h|minutes?|min)\b)?",
    )
});

static SEVERE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"\b(?:sévères?|graves?|intenses?|très\s+(?:douloureux|douloureuse|forte?))\b")
});
static MODERATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\b(?:modérée?s?|moyenne?s?)\b"));
static MILD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\b(?:légers?|légères?|faibles?)\b"));

static DAYS_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\b(\d+)\s*jours?\b"));
static WEEKS_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\b(\d+)\s*semaines?\b"));
static MONTHS_PATTERN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\b(\d+)\s*mois\b"));

fn pattern(regex_str: &str) -> Regex {
    Regex::new(regex_str).expect("Invalid extraction regex pattern")
}

pub const SEVERE: u8 = 8;
pub const MODERATE: u8 = 5;
pub const MILD: u8 = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymptomExtraction {
    /// Canonical labels, deduplicated and sorted.
    pub symptoms: Vec<String>,
    /// In urgency-table order.
    pub red_flags: Vec<String>,
    pub severity: Option<u8>,
    pub duration_days: Option<u32>,
}

pub fn extract(description: &str) -> SymptomExtraction {
    let normalized = normalize(description);
    let lowered = description.to_lowercase();

    SymptomExtraction {
        symptoms: extract_symptoms(&normalized),
        red_flags: detect_red_flags(&normalized),
        severity: extract_severity(&lowered),
        duration_days: extract_duration(&lowered),
    }
}

/// `normalized` must already have gone through [`normalize`].
pub fn extract_symptoms(normalized: &str) -> Vec<String> {
    SYMPTOM_KEYWORDS
        .iter()
        .filter(|(phrase, _)| normalized.contains(phrase))
        .map(|(_, label)| *label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `normalized` must already have gone through [`normalize`].
pub fn detect_red_flags(normalized: &str) -> Vec<String> {
    RED_FLAG_KEYWORDS
        .iter()
        .filter(|(phrase, _)| normalized.contains(phrase))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Severity on a 1..=10 scale from an explicit score, else from adjectives.
pub fn extract_severity(lowered: &str) -> Option<u8> {
    let scored = SCORE_PATTERN
        .captures_iter(lowered)
        .filter(|caps| caps.get(2).is_none())
        .chain(
            RATED_WORD_PATTERN
                .captures_iter(lowered)
                .filter(|caps| caps.get(2).is_none()),
        )
        .find_map(|caps| caps.get(1).and_then(|m| m.as_str().parse::<u8>().ok()))
        .filter(|score| (1..=10).contains(score));

    if scored.is_some() {
        return scored;
    }

    if SEVERE_PATTERN.is_match(lowered) {
        Some(SEVERE)
    } else if MODERATE_PATTERN.is_match(lowered) {
        Some(MODERATE)
    } else if MILD_PATTERN.is_match(lowered) {
        Some(MILD)
    } else {
        None
    }
}

/// Duration in days from "N jours", else "N semaines", else "N mois".
pub fn extract_duration(lowered: &str) -> Option<u32> {
    first_number(&DAYS_PATTERN, lowered)
        .or_else(|| first_number(&WEEKS_PATTERN, lowered).and_then(|weeks| weeks.checked_mul(7)))
        .or_else(|| first_number(&MONTHS_PATTERN, lowered).and_then(|months| months.checked_mul(30)))
}

fn first_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
