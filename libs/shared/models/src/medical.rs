use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Medical practice areas a doctor can be registered under.
///
/// Variants are declared in alphabetical order of their wire names, which
/// gives deterministic ordering wherever specialties are collected into
/// ordered sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    Cardiologie,
    Dermatologie,
    Endocrinologie,
    Gastroenterologie,
    Gynecologie,
    MedecineGenerale,
    Neurologie,
    Oncologie,
    Ophtalmologie,
    Orthopedie,
    Pediatrie,
    Pneumologie,
    Psychiatrie,
    Rhumatologie,
    Urologie,
}

impl Specialty {
    pub const ALL: [Specialty; 15] = [
        Specialty::Cardiologie,
        Specialty::Dermatologie,
        Specialty::Endocrinologie,
        Specialty::Gastroenterologie,
        Specialty::Gynecologie,
        Specialty::MedecineGenerale,
        Specialty::Neurologie,
        Specialty::Oncologie,
        Specialty::Ophtalmologie,
        Specialty::Orthopedie,
        Specialty::Pediatrie,
        Specialty::Pneumologie,
        Specialty::Psychiatrie,
        Specialty::Rhumatologie,
        Specialty::Urologie,
    ];

    /// Wire/database name, e.g. `MEDECINE_GENERALE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Cardiologie => "CARDIOLOGIE",
            Specialty::Dermatologie => "DERMATOLOGIE",
            Specialty::Endocrinologie => "ENDOCRINOLOGIE",
            Specialty::Gastroenterologie => "GASTROENTEROLOGIE",
            Specialty::Gynecologie => "GYNECOLOGIE",
            Specialty::MedecineGenerale => "MEDECINE_GENERALE",
            Specialty::Neurologie => "NEUROLOGIE",
            Specialty::Oncologie => "ONCOLOGIE",
            Specialty::Ophtalmologie => "OPHTALMOLOGIE",
            Specialty::Orthopedie => "ORTHOPEDIE",
            Specialty::Pediatrie => "PEDIATRIE",
            Specialty::Pneumologie => "PNEUMOLOGIE",
            Specialty::Psychiatrie => "PSYCHIATRIE",
            Specialty::Rhumatologie => "RHUMATOLOGIE",
            Specialty::Urologie => "UROLOGIE",
        }
    }

    /// Human-readable name: the wire name with underscores as spaces.
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn is_general_medicine(&self) -> bool {
        matches!(self, Specialty::MedecineGenerale)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(' ', "_");
        Specialty::ALL
            .iter()
            .copied()
            .find(|specialty| specialty.as_str() == wanted)
            .ok_or_else(|| format!("Unknown specialty: {}", s))
    }
}

/// Day of the week as stored on recurring time slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Lundi => "LUNDI",
            Weekday::Mardi => "MARDI",
            Weekday::Mercredi => "MERCREDI",
            Weekday::Jeudi => "JEUDI",
            Weekday::Vendredi => "VENDREDI",
            Weekday::Samedi => "SAMEDI",
            Weekday::Dimanche => "DIMANCHE",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Lundi,
            chrono::Weekday::Tue => Weekday::Mardi,
            chrono::Weekday::Wed => Weekday::Mercredi,
            chrono::Weekday::Thu => Weekday::Jeudi,
            chrono::Weekday::Fri => Weekday::Vendredi,
            chrono::Weekday::Sat => Weekday::Samedi,
            chrono::Weekday::Sun => Weekday::Dimanche,
        }
    }
}

impl From<NaiveDate> for Weekday {
    fn from(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialty_serializes_to_wire_name() {
        let json = serde_json::to_string(&Specialty::MedecineGenerale).unwrap();
        assert_eq!(json, "\"MEDECINE_GENERALE\"");

        let parsed: Specialty = serde_json::from_str("\"CARDIOLOGIE\"").unwrap();
        assert_eq!(parsed, Specialty::Cardiologie);
    }

    #[test]
    fn specialty_display_name_replaces_underscores() {
        assert_eq!(Specialty::MedecineGenerale.display_name(), "MEDECINE GENERALE");
        assert_eq!(Specialty::Urologie.display_name(), "UROLOGIE");
    }

    #[test]
    fn specialty_from_str_accepts_spaces_and_case() {
        assert_eq!("medecine generale".parse::<Specialty>(), Ok(Specialty::MedecineGenerale));
        assert!("astrologie".parse::<Specialty>().is_err());
    }

    #[test]
    fn all_specialties_are_sorted() {
        let mut sorted = Specialty::ALL;
        sorted.sort();
        assert_eq!(sorted, Specialty::ALL);
    }

    #[test]
    fn weekday_from_date() {
        // 2024-01-15 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Weekday::from(monday), Weekday::Lundi);
        assert_eq!(Weekday::from(monday + chrono::Duration::days(6)), Weekday::Dimanche);
        assert_eq!(serde_json::to_string(&Weekday::Mercredi).unwrap(), "\"MERCREDI\"");
    }
}
