//! Canonical symptom-word to specialty lexicon, used both when ranking
//! doctors and when analysing free-text symptoms.

use std::collections::BTreeSet;

use shared_models::Specialty;

use crate::text::{normalize, tokenize};

/// Keywords are stored already normalized (lowercase, accents kept).
pub static SPECIALTY_KEYWORDS: &[(&str, Specialty)] = &[
    ("cœur", Specialty::Cardiologie),
    ("cardiaque", Specialty::Cardiologie),
    ("thorax", Specialty::Cardiologie),
    ("thoracique", Specialty::Cardiologie),
    ("tension", Specialty::Cardiologie),
    ("hypertension", Specialty::Cardiologie),
    ("essoufflement", Specialty::Cardiologie),
    ("peau", Specialty::Dermatologie),
    ("dermatologique", Specialty::Dermatologie),
    ("acné", Specialty::Dermatologie),
    ("eczéma", Specialty::Dermatologie),
    ("psoriasis", Specialty::Dermatologie),
    ("diabète", Specialty::Endocrinologie),
    ("thyroïde", Specialty::Endocrinologie),
    ("hormone", Specialty::Endocrinologie),
    ("ventre", Specialty::Gastroenterologie),
    ("estomac", Specialty::Gastroenterologie),
    ("digestion", Specialty::Gastroenterologie),
    ("intestin", Specialty::Gastroenterologie),
    ("femme", Specialty::Gynecologie),
    ("gynécologique", Specialty::Gynecologie),
    ("grossesse", Specialty::Gynecologie),
    ("cerveau", Specialty::Neurologie),
    ("neurologique", Specialty::Neurologie),
    ("migraine", Specialty::Neurologie),
    ("cancer", Specialty::Oncologie),
    ("oncologique", Specialty::Oncologie),
    ("œil", Specialty::Ophtalmologie),
    ("vision", Specialty::Ophtalmologie),
    ("vue", Specialty::Ophtalmologie),
    ("os", Specialty::Orthopedie),
    ("articulation", Specialty::Orthopedie),
    ("fracture", Specialty::Orthopedie),
    ("enfant", Specialty::Pediatrie),
    ("bébé", Specialty::Pediatrie),
    ("mental", Specialty::Psychiatrie),
    ("psychologique", Specialty::Psychiatrie),
    ("dépression", Specialty::Psychiatrie),
    ("poumon", Specialty::Pneumologie),
    ("respiration", Specialty::Pneumologie),
    ("asthme", Specialty::Pneumologie),
    ("rhumatisme", Specialty::Rhumatologie),
    ("urinaire", Specialty::Urologie),
    ("rein", Specialty::Urologie),
];

/// Matching runs both ways: "hypertensions" hits "tension", "cardia" hits
/// "cardiaque". Short tokens are not special-cased, so "os" also hits
/// "grossesse".
fn token_hits(token: &str, keyword: &str) -> bool {
    !token.is_empty() && (token.contains(keyword) || keyword.contains(token))
}

/// Every specialty whose keyword matches at least one token. May be empty.
pub fn match_tokens<I, S>(tokens: I) -> BTreeSet<Specialty>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matched = BTreeSet::new();
    for token in tokens {
        let token = token.as_ref();
        for (keyword, specialty) in SPECIALTY_KEYWORDS {
            if token_hits(token, keyword) {
                matched.insert(*specialty);
            }
        }
    }
    matched
}

/// Candidate specialties for a free-text description plus optional tags.
///
/// Falls back to general medicine when nothing matches, so the result is
/// never empty.
pub fn suggest_specialties<S: AsRef<str>>(text: &str, tags: &[S]) -> Vec<Specialty> {
    let tokens = tokenize(text)
        .into_iter()
        .chain(tags.iter().flat_map(|tag| tokenize(tag.as_ref())));

    let matched = match_tokens(tokens);
    if matched.is_empty() {
        return vec![Specialty::MedecineGenerale];
    }
    matched.into_iter().collect()
}

/// Substring lookup over whole phrases: each phrase is normalized and every
/// keyword it contains counts. Used for analysed descriptions, where
/// multi-word symptom labels are matched as written.
pub fn specialties_in_phrases<I, S>(phrases: I) -> Vec<Specialty>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matched = BTreeSet::new();
    for phrase in phrases {
        let phrase = normalize(phrase.as_ref());
        if phrase.is_empty() {
            continue;
        }
        for (keyword, specialty) in SPECIALTY_KEYWORDS {
            if phrase.contains(keyword) {
                matched.insert(*specialty);
            }
        }
    }

    if matched.is_empty() {
        return vec![Specialty::MedecineGenerale];
    }
    matched.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TAGS: &[&str] = &[];

    #[test]
    fn chest_pain_suggests_cardiology() {
        let suggested = suggest_specialties("Douleur thoracique depuis 3 jours, essoufflement", NO_TAGS);
        assert_eq!(suggested, vec![Specialty::Cardiologie]);
    }

    #[test]
    fn ambiguity_is_preserved() {
        let suggested = suggest_specialties("mal au ventre et problème de peau", NO_TAGS);
        assert!(suggested.contains(&Specialty::Gastroenterologie));
        assert!(suggested.contains(&Specialty::Dermatologie));
    }

    #[test]
    fn no_match_defaults_to_general_medicine() {
        assert_eq!(suggest_specialties("", NO_TAGS), vec![Specialty::MedecineGenerale]);
        assert_eq!(
            suggest_specialties("je suis fatigué", NO_TAGS),
            vec![Specialty::MedecineGenerale]
        );
    }

    #[test]
    fn tags_are_matched_case_insensitively() {
        let suggested = suggest_specialties("", &["ASTHME", "Migraine"]);
        assert_eq!(suggested, vec![Specialty::Neurologie, Specialty::Pneumologie]);
    }

    #[test]
    fn partial_token_matches_longer_keyword() {
        // "cardia" is contained in "cardiaque"
        assert!(match_tokens(["cardia"]).contains(&Specialty::Cardiologie));
        // "hypertensions" contains "hypertension" and "tension"
        assert_eq!(match_tokens(["hypertensions"]).len(), 1);
    }

    #[test]
    fn phrases_match_by_substring() {
        let suggested = specialties_in_phrases([
            "J'ai une douleur thoracique et un essoufflement",
            "douleur thoracique",
        ]);
        assert_eq!(suggested, vec![Specialty::Cardiologie]);

        assert_eq!(
            specialties_in_phrases(["problèmes de vision et mal au ventre"]),
            vec![Specialty::Gastroenterologie, Specialty::Ophtalmologie]
        );
    }

    #[test]
    fn empty_phrases_fall_back_to_general_medicine() {
        assert_eq!(specialties_in_phrases(["", "   "]), vec![Specialty::MedecineGenerale]);
        assert_eq!(specialties_in_phrases(Vec::<String>::new()), vec![Specialty::MedecineGenerale]);
    }

    #[test]
    fn short_tokens_match_inside_longer_keywords() {
        assert_eq!(
            match_tokens(["os"]),
            BTreeSet::from([Specialty::Gynecologie, Specialty::Orthopedie])
        );

        let suggested = suggest_specialties("de", NO_TAGS);
        assert!(suggested.contains(&Specialty::Dermatologie));
        assert!(!suggested.contains(&Specialty::MedecineGenerale));
    }

    #[test]
    fn empty_token_never_matches() {
        assert!(match_tokens([""]).is_empty());
    }
}
