use shared_models::Specialty;

use crate::services::extractor::{SymptomExtraction, SEVERE};

pub const ASK_DESCRIPTION: &str = "Pouvez-vous décrire plus précisément vos symptômes ?";
pub const ASK_SEVERITY: &str =
    "Sur une échelle de 1 à 10, comment évalueriez-vous l'intensité de vos symptômes ?";
pub const ASK_DURATION: &str = "Depuis combien de temps ressentez-vous ces symptômes ?";

const RED_FLAG_QUESTIONS: [&str; 2] = [
    "Les symptômes s'aggravent-ils rapidement ?",
    "Avez-vous d'autres symptômes associés (fièvre, nausées, vertiges) ?",
];

/// Follow-up questions asked when any symptom label contains one of the markers.
const FOLLOW_UPS: &[(&[&str], [&str; 2])] = &[
    (
        &["douleur thoracique", "cœur"],
        [
            "La douleur irradie-t-elle vers le bras gauche, la mâchoire ou le dos ?",
            "Avez-vous des antécédents cardiaques ?",
        ],
    ),
    (
        &["essoufflement", "respiration"],
        [
            "L'essoufflement survient-il au repos ou seulement à l'effort ?",
            "Avez-vous de la toux ou des expectorations ?",
        ],
    ),
    (
        &["maux de tête", "céphalée"],
        [
            "Avez-vous déjà eu ce type de maux de tête auparavant ?",
            "Les maux de tête sont-ils accompagnés de nausées ou de sensibilité à la lumière ?",
        ],
    ),
];

pub const URGENT_MESSAGE: &str = "⚠️ URGENCE MÉDICALE: Consultez immédiatement un médecin ou appelez le 190 (SAMU). Les symptômes décrits nécessitent une attention médicale urgente.";
pub const RED_FLAG_MESSAGE: &str =
    "⚠️ Consultez un médecin dans les plus brefs délais si les symptômes persistent ou s'aggravent.";
pub const ROUTINE_MESSAGE: &str =
    "Il est recommandé de consulter un médecin pour une évaluation appropriée de vos symptômes.";

pub fn generate_questions(extraction: &SymptomExtraction) -> Vec<String> {
    let mut questions = Vec::new();

    if extraction.symptoms.is_empty() {
        questions.push(ASK_DESCRIPTION);
    }
    if extraction.severity.is_none() {
        questions.push(ASK_SEVERITY);
    }
    if extraction.duration_days.is_none() {
        questions.push(ASK_DURATION);
    }
    if !extraction.red_flags.is_empty() {
        questions.extend(RED_FLAG_QUESTIONS);
    }

    for (markers, follow_ups) in FOLLOW_UPS {
        let mentioned = extraction
            .symptoms
            .iter()
            .any(|symptom| markers.iter().any(|marker| symptom.contains(marker)));
        if mentioned {
            questions.extend(follow_ups);
        }
    }

    questions.into_iter().map(str::to_string).collect()
}

/// Plain-text summary handed to the doctor before the consultation.
pub fn build_summary(extraction: &SymptomExtraction, specialties: &[Specialty]) -> String {
    let mut summary = String::from("Résumé de l'analyse des symptômes:\n\n");

    summary.push_str("Symptômes identifiés: ");
    if extraction.symptoms.is_empty() {
        summary.push_str("Non spécifiés");
    } else {
        summary.push_str(&extraction.symptoms.join(", "));
    }
    summary.push('\n');

    if let Some(severity) = extraction.severity {
        summary.push_str(&format!("Sévérité: {}/10\n", severity));
    }

    if let Some(days) = extraction.duration_days {
        summary.push_str(&format!("Durée: {} jour(s)\n", days));
    }

    if !extraction.red_flags.is_empty() {
        summary.push_str(&format!(
            "\n⚠️ Indicateurs d'urgence détectés: {}\n",
            extraction.red_flags.join(", ")
        ));
    }

    if !specialties.is_empty() {
        let names: Vec<String> = specialties.iter().map(Specialty::display_name).collect();
        summary.push_str(&format!("\nSpécialités suggérées: {}\n", names.join(", ")));
    }

    summary
}

pub fn is_urgent(extraction: &SymptomExtraction) -> bool {
    !extraction.red_flags.is_empty() || extraction.severity.is_some_and(|severity| severity >= SEVERE)
}

pub fn recommendation_message(urgent: bool, red_flags: &[String]) -> &'static str {
    if urgent {
        URGENT_MESSAGE
    } else if !red_flags.is_empty() {
        RED_FLAG_MESSAGE
    } else {
        ROUTINE_MESSAGE
    }
}
