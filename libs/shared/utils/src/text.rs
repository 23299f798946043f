//! Normalization shared by every keyword lookup over patient-written French text.

/// Characters kept besides ASCII lowercase letters and whitespace.
const FRENCH_LETTERS: &str = "àâäéèêëïîôùûüÿçœæ";

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_whitespace() || FRENCH_LETTERS.contains(c)
}

/// Lowercase, turn everything that is not a (French) letter into a space,
/// collapse runs of whitespace and trim.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_kept(c) { c } else { ' ' })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized words of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
