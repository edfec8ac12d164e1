//! Name normalization shared by lookups and display ordering.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lookup key for a spell name: trimmed, NFKC, Unicode lowercase.
///
/// Two names collide exactly when their keys are equal. Storage keeps this
/// key next to the display name so equality and substring search never
/// depend on the database's own case folding.
pub fn name_key(name: &str) -> String {
    name.trim().nfkc().collect::<String>().to_lowercase()
}

/// Ordering key: decomposed, combining marks dropped, lowercase.
///
/// "Éclair" sorts with the E words instead of after "Z".
pub fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compare names for display: accent- and case-insensitive first, then
/// accented after plain, then the raw text so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| name_key(a).cmp(&name_key(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_folds_case_and_whitespace() {
        assert_eq!(name_key("  Boule de Feu "), "boule de feu");
    }

    #[test]
    fn key_folds_non_ascii_case() {
        assert_eq!(name_key("ÉCLAIR DE FEU"), name_key("éclair de feu"));
        assert_eq!(name_key("ÆTHER"), "æther");
    }

    #[test]
    fn key_unifies_composed_and_decomposed_forms() {
        // "É" precomposed vs "E" + combining acute
        assert_eq!(name_key("\u{00C9}clair"), name_key("E\u{0301}clair"));
    }

    #[test]
    fn key_keeps_accents_distinct() {
        assert_ne!(name_key("éclair"), name_key("eclair"));
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut names = vec!["Zephyr", "Éclair", "Ángel", "eclipse", "Bolt"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["Ángel", "Bolt", "Éclair", "eclipse", "Zephyr"]);
    }

    #[test]
    fn plain_spelling_sorts_before_accented_twin() {
        let mut names = vec!["Éclair", "eclair", "Eclair"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["Eclair", "eclair", "Éclair"]);
    }
}
