use crate::lexicon::Lexicon;

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 50;
pub const MIN_ALPHA_CHARS: usize = 3;

/// Gate applied to every canonicalized candidate before it may be reported.
pub fn is_valid_name(name: &str, lexicon: &Lexicon) -> bool {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return false;
    }
    if !name.chars().next().is_some_and(char::is_alphabetic) {
        return false;
    }
    if lexicon.is_stop_word(name) {
        return false;
    }
    name.chars().filter(|c| c.is_alphabetic()).count() >= MIN_ALPHA_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(name: &str) -> bool {
        is_valid_name(name, &Lexicon::default())
    }

    #[test]
    fn accepts_ordinary_names() {
        assert!(valid("Amoxicillin"));
        assert!(valid("Augmentin Duo"));
        assert!(valid("Vitamin D3"));
        assert!(valid("ORS"));
    }

    #[test]
    fn length_bounds() {
        assert!(!valid(""));
        assert!(!valid("Hb"));
        assert!(valid("Abc"));
        assert!(valid(&"a".repeat(50)));
        assert!(!valid(&"a".repeat(51)));
    }

    #[test]
    fn must_start_with_letter() {
        assert!(!valid("5-ASA"));
        assert!(!valid("-Amoxicillin"));
    }

    #[test]
    fn rejects_stop_words_in_any_case() {
        assert!(!valid("Patient"));
        assert!(!valid("DOCTOR"));
        assert!(!valid("morning"));
        assert!(!valid("Tablet"));
    }

    #[test]
    fn needs_three_letters() {
        assert!(!valid("B12"));
        assert!(!valid("A-1-2"));
        assert!(valid("Ab-C12"));
    }

    #[test]
    fn honors_configured_stop_words() {
        let lex = Lexicon::from_config(&crate::ParserConfig {
            extra_stop_words: vec!["pharmacy".into()],
            ..Default::default()
        });
        assert!(!is_valid_name("Pharmacy", &lex));
        assert!(is_valid_name("Pharmacy", &Lexicon::default()));
    }
}
