use std::collections::HashSet;
use std::sync::OnceLock;

use crate::config::ParserConfig;

/// Words that never name a medicine on their own: prescription boilerplate,
/// patient metadata, vitals, schedule words and dosage forms.
const STOP_WORDS: &[&str] = &[
    // people & paperwork
    "patient", "name", "doctor", "dr", "physician", "consultant", "hospital", "clinic",
    "address", "phone", "mobile", "email", "date", "age", "sex", "gender", "male", "female",
    "signature", "sign", "reg", "regd", "registration", "prescription", "rx", "diagnosis",
    "complaints", "history", "advice", "advised", "review", "follow", "followup", "next",
    "visit", "investigations", "remarks", "notes", "note", "ward", "bed", "opd", "ipd",
    // table headers
    "medicine", "medicines", "medication", "medications", "drug", "drugs", "dose", "dosage",
    "frequency", "duration", "quantity", "qty", "instructions", "instruction", "route", "sig",
    "refill", "refills", "total", "freq", "timing", "timings", "strength", "form",
    "directions", "direction",
    // vitals & labs
    "weight", "height", "pulse", "temp", "temperature", "bp", "spo", "glucose", "sugar",
    "hemoglobin", "haemoglobin", "cholesterol", "creatinine",
    // schedule words
    "morning", "afternoon", "evening", "night", "noon", "bedtime", "daily", "day", "days",
    "week", "weeks", "weekly", "month", "months", "monthly", "once", "twice", "thrice",
    "times", "every", "hourly", "hours", "before", "after", "with", "food", "meal", "meals",
    "breakfast", "lunch", "dinner", "empty", "stomach", "take", "apply", "continue", "stop",
    "needed", "required",
    // dosage forms & units
    "tablet", "tablets", "tab", "tabs", "capsule", "capsules", "cap", "caps", "syrup", "syp",
    "injection", "inj", "drops", "drop", "cream", "ointment", "gel", "lotion", "inhaler",
    "sachet", "suspension", "solution", "mg", "mcg", "ml", "units", "unit",
];

/// Endings of international nonproprietary drug names.
const NAME_SUFFIXES: &[&str] = &[
    "cillin", "mycin", "micin", "azole", "statin", "pril", "sartan", "olol", "dipine",
    "floxacin", "cycline", "vir", "mab", "nib", "tidine", "azepam", "zolam", "oxetine",
    "triptan", "profen", "fenac", "sone", "olone", "lukast", "gliptin", "gliflozin",
    "formin", "semide", "thiazide", "parin", "xaban", "gatran", "dronate", "setron",
    "caine", "tadine", "phylline", "cetamol", "tropium", "terol", "sonide", "pramine",
    "peridone", "apine", "barbital", "glitazone", "lamide",
];

fn builtin_stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Word lists consulted by the validator and the strategies.
///
/// The built-in tables are shared process-wide; a lexicon only owns the
/// extras a [`ParserConfig`] adds on top of them.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    extra_stop_words: HashSet<String>,
    extra_suffixes: Vec<String>,
}

impl Lexicon {
    pub fn from_config(config: &ParserConfig) -> Self {
        let normalize = |w: &String| {
            let w = w.trim().to_lowercase();
            (!w.is_empty()).then_some(w)
        };
        Self {
            extra_stop_words: config.extra_stop_words.iter().filter_map(normalize).collect(),
            extra_suffixes: config.extra_name_suffixes.iter().filter_map(normalize).collect(),
        }
    }

    /// Case-insensitive membership in the stop-word set.
    pub fn is_stop_word(&self, word: &str) -> bool {
        let lower = word.trim().to_lowercase();
        builtin_stop_words().contains(lower.as_str()) || self.extra_stop_words.contains(&lower)
    }

    /// Whether `word` ends with a known drug-name suffix.
    pub fn has_name_suffix(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        NAME_SUFFIXES.iter().any(|s| lower.ends_with(s))
            || self.extra_suffixes.iter().any(|s| lower.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_case_insensitive() {
        let lex = Lexicon::default();
        assert!(lex.is_stop_word("Patient"));
        assert!(lex.is_stop_word("MORNING"));
        assert!(lex.is_stop_word(" tablet "));
        assert!(!lex.is_stop_word("Amoxicillin"));
    }

    #[test]
    fn suffixes_match_common_drug_classes() {
        let lex = Lexicon::default();
        for name in ["Amoxicillin", "Azithromycin", "Omeprazole", "Atorvastatin", "Ramipril",
                     "Atenolol", "Metformin", "Losartan"]
        {
            assert!(lex.has_name_suffix(name), "{name} should match");
        }
        assert!(!lex.has_name_suffix("Cetirizine"));
        assert!(!lex.has_name_suffix("Patient"));
    }

    #[test]
    fn config_extends_builtin_tables() {
        let config = ParserConfig {
            extra_stop_words: vec!["Apollo".into(), "  ".into()],
            extra_name_suffixes: vec!["IRIZINE".into()],
        };
        let lex = Lexicon::from_config(&config);
        assert!(lex.is_stop_word("apollo"));
        assert!(lex.is_stop_word("patient"));
        assert!(!lex.is_stop_word(""));
        assert!(lex.has_name_suffix("Cetirizine"));
        assert!(lex.has_name_suffix("Amoxicillin"));
    }
}
