// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub mod aggregate;
pub mod canonicalize;
pub mod config;
pub mod dosage;
pub mod frequency;
pub mod lexicon;
pub mod parser;
pub mod strategy;
pub mod validate;

pub use aggregate::MedicineCollector;
pub use canonicalize::canonicalize_name;
pub use config::{ConfigError, ParserConfig};
pub use dosage::{find_dosage, is_dosage};
pub use frequency::resolve_frequency;
pub use lexicon::Lexicon;
pub use parser::{ExtractedMedicine, ParseReport, PrescriptionParser};
pub use strategy::{Candidate, Pass, StrategyKind, CASCADE};
pub use validate::is_valid_name;

pub use rxscan_core::{ParsedMedicine, UNSPECIFIED_DOSAGE};

/// Extract the medicines listed in raw OCR text using the built-in lexicon.
pub fn parse(text: &str) -> Vec<ParsedMedicine> {
    PrescriptionParser::default().parse(text)
}
