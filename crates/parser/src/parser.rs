use rxscan_core::ParsedMedicine;
use serde::{Deserialize, Serialize};

use crate::aggregate::MedicineCollector;
use crate::canonicalize::canonicalize_name;
use crate::config::ParserConfig;
use crate::frequency::resolve_frequency;
use crate::lexicon::Lexicon;
use crate::strategy::{Candidate, Pass, StrategyKind, CASCADE};
use crate::validate::is_valid_name;

/// Entries below this confidence should be looked at before they are saved.
pub const REVIEW_THRESHOLD: f32 = 0.7;

/// A medicine together with the strategy that found it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMedicine {
    pub medicine: ParsedMedicine,
    pub source: StrategyKind,
    /// Confidence in this extraction (0.0 = guessed, 1.0 = certain).
    pub confidence: f32,
}

impl ExtractedMedicine {
    pub fn new(medicine: ParsedMedicine, source: StrategyKind) -> Self {
        Self { medicine, source, confidence: source.confidence() }
    }
}

/// Everything one parse run produced, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    pub entries: Vec<ExtractedMedicine>,
}

impl ParseReport {
    pub fn medicines(&self) -> Vec<ParsedMedicine> {
        self.entries.iter().map(|e| e.medicine.clone()).collect()
    }

    pub fn into_medicines(self) -> Vec<ParsedMedicine> {
        self.entries.into_iter().map(|e| e.medicine).collect()
    }

    /// Whether a human should check the result before it is used.
    pub fn needs_review(&self) -> bool {
        self.entries.is_empty() || self.entries.iter().any(|e| e.confidence < REVIEW_THRESHOLD)
    }
}

/// Recovers medicine entries from noisy prescription text.
#[derive(Debug, Clone, Default)]
pub struct PrescriptionParser {
    lexicon: Lexicon,
}

impl PrescriptionParser {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(Lexicon::from_config(config))
    }

    /// Ordered, de-duplicated medicines found in `text`.
    pub fn parse(&self, text: &str) -> Vec<ParsedMedicine> {
        self.parse_report(text).into_medicines()
    }

    /// Like [`parse`](Self::parse), but keeps which strategy produced each entry.
    pub fn parse_report(&self, text: &str) -> ParseReport {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let mut collector = MedicineCollector::new();

        for pass in CASCADE {
            match *pass {
                Pass::Lines(kinds) => {
                    for line in &lines {
                        for &kind in kinds {
                            self.admit(kind, kind.extract(line, &self.lexicon), &mut collector);
                        }
                    }
                }
                Pass::Text(kind) => {
                    self.admit(kind, kind.extract(text, &self.lexicon), &mut collector);
                }
            }
        }

        tracing::debug!(lines = lines.len(), found = collector.len(), "prescription parsed");
        ParseReport { entries: collector.into_entries() }
    }

    fn admit(&self, source: StrategyKind, candidates: Vec<Candidate>, out: &mut MedicineCollector) {
        for candidate in candidates {
            let name = canonicalize_name(&candidate.name);
            if !is_valid_name(&name, &self.lexicon) {
                tracing::trace!(raw = %candidate.name, strategy = %source, "candidate rejected");
                continue;
            }
            let frequency = resolve_frequency(&candidate.schedule);
            let medicine = ParsedMedicine::new(name, candidate.dosage.as_deref(), frequency);
            let label = medicine.name.clone();
            if out.offer(ExtractedMedicine::new(medicine, source)) {
                tracing::debug!(name = %label, strategy = %source, "medicine found");
            } else {
                tracing::trace!(name = %label, strategy = %source, "duplicate dropped");
            }
        }
    }
}
