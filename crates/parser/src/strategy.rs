use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonicalize::{strip_form_prefix, FORM_MARKER};
use crate::dosage::{dosage_span, find_dosage, is_dosage, DOSE};
use crate::frequency::{is_schedule_token, mentions_schedule};
use crate::lexicon::Lexicon;

re!(re_form_line, &format!(r"(?i)^{FORM_MARKER}\s*(?P<body>.+)$"));
re!(re_numbered_line, r"^\d+\s*[.)]\s*(?P<body>.+)$");
re!(
    re_dosage_line,
    &format!(
        r"\b(?P<name>[A-Z][A-Za-z\-]+(?:[ \t]+[A-Z][A-Za-z0-9\-]*)?)[ \t]*(?P<dose>{DOSE})"
    )
);
re!(re_column_gap, r"\s{3,}|\t|\|");
re!(re_sweep, &format!(r"\b(?P<name>[A-Z][A-Za-z]{{2,}})\s*(?P<dose>{DOSE})"));
re!(re_token, r"\S+");

pub const BARE_NAME_MIN_LEN: usize = 4;

/// Raw `(name, dosage, schedule)` triple produced by a strategy, before
/// canonicalization and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub dosage: Option<String>,
    pub schedule: String,
}

impl Candidate {
    fn new(name: &str, dosage: Option<&str>, schedule: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            dosage: dosage.map(|d| d.trim().to_string()),
            schedule: schedule.trim().to_string(),
        }
    }
}

/// The independent pattern matchers, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// `Tab. Amoxicillin 500mg BD`
    StructuredPrefix,
    /// `1. Metformin 500mg 1-0-1`
    NumberedList,
    /// `Paracetamol 650mg after food`
    DosageLine,
    /// `Azithromycin     500mg     OD`
    TableRow,
    /// Any `Name 500mg` anywhere in the text.
    FallbackSweep,
    /// A line led by a word with a drug-name suffix.
    BareName,
}

/// One step of the cascade: a group of strategies applied to every line in
/// turn, or a single strategy applied to the whole text.
#[derive(Debug, Clone, Copy)]
pub enum Pass {
    Lines(&'static [StrategyKind]),
    Text(StrategyKind),
}

pub const CASCADE: &[Pass] = &[
    Pass::Lines(&[
        StrategyKind::StructuredPrefix,
        StrategyKind::NumberedList,
        StrategyKind::DosageLine,
        StrategyKind::TableRow,
    ]),
    Pass::Text(StrategyKind::FallbackSweep),
    Pass::Lines(&[StrategyKind::BareName]),
];

impl StrategyKind {
    /// How much a hit from this strategy is trusted (0.0–1.0).
    pub fn confidence(self) -> f32 {
        match self {
            StrategyKind::StructuredPrefix => 0.90,
            StrategyKind::NumberedList => 0.85,
            StrategyKind::DosageLine => 0.75,
            StrategyKind::TableRow => 0.70,
            StrategyKind::BareName => 0.60,
            StrategyKind::FallbackSweep => 0.50,
        }
    }

    /// Run this strategy over `input`: one trimmed line, or the whole text
    /// for [`StrategyKind::FallbackSweep`].
    pub fn extract(self, input: &str, lexicon: &Lexicon) -> Vec<Candidate> {
        match self {
            StrategyKind::StructuredPrefix => structured_prefix(input, lexicon),
            StrategyKind::NumberedList => numbered_list(input, lexicon),
            StrategyKind::DosageLine => dosage_line(input, lexicon),
            StrategyKind::TableRow => table_row(input),
            StrategyKind::FallbackSweep => fallback_sweep(input),
            StrategyKind::BareName => bare_name(input, lexicon),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::StructuredPrefix => write!(f, "structured_prefix"),
            StrategyKind::NumberedList => write!(f, "numbered_list"),
            StrategyKind::DosageLine => write!(f, "dosage_line"),
            StrategyKind::TableRow => write!(f, "table_row"),
            StrategyKind::FallbackSweep => write!(f, "fallback_sweep"),
            StrategyKind::BareName => write!(f, "bare_name"),
        }
    }
}

// ── Entry splitting ───────────────────────────────────────────────────────────

/// The first token of a name may be lowercase OCR output; later tokens must
/// be capitalized (`Augmentin Duo`, `Vitamin D3`), so instructions such as
/// `as needed` or `for 5 days` stay out of the name.
fn is_name_token(token: &str, first: bool, lexicon: &Lexicon) -> bool {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    let led_ok = if first {
        token.starts_with(char::is_alphabetic)
    } else {
        token.starts_with(char::is_uppercase)
    };
    led_ok && !lexicon.is_stop_word(word) && !is_schedule_token(word)
}

/// Split `name [dose] [schedule]` into its parts.
///
/// The name is the leading run of word tokens; the dose is the first
/// quantity+unit after it; whatever follows the dose (or the name, when
/// there is no dose) is the schedule.
fn split_entry(body: &str, lexicon: &Lexicon) -> Candidate {
    let name_end = re_token()
        .find_iter(body)
        .enumerate()
        .take_while(|(i, t)| is_name_token(t.as_str(), *i == 0, lexicon))
        .map(|(_, t)| t)
        .last()
        .map_or(0, |t| t.end());
    let name = &body[..name_end];
    let rest = &body[name_end..];

    match dosage_span(rest) {
        Some((start, end)) => Candidate::new(name, Some(&rest[start..end]), &rest[end..]),
        None => Candidate::new(name, None, rest),
    }
}

// ── Line strategies ───────────────────────────────────────────────────────────

fn structured_prefix(line: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    re_form_line()
        .captures(line)
        .and_then(|c| c.name("body"))
        .map(|body| split_entry(body.as_str(), lexicon))
        .into_iter()
        .collect()
}

fn numbered_list(line: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    re_numbered_line()
        .captures(line)
        .and_then(|c| c.name("body"))
        .map(|body| split_entry(strip_form_prefix(body.as_str()), lexicon))
        .into_iter()
        .collect()
}

fn dosage_line(line: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    re_dosage_line()
        .captures_iter(line)
        .filter_map(|c| {
            let name = c.name("name")?;
            let dose = c.name("dose")?;
            // "Take Paracetamol 650mg": drop a leading stop-word token.
            let name = match name.as_str().split_once(char::is_whitespace) {
                Some((first, second)) if lexicon.is_stop_word(first) => second,
                _ => name.as_str(),
            };
            Some(Candidate::new(name, Some(dose.as_str()), &line[dose.end()..]))
        })
        .collect()
}

fn table_row(line: &str) -> Vec<Candidate> {
    if !re_column_gap().is_match(line) {
        return vec![];
    }
    let cells: Vec<&str> = re_column_gap()
        .split(line)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if cells.len() < 2 {
        return vec![];
    }

    let mut out = Vec::new();
    for (i, cell) in cells.iter().enumerate() {
        if is_dosage(cell) || mentions_schedule(cell) {
            continue;
        }
        let dose_cell = cells
            .iter()
            .enumerate()
            .find(|&(j, c)| j != i && find_dosage(c).is_some())
            .map(|(j, _)| j);
        let dosage = find_dosage(cell).or_else(|| dose_cell.and_then(|j| find_dosage(cells[j])));
        let schedule = cells
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i && Some(j) != dose_cell)
            .map(|(_, c)| *c)
            .collect::<Vec<_>>()
            .join(" ");
        out.push(Candidate::new(cell, dosage, &schedule));
    }
    out
}

fn bare_name(line: &str, lexicon: &Lexicon) -> Vec<Candidate> {
    let Some(first) = re_token().find(line) else {
        return vec![];
    };
    let word = first.as_str().trim_end_matches(|c: char| !c.is_alphanumeric());
    let qualifies = word.starts_with(|c: char| c.is_uppercase())
        && word.chars().count() >= BARE_NAME_MIN_LEN
        && lexicon.has_name_suffix(word)
        && !lexicon.is_stop_word(word);
    if !qualifies {
        return vec![];
    }
    let rest = &line[first.end()..];
    vec![Candidate::new(word, find_dosage(rest), rest)]
}

// ── Whole-text strategy ───────────────────────────────────────────────────────

fn fallback_sweep(text: &str) -> Vec<Candidate> {
    re_sweep()
        .captures_iter(text)
        .filter_map(|c| {
            let name = c.name("name")?;
            let dose = c.name("dose")?;
            Some(Candidate::new(name.as_str(), Some(dose.as_str()), ""))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kind: StrategyKind, input: &str) -> Vec<Candidate> {
        kind.extract(input, &Lexicon::default())
    }

    fn cand(name: &str, dosage: Option<&str>, schedule: &str) -> Candidate {
        Candidate::new(name, dosage, schedule)
    }

    // ── Structured prefix ─────────────────────────────────────────────────────

    #[test]
    fn structured_prefix_full_entry() {
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Tab. Amoxicillin 500mg BD"),
            vec![cand("Amoxicillin", Some("500mg"), "BD")]
        );
    }

    #[test]
    fn structured_prefix_spelled_out_form() {
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Capsule Omeprazole 20 mg before breakfast"),
            vec![cand("Omeprazole", Some("20 mg"), "before breakfast")]
        );
    }

    #[test]
    fn structured_prefix_without_dose() {
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Syp. Ambroxol TDS"),
            vec![cand("Ambroxol", None, "TDS")]
        );
    }

    #[test]
    fn structured_prefix_keeps_multi_word_names() {
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Tab Augmentin Duo 625mg 1-0-1"),
            vec![cand("Augmentin Duo", Some("625mg"), "1-0-1")]
        );
    }

    #[test]
    fn structured_prefix_name_stops_at_instructions() {
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Tab. Paracetamol as needed"),
            vec![cand("Paracetamol", None, "as needed")]
        );
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Tab. Amoxicillin for 5 days"),
            vec![cand("Amoxicillin", None, "for 5 days")]
        );
        assert_eq!(
            run(StrategyKind::StructuredPrefix, "Tab. pantoprazole before breakfast"),
            vec![cand("pantoprazole", None, "before breakfast")]
        );
    }

    #[test]
    fn structured_prefix_ignores_other_lines() {
        assert!(run(StrategyKind::StructuredPrefix, "Capecitabine 500mg").is_empty());
        assert!(run(StrategyKind::StructuredPrefix, "1. Metformin 500mg").is_empty());
    }

    // ── Numbered list ─────────────────────────────────────────────────────────

    #[test]
    fn numbered_list_entry() {
        assert_eq!(
            run(StrategyKind::NumberedList, "1. Metformin 500mg 1-0-1"),
            vec![cand("Metformin", Some("500mg"), "1-0-1")]
        );
    }

    #[test]
    fn numbered_list_with_form_marker() {
        assert_eq!(
            run(StrategyKind::NumberedList, "2) Tab. Pantoprazole 40mg OD"),
            vec![cand("Pantoprazole", Some("40mg"), "OD")]
        );
    }

    #[test]
    fn numbered_list_requires_ordinal() {
        assert!(run(StrategyKind::NumberedList, "Metformin 500mg").is_empty());
    }

    // ── Dosage line ───────────────────────────────────────────────────────────

    #[test]
    fn dosage_line_takes_rest_as_schedule() {
        assert_eq!(
            run(StrategyKind::DosageLine, "Paracetamol 650mg twice daily"),
            vec![cand("Paracetamol", Some("650mg"), "twice daily")]
        );
    }

    #[test]
    fn dosage_line_two_token_name() {
        assert_eq!(
            run(StrategyKind::DosageLine, "Vitamin D3 60000 IU weekly"),
            vec![cand("Vitamin D3", Some("60000 IU"), "weekly")]
        );
    }

    #[test]
    fn dosage_line_drops_leading_stop_word() {
        assert_eq!(
            run(StrategyKind::DosageLine, "Take Paracetamol 650mg SOS"),
            vec![cand("Paracetamol", Some("650mg"), "SOS")]
        );
    }

    #[test]
    fn dosage_line_needs_capitalized_name() {
        assert!(run(StrategyKind::DosageLine, "paracetamol 650mg").is_empty());
        assert!(run(StrategyKind::DosageLine, "Paracetamol after food").is_empty());
    }

    // ── Table row ─────────────────────────────────────────────────────────────

    #[test]
    fn table_row_space_separated() {
        assert_eq!(
            run(StrategyKind::TableRow, "Azithromycin     500mg     OD"),
            vec![cand("Azithromycin", Some("500mg"), "OD")]
        );
    }

    #[test]
    fn table_row_pipe_and_tab_separated() {
        assert_eq!(
            run(StrategyKind::TableRow, "Cefixime | 200 mg | BD | 5 days"),
            vec![cand("Cefixime", Some("200 mg"), "BD 5 days")]
        );
        assert_eq!(
            run(StrategyKind::TableRow, "Montelukast\t10mg\tHS"),
            vec![cand("Montelukast", Some("10mg"), "HS")]
        );
    }

    #[test]
    fn table_row_dose_inside_name_cell() {
        assert_eq!(
            run(StrategyKind::TableRow, "Tab. Cetirizine 10mg   at night"),
            vec![cand("Tab. Cetirizine 10mg", Some("10mg"), "at night")]
        );
    }

    #[test]
    fn table_row_skips_schedule_and_header_cells() {
        assert_eq!(
            run(StrategyKind::TableRow, "Levocetirizine | 5mg | In the morning"),
            vec![cand("Levocetirizine", Some("5mg"), "In the morning")]
        );
        assert_eq!(
            run(StrategyKind::TableRow, "Aspirin     75mg     daily"),
            vec![cand("Aspirin", Some("75mg"), "daily")]
        );
    }

    #[test]
    fn table_row_needs_column_gaps() {
        assert!(run(StrategyKind::TableRow, "Azithromycin 500mg OD").is_empty());
        assert!(run(StrategyKind::TableRow, "Azithromycin     ").is_empty());
    }

    // ── Fallback sweep ────────────────────────────────────────────────────────

    #[test]
    fn fallback_sweep_scans_whole_text() {
        let text = "Rx: Dolo 650mg, Pantocid 40 mg\nLevocet\n5mg";
        assert_eq!(
            run(StrategyKind::FallbackSweep, text),
            vec![
                cand("Dolo", Some("650mg"), ""),
                cand("Pantocid", Some("40 mg"), ""),
                cand("Levocet", Some("5mg"), ""),
            ]
        );
    }

    // ── Bare name ─────────────────────────────────────────────────────────────

    #[test]
    fn bare_name_with_suffix() {
        assert_eq!(
            run(StrategyKind::BareName, "Atorvastatin at bedtime"),
            vec![cand("Atorvastatin", None, "at bedtime")]
        );
        assert_eq!(
            run(StrategyKind::BareName, "Losartan: 50mg, once daily"),
            vec![cand("Losartan", Some("50mg"), "50mg, once daily")]
        );
    }

    #[test]
    fn bare_name_rejects_non_matching_words() {
        assert!(run(StrategyKind::BareName, "atorvastatin at bedtime").is_empty());
        assert!(run(StrategyKind::BareName, "Patient John Doe").is_empty());
        assert!(run(StrategyKind::BareName, "Dolo 650").is_empty());
        assert!(run(StrategyKind::BareName, "").is_empty());
    }

    #[test]
    fn cascade_order_is_fixed() {
        let order: Vec<StrategyKind> = CASCADE
            .iter()
            .flat_map(|pass| match pass {
                Pass::Lines(kinds) => kinds.to_vec(),
                Pass::Text(kind) => vec![*kind],
            })
            .collect();
        assert_eq!(
            order,
            vec![
                StrategyKind::StructuredPrefix,
                StrategyKind::NumberedList,
                StrategyKind::DosageLine,
                StrategyKind::TableRow,
                StrategyKind::FallbackSweep,
                StrategyKind::BareName,
            ]
        );
    }

    #[test]
    fn strategy_kind_display_matches_serde() {
        for kind in [StrategyKind::StructuredPrefix, StrategyKind::FallbackSweep] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
