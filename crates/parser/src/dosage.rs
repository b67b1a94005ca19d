/// Quantity followed by a unit: `500mg`, `2.5 ml`, `10 units`, `0.1%`.
///
/// Only the unit is case-insensitive, so callers can embed this in
/// case-sensitive patterns that look for capitalized names.
pub(crate) const DOSE: &str =
    r"\b\d+(?:\.\d+)?\s*(?i:(?:mcg|mg|ml|gm|g|iu|units?|drops?)\b|%)";

re!(re_dose, DOSE);
re!(re_dose_only, &format!(r"^{DOSE}$"));

/// First quantity+unit fragment in `text`, if any.
pub fn find_dosage(text: &str) -> Option<&str> {
    re_dose().find(text).map(|m| m.as_str().trim())
}

/// Whether `text` is nothing but a quantity+unit fragment.
pub fn is_dosage(text: &str) -> bool {
    re_dose_only().is_match(text.trim())
}

/// Byte span of the first quantity+unit fragment in `text`.
pub(crate) fn dosage_span(text: &str) -> Option<(usize, usize)> {
    re_dose().find(text).map(|m| (m.start(), m.end()))
}
