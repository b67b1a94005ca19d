use crate::dosage::DOSE;

/// Dosage-form words a prescription line may open with.
pub(crate) const FORM_MARKER: &str =
    r"(?:tablets?|tabs?|capsules?|caps?|syrup|syp|injection|inj)\b\.?";

re!(re_ordinal, r"^\d+\s*[.)]\s*");
re!(re_form_prefix, &format!(r"(?i)^{FORM_MARKER}\s*"));
re!(re_trailing_dose, &format!(r"\s*{DOSE}.*$"));
re!(re_trailing_punct, r"[\s,:;.\-]+$");
re!(re_whitespace, r"\s+");

/// Remove a leading dosage-form word (`Tab.`, `capsule`, `INJ`, …).
pub(crate) fn strip_form_prefix(text: &str) -> &str {
    match re_form_prefix().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Reduce a raw candidate to the bare medicine name.
///
/// Leading list numbering and dosage-form words go first, then the first
/// quantity+unit and everything after it, then trailing punctuation.
/// Whitespace runs collapse to a single space.
pub fn canonicalize_name(raw: &str) -> String {
    let mut name = raw.trim();
    loop {
        let before = name.len();
        if let Some(m) = re_ordinal().find(name) {
            name = &name[m.end()..];
        }
        name = strip_form_prefix(name);
        if name.len() == before {
            break;
        }
    }

    let name = re_trailing_dose().replace(name, "");
    let name = re_trailing_punct().replace(&name, "");
    re_whitespace().replace_all(name.trim(), " ").into_owned()
}
