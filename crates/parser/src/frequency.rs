/// Schedule shorthand and the doses per day it implies.
///
/// Checked top to bottom, first hit wins. Ordered from most to fewest doses
/// so that a longer pattern like `1-1-1-1` is seen before `1-1-1`.
const FREQUENCY_KEYWORDS: &[(&str, u8)] = &[
    ("qid", 4),
    ("qds", 4),
    ("1-1-1-1", 4),
    ("four times", 4),
    ("tds", 3),
    ("tid", 3),
    ("thrice", 3),
    ("1-1-1", 3),
    ("three times", 3),
    ("bd", 2),
    ("bid", 2),
    ("twice", 2),
    ("1-0-1", 2),
    ("1-1-0", 2),
    ("0-1-1", 2),
    ("two times", 2),
    ("od", 1),
    ("once", 1),
    ("qd", 1),
    ("1-0-0", 1),
    ("0-1-0", 1),
    ("0-0-1", 1),
    ("sos", 1),
    ("prn", 1),
    ("stat", 1),
    ("hs", 1),
];

pub const DEFAULT_FREQUENCY: u8 = 1;

/// Time-of-day and period words that mark a schedule without fixing a count.
const SCHEDULE_WORDS: &[&str] = &[
    "morning", "afternoon", "evening", "night", "noon", "bedtime", "daily", "day", "days",
    "weekly", "hourly",
];

re!(re_hyphen_gap, r"\s*-\s*");
re!(re_whitespace, r"\s+");

/// Lowercase, close up `1 - 0 - 1` style gaps, collapse whitespace.
fn normalize(fragment: &str) -> String {
    let lower = fragment.to_lowercase();
    let joined = re_hyphen_gap().replace_all(&lower, "-");
    re_whitespace().replace_all(joined.trim(), " ").into_owned()
}

/// `needle` occurs in `haystack` without alphanumerics on either side.
fn contains_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

fn keyword_lookup(normalized: &str) -> Option<u8> {
    FREQUENCY_KEYWORDS
        .iter()
        .find(|(kw, _)| contains_token(normalized, kw))
        .map(|&(_, n)| n)
}

/// Doses per day described by a free-text schedule fragment.
///
/// Never fails: anything unrecognized is read as once daily.
pub fn resolve_frequency(fragment: &str) -> u8 {
    let text = normalize(fragment);
    if text.is_empty() {
        return DEFAULT_FREQUENCY;
    }
    if let Some(n) = keyword_lookup(&text) {
        return n;
    }
    if text.contains("morning") && text.contains("night") {
        2
    } else if text.contains("twice") {
        2
    } else if text.contains("thrice") {
        3
    } else {
        // "daily", "a day" and everything else land on once a day.
        DEFAULT_FREQUENCY
    }
}

/// Whether the fragment reads as a schedule: shorthand from the keyword
/// table, or a time-of-day / period word.
pub(crate) fn mentions_schedule(fragment: &str) -> bool {
    let text = normalize(fragment);
    keyword_lookup(&text).is_some() || SCHEDULE_WORDS.iter().any(|w| contains_token(&text, w))
}

/// Whether a single token is itself a schedule keyword (`OD`, `1-0-1`, …).
pub(crate) fn is_schedule_token(token: &str) -> bool {
    let token = token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    FREQUENCY_KEYWORDS.iter().any(|(kw, _)| *kw == token)
}
