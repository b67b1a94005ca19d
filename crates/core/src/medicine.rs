use serde::{Deserialize, Serialize};
use std::fmt;

/// Dosage reported when no quantity+unit could be matched for a medicine.
pub const UNSPECIFIED_DOSAGE: &str = "As directed";

/// Length of the supply window the review screen suggests by default.
pub const DEFAULT_SUPPLY_DAYS: u32 = 30;

pub const MIN_DOSES_PER_DAY: u8 = 1;
pub const MAX_DOSES_PER_DAY: u8 = 4;

/// One medicine entry recovered from a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMedicine {
    pub name: String,
    pub dosage: String,
    pub frequency_per_day: u8,
}

impl ParsedMedicine {
    /// Builds an entry, clamping the frequency into 1..=4 and substituting
    /// [`UNSPECIFIED_DOSAGE`] for a missing dosage.
    pub fn new(name: impl Into<String>, dosage: Option<&str>, frequency_per_day: u8) -> Self {
        let dosage = dosage
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNSPECIFIED_DOSAGE);
        Self {
            name: name.into(),
            dosage: dosage.to_string(),
            frequency_per_day: frequency_per_day.clamp(MIN_DOSES_PER_DAY, MAX_DOSES_PER_DAY),
        }
    }

    /// Whether a real quantity+unit was found for this entry.
    pub fn has_dosage(&self) -> bool {
        self.dosage != UNSPECIFIED_DOSAGE
    }

    /// Case-insensitive key used to tell entries apart.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Number of units needed to cover `days` of treatment, saturating at
    /// `u32::MAX`.
    pub fn supply_quantity(&self, days: u32) -> u32 {
        u32::from(self.frequency_per_day).saturating_mul(days)
    }
}

impl fmt::Display for ParsedMedicine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({}x/day)", self.name, self.dosage, self.frequency_per_day)
    }
}
