use std::collections::HashSet;

use crate::parser::ExtractedMedicine;

/// Keeps the first entry seen for each case-insensitive name, in discovery
/// order. Later hits for the same name are dropped even if they carry better
/// dosage or frequency data.
#[derive(Debug, Default)]
pub struct MedicineCollector {
    seen: HashSet<String>,
    entries: Vec<ExtractedMedicine>,
}

impl MedicineCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the entry was kept, `false` if its name was already
    /// taken.
    pub fn offer(&mut self, entry: ExtractedMedicine) -> bool {
        if !self.seen.insert(entry.medicine.key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ExtractedMedicine> {
        self.entries
    }
}
