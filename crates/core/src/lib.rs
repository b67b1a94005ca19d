pub mod medicine;

pub use medicine::{
    ParsedMedicine, DEFAULT_SUPPLY_DAYS, MAX_DOSES_PER_DAY, MIN_DOSES_PER_DAY, UNSPECIFIED_DOSAGE,
};
