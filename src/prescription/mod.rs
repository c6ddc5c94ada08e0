//! Prescription formatting: catalog lookups, triage parsing and drug-name
//! obfuscation shared by every screen that shows medication.
//!
//! All operations are pure and never fail. A drug missing from both catalogs
//! degrades to its real name (or the mask, depending on [`MissPolicy`]).

pub mod catalog;
pub mod error;
pub mod formatter;
pub mod triage;

pub use catalog::{lookup_medicine_info, Catalog, Catalogs, LoadedCatalog, MedicineInfo};
pub use error::DataError;
pub use formatter::{
    format_prescription_block, resolve_fake_general_name, resolve_fake_trade_name,
    resolve_karte_display_name, Formatter, MissPolicy, NameStrategy, PrescriptionLine,
};
pub use triage::{parse_prescription, PrescriptionEntry, TriageRecord};
