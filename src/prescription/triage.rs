//! Triage records and the conversion from their delimiter-joined fields to
//! an explicit list of prescription entries.

use serde::Deserialize;

use crate::config::{DEFAULT_DAYS, LIST_DELIMITER};

/// A patient's clinical decision as supplied by the patient data.
///
/// Drugs and day counts are `" / "`-joined and positionally aligned.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRecord {
    #[serde(default)]
    pub prescription_drugs: Option<String>,
    #[serde(default)]
    pub prescription_days: Option<String>,
}

impl TriageRecord {
    pub fn new(drugs: &str, days: &str) -> Self {
        Self {
            prescription_drugs: Some(drugs.to_string()),
            prescription_days: Some(days.to_string()),
        }
    }

    /// True when no drug was prescribed.
    pub fn has_no_prescription(&self) -> bool {
        self.prescription_drugs
            .as_deref()
            .map_or(true, |d| d.trim().is_empty())
    }
}

/// One prescribed drug (real name) and its day count.
#[derive(Clone, Debug, PartialEq)]
pub struct PrescriptionEntry {
    pub drug: String,
    pub days: String,
}

/// Split a triage record into ordered `(drug, days)` entries.
///
/// Day counts pair up by position; a missing or blank day count becomes
/// `DEFAULT_DAYS`. Blank drug slots are skipped without shifting the
/// pairing of later entries.
pub fn parse_prescription(triage: &TriageRecord) -> Vec<PrescriptionEntry> {
    if triage.has_no_prescription() {
        return Vec::new();
    }
    let drugs = triage.prescription_drugs.as_deref().unwrap_or_default();
    let days: Vec<&str> = triage
        .prescription_days
        .as_deref()
        .map(|d| d.split(LIST_DELIMITER).collect())
        .unwrap_or_default();

    drugs
        .split(LIST_DELIMITER)
        .enumerate()
        .filter(|(_, drug)| !drug.trim().is_empty())
        .map(|(i, drug)| {
            let day = days
                .get(i)
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .unwrap_or(DEFAULT_DAYS);
            PrescriptionEntry {
                drug: drug.trim().to_string(),
                days: day.to_string(),
            }
        })
        .collect()
}
