//! Drug-name obfuscation and prescription formatting.
//!
//! Three name-resolution strategies exist because the karte and the
//! prescription slip deliberately disagree on how herbal products are named:
//!
//! | strategy      | western hit           | herbal hit                                   |
//! |---------------|-----------------------|----------------------------------------------|
//! | `TradeName`   | fake trade name       | fake trade name, else manufacturer+number    |
//! | `GeneralName` | generic, else trade   | generic, else trade, else manufacturer+number |
//! | `Karte`       | fake trade name       | manufacturer+number, always                  |
//!
//! On a miss in both catalogs the real name passes through unchanged unless a
//! stricter [`MissPolicy`] is selected.

use super::catalog::{
    lookup_medicine_info, Catalogs, HerbalCatalog, MedicineInfo, WesternCatalog,
};
use super::triage::{parse_prescription, TriageRecord};
use crate::config::{MASKED_NAME, NO_PRESCRIPTION};

/// Which alias a rendering surface shows for a drug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameStrategy {
    /// Prescription slip.
    TradeName,
    /// Generic-name listing.
    GeneralName,
    /// Karte panel.
    Karte,
}

/// What to show when a drug is in neither catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissPolicy {
    /// Show the real name as-is.
    #[default]
    Passthrough,
    /// Show the real name and report the leak.
    Warn,
    /// Show a fixed mask instead of the real name.
    Mask,
}

impl MissPolicy {
    pub const ALL: [MissPolicy; 3] = [MissPolicy::Passthrough, MissPolicy::Warn, MissPolicy::Mask];

    pub fn label(self) -> &'static str {
        match self {
            MissPolicy::Passthrough => "そのまま表示",
            MissPolicy::Warn => "表示して警告",
            MissPolicy::Mask => "伏せ字にする",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MissPolicy::Passthrough => MissPolicy::Warn,
            MissPolicy::Warn => MissPolicy::Mask,
            MissPolicy::Mask => MissPolicy::Passthrough,
        }
    }
}

/// One display-ready prescription row.
#[derive(Clone, Debug, PartialEq)]
pub struct PrescriptionLine {
    pub display_name: String,
    pub dosage: String,
    pub timing: String,
    pub days: String,
    /// The drug matched no catalog, so `display_name` is the real name
    /// (or the mask under `MissPolicy::Mask`).
    pub leaked: bool,
}

fn resolve_alias(strategy: NameStrategy, info: MedicineInfo<'_>) -> String {
    match (strategy, info) {
        (NameStrategy::TradeName | NameStrategy::Karte, MedicineInfo::Western(r)) => {
            r.fake_trade_name.clone()
        }
        (NameStrategy::GeneralName, MedicineInfo::Western(r)) => r
            .fake_generic_name
            .clone()
            .unwrap_or_else(|| r.fake_trade_name.clone()),
        (NameStrategy::TradeName, MedicineInfo::Herbal(r)) => r
            .fake_trade_name
            .clone()
            .unwrap_or_else(|| r.numbered_name()),
        (NameStrategy::GeneralName, MedicineInfo::Herbal(r)) => r
            .fake_generic_name
            .clone()
            .or_else(|| r.fake_trade_name.clone())
            .unwrap_or_else(|| r.numbered_name()),
        (NameStrategy::Karte, MedicineInfo::Herbal(r)) => r.numbered_name(),
    }
}

fn resolve_or_real(
    strategy: NameStrategy,
    real_name: &str,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
) -> String {
    lookup_medicine_info(real_name, western, herbal)
        .map(|info| resolve_alias(strategy, info))
        .unwrap_or_else(|| real_name.to_string())
}

/// Fake trade name for a real drug name; the real name on a miss.
pub fn resolve_fake_trade_name(
    real_name: &str,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
) -> String {
    resolve_or_real(NameStrategy::TradeName, real_name, western, herbal)
}

/// Fake generic name, falling back through trade name and
/// manufacturer+number to the real name.
pub fn resolve_fake_general_name(
    real_name: &str,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
) -> String {
    resolve_or_real(NameStrategy::GeneralName, real_name, western, herbal)
}

/// Name shown on the karte. Herbal products always use manufacturer+number.
pub fn resolve_karte_display_name(
    real_name: &str,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
) -> String {
    resolve_or_real(NameStrategy::Karte, real_name, western, herbal)
}

/// Render a whole prescription as the slip text block.
///
/// Returns `NO_PRESCRIPTION` when nothing was prescribed.
pub fn format_prescription_block(
    triage: &TriageRecord,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
) -> String {
    let lines = build_lines(
        triage,
        western,
        herbal,
        NameStrategy::TradeName,
        MissPolicy::Passthrough,
    );
    render_block(&lines)
}

fn build_lines(
    triage: &TriageRecord,
    western: &WesternCatalog,
    herbal: &HerbalCatalog,
    strategy: NameStrategy,
    miss_policy: MissPolicy,
) -> Vec<PrescriptionLine> {
    parse_prescription(triage)
        .into_iter()
        .map(|entry| match lookup_medicine_info(&entry.drug, western, herbal) {
            Some(info) => PrescriptionLine {
                display_name: resolve_alias(strategy, info),
                dosage: info.daily_dose().to_string(),
                timing: info.dosing_timing().to_string(),
                days: entry.days,
                leaked: false,
            },
            None => {
                let display_name = match miss_policy {
                    MissPolicy::Mask => MASKED_NAME.to_string(),
                    MissPolicy::Passthrough | MissPolicy::Warn => entry.drug,
                };
                PrescriptionLine {
                    display_name,
                    dosage: String::new(),
                    timing: String::new(),
                    days: entry.days,
                    leaked: true,
                }
            }
        })
        .collect()
}

fn render_block(lines: &[PrescriptionLine]) -> String {
    if lines.is_empty() {
        return NO_PRESCRIPTION.to_string();
    }
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| render_entry(i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One numbered, multi-line slip entry.
fn render_entry(number: usize, line: &PrescriptionLine) -> String {
    let mut out = format!("{}) {}", number, line.display_name);
    let usage: Vec<&str> = [line.dosage.as_str(), line.timing.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !usage.is_empty() {
        out.push_str("\n   ");
        out.push_str(&usage.join("  "));
    }
    out.push_str(&format!("\n   {}日分", line.days));
    out
}

/// Catalogs plus the strategy and miss policy of one rendering surface.
pub struct Formatter<'a> {
    catalogs: &'a Catalogs,
    strategy: NameStrategy,
    miss_policy: MissPolicy,
}

impl<'a> Formatter<'a> {
    pub fn new(catalogs: &'a Catalogs, strategy: NameStrategy) -> Self {
        Self {
            catalogs,
            strategy,
            miss_policy: MissPolicy::default(),
        }
    }

    pub fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    /// Display name for a single drug under this surface's rules.
    pub fn display_name(&self, real_name: &str) -> String {
        match self.catalogs.lookup(real_name) {
            Some(info) => resolve_alias(self.strategy, info),
            None if self.miss_policy == MissPolicy::Mask => MASKED_NAME.to_string(),
            None => real_name.to_string(),
        }
    }

    pub fn lines(&self, triage: &TriageRecord) -> Vec<PrescriptionLine> {
        build_lines(
            triage,
            &self.catalogs.western,
            &self.catalogs.herbal,
            self.strategy,
            self.miss_policy,
        )
    }

    pub fn block(&self, triage: &TriageRecord) -> String {
        render_block(&self.lines(triage))
    }
}
