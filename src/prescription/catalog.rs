//! Static drug catalogs mapping real trade names to their in-game aliases.
//!
//! Both catalogs are loaded once from embedded JSON and searched linearly by
//! exact name. The western catalog always takes precedence over the herbal one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::error::DataError;

const WESTERN_JSON: &str = include_str!("../../data/medicines.json");
const HERBAL_JSON: &str = include_str!("../../data/herbal_medicines.json");

/// A western-medicine catalog entry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawMedicineRecord")]
pub struct MedicineRecord {
    pub real_trade_name: String,
    pub fake_trade_name: String,
    pub fake_generic_name: Option<String>,
    pub daily_dose: String,
    pub dosing_timing: String,
}

/// A herbal-medicine (kampo) catalog entry.
///
/// Herbal products are identified on screen by manufacturer and catalog
/// number (e.g. `ツモラ68`) unless they carry an explicit alias.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawHerbalMedicineRecord")]
pub struct HerbalMedicineRecord {
    pub real_trade_name: String,
    pub catalog_number: String,
    pub fake_manufacturer: String,
    pub fake_trade_name: Option<String>,
    pub fake_generic_name: Option<String>,
    pub daily_dose: String,
    pub dosing_timing: String,
}

/// Usage columns under every spelling the data files have used. When a
/// record carries several, the first non-empty one in declaration order wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUsage {
    #[serde(default)]
    daily_dose: Option<String>,
    #[serde(default)]
    daily_quantity: Option<String>,
    #[serde(default, rename = "1日量")]
    daily_dose_ja: Option<String>,
    #[serde(default)]
    dosing_timing: Option<String>,
    #[serde(default)]
    timing: Option<String>,
    #[serde(default, rename = "服用タイミング")]
    dosing_timing_ja: Option<String>,
}

impl RawUsage {
    fn daily_dose(&mut self) -> String {
        first_non_empty([
            self.daily_dose.take(),
            self.daily_quantity.take(),
            self.daily_dose_ja.take(),
        ])
    }

    fn dosing_timing(&mut self) -> String {
        first_non_empty([
            self.dosing_timing.take(),
            self.timing.take(),
            self.dosing_timing_ja.take(),
        ])
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMedicineRecord {
    real_trade_name: String,
    fake_trade_name: String,
    #[serde(default, deserialize_with = "non_empty")]
    fake_generic_name: Option<String>,
    #[serde(flatten)]
    usage: RawUsage,
}

impl From<RawMedicineRecord> for MedicineRecord {
    fn from(mut raw: RawMedicineRecord) -> Self {
        Self {
            daily_dose: raw.usage.daily_dose(),
            dosing_timing: raw.usage.dosing_timing(),
            real_trade_name: raw.real_trade_name,
            fake_trade_name: raw.fake_trade_name,
            fake_generic_name: raw.fake_generic_name,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHerbalMedicineRecord {
    real_trade_name: String,
    #[serde(deserialize_with = "string_or_number")]
    catalog_number: String,
    fake_manufacturer: String,
    #[serde(default, deserialize_with = "non_empty")]
    fake_trade_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    fake_generic_name: Option<String>,
    #[serde(flatten)]
    usage: RawUsage,
}

impl From<RawHerbalMedicineRecord> for HerbalMedicineRecord {
    fn from(mut raw: RawHerbalMedicineRecord) -> Self {
        Self {
            daily_dose: raw.usage.daily_dose(),
            dosing_timing: raw.usage.dosing_timing(),
            real_trade_name: raw.real_trade_name,
            catalog_number: raw.catalog_number,
            fake_manufacturer: raw.fake_manufacturer,
            fake_trade_name: raw.fake_trade_name,
            fake_generic_name: raw.fake_generic_name,
        }
    }
}

impl HerbalMedicineRecord {
    /// Manufacturer and catalog number joined without a separator.
    pub fn numbered_name(&self) -> String {
        format!("{}{}", self.fake_manufacturer, self.catalog_number)
    }
}

/// Anything keyed by a real trade name.
pub trait CatalogEntry {
    fn real_trade_name(&self) -> &str;
}

impl CatalogEntry for MedicineRecord {
    fn real_trade_name(&self) -> &str {
        &self.real_trade_name
    }
}

impl CatalogEntry for HerbalMedicineRecord {
    fn real_trade_name(&self) -> &str {
        &self.real_trade_name
    }
}

/// An immutable list of catalog entries with unique real trade names.
#[derive(Clone, Debug)]
pub struct Catalog<T> {
    records: Vec<T>,
}

pub type WesternCatalog = Catalog<MedicineRecord>;
pub type HerbalCatalog = Catalog<HerbalMedicineRecord>;

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// A catalog together with the records that could not be added to it.
#[derive(Debug)]
pub struct LoadedCatalog<T> {
    pub catalog: Catalog<T>,
    pub skipped: Vec<DataError>,
}

impl<T: CatalogEntry> Catalog<T> {
    /// Build a catalog. A record repeating an earlier real trade name is
    /// dropped and reported; the first one stays.
    pub fn from_records(records: Vec<T>) -> LoadedCatalog<T> {
        let mut kept: Vec<T> = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for record in records {
            let key = record.real_trade_name();
            if kept.iter().any(|r| r.real_trade_name() == key) {
                skipped.push(DataError::DuplicateKey(key.to_string()));
            } else {
                kept.push(record);
            }
        }
        LoadedCatalog {
            catalog: Self { records: kept },
            skipped,
        }
    }

    /// Exact-match lookup by real trade name.
    pub fn find(&self, real_name: &str) -> Option<&T> {
        self.records
            .iter()
            .find(|r| r.real_trade_name() == real_name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: CatalogEntry + DeserializeOwned> Catalog<T> {
    /// Parse a JSON array of records.
    ///
    /// Only a document that is not an array fails as a whole. Records that
    /// do not match the schema are skipped individually and reported.
    pub fn from_json(json: &str) -> Result<LoadedCatalog<T>, DataError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut records = Vec::with_capacity(values.len());
        let mut skipped = Vec::new();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(source) => skipped.push(DataError::InvalidRecord { index, source }),
            }
        }
        let mut loaded = Self::from_records(records);
        skipped.append(&mut loaded.skipped);
        loaded.skipped = skipped;
        Ok(loaded)
    }
}

/// A record from either catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MedicineInfo<'a> {
    Western(&'a MedicineRecord),
    Herbal(&'a HerbalMedicineRecord),
}

impl MedicineInfo<'_> {
    pub fn daily_dose(&self) -> &str {
        match self {
            MedicineInfo::Western(r) => &r.daily_dose,
            MedicineInfo::Herbal(r) => &r.daily_dose,
        }
    }

    pub fn dosing_timing(&self) -> &str {
        match self {
            MedicineInfo::Western(r) => &r.dosing_timing,
            MedicineInfo::Herbal(r) => &r.dosing_timing,
        }
    }
}

/// First-match lookup across both catalogs, western first.
pub fn lookup_medicine_info<'a>(
    real_name: &str,
    western: &'a WesternCatalog,
    herbal: &'a HerbalCatalog,
) -> Option<MedicineInfo<'a>> {
    if let Some(record) = western.find(real_name) {
        return Some(MedicineInfo::Western(record));
    }
    herbal.find(real_name).map(MedicineInfo::Herbal)
}

/// The pair of catalogs every formatter call needs.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    pub western: WesternCatalog,
    pub herbal: HerbalCatalog,
}

impl Catalogs {
    /// Load the catalogs bundled with the game.
    ///
    /// Broken records are skipped with a console warning. A file that is
    /// not a JSON array at all yields an empty catalog, and every lookup
    /// then falls back to the real name.
    pub fn embedded() -> Self {
        Self {
            western: load_or_empty("西洋薬", WESTERN_JSON),
            herbal: load_or_empty("漢方薬", HERBAL_JSON),
        }
    }

    pub fn lookup(&self, real_name: &str) -> Option<MedicineInfo<'_>> {
        lookup_medicine_info(real_name, &self.western, &self.herbal)
    }
}

fn load_or_empty<T: CatalogEntry + DeserializeOwned>(label: &str, json: &str) -> Catalog<T> {
    match Catalog::from_json(json) {
        Ok(loaded) => {
            for problem in &loaded.skipped {
                warn_catalog(label, problem);
            }
            loaded.catalog
        }
        Err(e) => {
            warn_catalog(label, &e);
            Catalog::default()
        }
    }
}

fn warn_catalog(label: &str, problem: &DataError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(
        &format!("Hospital Reception: {label}カタログ: {problem}").into(),
    );
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (label, problem);
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
