//! Reception desk state: the patient queue and what the player is looking at.

use std::collections::HashSet;

use serde::Deserialize;

use hospital_reception::config::LOG_CAPACITY;
use hospital_reception::prescription::{Catalogs, DataError, MissPolicy, TriageRecord};

const PATIENTS_JSON: &str = include_str!("../../../data/patients.json");

/// A patient waiting at reception.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub complaint: String,
    pub diagnosis: String,
    #[serde(default)]
    pub triage: TriageRecord,
}

pub fn load_patients(json: &str) -> Result<Vec<Patient>, DataError> {
    Ok(serde_json::from_str(json)?)
}

fn embedded_patients() -> Vec<Patient> {
    match load_patients(PATIENTS_JSON) {
        Ok(patients) => patients,
        Err(e) => {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(
                &format!("Hospital Reception: 患者データの読み込みに失敗: {e}").into(),
            );
            #[cfg(not(target_arch = "wasm32"))]
            let _ = e;
            Vec::new()
        }
    }
}

/// Active screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Queue,
    Karte,
    Slip,
    Settings,
}

/// Where a drug name is shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Karte,
    Slip,
    GenericNames,
}

pub struct ReceptionState {
    pub catalogs: Catalogs,
    pub patients: Vec<Patient>,
    /// Parallel to `patients`.
    pub served: Vec<bool>,
    /// Index into `patients` of the chart being handled.
    pub current: Option<usize>,
    pub screen: Screen,
    pub miss_policy: MissPolicy,
    /// Real drug names shown on screen so far.
    pub leaks: u32,
    /// `(patient, surface)` pairs whose leaks are already in `leaks`.
    pub noted_leaks: HashSet<(usize, Surface)>,
    pub log: Vec<String>,
}

impl ReceptionState {
    pub fn new() -> Self {
        Self::with_data(Catalogs::embedded(), embedded_patients())
    }

    pub fn with_data(catalogs: Catalogs, patients: Vec<Patient>) -> Self {
        let served = vec![false; patients.len()];
        Self {
            catalogs,
            patients,
            served,
            current: None,
            screen: Screen::Queue,
            miss_policy: MissPolicy::default(),
            leaks: 0,
            noted_leaks: HashSet::new(),
            log: vec!["受付を開始しました。患者さんを呼んでください。".into()],
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    pub fn current_patient(&self) -> Option<&Patient> {
        self.current.and_then(|i| self.patients.get(i))
    }

    pub fn served_count(&self) -> usize {
        self.served.iter().filter(|s| **s).count()
    }
}
