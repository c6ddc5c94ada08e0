//! Drug-name obfuscation for the hospital reception game.
//!
//! [`prescription`] turns a patient's triage record into the text shown on
//! the karte and the prescription slip, replacing every catalogued real
//! drug name with its in-game alias. [`config`] holds the shared constants.

pub mod config;
pub mod prescription;
