//! Semantic action IDs for reception click targets.

// ── Queue screen ─────────────────────────────────────────────
pub const SELECT_PATIENT_BASE: u16 = 10; // +index 0..8
pub const GO_SETTINGS: u16 = 20;
pub const RESTART: u16 = 21;

// ── Karte screen ─────────────────────────────────────────────
pub const OPEN_SLIP: u16 = 30;
pub const BACK_TO_QUEUE: u16 = 31;

// ── Slip screen ──────────────────────────────────────────────
pub const HAND_OVER: u16 = 40;
pub const BACK_TO_KARTE: u16 = 41;

// ── Settings screen ──────────────────────────────────────────
pub const CYCLE_MISS_POLICY: u16 = 50;
pub const BACK_FROM_SETTINGS: u16 = 51;
