//! Compile-time configuration: prescription formatting constants and UI theme.

use ratzilla::ratatui::style::Color;

/// Separator used by triage records for drug and day-count lists.
pub const LIST_DELIMITER: &str = " / ";

/// Day count used when the triage record omits one for a drug.
pub const DEFAULT_DAYS: &str = "7";

/// Shown in place of a prescription block when nothing was prescribed.
pub const NO_PRESCRIPTION: &str = "処方なし";

/// Replaces a drug name that matched no catalog under `MissPolicy::Mask`.
pub const MASKED_NAME: &str = "＊＊＊";

/// Screens narrower than this (in columns) use the stacked layout.
pub const NARROW_WIDTH: u16 = 60;

/// Maximum number of entries kept in the in-game log.
pub const LOG_CAPACITY: usize = 30;

/// Maximum number of patients that can be addressed by number keys.
pub const MAX_QUEUE: usize = 9;

/// Panel colours shared by the reception screens.
pub struct Theme {
    pub header: Color,
    pub queue: Color,
    pub karte: Color,
    pub slip: Color,
    pub settings: Color,
    pub log: Color,
    pub key: Color,
    pub warning: Color,
    pub muted: Color,
}

pub const THEME: Theme = Theme {
    header: Color::Cyan,
    queue: Color::Green,
    karte: Color::LightBlue,
    slip: Color::LightYellow,
    settings: Color::Magenta,
    log: Color::Blue,
    key: Color::Yellow,
    warning: Color::LightRed,
    muted: Color::DarkGray,
};
