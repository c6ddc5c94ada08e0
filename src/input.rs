//! Input normalisation shared by every screen: keyboard and pointer events
//! become [`InputEvent`]s, and pointer positions are resolved against the
//! click targets registered during the last draw.

use ratzilla::ratatui::layout::Rect;

use hospital_reception::config::NARROW_WIDTH;

/// A normalised input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press. Esc arrives as `'q'`.
    Key(char),
    /// A tap/click on a registered target, carrying its action ID.
    Click(u16),
}

/// A screen region that triggers an action when tapped.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets of the current frame plus the terminal size they were
/// laid out for. Rebuilt on every draw.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame at the given terminal size.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a one-row target spanning `area`'s width. Rows outside
    /// `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action ID of the topmost target under a cell. Later registrations
    /// sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = &t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < NARROW_WIDTH
}

/// Map a pixel offset inside the grid container to a cell index along one
/// axis. `None` when outside the grid or the grid has no size yet.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    if cell >= cells {
        None
    } else {
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_later_target_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);
        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(0, 5), Some(1));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn hit_test_empty() {
        assert_eq!(ClickState::new().hit_test(0, 0), None);
    }

    #[test]
    fn row_target_outside_area_is_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(6, 12), Some(3));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn reset_clears_targets_and_records_size() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 1, 1), 1);
        cs.reset(80, 24);
        assert!(cs.targets.is_empty());
        assert_eq!((cs.terminal_cols, cs.terminal_rows), (80, 24));
    }

    #[test]
    fn narrow_breakpoint() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_cell_conversion() {
        // 24 rows over 480px → 20px per row
        assert_eq!(pixel_to_cell(0.0, 480.0, 24), Some(0));
        assert_eq!(pixel_to_cell(19.9, 480.0, 24), Some(0));
        assert_eq!(pixel_to_cell(20.0, 480.0, 24), Some(1));
        assert_eq!(pixel_to_cell(479.0, 480.0, 24), Some(23));
        assert_eq!(pixel_to_cell(480.0, 480.0, 24), None);
        assert_eq!(pixel_to_cell(-1.0, 480.0, 24), None);
        assert_eq!(pixel_to_cell(10.0, 0.0, 24), None);
        assert_eq!(pixel_to_cell(10.0, 480.0, 0), None);
    }
}
