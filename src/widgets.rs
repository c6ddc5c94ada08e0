//! Clickable line builder used by the reception panels.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

/// Lines for a `Paragraph`, some of which are bound to an action ID.
///
/// Targets follow their line: inserting lines above a clickable one moves
/// its target down automatically.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("受付待ち"));
/// cl.push_clickable(Line::from(" [1] 佐藤 花子"), SELECT_PATIENT_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register a target for every visual row of every clickable line.
    ///
    /// `top`/`bottom` are the rows taken by borders. `wrap_width` is the
    /// inner width when the paragraph wraps, or `0` when each line is
    /// exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top: u16,
        bottom: u16,
        wrap_width: u16,
    ) {
        let first_row = area.y + top;
        let end_row = area.y + area.height.saturating_sub(bottom);

        let mut row_of_line = Vec::with_capacity(self.lines.len());
        let mut row = 0u16;
        for line in &self.lines {
            let height = visual_rows(line, wrap_width);
            row_of_line.push((row, height));
            row = row.saturating_add(height);
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = row_of_line.get(idx) else {
                continue;
            };
            for r in start..start.saturating_add(height) {
                let screen_row = first_row.saturating_add(r);
                if screen_row >= end_row {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

fn visual_rows(line: &Line, wrap_width: u16) -> u16 {
    if wrap_width == 0 {
        return 1;
    }
    let width = line.width();
    if width == 0 {
        1
    } else {
        width.div_ceil(wrap_width as usize) as u16
    }
}
