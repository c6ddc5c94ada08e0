//! Reception rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use hospital_reception::config::{NO_PRESCRIPTION, THEME};
use hospital_reception::prescription::MissPolicy;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::logic::{
    generic_names, is_finished, karte_lines, next_waiting, slip_lines, slip_text, visible_queue,
};
use super::state::{ReceptionState, Screen};

pub fn render(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(if is_narrow { 5 } else { 7 }),
        ])
        .split(area);

    render_header(state, f, chunks[0], borders, is_narrow);
    let mut cs = click_state.borrow_mut();
    match state.screen {
        Screen::Queue => render_queue(state, f, chunks[1], borders, &mut cs),
        Screen::Karte => render_karte(state, f, chunks[1], borders, &mut cs),
        Screen::Slip => render_slip(state, f, chunks[1], borders, &mut cs),
        Screen::Settings => render_settings(state, f, chunks[1], borders, &mut cs),
    }
    drop(cs);
    render_log(state, f, chunks[2], borders);
}

fn key_line(key: &str, label: &str, enabled: bool) -> Line<'static> {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(THEME.key).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(THEME.muted),
            Style::default().fg(THEME.muted),
        )
    };
    Line::from(vec![
        Span::styled(format!(" [{}] ", key), key_style),
        Span::styled(label.to_string(), label_style),
    ])
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::Gray))
}

fn panel(title: &str, color: Color, borders: Borders) -> Block<'static> {
    Block::default()
        .borders(borders)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

/// Render a clickable panel body, registering its targets.
fn render_list(
    f: &mut Frame,
    area: Rect,
    block: Block<'static>,
    cl: ClickableList<'static>,
    cs: &mut ClickState,
) {
    let inner = block.inner(area);
    let top = inner.y - area.y;
    let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
    cl.register_targets(area, cs, top, bottom, inner.width);
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

// ── Header ─────────────────────────────────────────────────────────────

fn render_header(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
) {
    let title = if is_narrow {
        " 受付 "
    } else {
        " Hospital Reception - 病院受付 "
    };
    let leak_style = if state.leaks > 0 {
        Style::default().fg(THEME.warning).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let lines = vec![
        Line::from(vec![
            label(" 対応済み: "),
            Span::styled(
                format!("{}/{}", state.served_count(), state.patients.len()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            label("  実名表示: "),
            Span::styled(format!("{}件", state.leaks), leak_style),
        ]),
        Line::from(vec![
            label(" 未登録薬: "),
            Span::styled(
                state.miss_policy.label(),
                Style::default().fg(THEME.settings),
            ),
        ]),
    ];

    let widget = Paragraph::new(lines).block(panel(title, THEME.header, borders));
    f.render_widget(widget, area);
}

// ── Queue ──────────────────────────────────────────────────────────────

fn render_queue(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();

    if state.patients.is_empty() {
        cl.push(Line::from(label(" 本日の患者さんはいません。")));
    }

    let next = next_waiting(state);
    for i in 0..visible_queue(state) {
        let p = &state.patients[i];
        let served = state.served[i];
        let status = if served {
            Span::styled("  済", Style::default().fg(THEME.muted))
        } else if next == Some(i) {
            Span::styled(
                "  待ち ← 次",
                Style::default().fg(THEME.queue).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("  待ち", Style::default().fg(THEME.queue))
        };
        let mut line = key_line(&(i + 1).to_string(), &p.name, !served);
        line.spans.push(Span::styled(
            format!(" ({}歳・{})", p.age, p.sex),
            Style::default().fg(THEME.muted),
        ));
        line.spans.push(status);
        cl.push_clickable(line, SELECT_PATIENT_BASE + i as u16);
    }

    cl.push(Line::from(""));
    if is_finished(state) {
        cl.push(Line::from(Span::styled(
            " 本日の受付は終了しました！",
            Style::default().fg(THEME.key).add_modifier(Modifier::BOLD),
        )));
        cl.push_clickable(key_line("R", "もう一度", true), RESTART);
    }
    cl.push_clickable(key_line("S", "設定", true), GO_SETTINGS);

    render_list(f, area, panel(" 受付待ち ", THEME.queue, borders), cl, cs);
}

// ── Karte ──────────────────────────────────────────────────────────────

fn render_karte(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let Some(p) = state.current_patient() else {
        return;
    };
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        label(format!(" No.{} ", p.id).as_str()),
        label("氏名: "),
        Span::styled(
            p.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}歳・{}", p.age, p.sex),
            Style::default().fg(Color::Gray),
        ),
    ]));
    cl.push(Line::from(vec![label(" 主訴: "), Span::raw(p.complaint.clone())]));
    cl.push(Line::from(vec![label(" 診断: "), Span::raw(p.diagnosis.clone())]));
    cl.push(Line::from(""));
    cl.push(Line::from(label(" 処方:")));

    let lines = karte_lines(state);
    if lines.is_empty() {
        cl.push(Line::from(format!("   {}", NO_PRESCRIPTION)));
    }
    for line in lines {
        let style = if line.leaked && state.miss_policy != MissPolicy::Mask {
            Style::default().fg(THEME.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        cl.push(Line::from(vec![
            Span::styled(format!("   {}", line.display_name), style),
            Span::styled(
                format!("  {}日分", line.days),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    cl.push(Line::from(""));
    cl.push_clickable(key_line("P", "処方箋を発行", true), OPEN_SLIP);
    cl.push_clickable(key_line("-", "受付に戻る", true), BACK_TO_QUEUE);

    render_list(f, area, panel(" カルテ ", THEME.karte, borders), cl, cs);
}

// ── Prescription slip ──────────────────────────────────────────────────

fn render_slip(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let Some(p) = state.current_patient() else {
        return;
    };
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(" {} 様", p.name),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));

    // Entry headers ("1) name") of names that fell through both catalogs.
    let leaked_heads: Vec<String> = if state.miss_policy == MissPolicy::Mask {
        Vec::new()
    } else {
        slip_lines(state)
            .iter()
            .enumerate()
            .filter(|(_, l)| l.leaked)
            .map(|(i, l)| format!("{}) {}", i + 1, l.display_name))
            .collect()
    };
    for text in slip_text(state).lines() {
        let style = if leaked_heads.iter().any(|h| h == text) {
            Style::default().fg(THEME.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        cl.push(Line::from(Span::styled(format!(" {}", text), style)));
    }

    let generics = generic_names(state);
    if !generics.is_empty() {
        cl.push(Line::from(""));
        cl.push(Line::from(vec![
            label(" 一般名: "),
            Span::styled(generics.join(" / "), Style::default().fg(Color::Gray)),
        ]));
    }

    cl.push(Line::from(""));
    cl.push_clickable(key_line("H", "処方箋を渡す", true), HAND_OVER);
    cl.push_clickable(key_line("-", "カルテに戻る", true), BACK_TO_KARTE);

    render_list(f, area, panel(" 処方箋 ", THEME.slip, borders), cl, cs);
}

// ── Settings ───────────────────────────────────────────────────────────

fn render_settings(
    state: &ReceptionState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    cs: &mut ClickState,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(label(" カタログに無い薬の表示方法:")));
    for policy in MissPolicy::ALL {
        let (mark, style) = if policy == state.miss_policy {
            ("●", Style::default().fg(THEME.settings).add_modifier(Modifier::BOLD))
        } else {
            ("○", Style::default().fg(Color::Gray))
        };
        cl.push(Line::from(Span::styled(
            format!("   {} {}", mark, policy.label()),
            style,
        )));
    }
    cl.push(Line::from(""));
    cl.push_clickable(key_line("M", "切り替える", true), CYCLE_MISS_POLICY);
    cl.push_clickable(key_line("-", "戻る", true), BACK_FROM_SETTINGS);

    render_list(f, area, panel(" 設定 ", THEME.settings, borders), cl, cs);
}

// ── Log ────────────────────────────────────────────────────────────────

fn render_log(state: &ReceptionState, f: &mut Frame, area: Rect, borders: Borders) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let color = if entry.starts_with('⚠') {
                THEME.warning
            } else {
                Color::Gray
            };
            Line::from(Span::styled(format!(" {}", entry), Style::default().fg(color)))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(panel(" ログ ", THEME.log, borders))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
