mod games;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::reception::ReceptionGame;
use games::Game;
use input::{pixel_to_cell, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols);
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows);

    web_sys::console::log_1(
        &format!(
            "click: pixel=({}, {}), cell=({:?}, {:?}), targets={}",
            mouse_x,
            mouse_y,
            col,
            row,
            cs.targets.len()
        )
        .into(),
    );

    Some((col?, row?))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(ReceptionGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let matched = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = matched {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c.to_ascii_lowercase()),
                KeyCode::Esc => InputEvent::Key('q'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            click_state.borrow_mut().reset(size.width, size.height);
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
