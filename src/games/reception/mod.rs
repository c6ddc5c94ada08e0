//! Hospital Reception — call patients, check their karte, hand over the
//! prescription slip without letting a real drug name slip through.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use hospital_reception::config::MAX_QUEUE;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use state::{ReceptionState, Screen};

pub struct ReceptionGame {
    pub state: ReceptionState,
}

impl ReceptionGame {
    pub fn new() -> Self {
        Self {
            state: ReceptionState::new(),
        }
    }

    /// Up one level. `false` on the queue, which has nowhere to go back to.
    fn back(&mut self) -> bool {
        self.state.screen = match self.state.screen {
            Screen::Queue => return false,
            Screen::Karte | Screen::Settings => Screen::Queue,
            Screen::Slip => Screen::Karte,
        };
        true
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let s = &mut self.state;
        match (s.screen, action_id) {
            (Screen::Queue, id)
                if (SELECT_PATIENT_BASE..SELECT_PATIENT_BASE + MAX_QUEUE as u16).contains(&id) =>
            {
                logic::select_patient(s, (id - SELECT_PATIENT_BASE) as usize)
            }
            (Screen::Queue, GO_SETTINGS) => {
                s.screen = Screen::Settings;
                true
            }
            (Screen::Queue, RESTART) if logic::is_finished(s) => {
                logic::restart(s);
                true
            }
            (Screen::Karte, OPEN_SLIP) => logic::open_slip(s),
            (Screen::Slip, HAND_OVER) => logic::hand_over(s),
            (Screen::Settings, CYCLE_MISS_POLICY) => {
                logic::cycle_miss_policy(s);
                true
            }
            (Screen::Karte, BACK_TO_QUEUE)
            | (Screen::Slip, BACK_TO_KARTE)
            | (Screen::Settings, BACK_FROM_SETTINGS) => self.back(),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        if key == 'q' || key == '-' {
            return self.back();
        }
        let s = &mut self.state;
        match s.screen {
            Screen::Queue => match key {
                '1'..='9' => logic::select_patient(s, key as usize - '1' as usize),
                's' => {
                    s.screen = Screen::Settings;
                    true
                }
                'r' if logic::is_finished(s) => {
                    logic::restart(s);
                    true
                }
                _ => false,
            },
            Screen::Karte => match key {
                'p' => logic::open_slip(s),
                _ => false,
            },
            Screen::Slip => match key {
                'h' => logic::hand_over(s),
                _ => false,
            },
            Screen::Settings => match key {
                'm' => {
                    logic::cycle_miss_policy(s);
                    true
                }
                _ => false,
            },
        }
    }
}

impl Game for ReceptionGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_reception::prescription::MissPolicy;

    #[test]
    fn key_flow_serves_one_patient() {
        let mut game = ReceptionGame::new();
        assert!(game.handle_input(&InputEvent::Key('1')));
        assert_eq!(game.state.screen, Screen::Karte);
        assert!(game.handle_input(&InputEvent::Key('p')));
        assert_eq!(game.state.screen, Screen::Slip);
        assert!(game.handle_input(&InputEvent::Key('h')));
        assert_eq!(game.state.screen, Screen::Queue);
        assert!(game.state.served[0]);
    }

    #[test]
    fn click_flow_serves_one_patient() {
        let mut game = ReceptionGame::new();
        game.handle_input(&InputEvent::Click(SELECT_PATIENT_BASE + 1));
        assert_eq!(game.state.current, Some(1));
        game.handle_input(&InputEvent::Click(OPEN_SLIP));
        assert_eq!(game.state.screen, Screen::Slip);
        game.handle_input(&InputEvent::Click(HAND_OVER));
        assert!(game.state.served[1]);
        assert_eq!(game.state.current, None);
    }

    #[test]
    fn back_navigation() {
        let mut game = ReceptionGame::new();
        game.handle_input(&InputEvent::Key('1'));
        game.handle_input(&InputEvent::Key('p'));
        assert!(game.handle_input(&InputEvent::Key('-')));
        assert_eq!(game.state.screen, Screen::Karte);
        assert!(game.handle_input(&InputEvent::Key('q')));
        assert_eq!(game.state.screen, Screen::Queue);
        assert!(!game.handle_input(&InputEvent::Key('q')));
    }

    #[test]
    fn click_back_targets() {
        let mut game = ReceptionGame::new();
        game.handle_input(&InputEvent::Click(SELECT_PATIENT_BASE));
        game.handle_input(&InputEvent::Click(OPEN_SLIP));
        game.handle_input(&InputEvent::Click(BACK_TO_KARTE));
        assert_eq!(game.state.screen, Screen::Karte);
        game.handle_input(&InputEvent::Click(BACK_TO_QUEUE));
        assert_eq!(game.state.screen, Screen::Queue);
    }

    #[test]
    fn actions_from_other_screens_are_ignored() {
        let mut game = ReceptionGame::new();
        assert!(!game.handle_input(&InputEvent::Click(HAND_OVER)));
        assert!(!game.handle_input(&InputEvent::Key('h')));
        assert!(game.state.served.iter().all(|s| !*s));
    }

    #[test]
    fn settings_cycle_policy() {
        let mut game = ReceptionGame::new();
        game.handle_input(&InputEvent::Key('s'));
        assert_eq!(game.state.screen, Screen::Settings);
        game.handle_input(&InputEvent::Key('m'));
        assert_eq!(game.state.miss_policy, MissPolicy::Warn);
        game.handle_input(&InputEvent::Click(CYCLE_MISS_POLICY));
        assert_eq!(game.state.miss_policy, MissPolicy::Mask);
        game.handle_input(&InputEvent::Click(BACK_FROM_SETTINGS));
        assert_eq!(game.state.screen, Screen::Queue);
    }

    #[test]
    fn restart_only_after_finishing() {
        let mut game = ReceptionGame::new();
        assert!(!game.handle_input(&InputEvent::Key('r')));
        let n = game.state.patients.len();
        for i in 0..n {
            game.handle_input(&InputEvent::Click(SELECT_PATIENT_BASE + i as u16));
            game.handle_input(&InputEvent::Click(OPEN_SLIP));
            game.handle_input(&InputEvent::Click(HAND_OVER));
        }
        assert!(logic::is_finished(&game.state));
        assert!(game.handle_input(&InputEvent::Key('r')));
        assert_eq!(game.state.served_count(), 0);
    }
}
