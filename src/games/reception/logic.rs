//! Reception desk rules. Every drug name that reaches the screen goes
//! through a [`Formatter`] configured for the surface showing it.

use hospital_reception::config::MAX_QUEUE;
use hospital_reception::prescription::{Formatter, MissPolicy, NameStrategy, PrescriptionLine};

use super::state::{ReceptionState, Screen, Surface};

fn formatter(state: &ReceptionState, strategy: NameStrategy) -> Formatter<'_> {
    Formatter::new(&state.catalogs, strategy).with_miss_policy(state.miss_policy)
}

/// Prescription rows of the current patient as named on the karte.
pub fn karte_lines(state: &ReceptionState) -> Vec<PrescriptionLine> {
    surface_lines(state, NameStrategy::Karte)
}

/// Prescription rows of the current patient as named on the slip.
pub fn slip_lines(state: &ReceptionState) -> Vec<PrescriptionLine> {
    surface_lines(state, NameStrategy::TradeName)
}

fn surface_lines(state: &ReceptionState, strategy: NameStrategy) -> Vec<PrescriptionLine> {
    match state.current_patient() {
        Some(p) => formatter(state, strategy).lines(&p.triage),
        None => Vec::new(),
    }
}

/// Full slip text of the current patient, or empty when nobody is selected.
pub fn slip_text(state: &ReceptionState) -> String {
    match state.current_patient() {
        Some(p) => formatter(state, NameStrategy::TradeName).block(&p.triage),
        None => String::new(),
    }
}

/// Generic-name rows of the current patient, shown under the slip.
pub fn generic_lines(state: &ReceptionState) -> Vec<PrescriptionLine> {
    surface_lines(state, NameStrategy::GeneralName)
}

/// Generic names for the slip's secondary column, one per prescribed drug.
pub fn generic_names(state: &ReceptionState) -> Vec<String> {
    generic_lines(state)
        .into_iter()
        .map(|l| l.display_name)
        .collect()
}

pub fn is_finished(state: &ReceptionState) -> bool {
    !state.served.is_empty() && state.served.iter().all(|s| *s)
}

/// Index of the first patient still waiting.
pub fn next_waiting(state: &ReceptionState) -> Option<usize> {
    state.served.iter().position(|s| !*s)
}

/// Patients addressable from the queue screen (first `MAX_QUEUE`).
pub fn visible_queue(state: &ReceptionState) -> usize {
    state.patients.len().min(MAX_QUEUE)
}

/// Record names that fell through both catalogs on one surface of the
/// current patient. Each surface is counted once per patient.
fn note_leaks(state: &mut ReceptionState, surface: Surface, lines: &[PrescriptionLine]) {
    let Some(patient) = state.current else {
        return;
    };
    if state.miss_policy == MissPolicy::Mask {
        return;
    }
    let leaked: Vec<&str> = lines
        .iter()
        .filter(|l| l.leaked)
        .map(|l| l.display_name.as_str())
        .collect();
    if leaked.is_empty() || !state.noted_leaks.insert((patient, surface)) {
        return;
    }
    state.leaks += leaked.len() as u32;
    if state.miss_policy == MissPolicy::Warn {
        for name in leaked {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(
                &format!("Hospital Reception: カタログ未登録の薬剤名を表示: {}", name).into(),
            );
            state.add_log(&format!("⚠ 未登録の薬剤名がそのまま表示されています: {}", name));
        }
    }
}

/// Call a waiting patient and open their karte.
pub fn select_patient(state: &mut ReceptionState, index: usize) -> bool {
    if index >= visible_queue(state) {
        return false;
    }
    if state.served[index] {
        state.add_log("その患者さんは対応済みです。");
        return false;
    }
    state.current = Some(index);
    state.screen = Screen::Karte;
    let msg = format!("{}さんのカルテを開きました。", state.patients[index].name);
    state.add_log(&msg);
    let lines = karte_lines(state);
    note_leaks(state, Surface::Karte, &lines);
    true
}

pub fn open_slip(state: &mut ReceptionState) -> bool {
    if state.current.is_none() {
        return false;
    }
    state.screen = Screen::Slip;
    let lines = slip_lines(state);
    note_leaks(state, Surface::Slip, &lines);
    let generic = generic_lines(state);
    note_leaks(state, Surface::GenericNames, &generic);
    true
}

/// Hand the slip to the current patient and return to the queue.
pub fn hand_over(state: &mut ReceptionState) -> bool {
    let Some(index) = state.current else {
        return false;
    };
    state.served[index] = true;
    state.current = None;
    state.screen = Screen::Queue;

    let patient = &state.patients[index];
    let msg = if patient.triage.has_no_prescription() {
        format!("{}さん、今日はお薬はありません。お大事に。", patient.name)
    } else {
        format!("{}さんに処方箋を渡しました。", patient.name)
    };
    state.add_log(&msg);

    if is_finished(state) {
        let summary = if state.leaks == 0 {
            "本日の受付終了！実名の表示はありませんでした。".to_string()
        } else {
            format!("本日の受付終了。実名表示: {}件", state.leaks)
        };
        state.add_log(&summary);
    }
    true
}

pub fn cycle_miss_policy(state: &mut ReceptionState) {
    state.miss_policy = state.miss_policy.next();
    let msg = format!("未登録薬の表示: {}", state.miss_policy.label());
    state.add_log(&msg);
}

/// Reopen the desk with the same patients.
pub fn restart(state: &mut ReceptionState) {
    state.served.iter_mut().for_each(|s| *s = false);
    state.current = None;
    state.screen = Screen::Queue;
    state.leaks = 0;
    state.noted_leaks.clear();
    state.log.clear();
    state.add_log("受付を再開しました。");
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_reception::config::{MASKED_NAME, NO_PRESCRIPTION};
    use hospital_reception::prescription::Catalogs;

    fn fresh() -> ReceptionState {
        ReceptionState::new()
    }

    fn index_of(state: &ReceptionState, name: &str) -> usize {
        state
            .patients
            .iter()
            .position(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn select_opens_karte() {
        let mut s = fresh();
        assert!(select_patient(&mut s, 0));
        assert_eq!(s.screen, Screen::Karte);
        assert_eq!(s.current, Some(0));
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut s = fresh();
        assert!(!select_patient(&mut s, 99));
        assert_eq!(s.screen, Screen::Queue);
    }

    #[test]
    fn served_patient_cannot_be_selected_again() {
        let mut s = fresh();
        select_patient(&mut s, 0);
        open_slip(&mut s);
        hand_over(&mut s);
        assert!(!select_patient(&mut s, 0));
        assert_eq!(s.current, None);
    }

    #[test]
    fn karte_uses_numbered_herbal_names_and_slip_uses_aliases() {
        let mut s = fresh();
        let i = index_of(&s, "田中 健太");
        select_patient(&mut s, i);
        let karte: Vec<String> = karte_lines(&s).into_iter().map(|l| l.display_name).collect();
        assert_eq!(karte, vec!["ツモラ68", "ツモラ41"]);
        let slip: Vec<String> = slip_lines(&s).into_iter().map(|l| l.display_name).collect();
        assert_eq!(slip, vec!["シャクカン顆粒", "ツモラ41"]);
    }

    #[test]
    fn generic_names_follow_fallback_chain() {
        let mut s = fresh();
        let i = index_of(&s, "田中 健太");
        select_patient(&mut s, i);
        assert_eq!(generic_names(&s), vec!["芍甘湯", "ツモラ41"]);
    }

    #[test]
    fn slip_text_for_no_prescription_is_sentinel() {
        let mut s = fresh();
        let i = index_of(&s, "伊藤 さくら");
        select_patient(&mut s, i);
        assert_eq!(slip_text(&s), NO_PRESCRIPTION);
    }

    #[test]
    fn slip_text_never_shows_catalogued_real_names() {
        let mut s = fresh();
        let i = index_of(&s, "佐藤 花子");
        select_patient(&mut s, i);
        let text = slip_text(&s);
        assert!(text.contains("カロリナ錠200"));
        assert!(!text.contains("カロナール"));
        assert!(text.contains("5日分"));
    }

    #[test]
    fn leaks_are_counted_under_passthrough() {
        let mut s = fresh();
        let i = index_of(&s, "渡辺 誠");
        select_patient(&mut s, i);
        assert_eq!(s.leaks, 1);
        open_slip(&mut s);
        // Slip entry plus the generic-name column.
        assert_eq!(s.leaks, 3);
    }

    #[test]
    fn revisiting_a_surface_does_not_recount() {
        let mut s = fresh();
        let i = index_of(&s, "渡辺 誠");
        select_patient(&mut s, i);
        open_slip(&mut s);
        let after_first_visit = s.leaks;
        for _ in 0..3 {
            s.screen = Screen::Karte;
            open_slip(&mut s);
        }
        s.screen = Screen::Queue;
        select_patient(&mut s, i);
        assert_eq!(s.leaks, after_first_visit);
    }

    #[test]
    fn warn_policy_reports_generic_column_once() {
        let mut s = fresh();
        s.miss_policy = MissPolicy::Warn;
        let i = index_of(&s, "渡辺 誠");
        select_patient(&mut s, i);
        open_slip(&mut s);
        open_slip(&mut s);
        assert_eq!(generic_names(&s), vec!["ファモチジル", "ビオフェルミン錠剤"]);
        let warnings = s.log.iter().filter(|l| l.starts_with('⚠')).count();
        assert_eq!(warnings, 3);
        assert_eq!(s.leaks, 3);
    }

    #[test]
    fn warn_policy_logs_leaks() {
        let mut s = fresh();
        s.miss_policy = MissPolicy::Warn;
        let i = index_of(&s, "渡辺 誠");
        select_patient(&mut s, i);
        assert!(s.log.iter().any(|l| l.contains("ビオフェルミン錠剤")));
    }

    #[test]
    fn mask_policy_hides_and_does_not_count() {
        let mut s = fresh();
        s.miss_policy = MissPolicy::Mask;
        let i = index_of(&s, "渡辺 誠");
        select_patient(&mut s, i);
        open_slip(&mut s);
        assert_eq!(s.leaks, 0);
        assert!(slip_text(&s).contains(MASKED_NAME));
        assert!(!slip_text(&s).contains("ビオフェルミン"));
    }

    #[test]
    fn open_slip_requires_patient() {
        let mut s = fresh();
        assert!(!open_slip(&mut s));
        assert_eq!(s.screen, Screen::Queue);
    }

    #[test]
    fn serving_everyone_finishes() {
        let mut s = fresh();
        for i in 0..s.patients.len() {
            assert!(select_patient(&mut s, i));
            assert!(open_slip(&mut s));
            assert!(hand_over(&mut s));
        }
        assert!(is_finished(&s));
        assert_eq!(next_waiting(&s), None);
        assert!(s.log.iter().any(|l| l.contains("本日の受付終了")));
    }

    #[test]
    fn restart_resets_progress() {
        let mut s = fresh();
        select_patient(&mut s, 0);
        hand_over(&mut s);
        restart(&mut s);
        assert_eq!(s.served_count(), 0);
        assert_eq!(s.leaks, 0);
        assert!(s.noted_leaks.is_empty());
        assert_eq!(next_waiting(&s), Some(0));
    }

    #[test]
    fn empty_queue_is_not_finished() {
        let s = ReceptionState::with_data(Catalogs::default(), Vec::new());
        assert!(!is_finished(&s));
    }

    #[test]
    fn cycle_policy_logs() {
        let mut s = fresh();
        cycle_miss_policy(&mut s);
        assert_eq!(s.miss_policy, MissPolicy::Warn);
        assert!(s.log.last().unwrap().contains(MissPolicy::Warn.label()));
    }
}
