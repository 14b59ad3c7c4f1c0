//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::ui::catalog_list::CatalogRow;
use crate::ui::layout::{point_in_rect, AppLayout, PageLayout};
use crate::ui::screen_page::page_block;

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Lines moved per PageUp/PageDown or wheel notch in the code view.
const CODE_SCROLL_STEP: usize = 5;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Browse => {
            if state.nav.is_empty() {
                handle_catalog_key(state, key);
            } else {
                handle_screen_key(state, key);
            }
        }
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Catalog list (configurable bindings) ────────────────────────

fn handle_catalog_key(state: &mut AppState, key: KeyEvent) {
    if state.search_focused && handle_search_key(state, key) {
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::MoveUp => state.list_state.select_prev(),
        Action::MoveDown => {
            let count = state.rows().iter().filter(|r| matches!(r, CatalogRow::Item { .. })).count();
            state.list_state.select_next(count);
        }
        Action::Open => open_selected(state),
        Action::Back => {
            if !state.query.is_empty() {
                state.query.clear();
                state.query_changed();
            }
        }
        Action::FocusSearch => state.search_focused = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
        Action::CopyCode | Action::ToggleComments | Action::Snapshot => {}
    }
}

/// Typing into the focused search bar.  Returns `true` if consumed.
fn handle_search_key(state: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            state.search_focused = false;
        }
        KeyCode::Enter => {
            state.search_focused = false;
            open_selected(state);
        }
        KeyCode::Backspace => {
            state.query.pop();
            state.query_changed();
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            state.query.push(c);
            state.query_changed();
        }
        // Arrows still move through the results while typing.
        KeyCode::Up | KeyCode::Down => return false,
        _ => {}
    }
    true
}

fn open_selected(state: &mut AppState) {
    if let Some(destination) = state.selected_destination() {
        state.open(destination);
    }
}

// ── Demo screen ─────────────────────────────────────────────────

fn handle_screen_key(state: &mut AppState, key: KeyEvent) {
    let Some(screen) = state.nav.top_mut() else {
        return;
    };

    // Text entry owns every key until it ends.
    if screen.is_editing() {
        screen.handle_key(key);
        return;
    }

    match key.code {
        KeyCode::PageDown => {
            scroll_code(state, CODE_SCROLL_STEP as isize);
            return;
        }
        KeyCode::PageUp => {
            scroll_code(state, -(CODE_SCROLL_STEP as isize));
            return;
        }
        _ => {}
    }

    match state.config.match_key(key) {
        Some(Action::Back) => state.back(),
        Some(Action::MoveUp) => screen.move_selection(-1),
        Some(Action::MoveDown) => screen.move_selection(1),
        Some(Action::Open) => screen.activate(),
        Some(Action::CopyCode) => state.copy_code(),
        Some(Action::ToggleComments) => state.toggle_comments(),
        Some(Action::Snapshot) => {
            state.snapshot();
        }
        Some(Action::FocusSearch) => {
            state.nav.clear();
            state.search_focused = true;
        }
        Some(Action::OpenSettings) => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Some(Action::Quit) => state.should_quit = true,
        None => {
            screen.handle_key(key);
        }
    }
}

fn scroll_code(state: &mut AppState, delta: isize) {
    let lines = state.displayed_code().map_or(0, |code| code.lines().count());
    let max = lines.saturating_sub(1);
    state.code_scroll = state.code_scroll.saturating_add_signed(delta).min(max);
}

// ── Settings / controls popups (fixed keys) ─────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Browse;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Browse;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected + 1 < item_count {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.save_config();
                state.status_message = Some("Key bindings reset to defaults".into());
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.clear_bindings(action);
                state.save_config();
            }
        }
        _ => {}
    }
}

fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    // Don't allow rebinding Ctrl+C (reserved for emergency quit).
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return;
    }

    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    let bind = KeyBind::from_key_event(key);
    tracing::info!(action = action.label(), key = %bind.display(), "rebind");
    state.config.add_binding(action, bind);
    state.save_config();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Browse {
        return;
    }
    if state.nav.is_empty() {
        handle_catalog_mouse(state, mouse);
    } else {
        handle_screen_mouse(state, mouse);
    }
}

fn handle_catalog_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = AppLayout::catalog(state.terminal_area);
    match mouse.kind {
        MouseEventKind::ScrollUp => state.list_state.select_prev(),
        MouseEventKind::ScrollDown => {
            let count = state.rows().iter().filter(|r| matches!(r, CatalogRow::Item { .. })).count();
            state.list_state.select_next(count);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.search_area, mouse.column, mouse.row) {
                state.search_focused = true;
                return;
            }
            state.search_focused = false;
            let content_top = layout.body_area.y.saturating_add(1);
            let content_bottom = layout.body_area.bottom().saturating_sub(1);
            if !point_in_rect(layout.body_area, mouse.column, mouse.row)
                || mouse.row < content_top
                || mouse.row >= content_bottom
            {
                return;
            }
            let clicked = (mouse.row - content_top) as usize + state.list_state.offset;
            let rows = state.rows();
            if let Some(CatalogRow::Item { ordinal, .. }) = rows.get(clicked) {
                // A second click on the highlighted row opens it.
                if *ordinal == state.list_state.selected {
                    open_selected(state);
                } else {
                    state.list_state.selected = *ordinal;
                }
            }
        }
        _ => {}
    }
}

fn handle_screen_mouse(state: &mut AppState, mouse: MouseEvent) {
    let Some(screen) = state.current_screen() else {
        return;
    };
    let body = AppLayout::screen(state.terminal_area).body_area;
    let inner = page_block(screen.title()).inner(body);
    let page = PageLayout::from_area(inner, screen.control_rows().len());
    let over_code = point_in_rect(page.code, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp if over_code => scroll_code(state, -1),
        MouseEventKind::ScrollDown if over_code => scroll_code(state, 1),
        MouseEventKind::ScrollUp => {
            if let Some(screen) = state.nav.top_mut() {
                screen.move_selection(-1);
            }
        }
        MouseEventKind::ScrollDown => {
            if let Some(screen) = state.nav.top_mut() {
                screen.move_selection(1);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let top = page.controls.y.saturating_add(1);
            if !point_in_rect(page.controls, mouse.column, mouse.row) || mouse.row < top {
                return;
            }
            let index = (mouse.row - top) as usize;
            let Some(screen) = state.nav.top_mut() else {
                return;
            };
            let rows = screen.control_rows();
            match rows.get(index) {
                Some(row) if row.selected => screen.activate(),
                Some(_) => screen.select_control(index),
                None => {}
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    use super::*;
    use crate::core::destination::Destination;
    use crate::screens::router;
    use crate::shell::clipboard::MemoryClipboard;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, key(code));
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn top(state: &AppState) -> Option<Destination> {
        state.current_screen().map(|s| s.destination())
    }

    #[test]
    fn search_then_open_button() {
        let mut state = AppState::for_tests();
        press(&mut state, KeyCode::Char('/'));
        assert!(state.search_focused);
        type_text(&mut state, "but");
        press(&mut state, KeyCode::Enter);
        assert_eq!(top(&state), Some(Destination::Button));
        assert!(!state.search_focused);
    }

    #[test]
    fn typing_q_in_search_does_not_quit() {
        let mut state = AppState::for_tests();
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "q");
        assert!(!state.should_quit);
        assert_eq!(state.query, "q");
    }

    #[test]
    fn esc_clears_query_after_leaving_search() {
        let mut state = AppState::for_tests();
        press(&mut state, KeyCode::Char('/'));
        type_text(&mut state, "zzz");
        assert_eq!(state.selected_destination(), None);
        press(&mut state, KeyCode::Enter);
        assert!(top(&state).is_none());
        press(&mut state, KeyCode::Esc);
        assert!(state.query.is_empty());
        assert_eq!(state.selected_destination(), Some(Destination::BarChart));
    }

    #[test]
    fn arrows_move_through_items_only() {
        let mut state = AppState::for_tests();
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Down);
        assert_eq!(state.selected_destination(), Some(Destination::Button));
        press(&mut state, KeyCode::Char('k'));
        assert_eq!(state.selected_destination(), Some(Destination::Sparkline));
    }

    #[test]
    fn back_discards_screen_state() {
        let mut state = AppState::for_tests();
        state.open(Destination::Toggle);
        // First control is "On"; Space flips it.
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.current_screen().is_some_and(|s| s.has_default_state()));
        press(&mut state, KeyCode::Esc);
        assert!(top(&state).is_none());
        state.open(Destination::Toggle);
        assert!(state.current_screen().is_some_and(|s| s.has_default_state()));
    }

    #[test]
    fn copy_puts_displayed_code_on_clipboard() {
        let clipboard = MemoryClipboard::default();
        let mut state = AppState::for_tests();
        state.clipboard = Box::new(clipboard.clone());
        state.open(Destination::Button);
        press(&mut state, KeyCode::Char('c'));
        press(&mut state, KeyCode::Char('y'));
        let expected = state.displayed_code().expect("screen open");
        assert!(!expected.contains("//"));
        assert_eq!(clipboard.contents(), Some(expected));
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Copied")));
    }

    #[test]
    fn editing_text_swallows_action_keys() {
        let mut state = AppState::for_tests();
        state.open(Destination::Button);
        // Label is the first control of the button demo.
        press(&mut state, KeyCode::Enter);
        type_text(&mut state, "qys");
        assert!(!state.should_quit);
        press(&mut state, KeyCode::Enter);
        assert!(state
            .current_screen()
            .is_some_and(|s| s.code().contains("Continueqys")));
    }

    #[test]
    fn snapshot_key_writes_png() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("shot.png");
        let mut state = AppState::for_tests();
        state.config.prefs.snapshot_path = Some(path.clone());
        state.config.prefs.snapshot_scale = 1.0;
        state.open(Destination::Gauge);
        press(&mut state, KeyCode::Char('s'));
        assert!(std::fs::metadata(&path)?.len() > 0);
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("393×852")));
        Ok(())
    }

    #[test]
    fn snapshot_failure_is_reported() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut state = AppState::for_tests();
        state.config.prefs.snapshot_path = Some(dir.path().join("missing").join("shot.png"));
        state.open(Destination::Gauge);
        press(&mut state, KeyCode::Char('s'));
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Snapshot failed")));
        Ok(())
    }

    #[test]
    fn settings_and_rebind_flow() {
        let mut state = AppState::for_tests();
        press(&mut state, KeyCode::Char('?'));
        assert_eq!(state.active_view, ActiveView::SettingsMenu);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.active_view, ActiveView::ControlsSubmenu);

        // Rebind "Quit" to 'x'.
        let quit = Action::ALL
            .iter()
            .position(|a| *a == Action::Quit)
            .expect("quit action");
        state.controls_selected = quit;
        press(&mut state, KeyCode::Enter);
        assert!(state.awaiting_rebind);
        press(&mut state, KeyCode::Char('x'));
        assert!(!state.awaiting_rebind);

        press(&mut state, KeyCode::Esc);
        assert_eq!(state.active_view, ActiveView::Browse);
        press(&mut state, KeyCode::Char('x'));
        assert!(state.should_quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = AppState::for_tests();
        let mut ev = key(KeyCode::Char('q'));
        ev.kind = KeyEventKind::Release;
        ev.state = KeyEventState::NONE;
        handle_key(&mut state, ev);
        assert!(!state.should_quit);
    }

    #[test]
    fn clicking_twice_opens_an_item() {
        let mut state = AppState::for_tests();
        state.terminal_area = Rect::new(0, 0, 80, 30);
        // Search bar is 3 rows; the list border is row 3, first header row 4,
        // first item row 5, second item row 6.
        click(&mut state, 5, 6);
        assert_eq!(state.selected_destination(), Some(Destination::Gauge));
        assert!(top(&state).is_none());
        click(&mut state, 5, 6);
        assert_eq!(top(&state), Some(Destination::Gauge));
    }

    #[test]
    fn page_down_scrolls_code() {
        let mut state = AppState::for_tests();
        state.open(Destination::BarChart);
        press(&mut state, KeyCode::PageDown);
        let lines = state.displayed_code().map_or(0, |c| c.lines().count());
        assert_eq!(state.code_scroll, CODE_SCROLL_STEP.min(lines - 1));
        press(&mut state, KeyCode::PageUp);
        assert_eq!(state.code_scroll, 0);
    }

    #[test]
    fn every_destination_survives_a_key_storm() {
        for dest in crate::core::destination::Destination::ALL {
            let mut state = AppState::for_tests();
            state.nav.push(router::resolve(*dest));
            for code in [
                KeyCode::Down,
                KeyCode::Right,
                KeyCode::Char(' '),
                KeyCode::Left,
                KeyCode::Down,
                KeyCode::Enter,
                KeyCode::Char('a'),
                KeyCode::Enter,
                KeyCode::Char('l'),
            ] {
                press(&mut state, code);
            }
            assert_eq!(top(&state), Some(*dest));
        }
    }
}
