//! Demonstration screens.
//!
//! Every demo is one small state struct implementing [`Demo`]:
//!
//! * a static table of [`Control`]s that read/write its fields,
//! * a projector ([`Projectable`]) that turns the state into source text,
//! * a preview drawn with ratatui primitives.
//!
//! [`DemoScreen`] wraps any demo with the selection/editing bookkeeping the UI
//! needs and exposes it through the object-safe [`ScreenView`] trait, which is
//! what the router hands out and what the snapshot harness rasterizes.

pub mod router;

mod badge;
mod bar_chart;
mod button;
mod capsule;
mod circle;
mod gauge;
mod label;
mod picker;
mod rectangle;
mod slider;
mod sparkline;
mod stepper;
mod text_field;
mod toggle;

pub use badge::BadgeDemo;
pub use bar_chart::BarChartDemo;
pub use button::{ButtonDemo, ButtonStyle};
pub use capsule::CapsuleDemo;
pub use circle::CircleDemo;
pub use gauge::GaugeDemo;
pub use label::LabelDemo;
pub use picker::PickerDemo;
pub use rectangle::RectangleDemo;
pub use slider::SliderDemo;
pub use sparkline::SparklineDemo;
pub use stepper::StepperDemo;
pub use text_field::TextFieldDemo;
pub use toggle::ToggleDemo;

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use crate::core::destination::Destination;
use crate::core::projector::Projectable;

// ───────────────────────────────────────── controls ──────────

/// One on-screen control bound to a field of the demo state `S`.
///
/// Controls carry plain function pointers so each demo can declare its whole
/// control panel as a `static` table.
pub enum Control<S> {
    /// Boolean switch.
    Toggle {
        label: &'static str,
        get: fn(&S) -> bool,
        set: fn(&mut S, bool),
    },
    /// Numeric value stepped by `step`, clamped to `min..=max`.
    Slider {
        label: &'static str,
        get: fn(&S) -> f64,
        set: fn(&mut S, f64),
        min: f64,
        max: f64,
        step: f64,
        format: fn(f64) -> String,
    },
    /// One of a fixed list of options (wraps around).
    Picker {
        label: &'static str,
        options: &'static [&'static str],
        get: fn(&S) -> usize,
        set: fn(&mut S, usize),
    },
    /// Free text of at most `max_len` characters.
    Text {
        label: &'static str,
        get: fn(&S) -> String,
        set: fn(&mut S, String),
        max_len: usize,
    },
}

impl<S> Control<S> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. }
            | Self::Slider { label, .. }
            | Self::Picker { label, .. }
            | Self::Text { label, .. } => label,
        }
    }

    /// Current value, formatted for the controls panel.
    pub fn value_text(&self, state: &S) -> String {
        match self {
            Self::Toggle { get, .. } => {
                let text = if get(state) { "[ON]" } else { "[OFF]" };
                text.to_string()
            }
            Self::Slider { get, format, .. } => format(get(state)),
            Self::Picker { options, get, .. } => options.get(get(state)).copied().unwrap_or("?").to_string(),
            Self::Text { get, .. } => format!("\"{}\"", get(state)),
        }
    }

    /// Step the control by `delta` (negative = left/decrease).
    pub fn adjust(&self, state: &mut S, delta: i32) {
        if delta == 0 {
            return;
        }
        match self {
            Self::Toggle { get, set, .. } => {
                let v = get(state);
                set(state, !v);
            }
            Self::Slider {
                get,
                set,
                min,
                max,
                step,
                ..
            } => {
                let raw = get(state) + step * f64::from(delta);
                set(state, snap(raw, *min, *max, *step));
            }
            Self::Picker {
                options, get, set, ..
            } => {
                if options.is_empty() {
                    return;
                }
                let len = options.len() as i64;
                let next = (get(state) as i64 + i64::from(delta)).rem_euclid(len);
                set(state, next as usize);
            }
            Self::Text { .. } => {}
        }
    }

    /// Enter/Space on a control.  Returns `true` when text editing should
    /// begin.
    pub fn activate(&self, state: &mut S) -> bool {
        match self {
            Self::Toggle { .. } | Self::Picker { .. } => {
                self.adjust(state, 1);
                false
            }
            Self::Slider { .. } => false,
            Self::Text { .. } => true,
        }
    }

    pub fn push_char(&self, state: &mut S, c: char) {
        if let Self::Text {
            get, set, max_len, ..
        } = self
        {
            let mut text = get(state);
            if text.chars().count() < *max_len && !c.is_control() {
                text.push(c);
                set(state, text);
            }
        }
    }

    pub fn pop_char(&self, state: &mut S) {
        if let Self::Text { get, set, .. } = self {
            let mut text = get(state);
            text.pop();
            set(state, text);
        }
    }
}

/// Clamp to the range and snap onto the `step` grid anchored at `min`, so
/// repeated stepping never accumulates float drift.
fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let clamped = value.clamp(min, max);
    if step <= 0.0 {
        return clamped;
    }
    let steps = ((clamped - min) / step).round();
    (min + steps * step).clamp(min, max)
}

// ───────────────────────────────────────── demo trait ────────

/// A demonstration: control state + projector + preview.
pub trait Demo: Projectable + Default + Clone + PartialEq + fmt::Debug + 'static {
    const DESTINATION: Destination;
    const TITLE: &'static str;
    /// One-line description shown under the title.
    const SUMMARY: &'static str;

    fn controls() -> &'static [Control<Self>];

    fn preview(&self, area: Rect, buf: &mut Buffer);
}

// ───────────────────────────────────────── screen view ───────

/// One row of the controls panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    pub label: &'static str,
    pub value: String,
    pub selected: bool,
    pub editing: bool,
}

/// Object-safe face of a screen, as seen by the router, UI and snapshot
/// harness.
pub trait ScreenView {
    fn destination(&self) -> Destination;
    fn title(&self) -> &'static str;
    fn summary(&self) -> &'static str;
    /// Projected source text for the current state.
    fn code(&self) -> String;
    fn render_preview(&self, area: Rect, buf: &mut Buffer);
    fn control_rows(&self) -> Vec<ControlRow>;
    fn move_selection(&mut self, delta: i32);
    fn select_control(&mut self, index: usize);
    /// Enter/Space on the selected control.
    fn activate(&mut self);
    /// Screen-local keys (adjust, text editing).  Returns `true` if consumed.
    fn handle_key(&mut self, key: KeyEvent) -> bool;
    fn is_editing(&self) -> bool;
    /// `true` while the state still equals the demo's `Default`.
    fn has_default_state(&self) -> bool;
}

/// Generic screen around a [`Demo`] state.
#[derive(Debug, Clone, Default)]
pub struct DemoScreen<S: Demo> {
    state: S,
    selected: usize,
    editing: bool,
}

impl<S: Demo> DemoScreen<S> {
    pub fn new() -> Self {
        Self {
            state: S::default(),
            selected: 0,
            editing: false,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn selected_control(&self) -> Option<&'static Control<S>> {
        S::controls().get(self.selected)
    }
}

impl<S: Demo> ScreenView for DemoScreen<S> {
    fn destination(&self) -> Destination {
        S::DESTINATION
    }

    fn title(&self) -> &'static str {
        S::TITLE
    }

    fn summary(&self) -> &'static str {
        S::SUMMARY
    }

    fn code(&self) -> String {
        self.state.project()
    }

    fn render_preview(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.state.preview(area, buf);
    }

    fn control_rows(&self) -> Vec<ControlRow> {
        S::controls()
            .iter()
            .enumerate()
            .map(|(i, control)| ControlRow {
                label: control.label(),
                value: control.value_text(&self.state),
                selected: i == self.selected,
                editing: i == self.selected && self.editing,
            })
            .collect()
    }

    fn move_selection(&mut self, delta: i32) {
        let count = S::controls().len();
        if count == 0 || self.editing {
            return;
        }
        let next = (self.selected as i64 + i64::from(delta)).clamp(0, count as i64 - 1);
        self.selected = next as usize;
    }

    fn select_control(&mut self, index: usize) {
        if index < S::controls().len() {
            self.selected = index;
            self.editing = false;
        }
    }

    fn activate(&mut self) {
        if self.editing {
            self.editing = false;
            return;
        }
        if let Some(control) = self.selected_control() {
            self.editing = control.activate(&mut self.state);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(control) = self.selected_control() else {
            return false;
        };

        if self.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                KeyCode::Backspace => control.pop_char(&mut self.state),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    control.push_char(&mut self.state, c)
                }
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => control.adjust(&mut self.state, -1),
            KeyCode::Right | KeyCode::Char('l') => control.adjust(&mut self.state, 1),
            KeyCode::Char(' ') => self.activate(),
            _ => return false,
        }
        true
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn has_default_state(&self) -> bool {
        self.state == S::default()
    }
}

// ───────────────────────────────────────── shared palette ────

/// Accent colours offered by the demos' tint pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
}

impl Tint {
    pub const ALL: &'static [Tint] = &[
        Tint::Blue,
        Tint::Cyan,
        Tint::Green,
        Tint::Magenta,
        Tint::Red,
        Tint::Yellow,
    ];

    /// Picker labels, index-aligned with [`Tint::ALL`].
    pub const LABELS: &'static [&'static str] = &["Blue", "Cyan", "Green", "Magenta", "Red", "Yellow"];

    pub fn name(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Self {
        Self::ALL.get(i).copied().unwrap_or_default()
    }

    pub fn color(self) -> Color {
        match self {
            Tint::Blue => Color::Blue,
            Tint::Cyan => Color::Cyan,
            Tint::Green => Color::Green,
            Tint::Magenta => Color::Magenta,
            Tint::Red => Color::Red,
            Tint::Yellow => Color::Yellow,
        }
    }
}

/// Centre a `width`×`height` box inside `area` (clamped to it).
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Paint a `width`×`height` cell shape centred in `area` with solid blocks.
///
/// `inside` is asked about cell centres in shape-local coordinates
/// (`0.0..width`, `0.0..height`).  With `outline_only` set, only cells that
/// have a horizontal or vertical neighbour outside the shape are painted.
/// Cells falling outside `area` are clipped.
pub fn paint_shape(
    area: Rect,
    buf: &mut Buffer,
    (width, height): (u16, u16),
    color: Color,
    outline_only: bool,
    inside: impl Fn(f64, f64) -> bool,
) {
    let ox = i32::from(area.x) + (i32::from(area.width) - i32::from(width)) / 2;
    let oy = i32::from(area.y) + (i32::from(area.height) - i32::from(height)) / 2;
    let hit = |sx: i32, sy: i32| {
        sx >= 0
            && sy >= 0
            && sx < i32::from(width)
            && sy < i32::from(height)
            && inside(f64::from(sx) + 0.5, f64::from(sy) + 0.5)
    };

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let sx = i32::from(x) - ox;
            let sy = i32::from(y) - oy;
            if !hit(sx, sy) {
                continue;
            }
            let edge = !hit(sx - 1, sy) || !hit(sx + 1, sy) || !hit(sx, sy - 1) || !hit(sx, sy + 1);
            if outline_only && !edge {
                continue;
            }
            buf[(x, y)].set_symbol("█").set_fg(color);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// States reachable by stepping each control through its range, starting
    /// from the default (capped so slider-heavy demos stay fast).
    pub fn reachable_states<S: Demo>() -> Vec<S> {
        const LIMIT: usize = 600;
        let mut states = vec![S::default()];
        for control in S::controls() {
            let bases = states.clone();
            for base in bases {
                for delta in [1, -1] {
                    let mut s = base.clone();
                    for _ in 0..40 {
                        control.adjust(&mut s, delta);
                        if !states.contains(&s) {
                            if states.len() >= LIMIT {
                                return states;
                            }
                            states.push(s.clone());
                        }
                    }
                }
            }
        }
        states
    }

    /// Projection is pure and never panics for reachable states; the preview
    /// draws without panicking at small and large sizes.
    pub fn check_demo<S: Demo>() {
        for state in reachable_states::<S>() {
            let a = state.project();
            let b = state.project();
            assert_eq!(a, b, "projector not deterministic for {state:?}");
            assert!(!a.is_empty());
            for (w, h) in [(1, 1), (12, 4), (48, 20), (120, 40)] {
                let area = Rect::new(0, 0, w, h);
                let mut buf = Buffer::empty(area);
                state.preview(area, &mut buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn snap_clamps_and_aligns() {
        assert_eq!(snap(105.0, 0.0, 100.0, 5.0), 100.0);
        assert_eq!(snap(-3.0, 0.0, 100.0, 5.0), 0.0);
        let mut v = 0.0;
        for _ in 0..6 {
            v = snap(v + 0.05, 0.0, 1.0, 0.05);
        }
        assert!((v - 0.3).abs() < 1e-9);
    }

    #[test]
    fn new_screen_starts_from_default_state() {
        let screen = DemoScreen::<ButtonDemo>::new();
        assert!(screen.has_default_state());
        assert_eq!(screen.state(), &ButtonDemo::default());
        assert!(!screen.is_editing());
    }

    #[test]
    fn arrows_adjust_the_selected_control() {
        let mut screen = DemoScreen::<ButtonDemo>::new();
        let before = screen.code();
        screen.move_selection(1);
        assert!(screen.handle_key(key(KeyCode::Right)));
        assert!(!screen.has_default_state());
        assert_ne!(screen.code(), before);
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = DemoScreen::<ButtonDemo>::new();
        screen.move_selection(-5);
        assert!(screen.control_rows()[0].selected);
        screen.move_selection(100);
        let rows = screen.control_rows();
        assert!(rows.last().is_some_and(|r| r.selected));
    }

    #[test]
    fn text_controls_enter_edit_mode() {
        let mut screen = DemoScreen::<ButtonDemo>::new();
        screen.select_control(0);
        screen.activate();
        assert!(screen.is_editing());
        for _ in 0.."Continue".len() {
            screen.handle_key(key(KeyCode::Backspace));
        }
        for c in "Go".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
        assert!(screen.handle_key(key(KeyCode::Enter)));
        assert!(!screen.is_editing());
        assert_eq!(screen.state().label, "Go");
    }

    #[test]
    fn editing_swallows_navigation_keys() {
        let mut screen = DemoScreen::<ButtonDemo>::new();
        screen.activate();
        screen.move_selection(1);
        assert!(screen.control_rows()[0].editing);
        assert!(screen.handle_key(key(KeyCode::Char('l'))));
        assert!(screen.state().label.ends_with('l'));
    }

    #[test]
    fn unhandled_keys_fall_through() {
        let mut screen = DemoScreen::<ButtonDemo>::new();
        assert!(!screen.handle_key(key(KeyCode::Char('y'))));
    }

    #[test]
    fn tint_labels_line_up() {
        for (i, t) in Tint::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(Tint::from_index(i), *t);
        }
        assert_eq!(Tint::LABELS.len(), Tint::ALL.len());
    }
}
