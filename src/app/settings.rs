//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};
use crate::core::snapshot::LogicalSize;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value shown after the label (empty for submenus).
    pub fn value_text(&self, state: &AppState) -> String {
        match self {
            Self::Submenu { .. } => String::new(),
            Self::Toggle { get, .. } => {
                let text = if get(state) { "[ON]" } else { "[OFF]" };
                text.to_string()
            }
            Self::Cycle { value, .. } => value(state),
        }
    }
}

const SCALES: &[f32] = &[1.0, 2.0, 3.0];

const SIZES: &[LogicalSize] = &[
    LogicalSize::new(393, 852),
    LogicalSize::new(430, 932),
    LogicalSize::new(375, 667),
];

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Show Comments",
        get: |s| s.config.prefs.show_comments,
        set: |s, v| {
            s.config.prefs.show_comments = v;
            s.save_config();
        },
    },
    SettingsItem::Cycle {
        label: "Snapshot Scale",
        value: |s| format!("@{}x", s.config.prefs.snapshot_scale),
        cycle: |s| {
            let current = s.config.prefs.snapshot_scale;
            let idx = SCALES.iter().position(|&v| v == current).unwrap_or(0);
            let next = SCALES[(idx + 1) % SCALES.len()];
            s.config.prefs.snapshot_scale = next;
            s.save_config();
            s.status_message = Some(format!("Snapshot scale: @{next}x"));
        },
    },
    SettingsItem::Cycle {
        label: "Snapshot Size",
        value: |s| {
            let size = s.config.prefs.snapshot_size;
            format!("{}×{}", size.width, size.height)
        },
        cycle: |s| {
            let current = s.config.prefs.snapshot_size;
            let idx = SIZES.iter().position(|&v| v == current).unwrap_or(0);
            let next = SIZES[(idx + 1) % SIZES.len()];
            s.config.prefs.snapshot_size = next;
            s.save_config();
            s.status_message = Some(format!("Snapshot size: {}×{}", next.width, next.height));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(label: &str, state: &mut AppState) {
        let item = SETTINGS_ITEMS
            .iter()
            .find(|i| i.label() == label)
            .expect("settings item exists");
        match item {
            SettingsItem::Cycle { cycle, .. } => cycle(state),
            _ => panic!("{label} is not a cycle item"),
        }
    }

    #[test]
    fn scale_cycles_and_wraps() {
        let mut state = AppState::for_tests();
        assert_eq!(state.config.prefs.snapshot_scale, 2.0);
        cycle("Snapshot Scale", &mut state);
        assert_eq!(state.config.prefs.snapshot_scale, 3.0);
        cycle("Snapshot Scale", &mut state);
        assert_eq!(state.config.prefs.snapshot_scale, 1.0);
    }

    #[test]
    fn size_cycles_through_presets() {
        let mut state = AppState::for_tests();
        cycle("Snapshot Size", &mut state);
        assert_eq!(state.config.prefs.snapshot_size, LogicalSize::new(430, 932));
        assert_eq!(SETTINGS_ITEMS[3].value_text(&state), "430×932");
    }

    #[test]
    fn comments_toggle_shows_state() {
        let mut state = AppState::for_tests();
        let item = &SETTINGS_ITEMS[1];
        assert_eq!(item.value_text(&state), "[ON]");
        if let SettingsItem::Toggle { set, .. } = item {
            set(&mut state, false);
        }
        assert_eq!(item.value_text(&state), "[OFF]");
        assert!(!state.config.prefs.show_comments);
    }
}
