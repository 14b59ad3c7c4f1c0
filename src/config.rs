//! User configuration — keybindings, preferences and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/widget-catalog/config.toml` (default
//! `~/.config/widget-catalog/config.toml`).  Unknown keys and malformed values
//! are skipped so a hand-edited file never prevents start-up.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::snapshot::{LogicalSize, RenderRequest, DEFAULT_SCALE, DEFAULT_SIZE};

// ───────────────────────────────────────── actions ───────────

/// All rebindable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Open,
    Back,
    FocusSearch,
    CopyCode,
    ToggleComments,
    Snapshot,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &'static [Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Open,
        Action::Back,
        Action::FocusSearch,
        Action::CopyCode,
        Action::ToggleComments,
        Action::Snapshot,
        Action::OpenSettings,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Move Up",
            Action::MoveDown => "Move Down",
            Action::Open => "Open / Activate",
            Action::Back => "Back",
            Action::FocusSearch => "Search",
            Action::CopyCode => "Copy Code",
            Action::ToggleComments => "Toggle Comments",
            Action::Snapshot => "Save Snapshot",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Open => "open",
            Action::Back => "back",
            Action::FocusSearch => "focus_search",
            Action::CopyCode => "copy_code",
            Action::ToggleComments => "toggle_comments",
            Action::Snapshot => "snapshot",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & MODIFIER_MASK,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Config-file form (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, prefixes) = parts.split_last()?;

        for part in prefixes {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let lower = key_part.to_lowercase();
        let code = match lower.as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
            // Single characters keep their case (`?` and `Y` are distinct keys).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── preferences ───────

/// Persisted, non-binding preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Show comments in the generated code view.
    pub show_comments: bool,
    pub snapshot_size: LogicalSize,
    pub snapshot_scale: f32,
    /// `None` means the fixed temp location.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_comments: true,
            snapshot_size: DEFAULT_SIZE,
            snapshot_scale: DEFAULT_SCALE,
            snapshot_path: None,
        }
    }
}

impl Preferences {
    /// Render request built from these preferences.
    pub fn render_request(&self) -> RenderRequest {
        let request = match &self.snapshot_path {
            Some(path) => RenderRequest::new(path),
            None => RenderRequest::default(),
        };
        request.size(self.snapshot_size).scale(self.snapshot_scale)
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and preferences.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub prefs: Preferences,
    /// Where [`AppConfig::save`] writes; `None` disables persistence.
    path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            prefs: Preferences::default(),
            path: None,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Open, vec![KeyBind::new(Enter, n)]);
        m.insert(Back, vec![KeyBind::new(Esc, n), KeyBind::new(KeyCode::Backspace, n)]);
        m.insert(FocusSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(CopyCode, vec![KeyBind::new(Char('y'), n)]);
        m.insert(ToggleComments, vec![KeyBind::new(Char('c'), n)]);
        m.insert(Snapshot, vec![KeyBind::new(Char('s'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action bound to a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let count = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, c)| count > c) {
                    best = Some((action, count));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Add a binding for `action`, stealing the key from any other action.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn clear_bindings(&mut self, action: Action) {
        self.bindings.remove(&action);
    }

    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "-".into(),
        }
    }

    /// Status-bar hint for the catalog list.
    pub fn catalog_hint(&self) -> String {
        format!(
            "{}: open | {}: search | {}: settings | {}: quit",
            self.short_binding(Action::Open),
            self.short_binding(Action::FocusSearch),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    /// Status-bar hint for a demo screen.
    pub fn screen_hint(&self) -> String {
        format!(
            "←/→: adjust | {}: back | {}: copy | {}: comments | {}: snapshot",
            self.short_binding(Action::Back),
            self.short_binding(Action::CopyCode),
            self.short_binding(Action::ToggleComments),
            self.short_binding(Action::Snapshot),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    /// Load from `path`.  A missing or unreadable file yields defaults that
    /// will still be saved to `path`.
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
                }
                Self::default()
            }
        };
        config.path = Some(path);
        config
    }

    /// Persist to the path this config was loaded from.
    pub fn save(&self) -> anyhow::Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn parse_config(s: &str) -> Self {
        let mut config = Self::default();
        let prefs = &mut config.prefs;

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "show_comments" => {
                    if let Ok(v) = value.parse() {
                        prefs.show_comments = v;
                    }
                    continue;
                }
                "snapshot_scale" => {
                    if let Ok(v) = value.parse::<f32>() {
                        if v.is_finite() && v > 0.0 {
                            prefs.snapshot_scale = v.min(8.0);
                        }
                    }
                    continue;
                }
                "snapshot_width" => {
                    if let Ok(v) = value.parse::<u32>() {
                        prefs.snapshot_size.width = v.clamp(1, 4096);
                    }
                    continue;
                }
                "snapshot_height" => {
                    if let Ok(v) = value.parse::<u32>() {
                        prefs.snapshot_size.height = v.clamp(1, 4096);
                    }
                    continue;
                }
                "snapshot_path" => {
                    let v = value.trim_matches('"');
                    prefs.snapshot_path = (!v.is_empty()).then(|| PathBuf::from(v));
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let prefs = &self.prefs;
        let mut lines = vec![
            "# widget-catalog configuration".to_string(),
            String::new(),
            "# Preferences".to_string(),
            format!("show_comments = {}", prefs.show_comments),
            format!("snapshot_scale = {}", prefs.snapshot_scale),
            format!("snapshot_width = {}", prefs.snapshot_size.width),
            format!("snapshot_height = {}", prefs.snapshot_size.height),
        ];
        if let Some(path) = &prefs.snapshot_path {
            lines.push(format!("snapshot_path = \"{}\"", path.display()));
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/widget-catalog/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("widget-catalog").join("config.toml")
}
