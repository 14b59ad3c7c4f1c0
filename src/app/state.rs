//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    catalog::Catalog,
    destination::Destination,
    navigation::NavStack,
    search::{search, SearchResult},
    snapshot::{Snapshot, SnapshotError, SnapshotHarness},
};
use crate::screens::{router, ScreenView};
use crate::shell::clipboard::Clipboard;
use crate::ui::{
    catalog_list::{build_rows, item_destination, CatalogListState, CatalogRow},
    code_view::{displayed_text, CodeViewConfig},
    raster::CellRasterizer,
};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// Catalog list, or the demo screen on top of the navigation stack.
    #[default]
    Browse,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    pub catalog: &'static Catalog,
    /// Current search text (trimmed when matching).
    pub query: String,
    /// `true` while keystrokes go to the search bar.
    pub search_focused: bool,
    pub list_state: CatalogListState,
    /// Open demo screens; empty means the catalog list is showing.
    pub nav: NavStack<Box<dyn ScreenView>>,
    /// First visible line of the code view on the current screen.
    pub code_scroll: usize,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Keybindings and preferences.
    pub config: AppConfig,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    pub clipboard: Box<dyn Clipboard>,
    /// Last drawn terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(catalog: &'static Catalog, config: AppConfig, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            catalog,
            query: String::new(),
            search_focused: false,
            list_state: CatalogListState::default(),
            nav: NavStack::new(),
            code_scroll: 0,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            config,
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            clipboard,
            terminal_area: Rect::default(),
        }
    }

    // ── catalog ─────────────────────────────────────────────────

    /// Search results for the current query.
    pub fn results(&self) -> Vec<SearchResult<'static>> {
        search(self.catalog, &self.query)
    }

    pub fn rows(&self) -> Vec<CatalogRow> {
        build_rows(&self.results())
    }

    /// Destination of the highlighted catalog item, if any are listed.
    pub fn selected_destination(&self) -> Option<Destination> {
        item_destination(&self.rows(), self.list_state.selected)
    }

    /// Re-clamp the selection after the query changed.
    pub fn query_changed(&mut self) {
        let count = crate::core::search::result_item_count(&self.results());
        self.list_state.selected = 0;
        self.list_state.offset = 0;
        self.list_state.clamp_selection(count);
    }

    // ── navigation ──────────────────────────────────────────────

    /// Push a freshly built screen for `destination`.
    pub fn open(&mut self, destination: Destination) {
        let category = self.catalog.item_for(destination).map(|(c, _)| c.name);
        tracing::debug!(%destination, ?category, depth = self.nav.depth() + 1, "open screen");
        self.nav.push(router::resolve(destination));
        self.code_scroll = 0;
        self.search_focused = false;
        self.status_message = None;
    }

    /// Pop the top screen.  Its state is dropped with it.
    pub fn back(&mut self) {
        if let Some(screen) = self.nav.pop() {
            tracing::debug!(destination = %screen.destination(), "close screen");
        }
        self.code_scroll = 0;
        self.status_message = None;
    }

    pub fn current_screen(&self) -> Option<&(dyn ScreenView + 'static)> {
        self.nav.top().map(|s| &**s)
    }

    // ── screen actions ──────────────────────────────────────────

    pub fn code_config(&self) -> CodeViewConfig {
        CodeViewConfig {
            show_comments: self.config.prefs.show_comments,
        }
    }

    /// The code currently visible in the code view.
    pub fn displayed_code(&self) -> Option<String> {
        self.current_screen()
            .map(|screen| displayed_text(&screen.code(), self.code_config()))
    }

    pub fn copy_code(&mut self) {
        let Some(code) = self.displayed_code() else {
            return;
        };
        self.status_message = Some(match self.clipboard.copy(&code) {
            Ok(method) => format!("Copied {} lines {}", code.lines().count(), method.describe()),
            Err(err) => {
                tracing::warn!(error = %err, "copy failed");
                format!("Copy failed: {err}")
            }
        });
    }

    pub fn toggle_comments(&mut self) {
        self.config.prefs.show_comments = !self.config.prefs.show_comments;
        self.code_scroll = 0;
        self.save_config();
        let shown = if self.config.prefs.show_comments { "shown" } else { "hidden" };
        self.status_message = Some(format!("Comments {shown}"));
    }

    /// Render the current screen to a PNG using the snapshot preferences.
    pub fn snapshot(&mut self) -> Option<Result<Snapshot, SnapshotError>> {
        let screen = self.current_screen()?;
        let request = self.config.prefs.render_request();
        let harness = SnapshotHarness::new(CellRasterizer::new(self.code_config()));
        let result = harness.render(screen, &request);
        self.status_message = Some(match &result {
            Ok(snap) => format!(
                "Snapshot {}×{} written to {}",
                snap.width,
                snap.height,
                snap.path.display()
            ),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot failed");
                format!("Snapshot failed: {err}")
            }
        });
        Some(result)
    }

    /// Persist the config, reporting failures in the status bar.
    pub fn save_config(&mut self) {
        if let Err(err) = self.config.save() {
            tracing::warn!(error = %err, "failed to save config");
            self.status_message = Some(format!("Could not save settings: {err}"));
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(
            Catalog::builtin(),
            AppConfig::default(),
            Box::new(crate::shell::clipboard::MemoryClipboard::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Level;

    use super::*;

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn navigation_log(level: Level) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut state = AppState::for_tests();
            state.open(Destination::Gauge);
            state.back();
        });
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn navigation_logs_at_debug_level() {
        let debug = navigation_log(Level::DEBUG);
        assert!(debug.contains("open screen"), "{debug}");
        assert!(debug.contains("close screen"), "{debug}");

        let info = navigation_log(Level::INFO);
        assert!(!info.contains("open screen"), "{info}");
        assert!(!info.contains("close screen"), "{info}");
    }

    #[test]
    fn starts_on_the_catalog() {
        let state = AppState::for_tests();
        assert!(state.nav.is_empty());
        assert_eq!(state.selected_destination(), Some(Destination::BarChart));
    }

    #[test]
    fn open_and_back_walk_the_stack() {
        let mut state = AppState::for_tests();
        state.open(Destination::Toggle);
        assert_eq!(state.current_screen().map(|s| s.destination()), Some(Destination::Toggle));
        state.back();
        assert!(state.current_screen().is_none());
        state.back();
        assert!(state.nav.is_empty());
    }

    #[test]
    fn query_change_resets_selection() {
        let mut state = AppState::for_tests();
        state.list_state.selected = 5;
        state.query = "slid".into();
        state.query_changed();
        assert_eq!(state.selected_destination(), Some(Destination::Slider));
        state.query = "nothing-here".into();
        state.query_changed();
        assert_eq!(state.selected_destination(), None);
    }

    #[test]
    fn displayed_code_follows_comment_preference() {
        let mut state = AppState::for_tests();
        state.open(Destination::Button);
        let with = state.displayed_code().expect("screen open");
        assert!(with.contains("//"));
        state.toggle_comments();
        let without = state.displayed_code().expect("screen open");
        assert!(!without.contains("//"));
    }
}
