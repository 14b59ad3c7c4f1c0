//! A terminal catalog of widget demos.
//!
//! Browse the catalog, open a demo, tweak its controls and watch the preview
//! and the generated code update live.  Run with `--search` to print the
//! catalog, or with `--snapshot`/`--all` to render demos to PNG files.

mod app;
mod config;
mod core;
mod screens;
mod shell;
mod ui;

use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, BorderType, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    batch,
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::{
    catalog::Catalog,
    destination::Destination,
    search::result_item_count,
    snapshot::{LogicalSize, RenderRequest},
};
use crate::shell::clipboard::SystemClipboard;
use crate::ui::{
    catalog_list::CatalogList,
    layout::AppLayout,
    popup,
    screen_page::ScreenPage,
    search::SearchBar,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal catalog of widget demos")]
struct Cli {
    /// Start with this screen open (e.g. `button`, `bar-chart`).
    #[arg(long, value_name = "ID")]
    open: Option<Destination>,

    /// Print the catalog filtered by QUERY and exit.
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Render this screen (default state) to a PNG and exit.
    #[arg(long, value_name = "ID", conflicts_with = "all")]
    snapshot: Option<Destination>,

    /// Render every screen to `<out>/<id>.png` and exit.
    #[arg(long, requires = "out")]
    all: bool,

    /// Output file for `--snapshot`, directory for `--all`.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Snapshot width in logical points.
    #[arg(long, value_name = "PT")]
    width: Option<u32>,

    /// Snapshot height in logical points.
    #[arg(long, value_name = "PT")]
    height: Option<u32>,

    /// Pixels per logical point.
    #[arg(long)]
    scale: Option<f32>,
}

impl Cli {
    /// Snapshot request: config preferences, overridden by flags.
    fn render_request(&self, config: &AppConfig) -> RenderRequest {
        let prefs = &config.prefs;
        let mut request = prefs.render_request().size(LogicalSize::new(
            self.width.unwrap_or(prefs.snapshot_size.width),
            self.height.unwrap_or(prefs.snapshot_size.height),
        ));
        if let Some(scale) = self.scale {
            request = request.scale(scale);
        }
        if let Some(out) = &self.out {
            request.path = out.clone();
        }
        request
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();
    let catalog = Catalog::builtin();

    // ── non-interactive modes ─────────────────────────────────
    if let Some(query) = &cli.search {
        let mut out = io::stdout().lock();
        batch::print_search(catalog, query, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let code = ui::code_view::CodeViewConfig {
        show_comments: config.prefs.show_comments,
    };
    if cli.all {
        let request = cli.render_request(&config);
        let dir = request.path.clone();
        let written = batch::write_snapshots(Destination::ALL, &dir, &request, code)?;
        for snap in &written {
            println!("{}", snap.path.display());
        }
        return Ok(());
    }
    if let Some(destination) = cli.snapshot {
        let request = cli.render_request(&config);
        let screen = screens::router::resolve(destination);
        let harness = core::snapshot::SnapshotHarness::new(ui::raster::CellRasterizer::new(code));
        let snap = harness.render(screen.as_ref(), &request)?;
        println!("{}", snap.path.display());
        return Ok(());
    }

    // ── interactive mode ──────────────────────────────────────
    let mut state = AppState::new(catalog, config, Box::new(SystemClipboard));
    if let Some(destination) = cli.open {
        state.open(destination);
    }
    run_tui(&mut state).await
}

async fn run_tui(state: &mut AppState) -> Result<()> {
    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(250));

    // ── event loop ────────────────────────────────────────────
    let result = loop {
        if let Err(err) = terminal.draw(|frame| draw(frame, state)) {
            break Err(err.into());
        }

        let Some(event) = events.recv().await else {
            break Ok(());
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m),
            AppEvent::Resize(_, _) => {}
            AppEvent::Tick => {}
        }

        if state.should_quit {
            break Ok(());
        }
    };

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn draw(frame: &mut ratatui::Frame, state: &mut AppState) {
    state.terminal_area = frame.area();
    let code_config = state.code_config();

    let status_area = if let Some(screen) = state.current_screen() {
        let layout = AppLayout::screen(frame.area());
        frame.render_widget(
            ScreenPage::new(screen, code_config).code_offset(state.code_scroll),
            layout.body_area,
        );
        layout.status_area
    } else {
        let layout = AppLayout::catalog(frame.area());
        let results = state.results();
        let rows = ui::catalog_list::build_rows(&results);

        frame.render_widget(
            SearchBar {
                query: &state.query,
                has_focus: state.search_focused,
                matches: result_item_count(&results),
            },
            layout.search_area,
        );

        let list_block = Block::default()
            .title(format!(
                " Widgets {}/{} ",
                result_item_count(&results),
                state.catalog.item_count()
            ))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        frame.render_stateful_widget(
            CatalogList::new(&rows, &state.query).block(list_block),
            layout.body_area,
            &mut state.list_state,
        );
        layout.status_area
    };

    let hint = if state.nav.is_empty() {
        state.config.catalog_hint()
    } else {
        state.config.screen_hint()
    };
    let status_text = match state.active_view {
        ActiveView::Browse => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, status_area);

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state }, frame.area());
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Browse => {}
    }
}
