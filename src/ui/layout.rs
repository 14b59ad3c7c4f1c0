//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this width the screen page stacks its panels vertically.
pub const WIDE_MIN_WIDTH: u16 = 80;

/// Primary screen layout: search bar, body and a bottom status bar.
pub struct AppLayout {
    pub search_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Catalog view: search bar on top of the list.
    pub fn catalog(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search bar
                Constraint::Min(3),    // catalog list
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            search_area: chunks[0],
            body_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Screen view: the page takes everything but the status bar.
    pub fn screen(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        Self {
            search_area: Rect::new(area.x, area.y, area.width, 0),
            body_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// Regions of one demo screen page (inside its outer border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub summary: Rect,
    pub preview: Rect,
    pub controls: Rect,
    pub code: Rect,
}

impl PageLayout {
    /// `control_count` rows are reserved for the controls panel (plus its
    /// border).
    pub fn from_area(area: Rect, control_count: usize) -> Self {
        let controls_height = control_count as u16 + 2;
        let [summary, rest] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .areas(area);

        if area.width >= WIDE_MIN_WIDTH {
            let [left, code] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(rest);
            let [preview, controls] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(controls_height)])
                .areas(left);
            Self {
                summary,
                preview,
                controls,
                code,
            }
        } else {
            let [preview, controls, code] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(controls_height),
                    Constraint::Fill(1),
                ])
                .areas(rest);
            Self {
                summary,
                preview,
                controls,
                code,
            }
        }
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.right() && row >= area.y && row < area.bottom()
}
