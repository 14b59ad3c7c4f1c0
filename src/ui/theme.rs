//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── catalog list ───────────────────────────────────────────
    pub fn category_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── code view ──────────────────────────────────────────────
    pub fn code_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn comment_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    // ── controls panel ─────────────────────────────────────────
    pub fn control_value_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn editing_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn search_input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
