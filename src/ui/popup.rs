//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};
use crate::screens::centered;

fn popup_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn row_style(selected: bool) -> (&'static str, Style) {
    if selected {
        (
            " ▸ ",
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("   ", Style::default().fg(Color::White))
    }
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = row_style(i == self.state.settings_selected);
            let value = item.value_text(self.state);
            let value_style = match item {
                SettingsItem::Toggle { get, .. } if get(self.state) => Style::default().fg(Color::Green),
                SettingsItem::Toggle { .. } => Style::default().fg(Color::DarkGray),
                _ => Style::default().fg(Color::Yellow),
            };

            let label_col = format!("{prefix}{:<18}", item.label());
            if value.is_empty() {
                lines.push(Line::from(Span::styled(format!("{label_col}›"), style)));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(label_col, style),
                    Span::styled(value, value_style),
                ]));
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Interactive controls / keybinding popup overlay.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Action rows + 2 blanks + reset + hint + 2 border + 1 spare.
        let height = (Action::ALL.len() as u16) + 7;
        let popup = centered(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        lines.push(Line::raw(""));

        // ── Action rows ─────────────────────────────────────────
        for (i, &action) in Action::ALL.iter().enumerate() {
            let is_selected = i == self.selected;
            let (prefix, base_style) = row_style(is_selected);

            let keys_display = if is_selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };

            let key_style = if is_selected && self.awaiting_rebind {
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            };

            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, base_style),
                Span::styled(keys_col, key_style),
            ]));
        }

        // ── Reset option ────────────────────────────────────────
        let (reset_prefix, reset_style) = row_style(self.selected == Action::ALL.len());
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{reset_prefix}⟳ Reset to defaults"),
            reset_style,
        )));

        // ── Hint bar ────────────────────────────────────────────
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  ←: back  Esc: close",
            dim,
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn settings_show_current_values() {
        let state = AppState::for_tests();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SettingsPopup { state: &state }.render(area, &mut buf);
        let text = text(&buf);
        assert!(text.contains("Show Comments"));
        assert!(text.contains("[ON]"));
        assert!(text.contains("@2x"));
        assert!(text.contains("393×852"));
    }

    #[test]
    fn controls_list_bindings_and_rebind_prompt() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: true,
        }
        .render(area, &mut buf);
        let text = text(&buf);
        assert!(text.contains("Press a key…"));
        assert!(text.contains("Reset to defaults"));
        assert!(text.contains(Action::Quit.label()));
    }
}
