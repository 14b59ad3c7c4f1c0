//! Search bar above the catalog list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

pub struct SearchBar<'a> {
    pub query: &'a str,
    pub has_focus: bool,
    /// Number of items currently listed.
    pub matches: usize,
}

impl<'a> Widget for SearchBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.has_focus {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" Search ", Theme::title_style()))
            .title_bottom(Line::from(format!(" {} ", match_label(self.matches))).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled("/ ", Style::default().add_modifier(Modifier::BOLD))];
        if self.query.is_empty() && !self.has_focus {
            spans.push(Span::styled("press / to filter", Theme::hint_style()));
        } else {
            spans.push(Span::styled(
                self.query.to_string(),
                Theme::search_input_style().add_modifier(Modifier::UNDERLINED),
            ));
            if self.has_focus {
                spans.push(Span::styled("▏", Theme::search_input_style()));
            }
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

fn match_label(count: usize) -> String {
    match count {
        0 => "No matches".to_string(),
        1 => "1 widget".to_string(),
        n => format!("{n} widgets"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn shows_hint_when_idle() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SearchBar {
            query: "",
            has_focus: false,
            matches: 14,
        }
        .render(area, &mut buf);
        assert!(row(&buf, 1).contains("press / to filter"));
        assert!(row(&buf, 2).contains("14 widgets"));
    }

    #[test]
    fn shows_query_and_cursor_when_focused() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        SearchBar {
            query: "but",
            has_focus: true,
            matches: 1,
        }
        .render(area, &mut buf);
        assert!(row(&buf, 1).contains("/ but▏"));
        assert!(row(&buf, 2).contains("1 widget"));
    }

    #[test]
    fn match_label_pluralises() {
        assert_eq!(match_label(0), "No matches");
        assert_eq!(match_label(2), "2 widgets");
    }
}
