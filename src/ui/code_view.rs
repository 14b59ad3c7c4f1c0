//! Read-only view of the projected source text.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::projector::strip_comments;
use crate::ui::theme::Theme;

/// Display options for the code view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeViewConfig {
    pub show_comments: bool,
}

impl Default for CodeViewConfig {
    fn default() -> Self {
        Self {
            show_comments: true,
        }
    }
}

/// The text the code view shows, and what "copy code" copies.
pub fn displayed_text(code: &str, config: CodeViewConfig) -> String {
    if config.show_comments {
        code.to_string()
    } else {
        strip_comments(code)
    }
}

pub struct CodeView<'a> {
    text: &'a str,
    /// First visible line.
    offset: usize,
}

impl<'a> CodeView<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl<'a> Widget for CodeView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<&str> = self.text.lines().collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .title(Span::styled(" Code ", Theme::title_style()))
            .title(Line::from(format!(" {} lines ", lines.len())).right_aligned());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let visible = inner.height as usize;
        let offset = self.offset.min(lines.len().saturating_sub(visible));
        // Leave the last column for the scrollbar when it is drawn.
        let text_width = if lines.len() > visible {
            inner.width.saturating_sub(1)
        } else {
            inner.width
        };

        for (i, line) in lines.iter().skip(offset).take(visible).enumerate() {
            let style = if line.trim_start().starts_with("//") {
                Theme::comment_style()
            } else {
                Theme::code_style()
            };
            buf.set_stringn(inner.x, inner.y + i as u16, line, text_width as usize, style);
        }

        render_scrollbar(inner, lines.len(), offset, visible, buf);
    }
}

fn render_scrollbar(area: Rect, total: usize, offset: usize, visible: usize, buf: &mut Buffer) {
    if total <= visible || area.height < 2 || area.width == 0 {
        return;
    }
    let x = area.x + area.width.saturating_sub(1);
    let h = area.height as f64;
    let thumb_sz = ((visible as f64 / total as f64) * h).ceil().max(1.0) as u16;
    let max_off = total.saturating_sub(visible) as f64;
    let thumb_pos = if max_off > 0.0 {
        ((offset as f64 / max_off) * (h - thumb_sz as f64)).round() as u16
    } else {
        0
    };

    for row in 0..area.height {
        let is_thumb = row >= thumb_pos && row < thumb_pos + thumb_sz;
        let (ch, fg) = if is_thumb {
            ('█', Color::LightBlue)
        } else {
            ('│', Color::DarkGray)
        };
        if let Some(cell) = buf.cell_mut(Position::new(x, area.y + row)) {
            cell.set_char(ch).set_fg(fg);
        }
    }
}
