//! Full page for one demo screen: summary, live preview, controls panel and
//! generated code.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::screens::{ControlRow, ScreenView};

use super::code_view::{displayed_text, CodeView, CodeViewConfig};
use super::layout::PageLayout;
use super::theme::Theme;

pub struct ScreenPage<'a> {
    view: &'a dyn ScreenView,
    code: CodeViewConfig,
    code_offset: usize,
}

impl<'a> ScreenPage<'a> {
    pub fn new(view: &'a dyn ScreenView, code: CodeViewConfig) -> Self {
        Self {
            view,
            code,
            code_offset: 0,
        }
    }

    pub fn code_offset(mut self, offset: usize) -> Self {
        self.code_offset = offset;
        self
    }
}

/// Outer frame of a page, titled with the screen name.
pub fn page_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .title(Span::styled(format!(" {title} "), Theme::title_style()))
}

impl<'a> Widget for ScreenPage<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = page_block(self.view.title());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let rows = self.view.control_rows();
        let layout = PageLayout::from_area(inner, rows.len());

        buf.set_stringn(
            layout.summary.x,
            layout.summary.y,
            self.view.summary(),
            layout.summary.width as usize,
            Theme::hint_style(),
        );

        let preview_block = panel(" Preview ");
        let preview_inner = preview_block.inner(layout.preview);
        preview_block.render(layout.preview, buf);
        self.view.render_preview(preview_inner, buf);

        render_controls(&rows, layout.controls, buf);

        let code = displayed_text(&self.view.code(), self.code);
        CodeView::new(&code)
            .offset(self.code_offset)
            .render(layout.code, buf);
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .title(Span::styled(title, Theme::title_style()))
}

fn render_controls(rows: &[ControlRow], area: Rect, buf: &mut Buffer) {
    let block = panel(" Controls ");
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for (i, row) in rows.iter().take(inner.height as usize).enumerate() {
        let y = inner.y + i as u16;
        let marker = if row.selected { " ▸ " } else { "   " };
        let label_style = if row.selected {
            Theme::selected_style()
        } else {
            Theme::item_style()
        };
        let value = if row.editing {
            Span::styled(format!("{}▏", row.value), Theme::editing_style())
        } else {
            Span::styled(row.value.clone(), Theme::control_value_style())
        };
        if row.selected {
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), Theme::selected_style());
        }
        let line = Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<label_width$}  ", row.label), label_style),
            value,
        ]);
        buf.set_line(inner.x, y, &line, inner.width);
    }
}
