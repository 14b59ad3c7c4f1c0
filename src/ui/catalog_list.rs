//! Custom Ratatui widget that renders search results as a flat list of
//! category headers, each followed by its items.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::{destination::Destination, search::SearchResult};

use super::theme::Theme;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the list (selected item, scroll offset).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogListState {
    /// Ordinal of the highlighted *item* (headers are never selected).
    pub selected: usize,
    /// First visible row.
    pub offset: usize,
}

impl CatalogListState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside `0..item_count` after the results change.
    pub fn clamp_selection(&mut self, item_count: usize) {
        self.selected = self.selected.min(item_count.saturating_sub(1));
    }

    /// Ensure `row` is visible within a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, row: usize, height: usize) {
        if height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row - height + 1;
        }
    }
}

// ───────────────────────────────────────── row model ─────────

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRow {
    Header {
        icon: &'static str,
        name: &'static str,
        count: usize,
    },
    Item {
        name: &'static str,
        destination: Destination,
        /// Position among item rows only.
        ordinal: usize,
    },
}

/// Flatten results into rows, in registry order.
pub fn build_rows(results: &[SearchResult<'_>]) -> Vec<CatalogRow> {
    let mut rows = Vec::new();
    let mut ordinal = 0;
    for result in results {
        rows.push(CatalogRow::Header {
            icon: result.category.icon,
            name: result.category.name,
            count: result.items.len(),
        });
        for item in &result.items {
            rows.push(CatalogRow::Item {
                name: item.name,
                destination: item.destination,
                ordinal,
            });
            ordinal += 1;
        }
    }
    rows
}

/// Row index of the item with the given ordinal.
pub fn row_of_item(rows: &[CatalogRow], ordinal: usize) -> Option<usize> {
    rows.iter()
        .position(|row| matches!(row, CatalogRow::Item { ordinal: o, .. } if *o == ordinal))
}

/// Destination of the item with the given ordinal.
pub fn item_destination(rows: &[CatalogRow], ordinal: usize) -> Option<Destination> {
    rows.iter().find_map(|row| match row {
        CatalogRow::Item {
            destination,
            ordinal: o,
            ..
        } if *o == ordinal => Some(*destination),
        _ => None,
    })
}

// ───────────────────────────────────────── widget ────────────

pub struct CatalogList<'a> {
    rows: &'a [CatalogRow],
    query: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> CatalogList<'a> {
    pub fn new(rows: &'a [CatalogRow], query: &'a str) -> Self {
        Self {
            rows,
            query,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for CatalogList<'a> {
    type State = CatalogListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            let text = format!("No matches for \"{}\".", self.query);
            buf.set_stringn(inner.x + 1, inner.y, text, inner.width as usize - 1, Theme::hint_style());
            return;
        }

        if let Some(row) = row_of_item(self.rows, state.selected) {
            // Pull the category header into view when its first item is selected.
            let header_row = if row > 0 && matches!(self.rows[row - 1], CatalogRow::Header { .. }) {
                row - 1
            } else {
                row
            };
            state.clamp_scroll(header_row, inner.height as usize);
            state.clamp_scroll(row, inner.height as usize);
        }

        let visible = self
            .rows
            .iter()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, row) in visible.enumerate() {
            let y = inner.y + i as u16;
            let line = match row {
                CatalogRow::Header { icon, name, count } => Line::from(vec![
                    Span::styled(format!("{icon} {name}"), Theme::category_style()),
                    Span::styled(format!("  {count}"), Theme::hint_style()),
                ]),
                CatalogRow::Item { name, ordinal, .. } => {
                    let selected = *ordinal == state.selected;
                    if selected {
                        buf.set_style(Rect::new(inner.x, y, inner.width, 1), Theme::selected_style());
                        Line::from(Span::styled(format!("  ▸ {name}"), Theme::selected_style()))
                    } else {
                        Line::from(Span::styled(format!("    {name}"), Theme::item_style()))
                    }
                }
            };
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
