use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

const DATA: [(&str, u16); 8] = [
    ("Jan", 4),
    ("Feb", 7),
    ("Mar", 3),
    ("Apr", 9),
    ("May", 5),
    ("Jun", 8),
    ("Jul", 2),
    ("Aug", 6),
];
const DATA_MAX: u16 = 9;
const BAR_WIDTH: u16 = 3;
const GAP: u16 = 1;

/// Defaults: first five months, vertical bars, no value labels, blue.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartDemo {
    pub bars: f64,
    pub horizontal: bool,
    pub show_values: bool,
    pub tint: Tint,
}

impl Default for BarChartDemo {
    fn default() -> Self {
        Self {
            bars: 5.0,
            horizontal: false,
            show_values: false,
            tint: Tint::Blue,
        }
    }
}

static CONTROLS: &[Control<BarChartDemo>] = &[
    Control::Slider {
        label: "Bars",
        get: |s| s.bars,
        set: |s, v| s.bars = v,
        min: 3.0,
        max: 8.0,
        step: 1.0,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Horizontal",
        get: |s| s.horizontal,
        set: |s, v| s.horizontal = v,
    },
    Control::Toggle {
        label: "Show Values",
        get: |s| s.show_values,
        set: |s, v| s.show_values = v,
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl BarChartDemo {
    fn data(&self) -> &'static [(&'static str, u16)] {
        let n = (self.bars as usize).clamp(1, DATA.len());
        &DATA[..n]
    }

    fn draw_vertical(&self, area: Rect, buf: &mut Buffer, style: Style) {
        let data = self.data();
        let n = data.len() as u16;
        let width = n * BAR_WIDTH + (n - 1) * GAP;
        let rect = centered(width, area.height.min(14), area);
        // Bottom row holds the month labels.
        let plot = rect.height.saturating_sub(1);
        if plot == 0 {
            return;
        }
        let label_y = rect.y + plot;
        for (i, (label, value)) in data.iter().enumerate() {
            let x = rect.x + i as u16 * (BAR_WIDTH + GAP);
            if x >= rect.right() {
                break;
            }
            let w = BAR_WIDTH.min(rect.right() - x);
            let filled = (u32::from(*value) * u32::from(plot) / u32::from(DATA_MAX)) as u16;
            for dy in 0..filled.min(plot) {
                for dx in 0..w {
                    buf[(x + dx, label_y - 1 - dy)].set_symbol("█").set_style(style);
                }
            }
            buf.set_stringn(x, label_y, label, usize::from(w), Style::default());
            if self.show_values && filled < plot {
                let top = label_y - 1 - filled;
                buf.set_stringn(x + 1, top, value.to_string(), usize::from(w - 1), style);
            }
        }
    }

    fn draw_horizontal(&self, area: Rect, buf: &mut Buffer, style: Style) {
        let data = self.data();
        let n = data.len() as u16;
        let rect = centered(area.width.min(40), n * 2 - 1, area);
        // Left gutter holds the month labels.
        let plot = rect.width.saturating_sub(4 + 3);
        for (i, (label, value)) in data.iter().enumerate() {
            let y = rect.y + i as u16 * 2;
            if y >= rect.bottom() {
                break;
            }
            buf.set_stringn(rect.x, y, label, usize::from(rect.width), Style::default());
            if plot == 0 {
                continue;
            }
            let filled = (u32::from(*value) * u32::from(plot) / u32::from(DATA_MAX)) as u16;
            for dx in 0..filled {
                buf[(rect.x + 4 + dx, y)].set_symbol("█").set_style(style);
            }
            if self.show_values {
                buf.set_string(rect.x + 5 + filled, y, value.to_string(), style);
            }
        }
    }
}

impl Projectable for BarChartDemo {
    fn project(&self) -> String {
        let points: Vec<String> = self
            .data()
            .iter()
            .map(|(label, value)| format!("(\"{label}\", {value})"))
            .collect();
        let mut code = CodeWriter::new();
        code.comment("A bar chart compares a handful of values.");
        code.line(format!("let data = [{}];", points.join(", ")));
        code.open("let chart = BarChart::new(&data)");
        code.modifier_if(self.horizontal, "direction(Direction::Horizontal)");
        code.modifier_if(self.show_values, "show_values(true)");
        code.modifier_if(
            self.tint != Tint::default(),
            format!("bar_style(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for BarChartDemo {
    const DESTINATION: Destination = Destination::BarChart;
    const TITLE: &'static str = "Bar Chart";
    const SUMMARY: &'static str = "Monthly values drawn as vertical or horizontal bars.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.tint.color()).bg(Color::Reset);
        if self.horizontal {
            self.draw_horizontal(area, buf, style);
        } else {
            self.draw_vertical(area, buf, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn data_follows_bar_count() {
        let code = BarChartDemo::default().project();
        assert!(code.contains(r#"let data = [("Jan", 4), ("Feb", 7), ("Mar", 3), ("Apr", 9), ("May", 5)];"#));
        let three = BarChartDemo {
            bars: 3.0,
            ..BarChartDemo::default()
        };
        assert!(!three.project().contains("Apr"));
    }

    #[test]
    fn default_chart_has_no_modifiers() {
        assert!(BarChartDemo::default()
            .project()
            .ends_with("let chart = BarChart::new(&data);"));
    }

    #[test]
    fn tallest_bar_reaches_the_top() {
        let state = BarChartDemo {
            bars: 4.0,
            ..BarChartDemo::default()
        };
        let area = Rect::new(0, 0, 15, 10);
        let mut buf = Buffer::empty(area);
        state.preview(area, &mut buf);
        // "Apr" (9 of 9) is the fourth bar, starting at column 12.
        assert_eq!(buf[(12, 0)].symbol(), "█");
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(12, 9)].symbol(), "A");
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<BarChartDemo>();
    }
}
