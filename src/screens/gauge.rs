use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, LineGauge, Widget},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_fixed, fmt_percent, CodeWriter, Projectable};

const GAUGE_WIDTH: u16 = 32;

/// Defaults: half full, percentage label shown, boxed, blue.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeDemo {
    /// `0.0..=1.0`
    pub progress: f64,
    pub show_label: bool,
    pub compact: bool,
    pub tint: Tint,
}

impl Default for GaugeDemo {
    fn default() -> Self {
        Self {
            progress: 0.5,
            show_label: true,
            compact: false,
            tint: Tint::Blue,
        }
    }
}

static CONTROLS: &[Control<GaugeDemo>] = &[
    Control::Slider {
        label: "Progress",
        get: |s| s.progress,
        set: |s, v| s.progress = v,
        min: 0.0,
        max: 1.0,
        step: 0.05,
        format: fmt_percent,
    },
    Control::Toggle {
        label: "Show Label",
        get: |s| s.show_label,
        set: |s, v| s.show_label = v,
    },
    Control::Toggle {
        label: "Compact",
        get: |s| s.compact,
        set: |s, v| s.compact = v,
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl GaugeDemo {
    fn ratio(&self) -> f64 {
        self.progress.clamp(0.0, 1.0)
    }

    fn label(&self) -> String {
        if self.show_label {
            fmt_percent(self.ratio())
        } else {
            String::new()
        }
    }
}

impl Projectable for GaugeDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment(&format!("A gauge {} full.", fmt_percent(self.ratio())));
        let kind = if self.compact { "LineGauge" } else { "Gauge" };
        code.open(format!(
            "let gauge = {kind}::new({})",
            fmt_fixed(self.ratio(), 2)
        ));
        code.modifier_if(!self.show_label, "label(None)");
        code.modifier_if(
            self.tint != Tint::default(),
            format!("filled_style(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for GaugeDemo {
    const DESTINATION: Destination = Destination::Gauge;
    const TITLE: &'static str = "Gauge";
    const SUMMARY: &'static str = "Progress toward a goal as a filled bar or a thin line.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let accent = self.tint.color();
        if self.compact {
            let rect = centered(GAUGE_WIDTH, 1, area);
            LineGauge::default()
                .ratio(self.ratio())
                .label(self.label())
                .filled_style(Style::default().fg(accent))
                .unfilled_style(Style::default().fg(Color::DarkGray))
                .render(rect, buf);
        } else {
            let rect = centered(GAUGE_WIDTH, 3, area);
            Gauge::default()
                .block(Block::default().borders(Borders::ALL))
                .gauge_style(Style::default().fg(accent).bg(Color::Black))
                .ratio(self.ratio())
                .label(self.label())
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn percent_in_comment_tracks_progress() {
        let mut state = GaugeDemo::default();
        assert!(state.project().starts_with("// A gauge 50% full.\nlet gauge = Gauge::new(0.50);"));
        for _ in 0..3 {
            CONTROLS[0].adjust(&mut state, -1);
        }
        assert!(state.project().starts_with("// A gauge 35% full."));
    }

    #[test]
    fn progress_saturates() {
        let mut state = GaugeDemo::default();
        for _ in 0..40 {
            CONTROLS[0].adjust(&mut state, 1);
        }
        assert_eq!(state.progress, 1.0);
        assert!(state.project().contains("Gauge::new(1.00)"));
    }

    #[test]
    fn compact_switches_widget() {
        let state = GaugeDemo {
            compact: true,
            show_label: false,
            ..GaugeDemo::default()
        };
        let code = state.project();
        assert!(code.contains("LineGauge::new(0.50)"));
        assert!(code.ends_with("    .label(None);"));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<GaugeDemo>();
    }
}
