use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

const BLOCKS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
const ROWS: u16 = 4;

/// Defaults: 16 points, raw values, no baseline, blue.
#[derive(Debug, Clone, PartialEq)]
pub struct SparklineDemo {
    pub points: f64,
    pub smoothing: bool,
    pub baseline: bool,
    pub tint: Tint,
}

impl Default for SparklineDemo {
    fn default() -> Self {
        Self {
            points: 16.0,
            smoothing: false,
            baseline: false,
            tint: Tint::Blue,
        }
    }
}

static CONTROLS: &[Control<SparklineDemo>] = &[
    Control::Slider {
        label: "Points",
        get: |s| s.points,
        set: |s, v| s.points = v,
        min: 8.0,
        max: 32.0,
        step: 4.0,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Smoothing",
        get: |s| s.smoothing,
        set: |s, v| s.smoothing = v,
    },
    Control::Toggle {
        label: "Baseline",
        get: |s| s.baseline,
        set: |s, v| s.baseline = v,
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

/// Fixed sample series in `0.0..=1.0`.
fn sample(i: usize) -> f64 {
    let t = i as f64;
    (0.5 + 0.3 * (t * 0.6).sin() + 0.2 * (t * 1.7).cos()).clamp(0.0, 1.0)
}

impl SparklineDemo {
    fn series(&self) -> Vec<f64> {
        let raw: Vec<f64> = (0..self.points as usize).map(sample).collect();
        if !self.smoothing {
            return raw;
        }
        (0..raw.len())
            .map(|i| {
                let lo = i.saturating_sub(1);
                let hi = (i + 1).min(raw.len() - 1);
                let window = &raw[lo..=hi];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect()
    }
}

impl Projectable for SparklineDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A sparkline packs a series into a small strip.");
        code.line(format!("let data = samples({});", fmt_int(self.points)));
        code.open("let line = Sparkline::new(&data)");
        if self.smoothing {
            code.comment("Average each point with its neighbours.");
            code.modifier("smoothing(3)");
        }
        code.modifier_if(self.baseline, "baseline(true)");
        code.modifier_if(
            self.tint != Tint::default(),
            format!("style(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for SparklineDemo {
    const DESTINATION: Destination = Destination::Sparkline;
    const TITLE: &'static str = "Sparkline";
    const SUMMARY: &'static str = "A dense inline trend of a numeric series.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let series = self.series();
        let height = ROWS + u16::from(self.baseline);
        let rect = centered(series.len() as u16, height, area);
        let plot = rect.height.min(ROWS);
        if plot == 0 {
            return;
        }
        let style = Style::default().fg(self.tint.color());
        let levels = u32::from(plot) * 8;

        for (i, value) in series.iter().enumerate().take(rect.width as usize) {
            let x = rect.x + i as u16;
            let mut remaining = (value * f64::from(levels)).round() as u32;
            for row in 0..plot {
                let y = rect.y + plot - 1 - row;
                let eighths = remaining.min(8);
                remaining -= eighths;
                buf[(x, y)].set_symbol(BLOCKS[eighths as usize]).set_style(style);
            }
        }

        if self.baseline && rect.height > plot {
            let y = rect.y + plot;
            for x in rect.left()..rect.right() {
                buf[(x, y)]
                    .set_symbol("─")
                    .set_style(Style::default().fg(Color::DarkGray));
            }
        }
    }
}
