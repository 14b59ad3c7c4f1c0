use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};

use super::{centered, paint_shape, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, quoted, CodeWriter, Projectable};

/// Defaults: 24×3 cells, blue fill, no label.
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleDemo {
    pub width: f64,
    pub height: f64,
    pub fill: Tint,
    pub label: String,
}

impl Default for CapsuleDemo {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 3.0,
            fill: Tint::Blue,
            label: String::new(),
        }
    }
}

static CONTROLS: &[Control<CapsuleDemo>] = &[
    Control::Slider {
        label: "Width",
        get: |s| s.width,
        set: |s, v| s.width = v,
        min: 8.0,
        max: 40.0,
        step: 2.0,
        format: fmt_int,
    },
    Control::Slider {
        label: "Height",
        get: |s| s.height,
        set: |s, v| s.height = v,
        min: 1.0,
        max: 5.0,
        step: 1.0,
        format: fmt_int,
    },
    Control::Picker {
        label: "Fill",
        options: Tint::LABELS,
        get: |s| s.fill.index(),
        set: |s, i| s.fill = Tint::from_index(i),
    },
    Control::Text {
        label: "Label",
        get: |s| s.label.clone(),
        set: |s, v| s.label = v,
        max_len: 20,
    },
];

/// Stadium test in cell space: a bar with half-ellipse caps whose horizontal
/// radius is twice the vertical one.
fn inside_capsule(x: f64, y: f64, width: f64, height: f64) -> bool {
    let ry = height / 2.0;
    let rx = (ry * 2.0).min(width / 2.0);
    let cx = x.clamp(rx, width - rx);
    let nx = (x - cx) / rx;
    let ny = (y - ry) / ry;
    nx * nx + ny * ny <= 1.0
}

impl Projectable for CapsuleDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A capsule is a rectangle with fully rounded ends.");
        code.open(format!(
            "let shape = Capsule::new({}, {})",
            fmt_int(self.width),
            fmt_int(self.height)
        ));
        code.modifier_if(
            self.fill != Tint::default(),
            format!("fill(Color::{})", self.fill.name()),
        );
        code.modifier_if(
            !self.label.is_empty(),
            format!("overlay(Label::new({}))", quoted(&self.label)),
        );
        code.finish()
    }
}

impl Demo for CapsuleDemo {
    const DESTINATION: Destination = Destination::Capsule;
    const TITLE: &'static str = "Capsule";
    const SUMMARY: &'static str = "A pill shape that can carry a short label.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let (w, h) = (self.width as u16, self.height as u16);
        let (fw, fh) = (f64::from(w), f64::from(h));
        paint_shape(area, buf, (w, h), self.fill.color(), false, |x, y| {
            inside_capsule(x, y, fw, fh)
        });

        if !self.label.is_empty() {
            let rect = centered(w, h, area);
            if rect.height == 0 {
                return;
            }
            let row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
            Line::from(self.label.as_str())
                .style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(self.fill.color())
                        .add_modifier(Modifier::BOLD),
                )
                .centered()
                .render(row, buf);
        }
    }
}
