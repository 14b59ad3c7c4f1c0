use ratatui::{buffer::Buffer, layout::Rect};

use super::{paint_shape, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

#[derive(Debug, Clone, PartialEq)]
pub struct CircleDemo {
    /// Diameter in rows; drawn twice as wide in columns so it looks round.
    pub diameter: f64,
    pub fill: Tint,
    pub stroke_only: bool,
}

impl Default for CircleDemo {
    fn default() -> Self {
        Self {
            diameter: 10.0,
            fill: Tint::Blue,
            stroke_only: false,
        }
    }
}

static CONTROLS: &[Control<CircleDemo>] = &[
    Control::Slider {
        label: "Diameter",
        get: |s| s.diameter,
        set: |s, v| s.diameter = v,
        min: 4.0,
        max: 20.0,
        step: 2.0,
        format: fmt_int,
    },
    Control::Picker {
        label: "Fill",
        options: Tint::LABELS,
        get: |s| s.fill.index(),
        set: |s, i| s.fill = Tint::from_index(i),
    },
    Control::Toggle {
        label: "Stroke Only",
        get: |s| s.stroke_only,
        set: |s, v| s.stroke_only = v,
    },
];

impl Projectable for CircleDemo {
    fn project(&self) -> String {
        let color = format!("Color::{}", self.fill.name());
        let mut code = CodeWriter::new();
        code.comment("A circle is inscribed in a square frame.");
        code.open("let shape = Circle::new()");
        if self.stroke_only {
            code.modifier(format!("stroke({color}, 1)"));
        } else {
            code.modifier_if(self.fill != Tint::default(), format!("fill({color})"));
        }
        code.modifier(format!("frame({0}, {0})", fmt_int(self.diameter)));
        code.finish()
    }
}

impl Demo for CircleDemo {
    const DESTINATION: Destination = Destination::Circle;
    const TITLE: &'static str = "Circle";
    const SUMMARY: &'static str = "A filled or outlined circle of adjustable size.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let rows = self.diameter as u16;
        let cols = rows * 2;
        let (rx, ry) = (f64::from(cols) / 2.0, f64::from(rows) / 2.0);
        paint_shape(area, buf, (cols, rows), self.fill.color(), self.stroke_only, |x, y| {
            let nx = (x - rx) / rx;
            let ny = (y - ry) / ry;
            nx * nx + ny * ny <= 1.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    fn painted(state: &CircleDemo) -> usize {
        let area = Rect::new(0, 0, 50, 24);
        let mut buf = Buffer::empty(area);
        state.preview(area, &mut buf);
        buf.content.iter().filter(|c| c.symbol() == "█").count()
    }

    #[test]
    fn default_fill_is_omitted_but_frame_is_not() {
        assert_eq!(
            CircleDemo::default().project(),
            "// A circle is inscribed in a square frame.\nlet shape = Circle::new()\n    .frame(10, 10);"
        );
    }

    #[test]
    fn stroke_replaces_fill() {
        let state = CircleDemo {
            fill: Tint::Red,
            stroke_only: true,
            ..CircleDemo::default()
        };
        let code = state.project();
        assert!(code.contains(".stroke(Color::Red, 1)"));
        assert!(!code.contains(".fill("));
    }

    #[test]
    fn outline_paints_fewer_cells() {
        let filled = CircleDemo::default();
        let outline = CircleDemo {
            stroke_only: true,
            ..CircleDemo::default()
        };
        assert!(painted(&outline) > 0);
        assert!(painted(&outline) < painted(&filled));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<CircleDemo>();
    }
}
