use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::{centered, paint_shape, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

/// Defaults: 20×8 cells, square corners, blue fill, no stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleDemo {
    pub width: f64,
    pub height: f64,
    pub rounded: bool,
    pub fill: Tint,
    pub stroke: bool,
}

impl Default for RectangleDemo {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 8.0,
            rounded: false,
            fill: Tint::Blue,
            stroke: false,
        }
    }
}

static CONTROLS: &[Control<RectangleDemo>] = &[
    Control::Slider {
        label: "Width",
        get: |s| s.width,
        set: |s, v| s.width = v,
        min: 4.0,
        max: 40.0,
        step: 2.0,
        format: fmt_int,
    },
    Control::Slider {
        label: "Height",
        get: |s| s.height,
        set: |s, v| s.height = v,
        min: 2.0,
        max: 16.0,
        step: 1.0,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Rounded",
        get: |s| s.rounded,
        set: |s, v| s.rounded = v,
    },
    Control::Picker {
        label: "Fill",
        options: Tint::LABELS,
        get: |s| s.fill.index(),
        set: |s, i| s.fill = Tint::from_index(i),
    },
    Control::Toggle {
        label: "Stroke",
        get: |s| s.stroke,
        set: |s, v| s.stroke = v,
    },
];

impl Projectable for RectangleDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A rectangle fills its frame.");
        code.open(format!(
            "let shape = Rectangle::new({}, {})",
            fmt_int(self.width),
            fmt_int(self.height)
        ));
        code.modifier_if(self.rounded, "corner_radius(1)");
        code.modifier_if(
            self.fill != Tint::default(),
            format!("fill(Color::{})", self.fill.name()),
        );
        code.modifier_if(self.stroke, "stroke(Color::White, 1)");
        code.finish()
    }
}

impl Demo for RectangleDemo {
    const DESTINATION: Destination = Destination::Rectangle;
    const TITLE: &'static str = "Rectangle";
    const SUMMARY: &'static str = "A filled frame with optional rounded corners and stroke.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let (w, h) = (self.width as u16, self.height as u16);
        let (fw, fh) = (f64::from(w), f64::from(h));
        let rounded = self.rounded;
        paint_shape(area, buf, (w, h), self.fill.color(), false, |x, y| {
            let corner_x = x < 1.0 || x > fw - 1.0;
            let corner_y = y < 1.0 || y > fh - 1.0;
            !(rounded && corner_x && corner_y)
        });

        if self.stroke {
            let rect = centered(w, h, area);
            let border_type = if self.rounded {
                BorderType::Rounded
            } else {
                BorderType::Plain
            };
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(Color::White).bg(self.fill.color()))
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn frame_is_always_projected() {
        assert!(RectangleDemo::default()
            .project()
            .ends_with("let shape = Rectangle::new(20, 8);"));
    }

    #[test]
    fn rounded_fill_leaves_corners_empty() {
        let state = RectangleDemo {
            rounded: true,
            ..RectangleDemo::default()
        };
        let area = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(area);
        state.preview(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(1, 0)].symbol(), "█");
        assert_eq!(buf[(19, 7)].symbol(), " ");
    }

    #[test]
    fn all_modifiers_in_order() {
        let state = RectangleDemo {
            rounded: true,
            fill: Tint::Yellow,
            stroke: true,
            ..RectangleDemo::default()
        };
        assert!(state.project().ends_with(
            "    .corner_radius(1)\n    .fill(Color::Yellow)\n    .stroke(Color::White, 1);"
        ));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<RectangleDemo>();
    }
}
