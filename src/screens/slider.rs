use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

const MIN: f64 = 0.0;
const MAX: f64 = 100.0;
const STEP: f64 = 5.0;
const TRACK_WIDTH: u16 = 30;

/// Defaults: value 50 on a 0–100 range, no value label, no step marks, blue.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderDemo {
    pub value: f64,
    pub show_value: bool,
    pub step_marks: bool,
    pub tint: Tint,
}

impl Default for SliderDemo {
    fn default() -> Self {
        Self {
            value: 50.0,
            show_value: false,
            step_marks: false,
            tint: Tint::Blue,
        }
    }
}

static CONTROLS: &[Control<SliderDemo>] = &[
    Control::Slider {
        label: "Value",
        get: |s| s.value,
        set: |s, v| s.value = v,
        min: MIN,
        max: MAX,
        step: STEP,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Show Value",
        get: |s| s.show_value,
        set: |s, v| s.show_value = v,
    },
    Control::Toggle {
        label: "Step Marks",
        get: |s| s.step_marks,
        set: |s, v| s.step_marks = v,
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl Projectable for SliderDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A slider picks a value from a continuous range.");
        code.open(format!(
            "let slider = Slider::new({}, {}..={})",
            fmt_int(self.value),
            fmt_int(MIN),
            fmt_int(MAX)
        ));
        code.modifier_if(self.step_marks, format!("step({})", fmt_int(STEP)));
        code.modifier_if(self.show_value, "show_value(true)");
        code.modifier_if(
            self.tint != Tint::default(),
            format!("tint(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for SliderDemo {
    const DESTINATION: Destination = Destination::Slider;
    const TITLE: &'static str = "Slider";
    const SUMMARY: &'static str = "A draggable value on a bounded track.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let track = TRACK_WIDTH.min(area.width);
        if track < 2 {
            return;
        }
        let ratio = ((self.value - MIN) / (MAX - MIN)).clamp(0.0, 1.0);
        let knob = (ratio * f64::from(track - 1)).round() as u16;
        let accent = Style::default().fg(self.tint.color());
        let dim = Style::default().fg(Color::DarkGray);

        let spans: Vec<Span> = (0..track)
            .map(|x| {
                if x == knob {
                    Span::styled("●", accent)
                } else if x < knob {
                    Span::styled("━", accent)
                } else {
                    Span::styled("─", dim)
                }
            })
            .collect();

        let height = 1 + u16::from(self.step_marks) + u16::from(self.show_value);
        let rect = centered(track, height, area);
        let mut y = rect.y;
        Line::from(spans).render(Rect::new(rect.x, y, track, 1), buf);

        if self.step_marks && rect.height > 1 {
            y += 1;
            let steps = ((MAX - MIN) / STEP) as u16;
            for i in 0..=steps {
                let x = (f64::from(i) / f64::from(steps) * f64::from(track - 1)).round() as u16;
                buf[(rect.x + x, y)].set_symbol("╵").set_style(dim);
            }
        }
        if self.show_value && y + 1 < rect.y + rect.height {
            y += 1;
            Line::from(fmt_int(self.value))
                .centered()
                .render(Rect::new(rect.x, y, track, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn value_is_always_in_the_constructor() {
        assert_eq!(
            SliderDemo::default().project(),
            "// A slider picks a value from a continuous range.\nlet slider = Slider::new(50, 0..=100);"
        );
    }

    #[test]
    fn control_clamps_at_the_ends() {
        let mut state = SliderDemo::default();
        for _ in 0..30 {
            CONTROLS[0].adjust(&mut state, 1);
        }
        assert_eq!(state.value, MAX);
        assert!(state.project().contains("Slider::new(100,"));
    }

    #[test]
    fn modifiers_follow_flags() {
        let state = SliderDemo {
            show_value: true,
            step_marks: true,
            ..SliderDemo::default()
        };
        let code = state.project();
        assert!(code.contains("    .step(5)\n    .show_value(true);"));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<SliderDemo>();
    }
}
