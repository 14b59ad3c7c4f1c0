use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{centered, Control, Demo};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

const RANGE: (f64, f64) = (0.0, 10.0);

#[derive(Debug, Clone, PartialEq)]
pub struct StepperDemo {
    pub value: f64,
    /// Increment per press, 1–5.
    pub step: f64,
    pub wraps: bool,
}

impl Default for StepperDemo {
    fn default() -> Self {
        Self {
            value: 3.0,
            step: 1.0,
            wraps: false,
        }
    }
}

static CONTROLS: &[Control<StepperDemo>] = &[
    Control::Slider {
        label: "Value",
        get: |s| s.value,
        set: |s, v| s.value = v,
        min: RANGE.0,
        max: RANGE.1,
        step: 1.0,
        format: fmt_int,
    },
    Control::Slider {
        label: "Step",
        get: |s| s.step,
        set: |s, v| s.step = v,
        min: 1.0,
        max: 5.0,
        step: 1.0,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Wraps",
        get: |s| s.wraps,
        set: |s, v| s.wraps = v,
    },
];

impl Projectable for StepperDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A stepper nudges a value up or down.");
        code.open(format!(
            "let stepper = Stepper::new({}, {}..={})",
            fmt_int(self.value),
            fmt_int(RANGE.0),
            fmt_int(RANGE.1)
        ));
        code.modifier_if(self.step != 1.0, format!("step({})", fmt_int(self.step)));
        if self.wraps {
            code.comment("Past the upper bound the value restarts at the lower one.");
            code.modifier("wraps(true)");
        }
        code.finish()
    }
}

impl Demo for StepperDemo {
    const DESTINATION: Destination = Destination::Stepper;
    const TITLE: &'static str = "Stepper";
    const SUMMARY: &'static str = "Increment and decrement buttons around a bounded value.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let button = Style::default().fg(Color::Black).bg(Color::Gray);
        let value = Style::default().add_modifier(Modifier::BOLD);
        let mut spans = vec![
            Span::styled(" − ", button),
            Span::styled(format!("  {:>2}  ", fmt_int(self.value)), value),
            Span::styled(" + ", button),
        ];
        if self.wraps {
            spans.push(Span::styled(" ↻", Style::default().fg(Color::DarkGray)));
        }
        let line = Line::from(spans);
        let rect = centered(line.width() as u16, 1, area);
        line.render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn step_one_is_omitted() {
        let code = StepperDemo::default().project();
        assert!(code.ends_with("let stepper = Stepper::new(3, 0..=10);"));
        let coarse = StepperDemo {
            step: 2.0,
            ..StepperDemo::default()
        };
        assert!(coarse.project().contains(".step(2)"));
    }

    #[test]
    fn wrap_comment_precedes_its_modifier() {
        let state = StepperDemo {
            wraps: true,
            ..StepperDemo::default()
        };
        let code = state.project();
        let comment = code.find("// Past the upper bound").expect("comment");
        let modifier = code.find(".wraps(true)").expect("modifier");
        assert!(comment < modifier);
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<StepperDemo>();
    }
}
