use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, CodeWriter, Projectable};

/// Defaults: count 3, hidden at zero, red.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeDemo {
    pub count: f64,
    pub hide_when_zero: bool,
    pub tint: Tint,
}

impl Default for BadgeDemo {
    fn default() -> Self {
        Self {
            count: 3.0,
            hide_when_zero: true,
            tint: Tint::Red,
        }
    }
}

static CONTROLS: &[Control<BadgeDemo>] = &[
    Control::Slider {
        label: "Count",
        get: |s| s.count,
        set: |s, v| s.count = v,
        min: 0.0,
        max: 99.0,
        step: 1.0,
        format: fmt_int,
    },
    Control::Toggle {
        label: "Hide When Zero",
        get: |s| s.hide_when_zero,
        set: |s, v| s.hide_when_zero = v,
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl BadgeDemo {
    fn visible(&self) -> bool {
        !(self.hide_when_zero && self.count < 1.0)
    }
}

impl Projectable for BadgeDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A badge counts unread items next to a label.");
        code.open("let inbox = Label::new(\"Inbox\")");
        code.modifier(format!("badge({})", fmt_int(self.count)));
        if !self.hide_when_zero {
            code.comment("Keep the badge visible even when the count is zero.");
            code.modifier("hide_when_zero(false)");
        }
        code.modifier_if(
            self.tint != Tint::Red,
            format!("badge_color(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for BadgeDemo {
    const DESTINATION: Destination = Destination::Badge;
    const TITLE: &'static str = "Badge";
    const SUMMARY: &'static str = "A small count attached to a label.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw("Inbox")];
        if self.visible() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" {} ", fmt_int(self.count)),
                Style::default()
                    .fg(Color::White)
                    .bg(self.tint.color())
                    .add_modifier(Modifier::BOLD),
            ));
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
    fn red_is_the_default_color() {
        let code = BadgeDemo::default().project();
        assert!(code.ends_with("    .badge(3);"));
        let blue = BadgeDemo {
            tint: Tint::Blue,
            ..BadgeDemo::default()
        };
        assert!(blue.project().contains(".badge_color(Color::Blue)"));
    }

    #[test]
    fn zero_count_hides_unless_pinned() {
        let mut state = BadgeDemo {
            count: 0.0,
            ..BadgeDemo::default()
        };
        assert!(!state.visible());
        state.hide_when_zero = false;
        assert!(state.visible());
        assert!(state.project().contains(".hide_when_zero(false)"));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<BadgeDemo>();
    }
}
