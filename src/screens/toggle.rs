use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{quoted, CodeWriter, Projectable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleStyle {
    #[default]
    Switch,
    Checkbox,
    Button,
}

impl ToggleStyle {
    const ALL: &'static [ToggleStyle] = &[ToggleStyle::Switch, ToggleStyle::Checkbox, ToggleStyle::Button];
    const LABELS: &'static [&'static str] = &["Switch", "Checkbox", "Button"];

    fn name(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

/// Defaults: "Airplane Mode", off, switch style, green tint.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleDemo {
    pub label: String,
    pub is_on: bool,
    pub style: ToggleStyle,
    pub tint: Tint,
}

impl Default for ToggleDemo {
    fn default() -> Self {
        Self {
            label: "Airplane Mode".to_string(),
            is_on: false,
            style: ToggleStyle::Switch,
            tint: Tint::Green,
        }
    }
}

static CONTROLS: &[Control<ToggleDemo>] = &[
    Control::Toggle {
        label: "On",
        get: |s| s.is_on,
        set: |s, v| s.is_on = v,
    },
    Control::Text {
        label: "Label",
        get: |s| s.label.clone(),
        set: |s, v| s.label = v,
        max_len: 24,
    },
    Control::Picker {
        label: "Style",
        options: ToggleStyle::LABELS,
        get: |s| s.style as usize,
        set: |s, i| s.style = ToggleStyle::ALL[i],
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl Projectable for ToggleDemo {
    fn project(&self) -> String {
        let defaults = Self::default();
        let mut code = CodeWriter::new();
        code.comment("A toggle binds a label to a boolean.");
        code.open(format!(
            "let toggle = Toggle::new({}, {})",
            quoted(&self.label),
            self.is_on
        ));
        code.modifier_if(
            self.style != defaults.style,
            format!("style(ToggleStyle::{})", self.style.name()),
        );
        code.modifier_if(
            self.tint != defaults.tint,
            format!("tint(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for ToggleDemo {
    const DESTINATION: Destination = Destination::Toggle;
    const TITLE: &'static str = "Toggle";
    const SUMMARY: &'static str = "An on/off switch shown as a switch, checkbox or button.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let accent = self.tint.color();
        let label = Span::raw(self.label.clone());
        match self.style {
            ToggleStyle::Switch => {
                let knob = if self.is_on {
                    Span::styled(" ━━● ", Style::default().fg(accent).add_modifier(Modifier::BOLD))
                } else {
                    Span::styled(" ●━━ ", Style::default().fg(Color::DarkGray))
                };
                let line = Line::from(vec![label, Span::raw("  "), knob]);
                let rect = centered(line.width() as u16, 1, area);
                line.render(rect, buf);
            }
            ToggleStyle::Checkbox => {
                let mark = if self.is_on {
                    Span::styled("[x] ", Style::default().fg(accent))
                } else {
                    Span::raw("[ ] ")
                };
                let line = Line::from(vec![mark, label]);
                let rect = centered(line.width() as u16, 1, area);
                line.render(rect, buf);
            }
            ToggleStyle::Button => {
                let width = self.label.chars().count() as u16 + 4;
                let rect = centered(width, 3, area);
                let style = if self.is_on {
                    Style::default().fg(Color::Black).bg(accent)
                } else {
                    Style::default().fg(accent)
                };
                Paragraph::new(self.label.as_str())
                    .centered()
                    .style(style)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Rounded)
                            .border_style(Style::default().fg(accent)),
                    )
                    .render(rect, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn default_projection() {
        assert_eq!(
            ToggleDemo::default().project(),
            "// A toggle binds a label to a boolean.\nlet toggle = Toggle::new(\"Airplane Mode\", false);"
        );
    }

    #[test]
    fn green_is_the_default_tint() {
        let blue = ToggleDemo {
            tint: Tint::Blue,
            ..ToggleDemo::default()
        };
        assert!(blue.project().contains(".tint(Color::Blue)"));
        assert!(!ToggleDemo::default().project().contains("tint"));
    }

    #[test]
    fn checkbox_preview_shows_mark() {
        let state = ToggleDemo {
            is_on: true,
            style: ToggleStyle::Checkbox,
            ..ToggleDemo::default()
        };
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        state.preview(area, &mut buf);
        let row: String = (0..40).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("[x] Airplane Mode"));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<ToggleDemo>();
    }
}
