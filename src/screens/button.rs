//! Button demo — the reference instance of the projector pattern.
//!
//! The state is a plain value type.  Every field is driven by one control in
//! [`CONTROLS`], and every field that differs from [`ButtonDemo::default`]
//! shows up as exactly one modifier in the projected snippet:
//!
//! | field      | default      | projected as                         |
//! |------------|--------------|--------------------------------------|
//! | `label`    | `"Continue"` | `Button::new("…")` (always present)  |
//! | `style`    | `Bordered`   | `.style(ButtonStyle::…)`             |
//! | `tint`     | `Blue`       | `.tint(Color::…)`                    |
//! | `disabled` | `false`      | `.disabled(true)`                    |
//! | `shortcut` | `false`      | `.keyboard_shortcut(KeyCode::Enter)` |
//!
//! Because the untouched default and an explicitly re-selected default are
//! the same state value, they project to the same text.  Distinct states
//! always project to distinct text.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{quoted, CodeWriter, Projectable};

/// Visual treatment of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Text only.
    Plain,
    /// Outlined with a rounded border.
    #[default]
    Bordered,
    /// Solid background in the tint colour.
    Filled,
}

impl ButtonStyle {
    pub const ALL: &'static [ButtonStyle] = &[ButtonStyle::Plain, ButtonStyle::Bordered, ButtonStyle::Filled];
    const LABELS: &'static [&'static str] = &["Plain", "Bordered", "Filled"];

    pub fn name(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

/// Control state of the button screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonDemo {
    pub label: String,
    pub style: ButtonStyle,
    pub tint: Tint,
    pub disabled: bool,
    /// Bind the Enter key to the button.
    pub shortcut: bool,
}

impl Default for ButtonDemo {
    fn default() -> Self {
        Self {
            label: "Continue".to_string(),
            style: ButtonStyle::Bordered,
            tint: Tint::Blue,
            disabled: false,
            shortcut: false,
        }
    }
}

static CONTROLS: &[Control<ButtonDemo>] = &[
    Control::Text {
        label: "Label",
        get: |s| s.label.clone(),
        set: |s, v| s.label = v,
        max_len: 24,
    },
    Control::Picker {
        label: "Style",
        options: ButtonStyle::LABELS,
        get: |s| s.style as usize,
        set: |s, i| s.style = ButtonStyle::ALL[i],
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
    Control::Toggle {
        label: "Disabled",
        get: |s| s.disabled,
        set: |s, v| s.disabled = v,
    },
    Control::Toggle {
        label: "Keyboard Shortcut",
        get: |s| s.shortcut,
        set: |s, v| s.shortcut = v,
    },
];

impl Projectable for ButtonDemo {
    fn project(&self) -> String {
        let defaults = Self::default();
        let mut code = CodeWriter::new();
        code.comment("Buttons run an action when activated.");
        code.open(format!("let button = Button::new({})", quoted(&self.label)));
        code.modifier_if(
            self.style != defaults.style,
            format!("style(ButtonStyle::{})", self.style.name()),
        );
        code.modifier_if(
            self.tint != defaults.tint,
            format!("tint(Color::{})", self.tint.name()),
        );
        code.modifier_if(self.disabled, "disabled(true)");
        if self.shortcut {
            code.comment("Enter triggers the button from anywhere on screen.");
            code.modifier("keyboard_shortcut(KeyCode::Enter)");
        }
        code.finish()
    }
}

impl Demo for ButtonDemo {
    const DESTINATION: Destination = Destination::Button;
    const TITLE: &'static str = "Button";
    const SUMMARY: &'static str = "A labelled action with plain, bordered and filled styles.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let accent = if self.disabled {
            Color::DarkGray
        } else {
            self.tint.color()
        };
        let text = if self.shortcut {
            format!("{} ⏎", self.label)
        } else {
            self.label.clone()
        };
        let text_width = text.chars().count() as u16;

        match self.style {
            ButtonStyle::Plain => {
                let rect = centered(text_width, 1, area);
                Paragraph::new(text)
                    .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .render(rect, buf);
            }
            ButtonStyle::Bordered => {
                let rect = centered(text_width + 4, 3, area);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(accent));
                Paragraph::new(text)
                    .style(Style::default().fg(accent))
                    .alignment(Alignment::Center)
                    .block(block)
                    .render(rect, buf);
            }
            ButtonStyle::Filled => {
                let rect = centered(text_width + 4, 3, area);
                buf.set_style(rect, Style::default().bg(accent));
                let inner = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1.min(rect.height));
                Paragraph::new(text)
                    .style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(accent)
                            .add_modifier(Modifier::BOLD),
                    )
                    .alignment(Alignment::Center)
                    .render(inner, buf);
            }
        }
    }
}
