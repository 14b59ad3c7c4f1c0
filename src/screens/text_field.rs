use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{centered, Control, Demo};
use crate::core::destination::Destination;
use crate::core::projector::{fmt_int, quoted, CodeWriter, Projectable};

const FIELD_WIDTH: u16 = 30;

/// Defaults: placeholder "Username", empty text, plain input, no length limit.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldDemo {
    pub placeholder: String,
    pub text: String,
    pub secure: bool,
    /// `0` means unlimited.
    pub max_length: f64,
}

impl Default for TextFieldDemo {
    fn default() -> Self {
        Self {
            placeholder: "Username".to_string(),
            text: String::new(),
            secure: false,
            max_length: 0.0,
        }
    }
}

static CONTROLS: &[Control<TextFieldDemo>] = &[
    Control::Text {
        label: "Text",
        get: |s| s.text.clone(),
        set: |s, v| s.text = v,
        max_len: 32,
    },
    Control::Text {
        label: "Placeholder",
        get: |s| s.placeholder.clone(),
        set: |s, v| s.placeholder = v,
        max_len: 24,
    },
    Control::Toggle {
        label: "Secure",
        get: |s| s.secure,
        set: |s, v| s.secure = v,
    },
    Control::Slider {
        label: "Max Length",
        get: |s| s.max_length,
        set: |s, v| s.max_length = v,
        min: 0.0,
        max: 32.0,
        step: 4.0,
        format: |v| {
            if v == 0.0 {
                "none".to_string()
            } else {
                fmt_int(v)
            }
        },
    },
];

impl TextFieldDemo {
    fn limit(&self) -> Option<usize> {
        (self.max_length >= 1.0).then_some(self.max_length as usize)
    }

    /// Text as the field would display it: masked when secure, cut to the limit.
    fn shown_text(&self) -> String {
        let kept = self.text.chars().take(self.limit().unwrap_or(usize::MAX));
        if self.secure {
            kept.map(|_| '•').collect()
        } else {
            kept.collect()
        }
    }
}

impl Projectable for TextFieldDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A text field edits a single line of text.");
        code.open(format!("let field = TextField::new({})", quoted(&self.placeholder)));
        code.modifier_if(!self.text.is_empty(), format!("text({})", quoted(&self.text)));
        if self.secure {
            code.comment("Characters are masked as they are typed.");
            code.modifier("secure(true)");
        }
        code.modifier_opt(self.limit(), |n| format!("max_length({n})"));
        code.finish()
    }
}

impl Demo for TextFieldDemo {
    const DESTINATION: Destination = Destination::TextField;
    const TITLE: &'static str = "Text Field";
    const SUMMARY: &'static str = "Single-line input with placeholder, masking and a length limit.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let rect = centered(FIELD_WIDTH, 3, area);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray));
        if let Some(limit) = self.limit() {
            let used = self.text.chars().count().min(limit);
            block = block.title_bottom(Line::from(format!(" {used}/{limit} ")).right_aligned());
        }

        let content = if self.text.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.shown_text())
        };
        content.block(block).render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn zero_limit_is_omitted() {
        let code = TextFieldDemo::default().project();
        assert!(!code.contains("max_length"));
        assert!(code.ends_with("TextField::new(\"Username\");"));
    }

    #[test]
    fn limit_snaps_to_steps_of_four() {
        let mut state = TextFieldDemo::default();
        CONTROLS[3].adjust(&mut state, 1);
        CONTROLS[3].adjust(&mut state, 1);
        assert_eq!(state.limit(), Some(8));
        assert!(state.project().ends_with(".max_length(8);"));
    }

    #[test]
    fn secure_text_is_masked_and_cut() {
        let state = TextFieldDemo {
            text: "hunter22".into(),
            secure: true,
            max_length: 4.0,
            ..TextFieldDemo::default()
        };
        assert_eq!(state.shown_text(), "••••");
        let code = state.project();
        assert!(code.contains(".text(\"hunter22\")"));
        assert!(code.contains("    // Characters are masked"));
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<TextFieldDemo>();
    }
}
