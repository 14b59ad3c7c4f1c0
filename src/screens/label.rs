use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{quoted, CodeWriter, Projectable};

const BOX_WIDTH: u16 = 36;
const ALIGNMENTS: &[Alignment] = &[Alignment::Left, Alignment::Center, Alignment::Right];
const ALIGNMENT_LABELS: &[&str] = &["Left", "Center", "Right"];

#[derive(Debug, Clone, PartialEq)]
pub struct LabelDemo {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Index into the alignment options; left by default.
    pub alignment: usize,
    pub tint: Tint,
}

impl Default for LabelDemo {
    fn default() -> Self {
        Self {
            text: "Hello, world!".to_string(),
            bold: false,
            italic: false,
            alignment: 0,
            tint: Tint::Blue,
        }
    }
}

static CONTROLS: &[Control<LabelDemo>] = &[
    Control::Text {
        label: "Text",
        get: |s| s.text.clone(),
        set: |s, v| s.text = v,
        max_len: 32,
    },
    Control::Toggle {
        label: "Bold",
        get: |s| s.bold,
        set: |s, v| s.bold = v,
    },
    Control::Toggle {
        label: "Italic",
        get: |s| s.italic,
        set: |s, v| s.italic = v,
    },
    Control::Picker {
        label: "Alignment",
        options: ALIGNMENT_LABELS,
        get: |s| s.alignment,
        set: |s, i| s.alignment = i,
    },
    Control::Picker {
        label: "Color",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl Projectable for LabelDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A label displays a line of text.");
        code.open(format!("let label = Label::new({})", quoted(&self.text)));
        code.modifier_if(self.bold, "bold()");
        code.modifier_if(self.italic, "italic()");
        code.modifier_opt(
            ALIGNMENT_LABELS.get(self.alignment).filter(|_| self.alignment != 0),
            |name| format!("alignment(Alignment::{name})"),
        );
        code.modifier_if(
            self.tint != Tint::default(),
            format!("foreground(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for LabelDemo {
    const DESTINATION: Destination = Destination::Label;
    const TITLE: &'static str = "Label";
    const SUMMARY: &'static str = "Styled text with weight, slant, alignment and colour.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default().fg(self.tint.color());
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        let alignment = ALIGNMENTS.get(self.alignment).copied().unwrap_or(Alignment::Left);
        let rect = centered(BOX_WIDTH, 2, area);
        Paragraph::new(self.text.as_str())
            .style(style)
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::check_demo;

    #[test]
    fn left_alignment_is_omitted() {
        let code = LabelDemo::default().project();
        assert_eq!(
            code,
            "// A label displays a line of text.\nlet label = Label::new(\"Hello, world!\");"
        );
    }

    #[test]
    fn style_modifiers_are_projected() {
        let state = LabelDemo {
            bold: true,
            alignment: 2,
            ..LabelDemo::default()
        };
        assert!(state
            .project()
            .ends_with("    .bold()\n    .alignment(Alignment::Right);"));
    }

    #[test]
    fn right_alignment_moves_text() {
        let state = LabelDemo {
            text: "hi".into(),
            alignment: 2,
            ..LabelDemo::default()
        };
        let area = Rect::new(0, 0, BOX_WIDTH, 2);
        let mut buf = Buffer::empty(area);
        state.preview(area, &mut buf);
        assert_eq!(buf[(BOX_WIDTH - 1, 0)].symbol(), "i");
    }

    #[test]
    fn projector_is_pure_and_total() {
        check_demo::<LabelDemo>();
    }
}
