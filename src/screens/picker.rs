use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{centered, Control, Demo, Tint};
use crate::core::destination::Destination;
use crate::core::projector::{CodeWriter, Projectable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Chocolate,
    Vanilla,
    Strawberry,
}

impl Flavor {
    const ALL: &'static [Flavor] = &[Flavor::Chocolate, Flavor::Vanilla, Flavor::Strawberry];
    const LABELS: &'static [&'static str] = &["Chocolate", "Vanilla", "Strawberry"];

    fn name(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStyle {
    #[default]
    Menu,
    Segmented,
    Inline,
}

impl PickerStyle {
    const ALL: &'static [PickerStyle] = &[PickerStyle::Menu, PickerStyle::Segmented, PickerStyle::Inline];
    const LABELS: &'static [&'static str] = &["Menu", "Segmented", "Inline"];

    fn name(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

/// Defaults: chocolate, menu style, blue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerDemo {
    pub selection: Flavor,
    pub style: PickerStyle,
    pub tint: Tint,
}

static CONTROLS: &[Control<PickerDemo>] = &[
    Control::Picker {
        label: "Selection",
        options: Flavor::LABELS,
        get: |s| s.selection as usize,
        set: |s, i| s.selection = Flavor::ALL[i],
    },
    Control::Picker {
        label: "Style",
        options: PickerStyle::LABELS,
        get: |s| s.style as usize,
        set: |s, i| s.style = PickerStyle::ALL[i],
    },
    Control::Picker {
        label: "Tint",
        options: Tint::LABELS,
        get: |s| s.tint.index(),
        set: |s, i| s.tint = Tint::from_index(i),
    },
];

impl Projectable for PickerDemo {
    fn project(&self) -> String {
        let mut code = CodeWriter::new();
        code.comment("A picker chooses one option from a fixed set.");
        code.open(format!(
            "let picker = Picker::new(\"Flavor\", Flavor::{})",
            self.selection.name()
        ));
        code.modifier_if(
            self.style != PickerStyle::default(),
            format!("style(PickerStyle::{})", self.style.name()),
        );
        code.modifier_if(
            self.tint != Tint::default(),
            format!("tint(Color::{})", self.tint.name()),
        );
        code.finish()
    }
}

impl Demo for PickerDemo {
    const DESTINATION: Destination = Destination::Picker;
    const TITLE: &'static str = "Picker";
    const SUMMARY: &'static str = "A single choice from a menu, segmented bar or inline list.";

    fn controls() -> &'static [Control<Self>] {
        CONTROLS
    }

    fn preview(&self, area: Rect, buf: &mut Buffer) {
        let accent = self.tint.color();
        match self.style {
            PickerStyle::Menu => {
                let line = Line::from(vec![
                    Span::raw("Flavor  "),
                    Span::styled(
                        format!("{} ▾", self.selection.name()),
                        Style::default().fg(accent).add_modifier(Modifier::BOLD),
                    ),
                ]);
                let rect = centered(line.width() as u16, 1, area);
                line.render(rect, buf);
            }
            PickerStyle::Segmented => {
                let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];
                for flavor in Flavor::ALL {
                    let style = if *flavor == self.selection {
                        Style::default().fg(Color::Black).bg(accent)
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(format!(" {} ", flavor.name()), style));
                    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
                }
                let line = Line::from(spans);
                let rect = centered(line.width() as u16, 1, area);
                line.render(rect, buf);
            }
            PickerStyle::Inline => {
                let width = Flavor::LABELS.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
                let rect = centered(width, Flavor::ALL.len() as u16, area);
                for (row, flavor) in Flavor::ALL.iter().enumerate().take(rect.height as usize) {
                    let line = if *flavor == self.selection {
                        Line::styled(format!("● {}", flavor.name()), Style::default().fg(accent))
                    } else {
                        Line::raw(format!("○ {}", flavor.name()))
                    };
                    line.render(Rect::new(rect.x, rect.y + row as u16, rect.width, 1), buf);
                }
            }
        }
    }
}
