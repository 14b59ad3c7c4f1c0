//! State-to-code projection.
//!
//! A demo screen's control state is turned into a snippet of source text that
//! describes exactly what the live preview shows.  Projection is a pure
//! function of the state: no clock, no randomness, no I/O.
//!
//! Conventions every projector follows:
//!
//! * Modifiers whose value equals the type's default are omitted, never
//!   emitted as empty or `false` clauses.
//! * Numbers use a fixed precision: integers are truncated ([`fmt_int`]),
//!   ratios are whole percentages ([`fmt_percent`]).
//! * Comments are always generated; hiding them is the code view's job
//!   ([`strip_comments`]).

/// Anything whose state can be rendered as source text.
pub trait Projectable {
    fn project(&self) -> String;
}

// ───────────────────────────────────────── writer ────────────

const INDENT: &str = "    ";

/// Line-oriented builder for generated snippets.
///
/// ```text
/// // A button runs its action when activated.
/// let button = Button::new("Continue")
///     .style(ButtonStyle::Filled);
/// ```
#[derive(Debug, Default)]
pub struct CodeWriter {
    lines: Vec<String>,
    /// `true` while a builder chain is open (modifiers get indented).
    in_chain: bool,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("{}// {text}", self.indent()));
        self
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        self.lines.push(format!("{}{text}", self.indent()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Start a builder chain, e.g. `let x = Thing::new(..)`.
    pub fn open(&mut self, head: impl Into<String>) -> &mut Self {
        self.close();
        self.lines.push(head.into());
        self.in_chain = true;
        self
    }

    /// Append `.text` to the open chain.
    pub fn modifier(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        self.lines.push(format!("{INDENT}.{text}"));
        self
    }

    pub fn modifier_if(&mut self, condition: bool, text: impl Into<String>) -> &mut Self {
        if condition {
            self.modifier(text);
        }
        self
    }

    /// Append a modifier only when `value` is present.
    pub fn modifier_opt<T>(&mut self, value: Option<T>, render: impl FnOnce(T) -> String) -> &mut Self {
        if let Some(v) = value {
            self.modifier(render(v));
        }
        self
    }

    /// Terminate the open chain with `;`.  No-op when no chain is open.
    pub fn close(&mut self) -> &mut Self {
        if self.in_chain {
            if let Some(last) = self.lines.last_mut() {
                last.push(';');
            }
            self.in_chain = false;
        }
        self
    }

    pub fn finish(mut self) -> String {
        self.close();
        self.lines.join("\n")
    }

    fn indent(&self) -> &'static str {
        if self.in_chain {
            INDENT
        } else {
            ""
        }
    }
}

// ───────────────────────────────────────── formatting ────────

/// Integer rendering: truncates toward zero.
pub fn fmt_int(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

/// Whole-number percentage of a `0.0..=1.0` ratio.
///
/// Rounded rather than truncated so `0.29` prints as `29%`, not `28%`.
pub fn fmt_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

/// Fixed-precision decimal.
pub fn fmt_fixed(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Escaped string literal.
pub fn quoted(text: &str) -> String {
    format!("{text:?}")
}

// ───────────────────────────────────────── comments ──────────

/// Remove `//` comments that are outside string and char literals.
///
/// Lines holding nothing but a comment are dropped entirely; trailing
/// comments are cut and the remaining code is right-trimmed.
pub fn strip_comments(code: &str) -> String {
    let mut out = Vec::new();
    for line in code.lines() {
        match comment_start(line) {
            None => out.push(line.to_string()),
            Some(pos) => {
                let kept = line[..pos].trim_end();
                if !kept.is_empty() {
                    out.push(kept.to_string());
                }
            }
        }
    }
    out.join("\n")
}

/// Byte offset of the first `//` outside a literal.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'\\' {
                i += 1;
            } else if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'\'' {
            // A lone quote is a lifetime or label, not a literal.
            if let Some(len) = char_literal_len(&line[i..]) {
                i += len;
                continue;
            }
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Byte length of the char literal (`'x'` or `'\x'`) at the start of `text`.
fn char_literal_len(text: &str) -> Option<usize> {
    let mut chars = text.char_indices().skip(1);
    let (_, first) = chars.next()?;
    if first == '\\' {
        chars.next()?;
    }
    match chars.next()? {
        (end, '\'') => Some(end + 1),
        _ => None,
    }
}
