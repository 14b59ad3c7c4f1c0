//! Copying generated code to the system clipboard.
//!
//! External copy tools are tried first (`pbcopy`, `clip`, `wl-copy`, `xclip`);
//! when none succeeds the text is sent to the terminal as an OSC 52 escape
//! sequence, which most modern terminals (and tmux with `set-clipboard on`)
//! forward to the host clipboard.

use std::cell::RefCell;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Common OSC 52 size limit (base64 payload bytes).
pub const MAX_OSC52_PAYLOAD: usize = 74_994;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("nothing to copy")]
    Empty,
    #[error("OSC 52 payload too large ({size} > {max} bytes)")]
    TooLarge { size: usize, max: usize },
    #[error("failed to write to the terminal")]
    Write(#[from] io::Error),
}

/// How the text reached the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    /// An external tool, by program name.
    Tool(&'static str),
    Osc52,
    /// Kept in memory only (tests).
    Memory,
}

impl CopyMethod {
    pub fn describe(self) -> String {
        match self {
            CopyMethod::Tool(name) => format!("via {name}"),
            CopyMethod::Osc52 => "via terminal (OSC 52)".to_string(),
            CopyMethod::Memory => "in memory".to_string(),
        }
    }
}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<CopyMethod, ClipboardError>;
}

// ───────────────────────────────────────── system ────────────

/// The real clipboard: external tools, then OSC 52 on stderr (the TUI's
/// output stream).
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<CopyMethod, ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        for &(program, args) in CLIP_TOOLS {
            if run_clip_command(program, args, text) {
                tracing::debug!(program, bytes = text.len(), "copied with external tool");
                return Ok(CopyMethod::Tool(program));
            }
        }
        let mut err = io::stderr().lock();
        write_osc52(&mut err, text)?;
        tracing::debug!(bytes = text.len(), "copied with OSC 52");
        Ok(CopyMethod::Osc52)
    }
}

/// External copy tools, in the order they are tried.
#[cfg(target_os = "macos")]
const CLIP_TOOLS: &[(&str, &[&str])] = &[("pbcopy", &[])];
#[cfg(target_os = "windows")]
const CLIP_TOOLS: &[(&str, &[&str])] = &[("clip", &[])];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CLIP_TOOLS: &[(&str, &[&str])] = &[("wl-copy", &[]), ("xclip", &["-selection", "clipboard"])];

fn run_clip_command(cmd: &str, args: &[&str], input: &str) -> bool {
    let mut child = match Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(c) => c,
        Err(_) => return false,
    };

    if let Some(mut stdin) = child.stdin.take() {
        if stdin.write_all(input.as_bytes()).is_err() {
            let _ = child.kill();
            let _ = child.wait();
            return false;
        }
        // Dropping stdin closes the pipe so the tool sees EOF.
    }

    child.wait().map(|s| s.success()).unwrap_or(false)
}

/// Write `text` as an OSC 52 "set clipboard" sequence.
pub fn write_osc52(writer: &mut impl Write, text: &str) -> Result<(), ClipboardError> {
    let encoded = STANDARD.encode(text.as_bytes());
    if encoded.len() > MAX_OSC52_PAYLOAD {
        return Err(ClipboardError::TooLarge {
            size: encoded.len(),
            max: MAX_OSC52_PAYLOAD,
        });
    }
    write!(writer, "\x1b]52;c;{encoded}\x07")?;
    writer.flush()?;
    Ok(())
}

// ───────────────────────────────────────── memory ────────────

/// Records copies instead of touching the system.  Clones share contents,
/// so a test can keep a handle to a clipboard it boxed away.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> Result<CopyMethod, ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(CopyMethod::Memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osc52_sequence_is_base64() {
        let mut out = Vec::new();
        write_osc52(&mut out, "let a = 1;").expect("fits");
        let seq = String::from_utf8(out).expect("ascii");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with('\x07'));
        let payload = &seq["\x1b]52;c;".len()..seq.len() - 1];
        assert_eq!(STANDARD.decode(payload).expect("valid base64"), b"let a = 1;");
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let text = "x".repeat(MAX_OSC52_PAYLOAD);
        let mut out = Vec::new();
        let err = write_osc52(&mut out, &text).unwrap_err();
        assert!(matches!(err, ClipboardError::TooLarge { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn memory_clipboard_keeps_last_copy() {
        let mut clip = MemoryClipboard::default();
        assert!(matches!(clip.copy(""), Err(ClipboardError::Empty)));
        clip.copy("first").expect("copy");
        let handle = clip.clone();
        clip.copy("second").expect("copy");
        assert_eq!(handle.contents().as_deref(), Some("second"));
    }
}
