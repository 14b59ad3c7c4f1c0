//! Process-boundary helpers.
//!
//! All TUI rendering goes to the alternate screen (stderr-backed), so stdout
//! is reserved for results of the non-interactive modes (`--search`), and the
//! clipboard falls back to escape sequences written on stderr.

pub mod clipboard;
