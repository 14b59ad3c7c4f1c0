//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and the demo screens and turns
//! them into cells on the terminal, or into pixels for snapshots.  No
//! filesystem I/O happens here.

pub mod catalog_list;
pub mod code_view;
pub mod layout;
pub mod popup;
pub mod raster;
pub mod screen_page;
pub mod search;
pub mod theme;
