//! Application orchestration — state management, event loop, input handling
//! and the non-interactive command-line modes.

pub mod batch;
pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
