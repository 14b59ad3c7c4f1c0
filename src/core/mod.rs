//! Core model – destinations, the catalog registry, search, navigation,
//! state-to-code projection and the offline snapshot harness.
//!
//! Nothing in this module depends on the terminal.  Everything except the
//! snapshot harness is free of I/O.

pub mod catalog;
pub mod destination;
pub mod navigation;
pub mod projector;
pub mod search;
pub mod snapshot;
