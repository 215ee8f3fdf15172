//! SCORM Bridge Host Shell Library
//!
//! This library contains the host-shell player that loads content packages,
//! installs the runtime bridge and tracks progress from lifecycle events.
//! The demo driver binary is in main.rs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod player;

// Re-export commonly used types
pub use player::{PlayerShell, PlayerState};
