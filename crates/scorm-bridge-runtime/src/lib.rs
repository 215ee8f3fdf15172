//! # scorm-bridge-runtime
//!
//! The SCORM runtime communication bridge.
//!
//! This crate provides:
//! - The CMI data-model store with per-element defaults and validation
//! - The session state machine (Uninitialized → Active → Terminated)
//! - The core bridge operations and lifecycle event emission
//! - The SCORM 1.2 (`API`) and SCORM 2004 (`API_1484_11`) adapter surfaces
//! - Installation and teardown of the API surfaces at package load/unload
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on scorm-bridge-core and
//! implements the contract a hosted content package calls during playback.
//! Both API surfaces are thin adapters over one shared [`RuntimeBridge`], so
//! either surface observes the other's mutations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod bridge;
pub mod install;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use api::{Scorm12Api, Scorm2004Api, SCORM_FALSE, SCORM_TRUE};
pub use bridge::{EventSink, RuntimeBridge};
pub use install::{ApiInstallation, InstallationSlot, API_2004_GLOBAL_NAME, API_GLOBAL_NAME};
pub use session::Session;
pub use store::{DataModelStore, WriteOutcome};
