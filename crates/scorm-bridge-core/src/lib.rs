//! # scorm-bridge-core
//!
//! Core types for the SCORM runtime bridge.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other scorm-bridge crates. It provides:
//!
//! - Package identity types (PackageId, PackageInfo)
//! - Session types (AttemptId, SessionStatus, SessionInfo)
//! - CMI data-model element types and validation
//! - Lifecycle event types emitted toward the host shell
//! - Error codes exchanged over the runtime API surface
//! - Bridge configuration
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other scorm-bridge crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all modules
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod package;
pub mod session;

// Re-export commonly used types
pub use config::{BridgeConfig, LearnerSettings, PolicySettings};
pub use element::{DataModelElement, ElementLookup, LessonStatus};
pub use error::{Error, ErrorCode, Result};
pub use event::{EventKind, EventPayload, LifecycleEvent};
pub use package::{PackageId, PackageInfo};
pub use session::{AttemptId, SessionInfo, SessionStatus};
