//! Lifecycle events emitted by the bridge toward the host shell.
//!
//! Events are pure data: they carry what happened and when, never any
//! transition logic. The bridge emits each event once, in the order the
//! triggering calls occurred, and retains no history.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::PackageId;

/// What a lifecycle event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// First successful Initialize for the session
    Start,
    /// A valid score write
    Progress,
    /// Lesson reported completed
    Complete,
    /// Session terminated; no further events will follow
    Exit,
}

/// Extra data carried by some event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    /// Score reported by a Progress event
    Progress {
        /// Raw score value, 0-100
        score: u32,
    },
}

/// An immutable lifecycle record handed to the host shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LifecycleEvent {
    /// Event kind
    pub kind: EventKind,
    /// Package the event belongs to
    pub package_id: PackageId,
    /// When the triggering call occurred
    pub timestamp: DateTime<Utc>,
    /// Optional payload (present for Progress)
    pub payload: Option<EventPayload>,
}

impl LifecycleEvent {
    /// Create an event with no payload, stamped now.
    pub fn new(kind: EventKind, package_id: PackageId) -> Self {
        Self {
            kind,
            package_id,
            timestamp: Utc::now(),
            payload: None,
        }
    }

    /// Create a Progress event carrying a score, stamped now.
    pub fn progress(package_id: PackageId, score: u32) -> Self {
        Self {
            kind: EventKind::Progress,
            package_id,
            timestamp: Utc::now(),
            payload: Some(EventPayload::Progress { score }),
        }
    }

    /// The score carried by this event, if any.
    pub fn score(&self) -> Option<u32> {
        match self.payload {
            Some(EventPayload::Progress { score }) => Some(score),
            None => None,
        }
    }
}
