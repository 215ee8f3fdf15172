//! Session types for tracking one attempt at running a content package.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PackageId;

/// Unique identifier for one attempt at a content package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AttemptId(Uuid);

impl AttemptId {
    /// Create a new random attempt ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AttemptId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a runtime session.
///
/// The session state machine has exactly these three states. Terminated is
/// terminal: a new attempt requires a fresh bridge for a freshly loaded
/// package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SessionStatus {
    /// Content has been loaded but has not called Initialize yet
    Uninitialized,
    /// Initialize succeeded; value exchange is permitted
    Active,
    /// Terminate was called (or the package was unloaded)
    Terminated,
}

/// Outward-facing snapshot of a session's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SessionInfo {
    /// Attempt identifier
    pub attempt_id: AttemptId,
    /// Package this session belongs to
    pub package_id: PackageId,
    /// Current status
    pub status: SessionStatus,
    /// When the first successful Initialize happened, if it has
    pub started_at: Option<DateTime<Utc>>,
}
