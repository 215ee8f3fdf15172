//! Package identity types for the content packages hosted by the bridge.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a content package.
///
/// The bridge treats this as an opaque string supplied by the host shell;
/// it is echoed back on every lifecycle event so the host can correlate
/// events with the package that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Create a package ID from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PackageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host-shell contract consumed by the bridge: a package identifier and
/// a human-readable title for any messages. The bridge performs no rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackageInfo {
    /// Package identifier
    pub id: PackageId,
    /// Human-readable package title
    pub title: String,
    /// Optional package description
    pub description: Option<String>,
}

impl PackageInfo {
    /// Create package info with no description.
    pub fn new(id: impl Into<PackageId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
