//! Error types for the SCORM runtime bridge.
//!
//! Two layers of errors exist. [`ErrorCode`] is the SCORM-style numeric
//! code exchanged over the runtime API surface: bridge functions never
//! raise toward the content package, they fail soft and park a code for
//! `GetLastError`. [`Error`] is the ordinary Rust error used at the
//! host-facing seams (installation, configuration).

use thiserror::Error;

use crate::PackageId;

/// SCORM-style error codes surfaced through `GetLastError`.
///
/// The numeric values follow the standard's conventions so that real
/// content packages recognize them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorCode {
    /// No error (0)
    #[default]
    NoError,
    /// General error (101)
    GeneralError,
    /// Call before Initialize (301)
    NotInitialized,
    /// Call after Terminate (113)
    AlreadyTerminated,
    /// Undefined data-model element (401)
    UndefinedElement,
    /// Element is read-only (403)
    ReadOnlyElement,
    /// Invalid data-model value (405)
    InvalidValue,
}

impl ErrorCode {
    /// Numeric code string returned by `GetLastError`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoError => "0",
            ErrorCode::GeneralError => "101",
            ErrorCode::NotInitialized => "301",
            ErrorCode::AlreadyTerminated => "113",
            ErrorCode::UndefinedElement => "401",
            ErrorCode::ReadOnlyElement => "403",
            ErrorCode::InvalidValue => "405",
        }
    }

    /// Human-readable message returned by `GetErrorString`.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::NoError => "No error",
            ErrorCode::GeneralError => "General error",
            ErrorCode::NotInitialized => "Not initialized",
            ErrorCode::AlreadyTerminated => "Session already terminated",
            ErrorCode::UndefinedElement => "Undefined data model element",
            ErrorCode::ReadOnlyElement => "Data model element is read-only",
            ErrorCode::InvalidValue => "Invalid data model element value",
        }
    }

    /// Look up a code string as passed to `GetErrorString(code)`.
    ///
    /// Unknown codes resolve to `None`; the API surface maps that to a
    /// generic message rather than failing.
    pub fn from_code(code: &str) -> Option<ErrorCode> {
        match code.trim() {
            "0" => Some(ErrorCode::NoError),
            "101" => Some(ErrorCode::GeneralError),
            "301" => Some(ErrorCode::NotInitialized),
            "113" => Some(ErrorCode::AlreadyTerminated),
            "401" => Some(ErrorCode::UndefinedElement),
            "403" => Some(ErrorCode::ReadOnlyElement),
            "405" => Some(ErrorCode::InvalidValue),
            _ => None,
        }
    }

    /// Whether this code represents success.
    pub fn is_ok(&self) -> bool {
        matches!(self, ErrorCode::NoError)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

/// Main error type for host-facing bridge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A bridge is already installed for another package
    #[error("Bridge already installed for package: {0}")]
    BridgeInstalled(PackageId),

    /// No session exists in the hosting context
    #[error("No active session")]
    NoActiveSession,

    /// Operation addressed the wrong package
    #[error("Package mismatch: expected {expected}, got {actual}")]
    PackageMismatch {
        /// Package the bridge was installed for
        expected: PackageId,
        /// Package named by the caller
        actual: PackageId,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
