//! Session state machine for one attempt at a content package.

use chrono::{DateTime, Utc};
use tracing::info;

use scorm_bridge_core::{AttemptId, ErrorCode, PackageInfo, SessionInfo, SessionStatus};

/// Outcome of a successful `begin` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Uninitialized → Active; the first and only Start transition
    Started,
    /// Session was already Active; Initialize is idempotent
    AlreadyActive,
}

/// One attempt at running a content package.
///
/// Holds the state machine (Uninitialized → Active → Terminated), the
/// attempt start time and the last-error code observed by `GetLastError`.
#[derive(Debug)]
pub struct Session {
    attempt_id: AttemptId,
    package: PackageInfo,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    last_error: ErrorCode,
}

impl Session {
    /// Create an uninitialized session for a loaded package.
    pub fn new(package: PackageInfo) -> Self {
        let attempt_id = AttemptId::new();
        info!(
            "Session created: attempt={}, package={}",
            attempt_id, package.id
        );
        Self {
            attempt_id,
            package,
            status: SessionStatus::Uninitialized,
            started_at: None,
            last_error: ErrorCode::NoError,
        }
    }

    /// The attempt identifier.
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    /// The package this session belongs to.
    pub fn package(&self) -> &PackageInfo {
        &self.package
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The last error code recorded by an API call.
    pub fn last_error(&self) -> ErrorCode {
        self.last_error
    }

    /// Record the result code of the most recent API call.
    pub fn record(&mut self, code: ErrorCode) {
        self.last_error = code;
    }

    /// Transition toward Active.
    ///
    /// Idempotent while Active. Fails once Terminated: a new attempt needs
    /// a fresh session for a freshly loaded package.
    pub fn begin(&mut self) -> Result<BeginOutcome, ErrorCode> {
        match self.status {
            SessionStatus::Uninitialized => {
                self.transition(SessionStatus::Active);
                self.started_at = Some(Utc::now());
                Ok(BeginOutcome::Started)
            }
            SessionStatus::Active => Ok(BeginOutcome::AlreadyActive),
            SessionStatus::Terminated => Err(ErrorCode::AlreadyTerminated),
        }
    }

    /// Transition Active → Terminated.
    pub fn end(&mut self) -> Result<(), ErrorCode> {
        match self.status {
            SessionStatus::Active => {
                self.transition(SessionStatus::Terminated);
                Ok(())
            }
            SessionStatus::Uninitialized | SessionStatus::Terminated => {
                Err(ErrorCode::NotInitialized)
            }
        }
    }

    /// Guard for value operations: only an Active session may exchange
    /// data-model values.
    pub fn require_active(&self) -> Result<(), ErrorCode> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Uninitialized | SessionStatus::Terminated => {
                Err(ErrorCode::NotInitialized)
            }
        }
    }

    /// Force the session into Terminated without the normal Terminate
    /// bookkeeping. Used when the host unloads the package early.
    pub fn abandon(&mut self) {
        if self.status != SessionStatus::Terminated {
            self.transition(SessionStatus::Terminated);
        }
    }

    /// Outward snapshot of this session.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            attempt_id: self.attempt_id,
            package_id: self.package.id.clone(),
            status: self.status,
            started_at: self.started_at,
        }
    }

    fn transition(&mut self, status: SessionStatus) {
        info!(
            "Session status changed: attempt={}, {:?} -> {:?}",
            self.attempt_id, self.status, status
        );
        self.status = status;
    }
}
