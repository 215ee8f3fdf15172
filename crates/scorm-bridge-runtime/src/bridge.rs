//! The runtime bridge core: one session, one store, one event sink.
//!
//! Both API surfaces (SCORM 1.2 and SCORM 2004) delegate here, so the
//! semantics live in exactly one place. Every operation is synchronous,
//! never blocks and never raises toward the content package; failures are
//! reported through the return value and the last-error code.

use tracing::{debug, info, warn};

use scorm_bridge_core::{
    BridgeConfig, DataModelElement, ElementLookup, ErrorCode, EventKind, LifecycleEvent,
    PackageInfo, PolicySettings, SessionInfo, SessionStatus,
};

use crate::session::{BeginOutcome, Session};
use crate::store::{DataModelStore, WriteOutcome};

/// Host callback receiving lifecycle events.
///
/// Invoked synchronously in the same turn as the triggering call, zero or
/// more times per session, never after the session's Exit event.
pub type EventSink = Box<dyn Fn(LifecycleEvent) + Send>;

/// The SCORM runtime bridge backing one loaded content package.
pub struct RuntimeBridge {
    session: Session,
    store: DataModelStore,
    policy: PolicySettings,
    sink: EventSink,
    /// A Complete event has been emitted for this session
    completed: bool,
    /// An Exit event has been emitted; the sink must not fire again
    exited: bool,
}

impl std::fmt::Debug for RuntimeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeBridge")
            .field("session", &self.session)
            .field("completed", &self.completed)
            .field("exited", &self.exited)
            .finish_non_exhaustive()
    }
}

impl RuntimeBridge {
    /// Create a fresh bridge for a loaded package.
    pub fn new(package: PackageInfo, config: BridgeConfig, sink: EventSink) -> Self {
        let store = DataModelStore::new(config.learner.clone());
        Self {
            session: Session::new(package),
            store,
            policy: config.policy,
            sink,
            completed: false,
            exited: false,
        }
    }

    /// `Initialize` / `LMSInitialize`.
    ///
    /// Uninitialized → Active emits Start; a repeat call while Active
    /// succeeds without re-emitting; a call after Terminate fails.
    pub fn initialize(&mut self) -> bool {
        match self.session.begin() {
            Ok(BeginOutcome::Started) => {
                info!(
                    "Initialize: session started for package={}",
                    self.session.package().id
                );
                self.session.record(ErrorCode::NoError);
                self.emit(LifecycleEvent::new(
                    EventKind::Start,
                    self.session.package().id.clone(),
                ));
                true
            }
            Ok(BeginOutcome::AlreadyActive) => {
                debug!("Initialize: already active, idempotent success");
                self.session.record(ErrorCode::NoError);
                true
            }
            Err(code) => {
                warn!("Initialize rejected: {}", code);
                self.session.record(code);
                false
            }
        }
    }

    /// `Terminate` / `LMSFinish`.
    ///
    /// Active → Terminated emits Exit; Exit is terminal for the session.
    pub fn terminate(&mut self) -> bool {
        match self.session.end() {
            Ok(()) => {
                info!(
                    "Terminate: session ended for package={}",
                    self.session.package().id
                );
                self.session.record(ErrorCode::NoError);
                self.emit(LifecycleEvent::new(
                    EventKind::Exit,
                    self.session.package().id.clone(),
                ));
                self.exited = true;
                true
            }
            Err(code) => {
                warn!("Terminate rejected: {}", code);
                self.session.record(code);
                false
            }
        }
    }

    /// `GetValue` / `LMSGetValue`.
    pub fn get_value(&mut self, name: &str) -> String {
        if let Err(code) = self.session.require_active() {
            self.session.record(code);
            return String::new();
        }
        match DataModelElement::lookup(name) {
            ElementLookup::Known(element) => {
                self.session.record(ErrorCode::NoError);
                let value = self.store.get(element);
                debug!("GetValue: {} = {:?}", name, value);
                value
            }
            ElementLookup::Unknown | ElementLookup::Malformed => {
                debug!("GetValue: undefined element {:?}", name);
                self.session.record(ErrorCode::UndefinedElement);
                String::new()
            }
        }
    }

    /// `SetValue` / `LMSSetValue`.
    ///
    /// A `lesson_status=completed` write forces the stored score to 100 and
    /// emits Complete. A valid `score.raw` write emits Progress with the
    /// parsed value, plus Complete if the configured completion threshold
    /// is reached for the first time.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        if let Err(code) = self.session.require_active() {
            self.session.record(code);
            return false;
        }
        let element = match DataModelElement::lookup(name) {
            ElementLookup::Known(element) => element,
            ElementLookup::Unknown | ElementLookup::Malformed => {
                debug!("SetValue: undefined element {:?}", name);
                self.session.record(ErrorCode::UndefinedElement);
                return false;
            }
        };
        match self.store.set(element, value) {
            Ok(outcome) => {
                debug!("SetValue: {} = {:?}", name, value);
                self.session.record(ErrorCode::NoError);
                self.react(outcome);
                true
            }
            Err(code) => {
                warn!("SetValue rejected: {} = {:?} ({})", name, value, code);
                self.session.record(code);
                false
            }
        }
    }

    /// `Commit` / `LMSCommit`.
    ///
    /// No persistence backend is in scope; a commit inside an Active
    /// session is a no-op success, anywhere else it fails soft like the
    /// other value operations.
    pub fn commit(&mut self) -> bool {
        match self.session.require_active() {
            Ok(()) => {
                debug!("Commit: no-op success");
                self.session.record(ErrorCode::NoError);
                true
            }
            Err(code) => {
                self.session.record(code);
                false
            }
        }
    }

    /// `GetLastError` / `LMSGetLastError`.
    pub fn last_error(&self) -> ErrorCode {
        self.session.last_error()
    }

    /// `GetErrorString` / `LMSGetErrorString`. Does not disturb the
    /// last-error code. Unknown codes resolve to a generic message.
    pub fn error_string(&self, code: &str) -> &'static str {
        match ErrorCode::from_code(code) {
            Some(code) => code.message(),
            None => "Unknown error code",
        }
    }

    /// `GetDiagnostic` / `LMSGetDiagnostic`. An empty request describes the
    /// last recorded error.
    pub fn diagnostic(&self, code: &str) -> String {
        let resolved = if code.trim().is_empty() {
            Some(self.session.last_error())
        } else {
            ErrorCode::from_code(code)
        };
        match resolved {
            Some(code) => format!("{}: {}", code.code(), code.message()),
            None => "No diagnostic information available".to_string(),
        }
    }

    /// Abandon the session because the host unloaded the package before
    /// `Terminate` was called.
    ///
    /// All bridge state is reset so a later package cannot observe it. An
    /// Exit event is synthesized only when the host policy asks for one.
    pub fn abandon(&mut self) {
        if self.session.status() == SessionStatus::Active {
            info!(
                "Abandoning active session for package={}",
                self.session.package().id
            );
            if self.policy.synthesize_exit_on_unload {
                self.emit(LifecycleEvent::new(
                    EventKind::Exit,
                    self.session.package().id.clone(),
                ));
            }
            self.exited = true;
        }
        self.session.abandon();
        self.store.clear();
    }

    /// Outward snapshot of the session.
    pub fn session_info(&self) -> SessionInfo {
        self.session.info()
    }

    /// Snapshot of the data-model store for host inspection.
    pub fn store_snapshot(&self) -> std::collections::BTreeMap<&'static str, String> {
        self.store.snapshot()
    }

    /// Turn a successful write into lifecycle events.
    fn react(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::StatusCompleted => {
                self.completed = true;
                self.emit(LifecycleEvent::new(
                    EventKind::Complete,
                    self.session.package().id.clone(),
                ));
            }
            WriteOutcome::Score(score) => {
                self.emit(LifecycleEvent::progress(
                    self.session.package().id.clone(),
                    score,
                ));
                if let Some(threshold) = self.policy.completion_threshold {
                    if score >= threshold && !self.completed {
                        self.completed = true;
                        self.emit(LifecycleEvent::new(
                            EventKind::Complete,
                            self.session.package().id.clone(),
                        ));
                    }
                }
            }
            WriteOutcome::Status(_) | WriteOutcome::Plain => {}
        }
    }

    fn emit(&self, event: LifecycleEvent) {
        if self.exited {
            warn!("Suppressed {:?} event after Exit", event.kind);
            return;
        }
        debug!("Emitting event: {:?}", event.kind);
        (self.sink)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn bridge_with_events(
        config: BridgeConfig,
    ) -> (RuntimeBridge, Arc<Mutex<Vec<LifecycleEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink_events = Arc::clone(&events);
        let bridge = RuntimeBridge::new(
            PackageInfo::new("pkg-1", "Test Package"),
            config,
            Box::new(move |event| sink_events.lock().unwrap().push(event)),
        );
        (bridge, events)
    }

    fn kinds(events: &Arc<Mutex<Vec<LifecycleEvent>>>) -> Vec<EventKind> {
        events.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_initialize_emits_start_once() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());

        assert!(bridge.initialize());
        assert!(bridge.initialize()); // idempotent
        assert_eq!(kinds(&events), vec![EventKind::Start]);
        assert_eq!(bridge.last_error(), ErrorCode::NoError);
    }

    #[test]
    fn test_initialize_after_terminate_fails() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();
        bridge.terminate();

        assert!(!bridge.initialize());
        assert_eq!(bridge.last_error(), ErrorCode::AlreadyTerminated);
    }

    #[test]
    fn test_terminate_requires_active() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());

        assert!(!bridge.terminate());
        assert_eq!(bridge.last_error(), ErrorCode::NotInitialized);
        assert!(kinds(&events).is_empty());
    }

    #[test]
    fn test_value_ops_before_initialize_fail() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());

        assert_eq!(bridge.get_value("cmi.core.lesson_status"), "");
        assert_eq!(bridge.last_error(), ErrorCode::NotInitialized);

        assert!(!bridge.set_value("cmi.core.score.raw", "42"));
        assert_eq!(bridge.last_error(), ErrorCode::NotInitialized);

        assert!(!bridge.commit());
        assert_eq!(bridge.last_error(), ErrorCode::NotInitialized);
    }

    #[test]
    fn test_get_default_without_error() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert_eq!(bridge.get_value("cmi.core.lesson_status"), "not attempted");
        assert_eq!(bridge.last_error(), ErrorCode::NoError);
    }

    #[test]
    fn test_get_undefined_element() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert_eq!(bridge.get_value("cmi.suspend_data"), "");
        assert_eq!(bridge.last_error(), ErrorCode::UndefinedElement);
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert!(bridge.set_value("cmi.core.lesson_location", "page-9"));
        assert_eq!(bridge.get_value("cmi.core.lesson_location"), "page-9");
    }

    #[test]
    fn test_score_write_emits_progress() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert!(bridge.set_value("cmi.core.score.raw", "42"));
        let events = events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, EventKind::Progress);
        assert_eq!(events[1].score(), Some(42));
    }

    #[test]
    fn test_malformed_score_sets_invalid_value() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert!(!bridge.set_value("cmi.core.score.raw", "not-a-number"));
        assert_eq!(bridge.last_error(), ErrorCode::InvalidValue);
        assert_eq!(kinds(&events), vec![EventKind::Start]); // no Progress
    }

    #[test]
    fn test_completed_status_emits_complete_and_forces_score() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();
        bridge.set_value("cmi.core.score.raw", "42");

        assert!(bridge.set_value("cmi.core.lesson_status", "completed"));
        assert_eq!(
            kinds(&events),
            vec![EventKind::Start, EventKind::Progress, EventKind::Complete]
        );
        assert_eq!(bridge.get_value("cmi.core.score.raw"), "100");
    }

    #[test]
    fn test_non_completed_status_emits_nothing() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        assert!(bridge.set_value("cmi.core.lesson_status", "incomplete"));
        assert_eq!(kinds(&events), vec![EventKind::Start]);
    }

    #[test]
    fn test_threshold_policy_completes_once() {
        let mut config = BridgeConfig::default();
        config.policy.completion_threshold = Some(80);
        let (mut bridge, events) = bridge_with_events(config);
        bridge.initialize();

        bridge.set_value("cmi.core.score.raw", "50");
        assert_eq!(kinds(&events), vec![EventKind::Start, EventKind::Progress]);

        bridge.set_value("cmi.core.score.raw", "85");
        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Start,
                EventKind::Progress,
                EventKind::Progress,
                EventKind::Complete
            ]
        );

        // Reaching the threshold again does not re-complete
        bridge.set_value("cmi.core.score.raw", "90");
        assert_eq!(kinds(&events).last(), Some(&EventKind::Progress));
    }

    #[test]
    fn test_default_policy_no_score_completion() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();

        bridge.set_value("cmi.core.score.raw", "100");
        assert_eq!(kinds(&events), vec![EventKind::Start, EventKind::Progress]);
    }

    #[test]
    fn test_no_events_after_terminate() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();
        bridge.terminate();

        assert!(!bridge.set_value("cmi.core.score.raw", "42"));
        assert_eq!(bridge.get_value("cmi.core.score.raw"), "");
        assert_eq!(kinds(&events), vec![EventKind::Start, EventKind::Exit]);
    }

    #[test]
    fn test_scenario_full_sequence() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());

        assert!(bridge.initialize());
        assert!(bridge.set_value("cmi.core.score.raw", "42"));
        assert!(bridge.set_value("cmi.core.lesson_status", "completed"));
        assert!(bridge.terminate());

        let events = events.lock().unwrap();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Start,
                EventKind::Progress,
                EventKind::Complete,
                EventKind::Exit
            ]
        );
        assert_eq!(events[1].score(), Some(42));
    }

    #[test]
    fn test_error_string_lookup() {
        let (bridge, _events) = bridge_with_events(BridgeConfig::default());
        assert_eq!(bridge.error_string("0"), "No error");
        assert_eq!(bridge.error_string("401"), "Undefined data model element");
        assert_eq!(bridge.error_string("999"), "Unknown error code");
    }

    #[test]
    fn test_diagnostic() {
        let (mut bridge, _events) = bridge_with_events(BridgeConfig::default());
        bridge.get_value("cmi.core.score.raw"); // NotInitialized

        assert_eq!(bridge.diagnostic(""), "301: Not initialized");
        assert_eq!(bridge.diagnostic("401"), "401: Undefined data model element");
        assert_eq!(bridge.diagnostic("999"), "No diagnostic information available");
    }

    #[test]
    fn test_abandon_without_synthetic_exit() {
        let (mut bridge, events) = bridge_with_events(BridgeConfig::default());
        bridge.initialize();
        bridge.abandon();

        assert_eq!(kinds(&events), vec![EventKind::Start]);
        assert_eq!(bridge.session_info().status, SessionStatus::Terminated);
        // Store was reset
        assert_eq!(bridge.store_snapshot()["cmi.core.score.raw"], "0");
    }

    #[test]
    fn test_abandon_with_synthetic_exit() {
        let mut config = BridgeConfig::default();
        config.policy.synthesize_exit_on_unload = true;
        let (mut bridge, events) = bridge_with_events(config);
        bridge.initialize();
        bridge.abandon();

        assert_eq!(kinds(&events), vec![EventKind::Start, EventKind::Exit]);
    }

    #[test]
    fn test_abandon_uninitialized_emits_nothing() {
        let mut config = BridgeConfig::default();
        config.policy.synthesize_exit_on_unload = true;
        let (mut bridge, events) = bridge_with_events(config);
        bridge.abandon();

        assert!(kinds(&events).is_empty());
    }
}
