//! Installation and teardown of the API surfaces.
//!
//! The standard mandates fixed global names the content package discovers
//! by walking its parent contexts: `API` for SCORM 1.2 and `API_1484_11`
//! for SCORM 2004. An installation is an explicitly owned resource created
//! at package-load time and torn down at unload, never left to implicit
//! cleanup, so a later-loaded package can never observe a stale session.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use scorm_bridge_core::{BridgeConfig, PackageInfo, SessionInfo};

use crate::api::{Scorm12Api, Scorm2004Api};
use crate::bridge::{EventSink, RuntimeBridge};

/// Global name the SCORM 1.2 surface is discoverable under.
pub const API_GLOBAL_NAME: &str = "API";

/// Global name the SCORM 2004 surface is discoverable under.
pub const API_2004_GLOBAL_NAME: &str = "API_1484_11";

/// One installed bridge: both API surfaces over a single fresh session.
///
/// Dropping the installation abandons any still-active session, so the
/// early-exit path (package unloaded before `Terminate`) always releases
/// bridge state.
pub struct ApiInstallation {
    package: PackageInfo,
    bridge: Arc<Mutex<RuntimeBridge>>,
    api_12: Scorm12Api,
    api_2004: Scorm2004Api,
}

impl ApiInstallation {
    /// Install a fresh bridge for a loaded package.
    pub fn install(package: PackageInfo, config: BridgeConfig, sink: EventSink) -> Self {
        info!(
            "Installing API surfaces for package={} at {:?} and {:?}",
            package.id, API_GLOBAL_NAME, API_2004_GLOBAL_NAME
        );
        let bridge = Arc::new(Mutex::new(RuntimeBridge::new(
            package.clone(),
            config,
            sink,
        )));
        let api_12 = Scorm12Api::new(Arc::clone(&bridge));
        let api_2004 = Scorm2004Api::new(Arc::clone(&bridge));
        Self {
            package,
            bridge,
            api_12,
            api_2004,
        }
    }

    /// The package this installation serves.
    pub fn package(&self) -> &PackageInfo {
        &self.package
    }

    /// The SCORM 1.2 surface.
    pub fn api_12(&self) -> &Scorm12Api {
        &self.api_12
    }

    /// The SCORM 2004 surface.
    pub fn api_2004(&self) -> &Scorm2004Api {
        &self.api_2004
    }

    /// Outward snapshot of the session.
    pub fn session_info(&self) -> SessionInfo {
        self.bridge.lock().unwrap().session_info()
    }

    /// Snapshot of the data-model store.
    pub fn store_snapshot(&self) -> std::collections::BTreeMap<&'static str, String> {
        self.bridge.lock().unwrap().store_snapshot()
    }

    /// Tear the installation down.
    ///
    /// Equivalent to dropping it; spelled out so hosts can make unload
    /// explicit in their own teardown paths.
    pub fn unload(self) {
        drop(self);
    }
}

impl Drop for ApiInstallation {
    fn drop(&mut self) {
        debug!("Tearing down API surfaces for package={}", self.package.id);
        self.bridge.lock().unwrap().abandon();
    }
}

impl std::fmt::Debug for ApiInstallation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiInstallation")
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

/// The single hosting context's installation slot.
///
/// At most one installation is live at a time; loading a new package tears
/// the previous installation down first, so concurrent packages can never
/// share a bridge.
#[derive(Debug, Default)]
pub struct InstallationSlot {
    current: Option<ApiInstallation>,
}

impl InstallationSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a package, replacing any live installation.
    pub fn load(
        &mut self,
        package: PackageInfo,
        config: BridgeConfig,
        sink: EventSink,
    ) -> &ApiInstallation {
        if let Some(previous) = self.current.take() {
            info!(
                "Replacing live installation for package={}",
                previous.package().id
            );
            previous.unload();
        }
        self.current
            .insert(ApiInstallation::install(package, config, sink))
    }

    /// The live installation, if any.
    pub fn installation(&self) -> Option<&ApiInstallation> {
        self.current.as_ref()
    }

    /// Unload the live installation, if any.
    pub fn unload(&mut self) {
        if let Some(installation) = self.current.take() {
            installation.unload();
        }
    }

    /// Whether a package is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorm_bridge_core::{EventKind, LifecycleEvent, SessionStatus};
    use std::sync::{Arc, Mutex};

    fn collecting_sink() -> (EventSink, Arc<Mutex<Vec<LifecycleEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink_events = Arc::clone(&events);
        (
            Box::new(move |event| sink_events.lock().unwrap().push(event)),
            events,
        )
    }

    #[test]
    fn test_install_fresh_session() {
        let (sink, _events) = collecting_sink();
        let installation =
            ApiInstallation::install(PackageInfo::new("pkg-1", "Test"), BridgeConfig::default(), sink);

        assert_eq!(installation.session_info().status, SessionStatus::Uninitialized);
        assert_eq!(installation.package().id.as_str(), "pkg-1");
    }

    #[test]
    fn test_global_names() {
        assert_eq!(API_GLOBAL_NAME, "API");
        assert_eq!(API_2004_GLOBAL_NAME, "API_1484_11");
    }

    #[test]
    fn test_drop_abandons_active_session() {
        let (sink, events) = collecting_sink();
        let installation =
            ApiInstallation::install(PackageInfo::new("pkg-1", "Test"), BridgeConfig::default(), sink);

        installation.api_12().lms_initialize("");
        drop(installation);

        // Implicit abandonment: Start only, no synthesized Exit
        let kinds: Vec<EventKind> = events.lock().unwrap().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Start]);
    }

    #[test]
    fn test_unload_with_synthetic_exit_policy() {
        let (sink, events) = collecting_sink();
        let mut config = BridgeConfig::default();
        config.policy.synthesize_exit_on_unload = true;

        let installation =
            ApiInstallation::install(PackageInfo::new("pkg-1", "Test"), config, sink);
        installation.api_12().lms_initialize("");
        installation.unload();

        let kinds: Vec<EventKind> = events.lock().unwrap().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Start, EventKind::Exit]);
    }

    #[test]
    fn test_slot_single_installation() {
        let mut slot = InstallationSlot::new();
        assert!(!slot.is_loaded());

        let (sink, _events) = collecting_sink();
        slot.load(PackageInfo::new("pkg-1", "First"), BridgeConfig::default(), sink);
        assert!(slot.is_loaded());

        let first_attempt = slot.installation().unwrap().session_info().attempt_id;

        // Loading a second package replaces the first
        let (sink, _events) = collecting_sink();
        slot.load(PackageInfo::new("pkg-2", "Second"), BridgeConfig::default(), sink);
        let installation = slot.installation().unwrap();
        assert_eq!(installation.package().id.as_str(), "pkg-2");
        assert_ne!(installation.session_info().attempt_id, first_attempt);
    }

    #[test]
    fn test_slot_replacement_tears_down_previous() {
        let mut slot = InstallationSlot::new();

        let (sink, first_events) = collecting_sink();
        slot.load(PackageInfo::new("pkg-1", "First"), BridgeConfig::default(), sink);
        slot.installation().unwrap().api_12().lms_initialize("");

        let (sink, _events) = collecting_sink();
        slot.load(PackageInfo::new("pkg-2", "Second"), BridgeConfig::default(), sink);

        // The fresh installation observes none of the old state
        let installation = slot.installation().unwrap();
        assert_eq!(installation.session_info().status, SessionStatus::Uninitialized);
        assert_eq!(installation.store_snapshot()["cmi.core.score.raw"], "0");

        // Old session produced only its own Start
        let kinds: Vec<EventKind> =
            first_events.lock().unwrap().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Start]);
    }

    #[test]
    fn test_slot_unload() {
        let mut slot = InstallationSlot::new();
        let (sink, _events) = collecting_sink();
        slot.load(PackageInfo::new("pkg-1", "First"), BridgeConfig::default(), sink);

        slot.unload();
        assert!(!slot.is_loaded());
        assert!(slot.installation().is_none());

        // Unloading an empty slot is fine
        slot.unload();
    }
}
