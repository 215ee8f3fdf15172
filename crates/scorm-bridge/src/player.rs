//! The host-shell player wrapped around one installation slot.
//!
//! The player owns the hosting context: it loads a package, installs the
//! runtime bridge, consumes lifecycle events to keep its progress state
//! current, and tears everything down on unload or restart. Rendering and
//! user-visible messaging stay with the embedding application; this shell
//! only surfaces notifications through the log.

use std::sync::{Arc, Mutex};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use scorm_bridge_core::{
    BridgeConfig, Error, EventKind, LifecycleEvent, PackageInfo, Result, SessionInfo,
};
use scorm_bridge_runtime::{InstallationSlot, Scorm12Api, Scorm2004Api};

/// Playback state derived from lifecycle events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerState {
    /// Progress percentage shown by the progress bar, 0-100
    pub progress_percent: u32,
    /// The package reported Start
    pub started: bool,
    /// The package reported completion
    pub completed: bool,
    /// The session reported Exit
    pub exited: bool,
}

/// The host shell for one hosting context.
pub struct PlayerShell {
    config: BridgeConfig,
    slot: InstallationSlot,
    package: Option<PackageInfo>,
    state: Arc<Mutex<PlayerState>>,
}

impl PlayerShell {
    /// Create a shell with the given bridge configuration.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            slot: InstallationSlot::new(),
            package: None,
            state: Arc::new(Mutex::new(PlayerState::default())),
        }
    }

    /// Load a package: reset playback state and install a fresh bridge.
    ///
    /// A previously loaded package is torn down first; its session can
    /// never leak into the new one.
    pub fn load(&mut self, package: PackageInfo) {
        info!("Loading package: id={}, title={:?}", package.id, package.title);
        *self.state.lock().unwrap() = PlayerState::default();

        let state = Arc::clone(&self.state);
        let title = package.title.clone();
        self.slot.load(
            package.clone(),
            self.config.clone(),
            Box::new(move |event| Self::apply_event(&state, &title, event)),
        );
        self.package = Some(package);
    }

    /// Restart the current package with a fresh session.
    pub fn restart(&mut self) -> Result<()> {
        let package = self.package.clone().ok_or(Error::NoActiveSession)?;
        info!("Restarting package: id={}", package.id);
        self.load(package);
        Ok(())
    }

    /// Unload the current package and release all bridge state.
    pub fn unload(&mut self) {
        if let Some(package) = self.package.take() {
            info!("Unloading package: id={}", package.id);
        }
        self.slot.unload();
        *self.state.lock().unwrap() = PlayerState::default();
    }

    /// Whether a package is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.slot.is_loaded()
    }

    /// The SCORM 1.2 surface of the loaded package's bridge.
    pub fn api_12(&self) -> Result<&Scorm12Api> {
        self.slot
            .installation()
            .map(|i| i.api_12())
            .ok_or(Error::NoActiveSession)
    }

    /// The SCORM 2004 surface of the loaded package's bridge.
    pub fn api_2004(&self) -> Result<&Scorm2004Api> {
        self.slot
            .installation()
            .map(|i| i.api_2004())
            .ok_or(Error::NoActiveSession)
    }

    /// Snapshot of the current session, if a package is loaded.
    pub fn session_info(&self) -> Result<SessionInfo> {
        self.slot
            .installation()
            .map(|i| i.session_info())
            .ok_or(Error::NoActiveSession)
    }

    /// Current playback state.
    pub fn state(&self) -> PlayerState {
        self.state.lock().unwrap().clone()
    }

    fn apply_event(state: &Arc<Mutex<PlayerState>>, title: &str, event: LifecycleEvent) {
        let mut state = state.lock().unwrap();
        match event.kind {
            EventKind::Start => {
                state.started = true;
                info!("Package started: {}", title);
            }
            EventKind::Progress => {
                if let Some(score) = event.score() {
                    state.progress_percent = score;
                }
            }
            EventKind::Complete => {
                state.completed = true;
                state.progress_percent = 100;
                info!("Package completed: {}", title);
            }
            EventKind::Exit => {
                state.exited = true;
                info!("Package exited: {}", title);
            }
        }
    }
}

impl std::fmt::Debug for PlayerShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerShell")
            .field("package", &self.package)
            .field("state", &self.state.lock().unwrap())
            .finish_non_exhaustive()
    }
}
