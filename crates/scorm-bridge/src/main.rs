//! # SCORM Bridge Demo Driver
//!
//! Runs a scripted content-package attempt against the runtime bridge and
//! prints the resulting player state.
//!
//! ## Overview
//!
//! The driver plays the role of a content package: it discovers the
//! SCORM 1.2 surface, initializes a session, reports a bookmark, scores
//! and completion, then terminates. The host shell consumes the emitted
//! lifecycle events to keep its progress state current.
//!
//! ## Architecture
//!
//! This is Layer 2 - the host-shell binary that ties together:
//! - scorm-bridge-core: Core types and configuration
//! - scorm-bridge-runtime: Session, store and API surfaces

use scorm_bridge::PlayerShell;
use scorm_bridge_core::{BridgeConfig, PackageInfo};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let config_path = args.get(1);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading bridge configuration from {}", path);
            BridgeConfig::from_file(path)?
        }
        None => BridgeConfig::default(),
    };

    tracing::info!("SCORM Bridge demo driver starting...");

    let mut shell = PlayerShell::new(config);
    shell.load(
        PackageInfo::new("demo-course", "Demo Course")
            .with_description("A scripted SCORM 1.2 attempt"),
    );

    {
        let api = shell.api_12().expect("package just loaded");
        api.lms_initialize("");
        api.lms_set_value("cmi.core.lesson_location", "module-1/page-1");
        api.lms_set_value("cmi.core.score.raw", "40");
        api.lms_set_value("cmi.core.score.raw", "80");
        api.lms_set_value("cmi.core.lesson_status", "completed");
        api.lms_commit("");
        api.lms_finish("");
    }

    let state = shell.state();
    println!("{}", serde_json::to_string_pretty(&state)?);

    shell.unload();
    tracing::info!("SCORM Bridge demo driver shutting down");

    Ok(())
}
