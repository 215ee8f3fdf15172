//! Configuration for the SCORM runtime bridge.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bridge configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Learner identity served through read-only CMI elements
    pub learner: LearnerSettings,
    /// Host policy knobs
    pub policy: PolicySettings,
}

impl BridgeConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: BridgeConfig = serde_yaml::from_str(yaml)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(threshold) = self.policy.completion_threshold {
            if threshold > 100 {
                return Err(crate::Error::Config(format!(
                    "policy.completion_threshold must be <= 100, got {threshold}"
                )));
            }
        }

        if self.learner.student_id.trim().is_empty() {
            return Err(crate::Error::Config(
                "learner.student_id cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Learner identity settings.
///
/// These feed `cmi.core.student_name` and `cmi.core.student_id`; in a full
/// LMS they would come from the learner record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LearnerSettings {
    /// Learner display name
    pub student_name: String,
    /// Learner identifier
    pub student_id: String,
}

impl Default for LearnerSettings {
    fn default() -> Self {
        Self {
            student_name: "Student User".to_string(),
            student_id: "12345".to_string(),
        }
    }
}

/// Host policy settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PolicySettings {
    /// When set, a score write reaching this value also completes the
    /// lesson. Unset means only an explicit `lesson_status=completed`
    /// write completes.
    pub completion_threshold: Option<u32>,
    /// Emit a final Exit event when a still-active session is abandoned
    /// at unload. Off means unload is an implicit abandonment.
    pub synthesize_exit_on_unload: bool,
}
