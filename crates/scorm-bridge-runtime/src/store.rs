//! The CMI data-model store backing one session.

use std::collections::{BTreeMap, HashMap};

use scorm_bridge_core::element::{parse_score, ElementKind};
use scorm_bridge_core::{DataModelElement, ErrorCode, LearnerSettings, LessonStatus};

/// What a successful write means to the bridge.
///
/// The store validates and records values; the bridge turns these outcomes
/// into lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Lesson status was set to `completed`; stored score forced to 100
    StatusCompleted,
    /// Lesson status was set to something other than `completed`
    Status(LessonStatus),
    /// A valid raw score was stored
    Score(u32),
    /// An opaque value was stored
    Plain,
}

/// Mapping from recognized CMI elements to string values.
///
/// Values live only for the lifetime of the owning session. Reads of unset
/// elements return per-element defaults; learner identity defaults come
/// from the host configuration.
#[derive(Debug)]
pub struct DataModelStore {
    values: HashMap<DataModelElement, String>,
    learner: LearnerSettings,
}

impl DataModelStore {
    /// Create an empty store seeded with learner identity settings.
    pub fn new(learner: LearnerSettings) -> Self {
        Self {
            values: HashMap::new(),
            learner,
        }
    }

    /// Read an element, falling back to its default when unset.
    pub fn get(&self, element: DataModelElement) -> String {
        if let Some(value) = self.values.get(&element) {
            return value.clone();
        }
        match element {
            DataModelElement::StudentName => self.learner.student_name.clone(),
            DataModelElement::StudentId => self.learner.student_id.clone(),
            _ => element
                .static_default()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Validate and store a value.
    ///
    /// Read-only elements reject with code 403; vocabulary and score
    /// violations reject with code 405. Setting lesson status to
    /// `completed` also forces the stored score to 100.
    pub fn set(
        &mut self,
        element: DataModelElement,
        value: &str,
    ) -> Result<WriteOutcome, ErrorCode> {
        match element.kind() {
            ElementKind::ReadOnly => Err(ErrorCode::ReadOnlyElement),
            ElementKind::Status => {
                let status: LessonStatus =
                    value.parse().map_err(|_| ErrorCode::InvalidValue)?;
                self.values.insert(element, value.to_string());
                if status == LessonStatus::Completed {
                    self.values
                        .insert(DataModelElement::ScoreRaw, "100".to_string());
                    Ok(WriteOutcome::StatusCompleted)
                } else {
                    Ok(WriteOutcome::Status(status))
                }
            }
            ElementKind::Score => {
                let score = parse_score(value).ok_or(ErrorCode::InvalidValue)?;
                self.values.insert(element, score.to_string());
                Ok(WriteOutcome::Score(score))
            }
            ElementKind::Opaque => {
                self.values.insert(element, value.to_string());
                Ok(WriteOutcome::Plain)
            }
        }
    }

    /// Snapshot of all recognized elements and their current (or default)
    /// values, keyed by dotted element name.
    pub fn snapshot(&self) -> BTreeMap<&'static str, String> {
        DataModelElement::ALL
            .iter()
            .map(|element| (element.as_str(), self.get(*element)))
            .collect()
    }

    /// Drop all stored values, keeping the learner settings.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
