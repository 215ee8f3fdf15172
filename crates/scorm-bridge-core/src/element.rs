//! CMI data-model element types.
//!
//! The bridge recognizes a fixed subset of the SCORM 1.2 CMI data model.
//! Element names arrive from the content package as dot-separated strings
//! (e.g. `cmi.core.score.raw`); this module resolves them into typed
//! elements and carries the per-element value rules.

use lazy_static::lazy_static;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

lazy_static! {
    /// Syntactic shape of a CMI element name: dot-separated lowercase
    /// segments, digits allowed for indexed collections.
    static ref ELEMENT_NAME: Regex =
        Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z0-9_]+)*$").expect("element name regex");
}

/// Recognized CMI data-model elements (SCORM 1.2 naming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DataModelElement {
    /// `cmi.core.lesson_status` - lesson status vocabulary
    LessonStatus,
    /// `cmi.core.score.raw` - raw score, integer 0-100
    ScoreRaw,
    /// `cmi.core.lesson_location` - opaque bookmark string
    LessonLocation,
    /// `cmi.core.student_name` - learner name (read-only)
    StudentName,
    /// `cmi.core.student_id` - learner identifier (read-only)
    StudentId,
}

/// Value discipline applied when writing an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Must parse as [`LessonStatus`] vocabulary
    Status,
    /// Must parse as an integer in 0..=100
    Score,
    /// Any string is accepted
    Opaque,
    /// Writes are rejected
    ReadOnly,
}

/// Result of resolving an element name string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementLookup {
    /// Name resolved to a recognized element
    Known(DataModelElement),
    /// Well-formed CMI name outside the recognized subset
    Unknown,
    /// Name fails basic element-name syntax
    Malformed,
}

impl DataModelElement {
    /// All recognized elements.
    pub const ALL: [DataModelElement; 5] = [
        DataModelElement::LessonStatus,
        DataModelElement::ScoreRaw,
        DataModelElement::LessonLocation,
        DataModelElement::StudentName,
        DataModelElement::StudentId,
    ];

    /// The dotted SCORM 1.2 element name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataModelElement::LessonStatus => "cmi.core.lesson_status",
            DataModelElement::ScoreRaw => "cmi.core.score.raw",
            DataModelElement::LessonLocation => "cmi.core.lesson_location",
            DataModelElement::StudentName => "cmi.core.student_name",
            DataModelElement::StudentId => "cmi.core.student_id",
        }
    }

    /// Resolve a dotted element name.
    pub fn lookup(name: &str) -> ElementLookup {
        if !ELEMENT_NAME.is_match(name) {
            return ElementLookup::Malformed;
        }
        for element in Self::ALL {
            if element.as_str() == name {
                return ElementLookup::Known(element);
            }
        }
        ElementLookup::Unknown
    }

    /// Value discipline for writes to this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            DataModelElement::LessonStatus => ElementKind::Status,
            DataModelElement::ScoreRaw => ElementKind::Score,
            DataModelElement::LessonLocation => ElementKind::Opaque,
            DataModelElement::StudentName | DataModelElement::StudentId => ElementKind::ReadOnly,
        }
    }

    /// Default value returned when the element has never been written.
    ///
    /// Learner identity elements have no static default; their values come
    /// from the host configuration and are supplied by the store.
    pub fn static_default(&self) -> Option<&'static str> {
        match self {
            DataModelElement::LessonStatus => Some("not attempted"),
            DataModelElement::ScoreRaw => Some("0"),
            DataModelElement::LessonLocation => Some(""),
            DataModelElement::StudentName | DataModelElement::StudentId => None,
        }
    }
}

impl std::fmt::Display for DataModelElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a `cmi.core.score.raw` value: an integer in 0..=100.
pub fn parse_score(value: &str) -> Option<u32> {
    let score: u32 = value.trim().parse().ok()?;
    if score <= 100 {
        Some(score)
    } else {
        None
    }
}

/// SCORM 1.2 lesson status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LessonStatus {
    /// Learner has not opened the lesson content
    NotAttempted,
    /// Lesson was opened but not finished
    Incomplete,
    /// Lesson was finished
    Completed,
    /// Lesson was finished and failed
    Failed,
    /// Lesson was viewed in browse mode
    Browsed,
    /// Lesson was finished and passed
    Passed,
}

impl LessonStatus {
    /// The standard vocabulary string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::NotAttempted => "not attempted",
            LessonStatus::Incomplete => "incomplete",
            LessonStatus::Completed => "completed",
            LessonStatus::Failed => "failed",
            LessonStatus::Browsed => "browsed",
            LessonStatus::Passed => "passed",
        }
    }
}

impl FromStr for LessonStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not attempted" => Ok(LessonStatus::NotAttempted),
            "incomplete" => Ok(LessonStatus::Incomplete),
            "completed" => Ok(LessonStatus::Completed),
            "failed" => Ok(LessonStatus::Failed),
            "browsed" => Ok(LessonStatus::Browsed),
            "passed" => Ok(LessonStatus::Passed),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
