//! The normalized course-section record and the portal's display vocabulary.
//!
//! Every string the portal renders is Arabic; the defaults and classification
//! markers below are the exact strings the registration pages use, so records
//! built here are indistinguishable from ones the portal rendered itself.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Placeholder shown wherever the portal left a field blank.
pub const UNSPECIFIED: &str = "غير محدد";

/// Default credit hours when the cell is empty or unparseable.
pub const DEFAULT_HOURS: &str = "0";

/// Default activity kind (theoretical / lecture component).
pub const KIND_THEORETICAL: &str = "نظري";

/// Activity kind assigned to free-elective manual entries.
pub const KIND_FREE_ELECTIVE: &str = "مادة حرة";

/// Enrollment status when the grid does not say.
pub const STATUS_UNKNOWN: &str = "غير معروف";

/// Enrollment status for manually-added sections. Anything the portal lets a
/// student add by section number is currently enrollable.
pub const STATUS_OPEN: &str = "مفتوحة";

/// Campus name when the grid does not say.
pub const CAMPUS_UNKNOWN: &str = "غير معروف";

/// Substrings of the activity-kind text that mark a practical component
/// (lab / training / exercises).
const PRACTICAL_MARKERS: [&str; 3] = ["عملي", "تدريب", "تمارين"];

/// One schedule-bearing offering of a course.
///
/// `(code, section)` is the identity of a record; it is unique after the merge
/// stage. All numeric-looking fields stay string-typed — the viewer displays
/// them verbatim and the portal is not above emitting `"3.0"` next to `"3"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CourseSection {
    /// Course code, e.g. `"CS101"`. Not unique on its own.
    pub code: String,
    /// Display name of the course.
    pub name: String,
    /// Section identifier, unique combined with `code`.
    pub section: String,
    /// Human-readable schedule text; multiple day/time pairs joined by `<br>`.
    pub schedule: String,
    /// Room / building text.
    pub location: String,
    /// Instructor display name.
    pub instructor: String,
    /// Credit hours, string-typed.
    pub hours: String,
    /// Activity kind text (theoretical, practical, training, exercises, free elective).
    pub kind: String,
    /// Exam-period identifier; absent for manually entered sections.
    pub exam_period: Option<String>,
    /// Enrollment status text.
    pub status: String,
    /// Campus name.
    pub campus: String,
}

impl CourseSection {
    /// The dedup identity of this record.
    pub fn key(&self) -> (&str, &str) {
        (&self.code, &self.section)
    }
}

/// Whether an activity-kind text describes a practical component.
pub fn is_practical_kind(kind: &str) -> bool {
    PRACTICAL_MARKERS.iter().any(|marker| kind.contains(marker))
}
