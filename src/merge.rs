//! Merge and dedup of the two extraction paths.

use crate::model::CourseSection;
use indexmap::IndexMap;
use tracing::debug;

/// Concatenate primary-grid and manual-entry results and drop duplicate
/// `(code, section)` pairs, keeping the first occurrence. Primary entries come
/// first, so they win over manually entered duplicates. Insertion order is
/// preserved.
pub fn merge(primary: Vec<CourseSection>, manual: Vec<CourseSection>) -> Vec<CourseSection> {
    let mut seen: IndexMap<(String, String), CourseSection> = IndexMap::new();

    for course in primary.into_iter().chain(manual) {
        let key = (course.code.clone(), course.section.clone());
        if seen.contains_key(&key) {
            debug!(
                code = key.0.as_str(),
                section = key.1.as_str(),
                "dropping duplicate course section"
            );
            continue;
        }
        seen.insert(key, course);
    }

    seen.into_values().collect()
}
