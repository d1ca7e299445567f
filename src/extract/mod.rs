//! Course extraction from a registration page snapshot.
//!
//! Two independent paths feed the merge stage: the offered-courses results
//! grid ([`primary`]) and the fixed bank of manually-added slots ([`manual`]).
//! All document access goes through the [`page`] adapter.

pub mod manual;
pub mod page;
pub mod primary;

use crate::model::CourseSection;
use page::RegistrationPage;

/// Run both extraction paths over one parsed page, primary grid first.
pub fn extract_all(page: &RegistrationPage) -> (Vec<CourseSection>, Vec<CourseSection>) {
    (primary::extract(page), manual::extract(page))
}
