//! Extractor for the offered-courses results grid.
//!
//! Walks every grid row, reads the labeled cells and hidden inputs through
//! the page adapter, decodes the schedule mini-language, and emits one
//! [`CourseSection`] per qualifying row. A course's practical component is
//! often listed with zero hours directly under its lecture row; the last
//! theoretical row per course code is carried forward so such rows inherit
//! hours and exam period.

use crate::extract::page::{
    CELL_CAMPUS, CELL_CODE, CELL_HOURS, CELL_KIND, CELL_KIND_FALLBACK, CELL_NAME, CELL_STATUS,
    GridRow, RegistrationPage,
};
use crate::model::{
    CAMPUS_UNKNOWN, CourseSection, DEFAULT_HOURS, KIND_THEORETICAL, STATUS_UNKNOWN, UNSPECIFIED,
    is_practical_kind,
};
use crate::schedule;
use tracing::debug;

/// Hours and exam period of the last theoretical row seen for a course code,
/// inherited by zero-hour practical rows of the same code.
struct TheoreticalCarry {
    code: String,
    hours: String,
    exam_period: Option<String>,
}

/// Hours count as missing when they are zero or unparseable.
fn hours_missing(hours: &str) -> bool {
    hours.trim().parse::<f32>().map_or(true, |h| h == 0.0)
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Extract all qualifying rows of the results grid, in page order.
pub fn extract(page: &RegistrationPage) -> Vec<CourseSection> {
    let mut sections = Vec::new();
    let mut carry: Option<TheoreticalCarry> = None;

    for row in page.grid_rows() {
        if !row.is_selectable() {
            continue;
        }
        if let Some(section) = extract_row(&row, &mut carry) {
            sections.push(section);
        }
    }

    debug!(count = sections.len(), "extracted primary grid rows");
    sections
}

fn extract_row(row: &GridRow<'_>, carry: &mut Option<TheoreticalCarry>) -> Option<CourseSection> {
    let section = row
        .tooltip_section()
        .or_else(|| row.section_input())
        .unwrap_or_default();
    let code = row.labeled_cell(CELL_CODE).unwrap_or_default();
    let name = row.labeled_cell(CELL_NAME).unwrap_or_default();

    if name.is_empty() || code.is_empty() || section.is_empty() {
        debug!(
            code = code.as_str(),
            section = section.as_str(),
            "skipping grid row with missing identity"
        );
        return None;
    }

    let mut hours = row
        .labeled_cell(CELL_HOURS)
        .and_then(non_empty)
        .unwrap_or_else(|| DEFAULT_HOURS.to_owned());
    let kind = row
        .labeled_cell(CELL_KIND)
        .and_then(non_empty)
        .or_else(|| row.labeled_cell(CELL_KIND_FALLBACK).and_then(non_empty))
        .unwrap_or_else(|| KIND_THEORETICAL.to_owned());
    let status = row
        .labeled_cell(CELL_STATUS)
        .and_then(non_empty)
        .unwrap_or_else(|| STATUS_UNKNOWN.to_owned());
    let campus = row
        .labeled_cell(CELL_CAMPUS)
        .and_then(non_empty)
        .unwrap_or_else(|| CAMPUS_UNKNOWN.to_owned());
    let instructor = row
        .instructor_cell()
        .and_then(non_empty)
        .unwrap_or_else(|| UNSPECIFIED.to_owned());
    let mut exam_period = row.hidden_exam_period().and_then(non_empty);

    // Carried state belongs to a single course code.
    if carry.as_ref().is_some_and(|c| c.code != code) {
        *carry = None;
    }

    if is_practical_kind(&kind) {
        if hours_missing(&hours)
            && let Some(theoretical) = carry.as_ref()
        {
            hours = theoretical.hours.clone();
            exam_period = theoretical.exam_period.clone();
            debug!(
                code = code.as_str(),
                section = section.as_str(),
                "practical row inherited hours from theoretical row"
            );
        }
    } else {
        *carry = Some(TheoreticalCarry {
            code: code.clone(),
            hours: hours.clone(),
            exam_period: exam_period.clone(),
        });
    }

    let parsed = schedule::parse(&row.hidden_schedule().unwrap_or_default());

    Some(CourseSection {
        code,
        name,
        section,
        schedule: parsed.times,
        location: parsed.location,
        instructor,
        hours,
        kind,
        exam_period,
        status,
        campus,
    })
}
