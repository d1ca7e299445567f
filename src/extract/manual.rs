//! Extractor for manually-added course slots.
//!
//! Courses added by section number live outside the results grid, in a fixed
//! bank of 25 slots per category (regular and free-elective), each slot a set
//! of elements with constructed ids. The portal populates these slots
//! asynchronously; a slot whose section input is filled but whose code
//! display is still empty has simply not settled yet and is skipped — the
//! caller's settle delay is the only mitigation.

use crate::extract::page::RegistrationPage;
use crate::model::{
    CAMPUS_UNKNOWN, CourseSection, DEFAULT_HOURS, KIND_FREE_ELECTIVE, KIND_THEORETICAL,
    STATUS_OPEN, UNSPECIFIED,
};
use crate::schedule::{self, LINE_BREAK};
use html_scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Number of slots per category.
const SLOT_COUNT: usize = 25;

/// Id prefix of regular manually-added course slots.
pub const REGULAR_PREFIX: &str = "addedCourse";
/// Id prefix of free-elective slots.
pub const ELECTIVE_PREFIX: &str = "freeCourse";

static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static HEADING_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

/// Extract both slot banks: regular slots first, then free electives.
pub fn extract(page: &RegistrationPage) -> Vec<CourseSection> {
    let mut sections = extract_slots(page, REGULAR_PREFIX, false);
    sections.extend(extract_slots(page, ELECTIVE_PREFIX, true));
    debug!(count = sections.len(), "extracted manual-entry slots");
    sections
}

fn extract_slots(page: &RegistrationPage, prefix: &str, elective: bool) -> Vec<CourseSection> {
    let mut sections = Vec::new();

    for index in 0..SLOT_COUNT {
        // An absent or empty section input means the slot is unused.
        let Some(section) = page.indexed_value(prefix, index, "secNo") else {
            continue;
        };
        if section.is_empty() {
            continue;
        }

        // An empty code display means async population has not finished.
        let code = page.indexed_text(prefix, index, "code").unwrap_or_default();
        if code.is_empty() {
            debug!(prefix, index, "slot not yet populated, skipping");
            continue;
        }

        let name = field_or(page, prefix, index, "name", UNSPECIFIED);
        let campus = field_or(page, prefix, index, "campus", CAMPUS_UNKNOWN);
        let instructor = field_or(page, prefix, index, "instructor", UNSPECIFIED);
        let hours = field_or(page, prefix, index, "hours", DEFAULT_HOURS);

        let (schedule, location) = match page.indexed_element(prefix, index, "schedule") {
            Some(container) => parse_schedule_container(container),
            None => (UNSPECIFIED.to_owned(), UNSPECIFIED.to_owned()),
        };

        let kind = if elective {
            KIND_FREE_ELECTIVE.to_owned()
        } else {
            field_or(page, prefix, index, "groupType", KIND_THEORETICAL)
        };

        sections.push(CourseSection {
            code,
            name,
            section,
            schedule,
            location,
            instructor,
            hours,
            kind,
            // The manual-entry view does not expose exam periods.
            exam_period: None,
            status: STATUS_OPEN.to_owned(),
            campus,
        });
    }

    sections
}

fn field_or(
    page: &RegistrationPage,
    prefix: &str,
    index: usize,
    suffix: &str,
    default: &str,
) -> String {
    page.indexed_text(prefix, index, suffix)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Read the slot's schedule container.
///
/// The container usually holds a small table: first cell day, second cell
/// time, optional third cell location. A first row marked as a heading is
/// skipped. When the table yields nothing but the container has raw text,
/// that text is run through the mini-language parser instead.
fn parse_schedule_container(container: ElementRef<'_>) -> (String, String) {
    let mut entries = Vec::new();
    let mut location = UNSPECIFIED.to_owned();

    let rows: Vec<_> = container.select(&TABLE_ROW).collect();
    let mut rows = rows.as_slice();
    if let Some(first) = rows.first()
        && is_heading_row(*first)
    {
        rows = &rows[1..];
    }

    for row in rows {
        let cells: Vec<String> = row
            .select(&TABLE_CELL)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        if cells.len() < 2 {
            continue;
        }
        entries.push(format!("{}: {}", cells[0], cells[1]));
        // A third cell with content overwrites the running location.
        if let Some(room) = cells.get(2)
            && !room.is_empty()
        {
            location = room.clone();
        }
    }

    if entries.is_empty() {
        let raw = container.text().collect::<String>();
        let raw = raw.trim();
        if !raw.is_empty() {
            let parsed = schedule::parse(raw);
            return (parsed.times, parsed.location);
        }
        return (UNSPECIFIED.to_owned(), location);
    }

    (entries.join(LINE_BREAK), location)
}

fn is_heading_row(row: ElementRef<'_>) -> bool {
    row.select(&HEADING_CELL).next().is_some()
        || row
            .attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == "header"))
}
