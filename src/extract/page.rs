//! Typed accessors over the registration page document.
//!
//! The portal's markup conventions are an external contract this crate does
//! not control; everything that touches a concrete id, class, or attribute
//! name lives here so the extraction logic stays testable against synthetic
//! documents. The contract, as observed on the live portal:
//!
//! - The results grid is `table#offeredCoursesGrid`; data rows carry a
//!   selection checkbox, header/separator rows do not.
//! - Grid cells are labeled through their `headers` attribute
//!   (`crs_code`, `crs_name`, ...); the instructor sits in `td.instructor`.
//! - Each data row embeds hidden inputs `sched_*` (schedule encoding) and
//!   `exam_*` (exam period), plus a `secNo_*` input as the section fallback.
//! - The tooltip trigger is an `onmouseover` handler whose first quoted
//!   argument starts with the section number, e.g. `ddrivetip('9402-12',...)`.
//! - Manual-entry fields use constructed ids `{prefix}{index}_{suffix}`.

use html_scraper::{ElementRef, Html, Selector};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `headers` labels of the grid cells. Part of the portal contract, so they
/// live here with the selectors compiled from them.
pub const CELL_CODE: &str = "crs_code";
pub const CELL_NAME: &str = "crs_name";
pub const CELL_HOURS: &str = "crs_hours";
/// Primary activity-kind label, with [`CELL_KIND_FALLBACK`] as the secondary.
pub const CELL_KIND: &str = "crs_type";
pub const CELL_KIND_FALLBACK: &str = "crs_group";
pub const CELL_STATUS: &str = "crs_status";
pub const CELL_CAMPUS: &str = "crs_campus";

static GRID_ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#offeredCoursesGrid tr").unwrap());
static CHECKBOX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[type="checkbox"]"#).unwrap());
static INSTRUCTOR_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.instructor").unwrap());
static TOOLTIP_TRIGGER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[onmouseover]").unwrap());
static HIDDEN_SCHEDULE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[type="hidden"][name^="sched_"]"#).unwrap());
static HIDDEN_EXAM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[type="hidden"][name^="exam_"]"#).unwrap());
static SECTION_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[name^="secNo_"]"#).unwrap());
static HAS_ID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[id]").unwrap());

/// One precompiled selector per grid-cell label.
static CELL_SELECTORS: LazyLock<HashMap<&'static str, Selector>> = LazyLock::new(|| {
    [
        CELL_CODE,
        CELL_NAME,
        CELL_HOURS,
        CELL_KIND,
        CELL_KIND_FALLBACK,
        CELL_STATUS,
        CELL_CAMPUS,
    ]
    .into_iter()
    .map(|label| {
        let selector = Selector::parse(&format!(r#"td[headers="{label}"]"#)).unwrap();
        (label, selector)
    })
    .collect()
});

/// First single-quoted argument of a scripted handler string.
static QUOTED_ARG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

/// Collected, trimmed text content of an element.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// A parsed registration page snapshot.
pub struct RegistrationPage {
    html: Html,
}

impl RegistrationPage {
    pub fn parse(document: &str) -> Self {
        Self {
            html: Html::parse_document(document),
        }
    }

    /// All rows of the results grid, including non-data rows.
    pub fn grid_rows(&self) -> impl Iterator<Item = GridRow<'_>> {
        self.html.select(&GRID_ROWS).map(GridRow)
    }

    fn by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.html.select(&HAS_ID).find(|el| el.attr("id") == Some(id))
    }

    /// The element with the constructed id `{prefix}{index}_{suffix}`.
    pub fn indexed_element(&self, prefix: &str, index: usize, suffix: &str) -> Option<ElementRef<'_>> {
        self.by_id(&format!("{prefix}{index}_{suffix}"))
    }

    /// Trimmed text of an indexed display element. `None` when the element is
    /// absent from the page.
    pub fn indexed_text(&self, prefix: &str, index: usize, suffix: &str) -> Option<String> {
        self.indexed_element(prefix, index, suffix).map(element_text)
    }

    /// `value` of an indexed input. `None` when the input is absent; an input
    /// without a `value` attribute reads as empty.
    pub fn indexed_value(&self, prefix: &str, index: usize, suffix: &str) -> Option<String> {
        self.indexed_element(prefix, index, suffix)
            .map(|el| el.attr("value").unwrap_or_default().trim().to_owned())
    }
}

/// One row of the results grid.
pub struct GridRow<'a>(ElementRef<'a>);

impl GridRow<'_> {
    /// Data rows carry a selection checkbox; anything else is a header or
    /// separator row.
    pub fn is_selectable(&self) -> bool {
        self.0.select(&CHECKBOX).next().is_some()
    }

    /// Trimmed text of the cell labeled through its `headers` attribute.
    /// Only the contract's [`CELL_SELECTORS`] labels resolve.
    pub fn labeled_cell(&self, label: &str) -> Option<String> {
        let selector = CELL_SELECTORS.get(label)?;
        self.0.select(selector).next().map(element_text)
    }

    /// Trimmed text of the dedicated instructor cell.
    pub fn instructor_cell(&self) -> Option<String> {
        self.0.select(&INSTRUCTOR_CELL).next().map(element_text)
    }

    /// Raw schedule encoding from the row's hidden input.
    pub fn hidden_schedule(&self) -> Option<String> {
        self.hidden_value(&HIDDEN_SCHEDULE)
    }

    /// Exam-period identifier from the row's hidden input.
    pub fn hidden_exam_period(&self) -> Option<String> {
        self.hidden_value(&HIDDEN_EXAM)
    }

    /// Section number from the row's dedicated input field.
    pub fn section_input(&self) -> Option<String> {
        self.hidden_value(&SECTION_INPUT)
    }

    /// Section number from the tooltip-trigger handler: the first quoted
    /// argument, cut before its first hyphen. `None` when the trigger or the
    /// argument is absent, so the caller can fall back to [`Self::section_input`].
    pub fn tooltip_section(&self) -> Option<String> {
        let handler = self.0.select(&TOOLTIP_TRIGGER).next()?.attr("onmouseover")?;
        let arg = QUOTED_ARG.captures(handler)?.get(1)?.as_str();
        let section = arg.split('-').next().unwrap_or_default().trim();
        (!section.is_empty()).then(|| section.to_owned())
    }

    fn hidden_value(&self, selector: &Selector) -> Option<String> {
        self.0
            .select(selector)
            .next()
            .map(|el| el.attr("value").unwrap_or_default().trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_section_before_hyphen() {
        let html = r#"<table id="offeredCoursesGrid"><tr>
            <td><input type="checkbox"/></td>
            <td><span onmouseover="return ddrivetip(event,'9402-12','CS101')">i</span></td>
        </tr></table>"#;
        let page = RegistrationPage::parse(html);
        let row = page.grid_rows().next().unwrap();
        assert_eq!(row.tooltip_section().as_deref(), Some("9402"));
    }

    #[test]
    fn test_tooltip_absent_yields_none() {
        let html = r#"<table id="offeredCoursesGrid"><tr>
            <td><input type="checkbox"/></td>
            <td><input name="secNo_3" value="17"/></td>
        </tr></table>"#;
        let page = RegistrationPage::parse(html);
        let row = page.grid_rows().next().unwrap();
        assert_eq!(row.tooltip_section(), None);
        assert_eq!(row.section_input().as_deref(), Some("17"));
    }

    #[test]
    fn test_header_row_is_not_selectable() {
        let html = r#"<table id="offeredCoursesGrid">
            <tr><th>الرمز</th><th>الاسم</th></tr>
            <tr><td><input type="checkbox"/></td></tr>
        </table>"#;
        let page = RegistrationPage::parse(html);
        let selectable: Vec<bool> = page.grid_rows().map(|r| r.is_selectable()).collect();
        assert_eq!(selectable, [false, true]);
    }

    #[test]
    fn test_every_contract_label_resolves() {
        let cells: String = [
            (CELL_CODE, "CS101"),
            (CELL_NAME, "مادة"),
            (CELL_HOURS, "3"),
            (CELL_KIND, "نظري"),
            (CELL_KIND_FALLBACK, "نظري"),
            (CELL_STATUS, "مفتوحة"),
            (CELL_CAMPUS, "المركز"),
        ]
        .iter()
        .map(|(label, text)| format!(r#"<td headers="{label}">{text}</td>"#))
        .collect();
        let html = format!(
            r#"<table id="offeredCoursesGrid"><tr><td><input type="checkbox"/></td>{cells}</tr></table>"#
        );
        let page = RegistrationPage::parse(&html);
        let row = page.grid_rows().next().unwrap();
        assert_eq!(row.labeled_cell(CELL_CODE).as_deref(), Some("CS101"));
        assert_eq!(row.labeled_cell(CELL_HOURS).as_deref(), Some("3"));
        assert_eq!(row.labeled_cell(CELL_CAMPUS).as_deref(), Some("المركز"));
    }

    #[test]
    fn test_label_outside_contract_is_none() {
        let html = r#"<table id="offeredCoursesGrid"><tr>
            <td headers="crs_extra">x</td>
        </tr></table>"#;
        let page = RegistrationPage::parse(html);
        let row = page.grid_rows().next().unwrap();
        assert_eq!(row.labeled_cell("crs_extra"), None);
    }

    #[test]
    fn test_indexed_value_missing_attribute_reads_empty() {
        let html = r#"<input id="addedCourse0_secNo"/>"#;
        let page = RegistrationPage::parse(html);
        assert_eq!(
            page.indexed_value("addedCourse", 0, "secNo").as_deref(),
            Some("")
        );
        assert_eq!(page.indexed_value("addedCourse", 1, "secNo"), None);
    }
}
