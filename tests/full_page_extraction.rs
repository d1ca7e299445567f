//! End-to-end extraction over a full synthetic registration page: results
//! grid with a theoretical/practical split, both manual-entry banks, and a
//! duplicate that must resolve in the grid's favor.

use jadwal::extract::{extract_all, page::RegistrationPage};
use jadwal::merge::merge;
use jadwal::model::{CourseSection, KIND_FREE_ELECTIVE, STATUS_OPEN};

/// A registration page with:
/// - grid: CS101 lecture (3h, exam P1), CS101 lab (0h, inherits), MATH201;
/// - a separator row without a checkbox between courses;
/// - manual slot 0: CS101 section 9402 (duplicate of the grid lecture);
/// - manual slot 1: PHYS101 section 5;
/// - free-elective slot 0: ELEC100 section 2.
fn build_page() -> String {
    let grid_row = |tooltip: &str, code: &str, name: &str, hours: &str, kind: &str, sched: &str, exam: &str| {
        format!(
            r#"<tr>
                <td><input type="checkbox"/><span onmouseover="ddrivetip(event,'{tooltip}','x')">i</span></td>
                <td headers="crs_code">{code}</td>
                <td headers="crs_name">{name}</td>
                <td headers="crs_hours">{hours}</td>
                <td headers="crs_type">{kind}</td>
                <td headers="crs_status">مفتوحة</td>
                <td headers="crs_campus">المركز الرئيسي</td>
                <td class="instructor">د. أحمد</td>
                <td>
                    <input type="hidden" name="sched_x" value="{sched}"/>
                    <input type="hidden" name="exam_x" value="{exam}"/>
                </td>
            </tr>"#
        )
    };

    let manual_slot = |prefix: &str, index: usize, section: &str, code: &str| {
        format!(
            r#"<input id="{prefix}{index}_secNo" value="{section}"/>
            <span id="{prefix}{index}_code">{code}</span>
            <span id="{prefix}{index}_name">مادة يدوية</span>
            <span id="{prefix}{index}_campus">فرع الشمال</span>
            <span id="{prefix}{index}_instructor">د. ليلى</span>
            <span id="{prefix}{index}_hours">2</span>
            <span id="{prefix}{index}_groupType">نظري</span>
            <div id="{prefix}{index}_schedule"><table>
                <tr><th>اليوم</th><th>الوقت</th></tr>
                <tr><td>الخميس</td><td>10:00 ص - 11:40 ص</td><td>C-07</td></tr>
            </table></div>"#
        )
    };

    format!(
        r#"<html><body>
        <table id="offeredCoursesGrid">
            <tr><th>الرمز</th><th>الاسم</th></tr>
            {lecture}
            {lab}
            <tr><td colspan="9">---</td></tr>
            {math}
        </table>
        {dup}
        {phys}
        {elective}
        </body></html>"#,
        lecture = grid_row(
            "9402-1",
            "CS101",
            "مقدمة في البرمجة",
            "3",
            "نظري",
            "1 @t 08:00 ص - 09:40 ص @r B-12",
            "P1",
        ),
        lab = grid_row(
            "9403-1",
            "CS101",
            "مقدمة في البرمجة",
            "0",
            "عملي",
            "3 @t 10:00 ص - 11:40 ص @r L-02",
            "",
        ),
        math = grid_row(
            "9510-1",
            "MATH201",
            "تفاضل وتكامل",
            "3",
            "نظري",
            "2 4 @t 12:00 م - 01:00 م",
            "P2",
        ),
        dup = manual_slot("addedCourse", 0, "9402", "CS101"),
        phys = manual_slot("addedCourse", 1, "5", "PHYS101"),
        elective = manual_slot("freeCourse", 0, "2", "ELEC100"),
    )
}

fn extract_merged() -> Vec<CourseSection> {
    let page = RegistrationPage::parse(&build_page());
    let (primary, manual) = extract_all(&page);
    merge(primary, manual)
}

#[test]
fn test_merged_page_has_unique_sections() {
    let merged = extract_merged();
    let keys: Vec<(&str, &str)> = merged.iter().map(|c| c.key()).collect();
    assert_eq!(
        keys,
        [
            ("CS101", "9402"),
            ("CS101", "9403"),
            ("MATH201", "9510"),
            ("PHYS101", "5"),
            ("ELEC100", "2"),
        ]
    );
}

#[test]
fn test_duplicate_resolves_to_grid_version() {
    let merged = extract_merged();
    let lecture = merged.iter().find(|c| c.key() == ("CS101", "9402")).unwrap();
    // The grid row names the instructor د. أحمد; the manual slot says د. ليلى.
    assert_eq!(lecture.instructor, "د. أحمد");
    assert_eq!(lecture.name, "مقدمة في البرمجة");
}

#[test]
fn test_lab_inherits_hours_and_exam_period() {
    let merged = extract_merged();
    let lab = merged.iter().find(|c| c.key() == ("CS101", "9403")).unwrap();
    assert_eq!(lab.hours, "3");
    assert_eq!(lab.exam_period.as_deref(), Some("P1"));
    assert_eq!(lab.schedule, "الثلاثاء: 10:00 ص - 11:40 ص");
    assert_eq!(lab.location, "L-02");
}

#[test]
fn test_multi_day_schedule_decoded() {
    let merged = extract_merged();
    let math = merged.iter().find(|c| c.code == "MATH201").unwrap();
    assert_eq!(
        math.schedule,
        "الاثنين: 12:00 م - 01:00 م<br>الأربعاء: 12:00 م - 01:00 م"
    );
}

#[test]
fn test_manual_rows_are_open_with_table_schedule() {
    let merged = extract_merged();
    let phys = merged.iter().find(|c| c.code == "PHYS101").unwrap();
    assert_eq!(phys.status, STATUS_OPEN);
    assert_eq!(phys.exam_period, None);
    assert_eq!(phys.schedule, "الخميس: 10:00 ص - 11:40 ص");
    assert_eq!(phys.location, "C-07");
    assert_eq!(phys.campus, "فرع الشمال");
}

#[test]
fn test_free_elective_kind() {
    let merged = extract_merged();
    let elective = merged.iter().find(|c| c.code == "ELEC100").unwrap();
    assert_eq!(elective.kind, KIND_FREE_ELECTIVE);
}

#[test]
fn test_empty_page_merges_to_nothing() {
    let page = RegistrationPage::parse("<html><body><p>لا توجد نتائج</p></body></html>");
    let (primary, manual) = extract_all(&page);
    assert!(primary.is_empty());
    assert!(manual.is_empty());
    assert!(merge(primary, manual).is_empty());
}
