use chrono::Weekday;
use timetable_tool::{
    Grid, MatchedScheduleEntry, RawScheduleEntry, TimeSlot, TimetableLayout,
    reconcile::report, validate_entry,
};

fn matched(course_id: i32, name: &str, day: &str, start: &str, end: &str) -> MatchedScheduleEntry {
    let entry = validate_entry(&RawScheduleEntry::new(name, day, start, end).with_room("Α1")).unwrap();
    MatchedScheduleEntry {
        course_id,
        course_code: format!("C{course_id}"),
        course_ects: 5,
        enrolled_name: name.to_string(),
        entry,
    }
}

fn slot(label: &str) -> TimeSlot {
    label.parse().unwrap()
}

#[test]
fn grid_keeps_input_order_and_duplicates() {
    let grid = Grid::assemble(vec![
        matched(1, "Αλγόριθμοι", "Δευτέρα", "09:00", "10:00"),
        matched(2, "Γραφικά", "Δευτέρα", "09:00", "10:00"),
        matched(1, "Αλγόριθμοι", "Δευτέρα", "09:00", "10:00"),
        matched(3, "Δίκτυα", "Τρίτη", "11:00", "12:00"),
    ]);
    let occupants = grid.occupants(Weekday::Mon, &slot("09:00-10:00"));
    let ids: Vec<i32> = occupants.iter().map(|o| o.course_id).collect();
    assert_eq!(ids, vec![1, 2, 1]);
    assert_eq!(grid.occupied_cell_count(), 2);
    assert_eq!(grid.entry_count(), 4);
    assert!(grid.occupants(Weekday::Wed, &slot("09:00-10:00")).is_empty());
}

#[test]
fn slots_are_compared_by_exact_range() {
    let grid = Grid::assemble(vec![
        matched(1, "Αλγόριθμοι", "Δευτέρα", "09:00", "11:00"),
        matched(2, "Γραφικά", "Δευτέρα", "09:00", "10:00"),
    ]);
    assert_eq!(grid.occupied_cell_count(), 2);
    let report = report(&grid, &TimetableLayout::default());
    assert!(!report.has_conflicts());
}

#[test]
fn shared_cell_flags_both_courses_but_not_a_third() {
    let grid = Grid::assemble(vec![
        matched(1, "Αλγόριθμοι", "Τετάρτη", "10:00", "11:00"),
        matched(2, "Γραφικά", "Τετάρτη", "10:00", "11:00"),
        matched(3, "Δίκτυα", "Πέμπτη", "10:00", "11:00"),
    ]);
    let report = report(&grid, &TimetableLayout::default());

    assert_eq!(report.cells.len(), 1);
    let cell = report.cell(Weekday::Wed, &slot("10:00-11:00")).unwrap();
    assert_eq!(cell.course_ids, vec![1, 2]);
    assert_eq!(cell.occupant_count, 2);

    assert!(report.course_has_conflict(1));
    assert!(report.course_has_conflict(2));
    assert!(!report.course_has_conflict(3));
    assert_eq!(report.course_has_conflict.get(&3), Some(&false));
    assert_eq!(report.conflicting_course_ids(), vec![1, 2]);
}

#[test]
fn duplicate_feed_rows_surface_as_a_conflict() {
    let grid = Grid::assemble(vec![
        matched(4, "Βάσεις Δεδομένων", "Παρασκευή", "12:00", "13:00"),
        matched(4, "Βάσεις Δεδομένων", "Παρασκευή", "12:00", "13:00"),
    ]);
    let report = report(&grid, &TimetableLayout::default());
    let cell = report.cell(Weekday::Fri, &slot("12:00-13:00")).unwrap();
    assert_eq!(cell.course_ids, vec![4]);
    assert_eq!(cell.occupant_count, 2);
    assert!(report.course_has_conflict(4));
}

#[test]
fn full_scan_reports_every_conflict_in_layout_order() {
    let grid = Grid::assemble(vec![
        matched(1, "Αλγόριθμοι", "Τρίτη", "09:00", "10:00"),
        matched(2, "Γραφικά", "Τρίτη", "09:00", "10:00"),
        matched(3, "Δίκτυα", "Δευτέρα", "15:00", "16:00"),
        matched(4, "Λογική", "Δευτέρα", "15:00", "16:00"),
        // Saturday is not on the default layout.
        matched(5, "Σεμινάριο", "Σάββατο", "10:00", "11:00"),
        matched(6, "Εργαστήριο", "Σάββατο", "10:00", "11:00"),
    ]);
    let report = report(&grid, &TimetableLayout::default());
    let order: Vec<(Weekday, String)> = report
        .cells
        .iter()
        .map(|c| (c.day, c.slot.to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (Weekday::Mon, "15:00-16:00".to_string()),
            (Weekday::Tue, "09:00-10:00".to_string()),
            (Weekday::Sat, "10:00-11:00".to_string()),
        ]
    );
    assert_eq!(report.conflicting_course_ids(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn empty_grid_has_no_conflicts() {
    let grid = Grid::assemble(Vec::new());
    assert!(grid.is_empty());
    let report = report(&grid, &TimetableLayout::default());
    assert!(!report.has_conflicts());
    assert!(report.course_has_conflict.is_empty());
}

#[test]
fn equivalent_day_and_time_spellings_share_one_cell() {
    let grid = Grid::assemble(vec![
        matched(1, "Αλγόριθμοι", "Δευτέρα", "9:00", "10:00"),
        matched(2, "Γραφικά", "Monday", "09:00", "10:00"),
        matched(3, "Δίκτυα", "ΔΕΥΤΕΡΑ", "09:00:30", "10:00:00"),
    ]);
    assert_eq!(grid.occupied_cell_count(), 1);
    let report = report(&grid, &TimetableLayout::default());
    let cell = report.cell(Weekday::Mon, &slot("09:00-10:00")).unwrap();
    assert_eq!(cell.slot.to_string(), "09:00-10:00");
    assert_eq!(cell.course_ids, vec![1, 2, 3]);
}
