use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("create temp file");
    tmp.write_all(contents.as_bytes()).expect("write temp file");
    tmp
}

fn escaped(tmp: &NamedTempFile) -> String {
    tmp.path().to_string_lossy().replace('\\', "\\\\")
}

const FEED: &str = r#"{
    "term": "2025-26 Χειμερινό",
    "schedule": [
        {"course_name": "Αλγόριθμοι (Άρτιοι)", "day": "Δευτέρα", "start_time": "09:00", "end_time": "10:00", "room": "Α1"},
        {"course_name": "Αλγόριθμοι (Περιττοί)", "day": "Τετάρτη", "start_time": "09:00", "end_time": "10:00", "room": "Α1"},
        {"course_name": "Λειτουργικά Συστήματα", "day": "Τρίτη", "start_time": "12:00", "end_time": "13:00", "room": "Β2"},
        {"course_name": "Τεχνητή Νοημοσύνη", "day": "Τρίτη", "start_time": "12:00", "end_time": "13:00", "room": "Β3"},
        {"course_name": "Γραφικά", "start_time": "10:00", "end_time": "11:00"}
    ]
}"#;

const COURSES: &str = r#"[
    {"id": 1, "name": "Αλγόριθμοι", "ects": 6, "status": "Current Semester"},
    {"id": 2, "name": "Λειτουργικά Συστήματα", "ects": 6, "status": "Current Semester"},
    {"id": 3, "name": "Τεχνητή Νοημοσύνη", "ects": 5, "status": "Current Semester"},
    {"id": 4, "name": "Κρυπτογραφία", "ects": 5, "status": "Current Semester"},
    {"id": 5, "name": "Γραφικά", "ects": 5, "status": "Passed"}
]"#;

fn loaded_session(extra: &str) -> (NamedTempFile, NamedTempFile, String) {
    let feed = write_temp(FEED);
    let courses = write_temp(COURSES);
    let script = format!(
        "feed load json {}\ncourses load json {}\n{}quit\n",
        escaped(&feed),
        escaped(&courses),
        extra
    );
    (feed, courses, script)
}

#[test]
fn cli_prints_help() {
    run_cli("help\nquit\n")
        .success()
        .stdout(str_contains("Commands:"))
        .stdout(str_contains("sdi <number>|clear"));
}

#[test]
fn cli_reports_unknown_commands() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}

#[test]
fn cli_rejects_invalid_sdi() {
    run_cli("sdi twelve\nquit\n")
        .success()
        .stdout(str_contains("Invalid SDI"));
}

#[test]
fn cli_loads_inputs_and_computes() {
    let (_feed, _courses, script) = loaded_session("sdi 1084\ncompute\n");
    let assert = run_cli(&script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Feed loaded from"), "{output}");
    assert!(output.contains("(5 total, 4 current)"), "{output}");
    assert!(output.contains("SDI set to 1084 (group even)."), "{output}");
    assert!(
        output.contains("Computed (courses=4, sessions=3, ects=22, group=even, unscheduled=1, conflicts=1, skipped=1)"),
        "{output}"
    );
    assert!(output.contains("warning: skipped feed row 4"), "{output}");
    assert!(!output.contains("(Άρτιοι)"), "group marker leaked into grid:\n{output}");
}

#[test]
fn cli_lists_conflicts_and_unscheduled_courses() {
    let (_feed, _courses, script) = loaded_session("sdi 7\nconflicts\nunscheduled\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("Conflict Tue 12:00-13:00: courses 2, 3 (2 sessions)"))
        .stdout(str_contains("Unscheduled 4: Κρυπτογραφία"));
}

#[test]
fn cli_unset_sdi_warns_about_group_rows() {
    let (_feed, _courses, script) = loaded_session("compute\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("group=unset"))
        .stdout(str_contains("excluded 2 group-specific entries"));
}

#[test]
fn cli_courses_show_marks_unscheduled() {
    let (_feed, _courses, script) = loaded_session("sdi 2\ncompute\ncourses show\n");
    run_cli(&script)
        .success()
        .stdout(str_contains("No schedule found"));
}

#[test]
fn cli_config_save_and_load() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = escaped(&tmp);
    let script = format!("config save {}\nconfig load {}\nlayout show\nquit\n", path, path);
    run_cli(&script)
        .success()
        .stdout(str_contains("Config saved to"))
        .stdout(str_contains("Config loaded from"))
        .stdout(str_contains("09:00-10:00"));
}

#[test]
fn cli_reports_missing_feed_file() {
    run_cli("feed load json /nonexistent/feed.json\nquit\n")
        .success()
        .stdout(str_contains("Error loading feed"));
}
