use timetable_tool::{
    MatchThresholds, Matcher, RawScheduleEntry, ScheduleEntry, match_entries, normalize,
    reconcile::MatchRule, validate_entry,
};

fn entry(name: &str, day: &str, start: &str, end: &str) -> ScheduleEntry {
    validate_entry(&RawScheduleEntry::new(name, day, start, end)).unwrap()
}

fn named(name: &str) -> ScheduleEntry {
    entry(name, "Δευτέρα", "09:00", "10:00")
}

fn names(matches: &[&ScheduleEntry]) -> Vec<String> {
    matches.iter().map(|e| e.course_name.clone()).collect()
}

#[test]
fn equal_normalized_names_always_match() {
    let pairs = [
        ("Αλγόριθμοι", "ΑΛΓΟΡΙΘΜΟΙ (Άρτιοι)"),
        ("Κ16 Λογική Σχεδίαση", "K16   Λογική Σχεδιαση"),
        ("Δομές Δεδομένων", "δομες δεδομενων (odd)"),
    ];
    for (course, feed_name) in pairs {
        assert_eq!(normalize(course), normalize(feed_name));
        let candidates = [named(feed_name)];
        let found = match_entries(course, &candidates);
        assert_eq!(found.len(), 1, "{course:?} should match {feed_name:?}");
    }
}

#[test]
fn containment_matches_in_either_direction() {
    let matcher = Matcher::default();
    let short = matcher.key("Γραφικά");
    let long = matcher.key("Γραφικά Υπολογιστών (Εργαστήριο)");
    assert_eq!(matcher.compare(&short, &long), Some(MatchRule::Containment));
    assert_eq!(matcher.compare(&long, &short), Some(MatchRule::Containment));
}

#[test]
fn two_of_three_common_words_is_below_threshold() {
    let candidates = [named("Ψηφιακή Επεξεργασία Εικόνας")];
    assert!(match_entries("Ψηφιακή Επεξεργασία Σήματος", &candidates).is_empty());
}

#[test]
fn two_of_two_common_words_matches() {
    let matcher = Matcher::default();
    let course = matcher.key("Θεωρία Υπολογισμού");
    let candidate = matcher.key("Υπολογισμού Θεωρία Εργαστήριο");
    match matcher.compare(&course, &candidate) {
        Some(MatchRule::TokenOverlap { common, ratio }) => {
            assert_eq!(common, 2);
            assert!((ratio - 1.0).abs() < f64::EPSILON);
        }
        other => panic!("expected token overlap, got {other:?}"),
    }
}

#[test]
fn repeated_words_count_once() {
    let candidates = [named("Θεωρία Παιγνίων Εφαρμογές")];
    assert!(match_entries("Θεωρία Θεωρία", &candidates).is_empty());
}

#[test]
fn every_matching_session_is_returned_in_feed_order() {
    let candidates = [
        entry("Βάσεις Δεδομένων (Εργαστήριο)", "Τρίτη", "12:00", "13:00"),
        entry("Λειτουργικά Συστήματα", "Τρίτη", "09:00", "10:00"),
        entry("ΒΑΣΕΙΣ ΔΕΔΟΜΕΝΩΝ", "Δευτέρα", "09:00", "11:00"),
    ];
    let found = match_entries("Βάσεις Δεδομένων", &candidates);
    assert_eq!(
        names(&found),
        vec!["Βάσεις Δεδομένων (Εργαστήριο)", "ΒΑΣΕΙΣ ΔΕΔΟΜΕΝΩΝ"]
    );
}

#[test]
fn empty_candidate_list_yields_no_matches() {
    assert!(match_entries("Αλγόριθμοι", &[]).is_empty());
}

#[test]
fn empty_course_name_matches_nothing() {
    let candidates = [named("Αλγόριθμοι"), named("Βάσεις Δεδομένων")];
    assert!(match_entries("   ", &candidates).is_empty());
    assert!(match_entries("(Άρτιοι)", &candidates).is_empty());
}

#[test]
fn relaxed_thresholds_accept_partial_overlap() {
    let matcher = Matcher::new(MatchThresholds {
        min_overlap_ratio: 0.6,
        ..MatchThresholds::default()
    });
    let candidates = [named("Ψηφιακή Επεξεργασία Εικόνας")];
    let found = matcher.match_entries("Ψηφιακή Επεξεργασία Σήματος", &candidates);
    assert_eq!(found.len(), 1);
}
