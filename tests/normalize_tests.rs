use timetable_tool::{
    display_name, normalize,
    reconcile::{GroupMarker, markers_in},
};

#[test]
fn whitespace_and_case_are_canonicalized() {
    assert_eq!(normalize("  Λογική   Σχεδίαση  "), normalize("λογική σχεδίαση"));
    assert_eq!(normalize("\tΛογική\nΣχεδίαση"), "λoγikh σxeδiaσh");
}

#[test]
fn accents_and_homoglyphs_fold_together() {
    // Greek capital kappa vs Latin K.
    assert_eq!(normalize("Κ16 Αλγόριθμοι"), normalize("K16 ΑΛΓΟΡΙΘΜΟΙ"));
    assert_eq!(normalize("Δομές"), normalize("ΔΟΜΕΣ"));
    assert_eq!(normalize("Ψηφιακή"), normalize("ψηφιακη"));
}

#[test]
fn group_markers_are_stripped_in_both_scripts() {
    let plain = normalize("Αλγόριθμοι");
    assert_eq!(normalize("Αλγόριθμοι (Άρτιοι)"), plain);
    assert_eq!(normalize("Αλγόριθμοι(Άρτιοι)"), plain);
    assert_eq!(normalize("Αλγόριθμοι ΠΕΡΙΤΤΟΙ"), plain);
    assert_eq!(normalize("Αλγόριθμοι (Even)"), plain);
    assert_eq!(normalize("Αλγόριθμοι (odd)"), plain);
}

#[test]
fn marker_like_words_inside_names_are_kept() {
    // Only whole tokens are markers.
    assert_eq!(normalize("Oddities of Logic"), "oddities of logic");
    assert_eq!(normalize("Γραφικά (Εργαστήριο)"), "γpaφika (epγaσthpio)");
}

#[test]
fn normalize_is_idempotent() {
    let names = [
        "Αλγόριθμοι (Άρτιοι)",
        "  Κ16  Λογική Σχεδίαση(Περιττοί) ",
        "Βάσεις Δεδομένων ()",
        "Ψηφιακή Επεξεργασία Σήματος",
        "ΆΡΤΙΟΙ",
        "Θεωρία Υπολογισμού (even) (odd)",
        "Προϊόντα Ϋλης ΰ ΐ",
        "Data Structures (Lab)",
        "",
        "(",
    ];
    for name in names {
        let once = normalize(name);
        assert_eq!(normalize(&once), once, "not idempotent for {name:?}");
    }
}

#[test]
fn marker_only_names_normalize_to_empty() {
    assert_eq!(normalize("(Άρτιοι)"), "");
    assert_eq!(normalize("   "), "");
}

#[test]
fn markers_are_detected_before_normalization() {
    let even = markers_in("Αλγόριθμοι (Άρτιοι)");
    assert!(even.contains(GroupMarker::Even));
    assert!(!even.contains(GroupMarker::Odd));

    let odd = markers_in("Αλγόριθμοι περιττοι");
    assert!(odd.contains(GroupMarker::Odd));

    assert!(markers_in("Αλγόριθμοι").is_empty());
}

#[test]
fn display_name_keeps_script_and_drops_markers() {
    assert_eq!(display_name("Αλγόριθμοι (Άρτιοι)"), "Αλγόριθμοι");
    assert_eq!(display_name("  Γραφικά   (Εργαστήριο) "), "Γραφικά (Εργαστήριο)");
}
