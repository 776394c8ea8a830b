use quotedeck_types::{CategoryFilter, Quote};

fn quote(category: &str) -> Quote {
    Quote::new("some text", category).unwrap()
}

// ── from_label ───────────────────────────────────────────────────

#[test]
fn all_sentinel_case_insensitive() {
    assert_eq!(CategoryFilter::from_label("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_label("ALL"), CategoryFilter::All);
}

#[test]
fn empty_label_is_all() {
    assert_eq!(CategoryFilter::from_label(""), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_label("   "), CategoryFilter::All);
}

#[test]
fn named_label_is_trimmed() {
    assert_eq!(
        CategoryFilter::from_label("  Motivation "),
        CategoryFilter::Named("Motivation".to_string())
    );
}

#[test]
fn default_is_all() {
    assert_eq!(CategoryFilter::default(), CategoryFilter::All);
}

// ── matches ──────────────────────────────────────────────────────

#[test]
fn all_matches_everything() {
    let filter = CategoryFilter::All;
    assert!(filter.matches(&quote("Motivation")));
    assert!(filter.matches(&quote("Discipline")));
}

#[test]
fn named_matches_exactly() {
    let filter = CategoryFilter::from_label("Motivation");
    assert!(filter.matches(&quote("Motivation")));
    assert!(!filter.matches(&quote("motivation")));
    assert!(!filter.matches(&quote("Discipline")));
}

#[test]
fn display_roundtrips_through_from_label() {
    let named = CategoryFilter::from_label("Growth");
    assert_eq!(CategoryFilter::from_label(&named.to_string()), named);
    assert_eq!(CategoryFilter::All.to_string(), "all");
}
