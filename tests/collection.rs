//! Suite collection: case inventory, marker filtering, and aborted suites.

use std::collections::HashSet;

use storefront_e2e::data::DataLoader;
use storefront_e2e::runner::{Filter, Marker, Suite};
use storefront_e2e::suites;
use tempfile::TempDir;

fn repo_collection() -> storefront_e2e::runner::Collection {
    let loader = DataLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    suites::collect(&loader)
}

#[test]
fn collection_covers_every_suite() {
    let collection = repo_collection();
    assert!(collection.aborted.is_empty(), "{:?}", collection.aborted);

    let suites_seen: HashSet<&str> = collection
        .cases
        .iter()
        .map(|case| case.suite.as_str())
        .collect();
    for expected in ["login", "inventory", "cart", "checkout"] {
        assert!(suites_seen.contains(expected), "missing suite {expected}");
    }
}

#[test]
fn case_names_are_unique_and_marked() {
    let collection = repo_collection();
    let mut names = HashSet::new();
    for case in &collection.cases {
        assert!(names.insert(case.name.clone()), "duplicate name {}", case.name);
        assert!(!case.markers.is_empty(), "{} has no markers", case.name);
    }
}

#[test]
fn canonical_scenario_is_collected() {
    let collection = repo_collection();
    let case = collection
        .cases
        .iter()
        .find(|case| case.name == "checkout::full_purchase_flow")
        .expect("canonical purchase scenario present");
    assert_eq!(case.suite, Suite::Checkout);
    assert!(case.markers.contains(&Marker::E2e));
    assert!(case.markers.contains(&Marker::Smoke));
}

#[test]
fn marker_filter_selects_only_tagged_cases() {
    let collection = repo_collection();
    let filter = Filter {
        markers: vec![Marker::Negative],
        ..Filter::default()
    };
    let selected: Vec<_> = collection
        .cases
        .iter()
        .filter(|case| filter.matches(case))
        .collect();
    assert!(!selected.is_empty());
    assert!(selected
        .iter()
        .all(|case| case.markers.contains(&Marker::Negative)));
}

#[test]
fn parametrized_cases_follow_the_datasets() {
    let loader = DataLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
    let collection = suites::collect(&loader);

    let valid_users = loader.valid_users().expect("users load").len();
    let valid_login_cases = collection
        .cases
        .iter()
        .filter(|case| case.name.starts_with("login::valid_"))
        .count();
    assert_eq!(valid_login_cases, valid_users);

    let invalid_forms = loader.invalid_checkout_data().expect("forms load").len();
    let blocked_cases = collection
        .cases
        .iter()
        .filter(|case| case.name.starts_with("checkout::blocked_without_"))
        .count();
    assert_eq!(blocked_cases, invalid_forms);
}

#[test]
fn missing_data_aborts_every_suite_without_cases() {
    let dir = TempDir::new().expect("temp dir");
    let loader = DataLoader::new(dir.path());
    let collection = suites::collect(&loader);

    assert!(collection.cases.is_empty());
    let aborted: HashSet<&str> = collection
        .aborted
        .iter()
        .map(|a| a.suite.as_str())
        .collect();
    assert_eq!(aborted.len(), 4);
    for aborted_suite in &collection.aborted {
        assert!(aborted_suite.reason.contains("malformed test data"));
    }
}
