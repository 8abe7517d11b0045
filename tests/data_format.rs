//! Data loader behavior against real and deliberately broken data files.

use std::fs;

use storefront_e2e::data::DataLoader;
use storefront_e2e::error::SuiteError;
use tempfile::TempDir;

fn repo_loader() -> DataLoader {
    DataLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

#[test]
fn shipped_datasets_load() {
    let loader = repo_loader();

    let valid = loader.valid_users().expect("valid users load");
    assert!(!valid.is_empty());
    assert!(valid.iter().any(|u| u.username == "standard_user"));

    let invalid = loader.invalid_users().expect("invalid users load");
    assert!(invalid.iter().all(|u| !u.error.is_empty()));

    let products = loader.products().expect("products load");
    assert_eq!(products.len(), 6);
    assert!(products
        .iter()
        .any(|p| p.name == "Sauce Labs Backpack" && (p.price - 29.99).abs() < f64::EPSILON));

    let forms = loader.checkout_data().expect("checkout forms load");
    assert!(forms
        .iter()
        .any(|f| f.first_name == "John" && f.last_name == "Doe" && f.zip_code == "12345"));
}

#[test]
fn loads_are_idempotent() {
    let loader = repo_loader();
    let first = loader.products().expect("first load");
    let second = loader.products().expect("second load");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.price, b.price);
    }
}

#[test]
fn missing_required_field_is_a_data_format_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("users.json"),
        r#"{ "valid_users": [{ "username": "standard_user" }], "invalid_users": [] }"#,
    )
    .expect("write users.json");

    let loader = DataLoader::new(dir.path());
    let err = loader.valid_users().expect_err("missing password must fail");
    match err {
        SuiteError::DataFormat { file, reason } => {
            assert_eq!(file, "users.json");
            assert!(reason.contains("password"), "reason: {reason}");
        }
        other => panic!("expected DataFormat, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_data_format_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("checkout.json"), "{ not json").expect("write checkout.json");

    let loader = DataLoader::new(dir.path());
    assert!(matches!(
        loader.checkout_data(),
        Err(SuiteError::DataFormat { .. })
    ));
}

#[test]
fn csv_with_missing_column_is_a_data_format_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("products.csv"),
        "name\nSauce Labs Backpack\n",
    )
    .expect("write products.csv");

    let loader = DataLoader::new(dir.path());
    let err = loader.products().expect_err("missing price column must fail");
    match err {
        SuiteError::DataFormat { file, .. } => assert_eq!(file, "products.csv"),
        other => panic!("expected DataFormat, got {other:?}"),
    }
}

#[test]
fn absent_file_is_a_data_format_error() {
    let dir = TempDir::new().expect("temp dir");
    let loader = DataLoader::new(dir.path());
    assert!(matches!(
        loader.valid_users(),
        Err(SuiteError::DataFormat { .. })
    ));
}
