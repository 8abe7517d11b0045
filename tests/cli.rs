//! CLI surface: listing and help output, no browser required.

use assert_cmd::Command;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("storefront-e2e").expect("binary builds");
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn list_prints_collected_cases() {
    let assert = bin().arg("list").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("checkout::full_purchase_flow"), "{stdout}");
    assert!(stdout.contains("login::valid_standard_user"), "{stdout}");
    assert!(stdout.contains("case(s)"), "{stdout}");
}

#[test]
fn list_honors_suite_filter() {
    let assert = bin().args(["list", "--suite", "cart"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("cart::shows_added_item"), "{stdout}");
    assert!(!stdout.contains("login::valid_"), "{stdout}");
}

#[test]
fn list_honors_marker_filter() {
    let assert = bin()
        .args(["list", "--marker", "negative"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("checkout::blocked_without_first_name"), "{stdout}");
    assert!(!stdout.contains("checkout::full_purchase_flow"), "{stdout}");
}

#[test]
fn help_names_both_subcommands() {
    let assert = bin().arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("run"), "{stdout}");
    assert!(stdout.contains("list"), "{stdout}");
}

#[test]
fn run_help_documents_selection_flags() {
    let assert = bin().args(["run", "--help"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("--marker"), "{stdout}");
    assert!(stdout.contains("--suite"), "{stdout}");
    assert!(stdout.contains("--browser"), "{stdout}");
    assert!(stdout.contains("--headed"), "{stdout}");
}
