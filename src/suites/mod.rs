//! Test modules, one per feature area
//!
//! Each suite turns its datasets into a list of [`TestCase`]s; bodies are
//! short scripts of page-object calls plus assertions. Collection loads the
//! data up front; a malformed file aborts that suite's cases without
//! touching the other suites.

mod cart;
mod checkout;
mod inventory;
mod login;

use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::warn;

use crate::data::DataLoader;
use crate::error::SuiteError;
use crate::fixture::Fixture;
use crate::runner::{AbortedSuite, Collection, Marker, Suite, TestCase};

/// Gather every suite's cases, recording suites whose data failed to load.
pub fn collect(loader: &DataLoader) -> Collection {
    let mut cases = Vec::new();
    let mut aborted = Vec::new();

    let suites: [(Suite, fn(&DataLoader) -> Result<Vec<TestCase>, SuiteError>); 4] = [
        (Suite::Login, login::cases),
        (Suite::Inventory, inventory::cases),
        (Suite::Cart, cart::cases),
        (Suite::Checkout, checkout::cases),
    ];

    for (suite, collect_suite) in suites {
        match collect_suite(loader) {
            Ok(mut suite_cases) => cases.append(&mut suite_cases),
            Err(err) => {
                warn!(suite = suite.as_str(), %err, "suite aborted at collection");
                aborted.push(AbortedSuite {
                    suite,
                    reason: err.to_string(),
                });
            }
        }
    }

    Collection { cases, aborted }
}

/// Wrap an async test body into a [`TestCase`].
fn case<F>(name: String, suite: Suite, markers: Vec<Marker>, body: F) -> TestCase
where
    F: for<'a> Fn(&'a Fixture) -> BoxFuture<'a, Result<(), SuiteError>> + Send + Sync + 'static,
{
    TestCase::new(name, suite, markers, Arc::new(body))
}

/// Case-name fragment for a possibly empty field value.
fn label(value: &str) -> String {
    if value.trim().is_empty() {
        "blank".to_string()
    } else {
        value.to_lowercase().replace([' ', '.'], "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_never_produce_empty_fragments() {
        assert_eq!(label(""), "blank");
        assert_eq!(label("  "), "blank");
        assert_eq!(label("standard_user"), "standard_user");
        assert_eq!(label("Sauce Labs Backpack"), "sauce_labs_backpack");
    }
}
