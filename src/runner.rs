//! Test collection and execution
//!
//! Cases are gathered from the suites at collection time, filtered by
//! suite/marker/name, then executed serially. Each case gets a fresh
//! fixture, a bounded time budget, and a report entry; a failure captures a
//! screenshot before the session is torn down. Suites whose test data fails
//! to load are reported as aborted without running.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use futures::future::BoxFuture;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::error::SuiteError;
use crate::fixture::Fixture;

/// Tags used to group and select cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Smoke,
    Regression,
    Login,
    Inventory,
    Cart,
    Checkout,
    Negative,
    E2e,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Smoke => "smoke",
            Marker::Regression => "regression",
            Marker::Login => "login",
            Marker::Inventory => "inventory",
            Marker::Cart => "cart",
            Marker::Checkout => "checkout",
            Marker::Negative => "negative",
            Marker::E2e => "e2e",
        }
    }
}

/// Feature-area module a case belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Login,
    Inventory,
    Cart,
    Checkout,
}

impl Suite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suite::Login => "login",
            Suite::Inventory => "inventory",
            Suite::Cart => "cart",
            Suite::Checkout => "checkout",
        }
    }
}

/// A test body: borrows the fixture for the duration of one run.
pub type CaseFn =
    Arc<dyn for<'a> Fn(&'a Fixture) -> BoxFuture<'a, Result<(), SuiteError>> + Send + Sync>;

#[derive(Clone)]
pub struct TestCase {
    pub name: String,
    pub suite: Suite,
    pub markers: Vec<Marker>,
    run: CaseFn,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        suite: Suite,
        markers: Vec<Marker>,
        run: CaseFn,
    ) -> Self {
        Self {
            name: name.into(),
            suite,
            markers,
            run,
        }
    }
}

/// A suite whose cases could not be collected (malformed test data).
#[derive(Clone, Debug, Serialize)]
pub struct AbortedSuite {
    pub suite: Suite,
    pub reason: String,
}

/// Everything collection produced: runnable cases plus aborted suites.
pub struct Collection {
    pub cases: Vec<TestCase>,
    pub aborted: Vec<AbortedSuite>,
}

/// Case selection: all criteria must hold; marker selection is any-of.
#[derive(Clone, Debug, Default)]
pub struct Filter {
    pub suite: Option<Suite>,
    pub markers: Vec<Marker>,
    pub name_contains: Option<String>,
}

impl Filter {
    pub fn matches(&self, case: &TestCase) -> bool {
        if let Some(suite) = self.suite {
            if case.suite != suite {
                return false;
            }
        }
        if !self.markers.is_empty()
            && !self.markers.iter().any(|m| case.markers.contains(m))
        {
            return false;
        }
        if let Some(fragment) = &self.name_contains {
            if !case.name.contains(fragment) {
                return false;
            }
        }
        true
    }

    /// Aborted suites can only be filtered by suite; their cases are unknown.
    fn matches_aborted(&self, aborted: &AbortedSuite) -> bool {
        self.suite.map_or(true, |suite| aborted.suite == suite)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Aborted,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub suite: Suite,
    pub markers: Vec<Marker>,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub browser: String,
    pub headless: bool,
    pub cases: Vec<CaseReport>,
    pub passed: usize,
    pub failed: usize,
    pub aborted: usize,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.aborted == 0
    }
}

/// Execute every selected case serially and write the JSON run report.
pub async fn run(
    settings: &Settings,
    collection: Collection,
    filter: &Filter,
) -> Result<RunReport, SuiteError> {
    let selected: Vec<TestCase> = collection
        .cases
        .into_iter()
        .filter(|case| filter.matches(case))
        .collect();
    let aborted: Vec<AbortedSuite> = collection
        .aborted
        .into_iter()
        .filter(|a| filter.matches_aborted(a))
        .collect();

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let start = Instant::now();
    info!(
        %run_id,
        selected = selected.len(),
        aborted_suites = aborted.len(),
        "starting test run"
    );

    let mut reports = Vec::with_capacity(selected.len() + aborted.len());

    for suite in &aborted {
        error!(suite = suite.suite.as_str(), reason = %suite.reason, "suite aborted at collection");
        reports.push(CaseReport {
            name: format!("{}::<collection>", suite.suite.as_str()),
            suite: suite.suite,
            markers: Vec::new(),
            outcome: Outcome::Aborted,
            error: Some(suite.reason.clone()),
            duration_ms: 0,
            artifact: None,
        });
    }

    for case in selected {
        reports.push(execute_case(settings, &case).await);
    }

    let passed = reports.iter().filter(|r| r.outcome == Outcome::Passed).count();
    let failed = reports.iter().filter(|r| r.outcome == Outcome::Failed).count();
    let aborted = reports.iter().filter(|r| r.outcome == Outcome::Aborted).count();

    let report = RunReport {
        run_id,
        started_at,
        base_url: settings.base_url.clone(),
        browser: settings.browser.as_str().to_string(),
        headless: settings.headless,
        cases: reports,
        passed,
        failed,
        aborted,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    write_report(settings, &report).await?;
    info!(
        %run_id,
        passed,
        failed,
        aborted,
        duration = %humantime::format_duration(start.elapsed()),
        "test run finished"
    );
    Ok(report)
}

async fn execute_case(settings: &Settings, case: &TestCase) -> CaseReport {
    info!(test = %case.name, "running");
    let start = Instant::now();

    let fixture = match Fixture::launch(settings.clone()).await {
        Ok(fixture) => fixture,
        Err(err) => {
            error!(test = %case.name, %err, "fixture launch failed");
            return CaseReport {
                name: case.name.clone(),
                suite: case.suite,
                markers: case.markers.clone(),
                outcome: Outcome::Failed,
                error: Some(err.to_string()),
                duration_ms: start.elapsed().as_millis() as u64,
                artifact: None,
            };
        }
    };

    let budget = settings.case_budget();
    let outcome = match tokio::time::timeout(budget, (case.run)(&fixture)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err),
        Err(_) => Err(SuiteError::Timeout {
            what: "test budget".to_string(),
            waited_ms: budget.as_millis() as u64,
        }),
    };

    let (outcome, error, artifact) = match outcome {
        Ok(()) => {
            info!(test = %case.name, "passed");
            (Outcome::Passed, None, None)
        }
        Err(err) => {
            error!(test = %case.name, %err, "failed");
            let artifact = fixture.capture_failure(&case.name).await;
            (Outcome::Failed, Some(err.to_string()), artifact)
        }
    };

    fixture.close().await;

    CaseReport {
        name: case.name.clone(),
        suite: case.suite,
        markers: case.markers.clone(),
        outcome,
        error,
        duration_ms: start.elapsed().as_millis() as u64,
        artifact,
    }
}

async fn write_report(settings: &Settings, report: &RunReport) -> Result<(), SuiteError> {
    tokio::fs::create_dir_all(&settings.reports_dir).await?;
    let stamp = report.started_at.format("%Y%m%d-%H%M%S");
    let path = settings.reports_dir.join(format!("report-{stamp}.json"));
    let body = serde_json::to_string_pretty(report)
        .map_err(|err| SuiteError::Cdp(format!("report serialization: {err}")))?;
    tokio::fs::write(&path, body).await?;
    info!(path = %path.display(), "run report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    fn dummy_case(name: &str, suite: Suite, markers: Vec<Marker>) -> TestCase {
        TestCase::new(
            name,
            suite,
            markers,
            Arc::new(|_fx| async { Ok::<(), SuiteError>(()) }.boxed()),
        )
    }

    #[test]
    fn empty_filter_selects_everything() {
        let case = dummy_case("login::any", Suite::Login, vec![Marker::Smoke]);
        assert!(Filter::default().matches(&case));
    }

    #[test]
    fn marker_filter_is_any_of() {
        let case = dummy_case(
            "cart::roundtrip",
            Suite::Cart,
            vec![Marker::Cart, Marker::Regression],
        );
        let filter = Filter {
            markers: vec![Marker::Smoke, Marker::Regression],
            ..Filter::default()
        };
        assert!(filter.matches(&case));

        let filter = Filter {
            markers: vec![Marker::Negative],
            ..Filter::default()
        };
        assert!(!filter.matches(&case));
    }

    #[test]
    fn suite_and_name_filters_compose() {
        let case = dummy_case("checkout::full_purchase_flow", Suite::Checkout, vec![]);
        let filter = Filter {
            suite: Some(Suite::Checkout),
            name_contains: Some("purchase".to_string()),
            ..Filter::default()
        };
        assert!(filter.matches(&case));

        let filter = Filter {
            suite: Some(Suite::Login),
            ..Filter::default()
        };
        assert!(!filter.matches(&case));
    }

    #[test]
    fn aborted_suites_only_filter_by_suite() {
        let aborted = AbortedSuite {
            suite: Suite::Login,
            reason: "malformed test data in users.json".to_string(),
        };
        let by_marker = Filter {
            markers: vec![Marker::Smoke],
            ..Filter::default()
        };
        assert!(by_marker.matches_aborted(&aborted));
        let other_suite = Filter {
            suite: Some(Suite::Cart),
            ..Filter::default()
        };
        assert!(!other_suite.matches_aborted(&aborted));
    }

    #[test]
    fn report_serializes_without_empty_optionals() {
        let report = CaseReport {
            name: "login::valid".to_string(),
            suite: Suite::Login,
            markers: vec![Marker::Smoke],
            outcome: Outcome::Passed,
            error: None,
            duration_ms: 1234,
            artifact: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "passed");
        assert_eq!(json["suite"], "login");
        assert!(json.get("error").is_none());
        assert!(json.get("artifact").is_none());
    }
}
