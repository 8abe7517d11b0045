//! Error types for the test suite

use thiserror::Error;

/// Failure conditions surfaced by the interaction, assertion, and data layers.
///
/// Every variant fails the test it occurs in; there is no retry and no
/// partial-success semantics. `DataFormat` is the one variant raised at
/// collection time rather than during a test body.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Element never appeared in the DOM within the configured timeout
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// A bounded wait expired before its condition held
    #[error("timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u64 },

    /// Observed page state did not match the expectation
    #[error("assertion failed: {check}\n  expected: {expected}\n  actual:   {actual}")]
    Assertion {
        check: String,
        expected: String,
        actual: String,
    },

    /// Checkout flow method called out of sequence
    #[error("checkout step out of order: {method} requires step {expected}, current step is {actual}")]
    StepOrder {
        method: String,
        expected: String,
        actual: String,
    },

    /// Malformed or incomplete test-data file
    #[error("malformed test data in {file}: {reason}")]
    DataFormat { file: String, reason: String },

    /// CDP communication or browser engine failure
    #[error("browser i/o error: {0}")]
    Cdp(String),

    /// Invalid startup configuration (bad URL, unusable paths)
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure while writing artifacts or reports
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuiteError {
    pub fn assertion(
        check: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        SuiteError::Assertion {
            check: check.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn data_format(file: impl Into<String>, reason: impl Into<String>) -> Self {
        SuiteError::DataFormat {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// True for failures raised before any test body ran.
    pub fn is_collection_error(&self) -> bool {
        matches!(self, SuiteError::DataFormat { .. })
    }
}

impl From<chromiumoxide::error::CdpError> for SuiteError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        SuiteError::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_display_includes_expected_and_actual() {
        let err = SuiteError::assertion("cart badge count", "1", "2");
        let text = err.to_string();
        assert!(text.contains("expected: 1"), "{text}");
        assert!(text.contains("actual:   2"), "{text}");
    }

    #[test]
    fn data_format_is_collection_error() {
        assert!(SuiteError::data_format("users.json", "missing field `password`")
            .is_collection_error());
        assert!(!SuiteError::Cdp("boom".into()).is_collection_error());
    }

    #[test]
    fn step_order_names_the_offending_method() {
        let err = SuiteError::StepOrder {
            method: "finish".into(),
            expected: "overview".into(),
            actual: "information".into(),
        };
        assert!(err.to_string().contains("finish"));
    }
}
