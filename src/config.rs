//! Suite configuration
//!
//! A `Settings` value is constructed once at startup from environment
//! variables, then adjusted by CLI flags, and passed explicitly to the
//! fixture layer. Nothing here is global.

use clap::ValueEnum;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use which::which;

/// CDP-capable browser families the suite can drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Chrome,
    Edge,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Chrome => "chrome",
            BrowserKind::Edge => "edge",
        }
    }

    /// Well-known executable names probed on PATH, most specific first.
    fn candidates(&self) -> &'static [&'static str] {
        match self {
            BrowserKind::Chromium => &["chromium", "chromium-browser", "google-chrome"],
            BrowserKind::Chrome => &["google-chrome", "google-chrome-stable", "chrome"],
            BrowserKind::Edge => &["microsoft-edge", "microsoft-edge-stable", "msedge"],
        }
    }
}

/// Runtime configuration for one suite invocation.
#[derive(Clone, Debug, Serialize)]
pub struct Settings {
    pub base_url: String,
    pub standard_user: String,
    pub locked_out_user: String,
    pub password: String,
    pub browser: BrowserKind,
    pub browser_path: Option<PathBuf>,
    pub headless: bool,
    pub no_sandbox: bool,
    /// Delay applied after each browser interaction, in milliseconds.
    pub slow_mo_ms: u64,
    /// Bound on every wait primitive, in milliseconds.
    pub timeout_ms: u64,
    pub data_dir: PathBuf,
    pub reports_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.saucedemo.com".to_string(),
            standard_user: "standard_user".to_string(),
            locked_out_user: "locked_out_user".to_string(),
            password: "secret_sauce".to_string(),
            browser: BrowserKind::default(),
            browser_path: None,
            headless: true,
            no_sandbox: false,
            slow_mo_ms: 0,
            timeout_ms: 30_000,
            data_dir: PathBuf::from("data"),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        Self {
            base_url: env_string("BASE_URL").unwrap_or(defaults.base_url),
            standard_user: env_string("STANDARD_USER").unwrap_or(defaults.standard_user),
            locked_out_user: env_string("LOCKED_OUT_USER").unwrap_or(defaults.locked_out_user),
            password: env_string("PASSWORD").unwrap_or(defaults.password),
            browser: env_string("E2E_BROWSER")
                .and_then(|raw| BrowserKind::from_str(&raw, true).ok())
                .unwrap_or(defaults.browser),
            browser_path: env_string("E2E_BROWSER_PATH").map(PathBuf::from),
            headless: parse_flag(env_string("HEADLESS").as_deref(), defaults.headless),
            no_sandbox: parse_flag(env_string("E2E_NO_SANDBOX").as_deref(), defaults.no_sandbox),
            slow_mo_ms: parse_millis(env_string("SLOW_MO").as_deref(), defaults.slow_mo_ms),
            timeout_ms: parse_millis(env_string("TIMEOUT").as_deref(), defaults.timeout_ms),
            data_dir: env_string("E2E_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            reports_dir: env_string("E2E_REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn slow_mo(&self) -> Duration {
        Duration::from_millis(self.slow_mo_ms)
    }

    /// Upper bound on one whole test body, a multiple of the wait timeout.
    pub fn case_budget(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.saturating_mul(4))
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.reports_dir.join("artifacts")
    }

    /// Locate the browser executable: explicit path first, then PATH probing.
    /// `None` leaves detection to the engine's own lookup.
    pub fn browser_executable(&self) -> Option<PathBuf> {
        if let Some(path) = &self.browser_path {
            return Some(path.clone());
        }
        self.browser
            .candidates()
            .iter()
            .find_map(|name| which(name).ok())
    }
}

fn env_string(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// "0", "false", "no", "off" disable; "1", "true", "yes", "on" enable.
/// Anything else keeps the default.
fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "0" | "false" | "no" | "off" => false,
            "1" | "true" | "yes" | "on" => true,
            _ => default,
        },
        None => default,
    }
}

/// Millisecond values; accepts bare numbers ("30000") or humantime
/// spans ("30s", "1m 30s").
fn parse_millis(raw: Option<&str>, default: u64) -> u64 {
    let Some(value) = raw else {
        return default;
    };
    let trimmed = value.trim();
    if let Ok(ms) = trimmed.parse::<u64>() {
        return ms;
    }
    match humantime::parse_duration(trimmed) {
        Ok(span) => span.as_millis() as u64,
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_covers_common_spellings() {
        assert!(!parse_flag(Some("off"), true));
        assert!(!parse_flag(Some("0"), true));
        assert!(parse_flag(Some("YES"), false));
        assert!(parse_flag(Some("true"), false));
        assert!(parse_flag(Some("garbage"), true));
        assert!(!parse_flag(None, false));
    }

    #[test]
    fn millis_parsing_accepts_numbers_and_spans() {
        assert_eq!(parse_millis(Some("1500"), 0), 1500);
        assert_eq!(parse_millis(Some("30s"), 0), 30_000);
        assert_eq!(parse_millis(Some("not-a-duration"), 250), 250);
        assert_eq!(parse_millis(None, 100), 100);
    }

    #[test]
    fn defaults_target_the_demo_storefront() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://www.saucedemo.com");
        assert_eq!(settings.timeout_ms, 30_000);
        assert!(settings.headless);
        assert_eq!(settings.case_budget(), Duration::from_millis(120_000));
    }

    #[test]
    fn browser_kind_names_round_trip() {
        for kind in [BrowserKind::Chromium, BrowserKind::Chrome, BrowserKind::Edge] {
            let parsed = BrowserKind::from_str(kind.as_str(), true).unwrap();
            assert_eq!(parsed, kind);
        }
    }
}
