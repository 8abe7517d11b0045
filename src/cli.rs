//! Command-line interface
//!
//! `run` executes selected cases against a live browser; `list` prints the
//! collected cases without launching anything.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{BrowserKind, Settings};
use crate::data::DataLoader;
use crate::runner::{self, Filter, Marker, RunReport, Suite};
use crate::suites;

/// End-to-end UI test suite for the SauceDemo storefront
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the test suite (optionally narrowed by suite, marker, or name)
    Run(RunArgs),
    /// List collected test cases and their markers
    List(ListArgs),
}

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Restrict the run to one feature-area suite
    #[arg(long, value_enum)]
    pub suite: Option<Suite>,

    /// Select cases carrying any of these markers (repeatable)
    #[arg(short, long, value_enum)]
    pub marker: Vec<Marker>,

    /// Select cases whose name contains this substring
    #[arg(short, long)]
    pub test: Option<String>,

    /// Browser family to drive
    #[arg(short, long, value_enum)]
    pub browser: Option<BrowserKind>,

    /// Force headless mode
    #[arg(long)]
    pub headless: bool,

    /// Run with a visible browser window
    #[arg(long, conflicts_with = "headless")]
    pub headed: bool,

    /// Storefront base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// Interaction slow-motion delay in milliseconds
    #[arg(long)]
    pub slow_mo: Option<u64>,

    /// Test-data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for run reports and failure artifacts
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    /// Restrict the listing to one feature-area suite
    #[arg(long, value_enum)]
    pub suite: Option<Suite>,

    /// List only cases carrying any of these markers (repeatable)
    #[arg(short, long, value_enum)]
    pub marker: Vec<Marker>,
}

impl RunArgs {
    /// Fold CLI overrides into environment-derived settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(suite_url) = &self.base_url {
            settings.base_url = suite_url.clone();
        }
        if let Some(browser) = self.browser {
            settings.browser = browser;
        }
        if self.headless {
            settings.headless = true;
        }
        if self.headed {
            settings.headless = false;
        }
        if let Some(slow_mo) = self.slow_mo {
            settings.slow_mo_ms = slow_mo;
        }
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(reports_dir) = &self.reports_dir {
            settings.reports_dir = reports_dir.clone();
        }
        settings
    }

    fn filter(&self) -> Filter {
        Filter {
            suite: self.suite,
            markers: self.marker.clone(),
            name_contains: self.test.clone(),
        }
    }
}

pub async fn cmd_run(args: RunArgs) -> Result<RunReport> {
    let settings = args.apply(Settings::from_env());
    let loader = DataLoader::new(settings.data_dir.clone());
    let collection = suites::collect(&loader);
    let report = runner::run(&settings, collection, &args.filter()).await?;
    print_summary(&report);
    Ok(report)
}

pub fn cmd_list(args: ListArgs) -> Result<()> {
    let settings = Settings::from_env();
    let loader = DataLoader::new(settings.data_dir.clone());
    let collection = suites::collect(&loader);

    let filter = Filter {
        suite: args.suite,
        markers: args.marker.clone(),
        name_contains: None,
    };

    let mut shown = 0;
    for case in collection.cases.iter().filter(|case| filter.matches(case)) {
        let markers: Vec<&str> = case.markers.iter().map(|m| m.as_str()).collect();
        println!("{}  [{}]", case.name, markers.join(", "));
        shown += 1;
    }
    for aborted in &collection.aborted {
        if args.suite.map_or(true, |suite| suite == aborted.suite) {
            println!(
                "{}::<collection>  ABORTED: {}",
                aborted.suite.as_str(),
                aborted.reason
            );
        }
    }
    println!("{shown} case(s)");
    Ok(())
}

fn print_summary(report: &RunReport) {
    for case in &report.cases {
        if let Some(error) = &case.error {
            println!("FAILED {}", case.name);
            for line in error.lines() {
                println!("    {line}");
            }
            if let Some(artifact) = &case.artifact {
                println!("    screenshot: {}", artifact.display());
            }
        }
    }
    println!(
        "{} passed, {} failed, {} aborted in {}",
        report.passed,
        report.failed,
        report.aborted,
        humantime::format_duration(std::time::Duration::from_millis(report.duration_ms))
    );
}
