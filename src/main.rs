use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_e2e::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing();

    match cli.command {
        Command::Run(args) => {
            let report = cli::cmd_run(args).await?;
            if !report.all_passed() {
                std::process::exit(1);
            }
        }
        Command::List(args) => cli::cmd_list(args)?,
    }

    Ok(())
}

/// Console logging honors RUST_LOG; a JSON copy of everything goes to a
/// daily-rolling file under logs/. The returned guard must live until exit
/// so buffered log lines are flushed.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "storefront-e2e.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    guard
}
