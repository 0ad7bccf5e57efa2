use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use a11y_report::analyzer::client::AnalyzerClient;
use a11y_report::analyzer::wire::WireFormat;
use a11y_report::config::{Config, DEFAULT_ANALYZE_PATH};
use a11y_report::controller::{Phase, ReportController};
use a11y_report::report::sort::{SortDir, SortKey};

/// a11y-report: web accessibility reports in your terminal.
///
/// Sends a URL to the accessibility analysis service (API_BASE_URL,
/// default http://localhost:8080) and renders the score and violations.
#[derive(Parser)]
#[command(name = "a11y-report", version, about)]
struct Cli {
    /// Path of the analyze endpoint (the mock backend serves /analyze)
    #[arg(long, global = true, default_value = DEFAULT_ANALYZE_PATH)]
    api_path: String,

    /// Response format the service sends: violations or issues (legacy)
    #[arg(long, global = true, default_value = "violations")]
    format: WireFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one URL and print the report
    Analyze {
        /// Website to analyze; https:// is added when no scheme is given
        url: String,

        /// Column to sort findings by (impact, help, nodes, id, description)
        #[arg(long, default_value = "impact")]
        sort: SortKey,

        /// Sort ascending
        #[arg(long, conflicts_with = "desc")]
        asc: bool,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Analyze URLs from an interactive prompt
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("a11y_report=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.analyze_path = cli.api_path.clone();
    config.wire_format = cli.format;
    config.validate()?;

    debug!(endpoint = %config.endpoint(), format = %config.wire_format, "Configuration loaded");

    let client = AnalyzerClient::from_config(&config)?;
    let controller = ReportController::new(Arc::new(client));

    match cli.command {
        Commands::Analyze {
            url,
            sort,
            asc,
            desc,
            json,
        } => {
            // Replay the header clicks that lead to the requested order
            let mut state = controller.snapshot().await.sort;
            if state.key != sort {
                state = controller.toggle_sort(sort).await;
            }
            let wanted = if asc {
                Some(SortDir::Asc)
            } else if desc {
                Some(SortDir::Desc)
            } else {
                None
            };
            if wanted.is_some_and(|dir| dir != state.dir) {
                controller.toggle_sort(sort).await;
            }

            controller.set_input(&url).await;

            let spinner = (!json).then(|| analyzing_spinner(&url));
            let submission = controller.analyze().await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            let view = controller.snapshot().await;
            match &view.phase {
                Phase::Success(report) if json => {
                    println!("{}", a11y_report::output::report_json(report, &view.sort)?);
                }
                Phase::Success(report) => {
                    a11y_report::output::terminal::display_report(report, &view.sort);
                }
                Phase::Failed(err) if json => {
                    eprintln!("{}", err.user_message());
                    return Ok(ExitCode::FAILURE);
                }
                Phase::Failed(err) => {
                    a11y_report::output::terminal::display_error(err);
                    return Ok(ExitCode::FAILURE);
                }
                Phase::Idle | Phase::Submitting { .. } => {
                    bail!("Analysis did not complete: {submission:?}");
                }
            }
        }

        Commands::Interactive => {
            println!(
                "{}",
                format!("Using analysis service at {}", config.endpoint()).dimmed()
            );
            a11y_report::session::run(controller).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Spinner shown while the request is outstanding.
fn analyzing_spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg} ({elapsed})")
            .expect("valid template"),
    );
    pb.set_message(format!("Analyzing {}...", url.trim()));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
