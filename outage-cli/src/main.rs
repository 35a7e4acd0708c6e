// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Outage Report - site-scoped device outage reporting from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Fetch, filter, submit and print outages for the default site
//! outage-report
//!
//! # Another site and cutoff, without submitting
//! outage-report report --site kingfisher --cutoff 2023-01-01T00:00:00.000Z --no-submit
//!
//! # JSON output
//! outage-report --format json --pretty
//!
//! # One raw call against the upstream service
//! outage-report request GET outages
//! ```

mod commands;
mod config;
mod output;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{report, request};

// ============================================================================
// CLI Definition
// ============================================================================

/// Outage Report - site outage reporting.
#[derive(Parser)]
#[command(name = "outage-report")]
#[command(about = "Fetch, filter, submit and print device outages for a site")]
#[command(long_about = r#"
Outage Report pulls every device outage from the upstream service, keeps
the ones that affect a single site and began on or after a cutoff date,
submits that list back to the service, and prints it as a table with
warnings for implausible dates.

The API key is read from $OUTAGE_API_KEY, or from the key file
(default ./api-key.txt).

Examples:
  outage-report                          # Report on the configured site
  outage-report report --no-submit       # Dry run
  outage-report --format json            # JSON output
  outage-report request GET outages      # Raw request
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'report' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Upstream base URL (overrides config).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key file (overrides config).
    #[arg(long, global = true)]
    pub api_key_file: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, no error line).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch, filter, submit and print site outages (default).
    #[command(visible_alias = "r")]
    Report(report::ReportArgs),

    /// Issue a single raw request.
    Request(request::RequestArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// Any fatal error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("outage=debug,info")
    } else {
        EnvFilter::new("outage=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let code = run(&cli, &mut std::io::stderr()).await;
    std::process::exit(code as i32);
}

/// Dispatches the selected command and maps its outcome to an exit code.
///
/// Failures are written to `stderr` as `Error: ...` unless `--quiet` is set.
async fn run(cli: &Cli, stderr: &mut impl Write) -> ExitCode {
    let result = match &cli.command {
        Some(Commands::Report(args)) => report::run(args, cli).await,
        Some(Commands::Request(args)) => request::run(args, cli).await,
        None => report::run(&report::ReportArgs::default(), cli).await,
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                let _ = writeln!(stderr, "Error: {e:#}");
            }
            ExitCode::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_report() {
        let cli = Cli::try_parse_from(["outage-report"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_report_flags() {
        let cli = Cli::try_parse_from([
            "outage-report",
            "report",
            "--site",
            "kingfisher",
            "--cutoff",
            "2023-01-01T00:00:00.000Z",
            "--no-submit",
            "--format",
            "json",
        ])
        .unwrap();

        let Some(Commands::Report(args)) = &cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.site.as_deref(), Some("kingfisher"));
        assert_eq!(args.cutoff.as_deref(), Some("2023-01-01T00:00:00.000Z"));
        assert!(args.no_submit);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_request_args() {
        let cli =
            Cli::try_parse_from(["outage-report", "request", "PUT", "outages", "--body", "[]"])
                .unwrap();

        let Some(Commands::Request(args)) = &cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.method, "PUT");
        assert_eq!(args.endpoint, "outages");
        assert_eq!(args.body.as_deref(), Some("[]"));
    }

    fn request_cli(dir: &std::path::Path, extra: &[&str]) -> Cli {
        let config = dir.join("config.json").display().to_string();
        let key_file = dir.join("api-key.txt").display().to_string();
        let mut args = vec![
            "outage-report",
            "--config",
            &config,
            "--api-key-file",
            &key_file,
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_failure_prints_error_and_exits_1() {
        let dir = tempfile::tempdir().unwrap();
        let cli = request_cli(dir.path(), &["request", "PUT", "outages"]);
        let mut stderr = Vec::new();

        let code = run(&cli, &mut stderr).await;

        assert_eq!(code, ExitCode::Error);
        assert_eq!(code as i32, 1);
        let stderr = String::from_utf8(stderr).unwrap();
        assert_eq!(stderr, "Error: Invalid request type 'PUT'\n");
    }

    #[tokio::test]
    async fn test_quiet_failure_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let cli = request_cli(dir.path(), &["--quiet", "request", "PUT", "outages"]);
        let mut stderr = Vec::new();

        let code = run(&cli, &mut stderr).await;

        assert_eq!(code, ExitCode::Error);
        assert!(stderr.is_empty());
    }

    #[tokio::test]
    async fn test_success_exits_0() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/outages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "a"}])))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("api-key.txt"), "secret\n").unwrap();
        let base_url = server.uri();
        let cli = request_cli(
            dir.path(),
            &["--base-url", &base_url, "request", "GET", "outages"],
        );
        let mut stderr = Vec::new();

        let code = run(&cli, &mut stderr).await;

        assert_eq!(code, ExitCode::Success);
        assert!(stderr.is_empty());
    }
}
