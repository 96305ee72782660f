//! Context-Lint main entry point
//!
//! This is the command-line interface for the Context-Lint AI-readiness auditor.

use anyhow::{bail, Context};
use clap::Parser;
use context_lint::audit::{run_batch, AuditMode, AuditOptions, Auditor};
use context_lint::compare::{check_thresholds, compare_baseline, Baseline};
use context_lint::config::{load_config_with_hash, validate, Config};
use context_lint::history::{detect_regression, HistoryStore};
use context_lint::output::{render_batch, render_report, OutputFormat};
use context_lint::report::{AnyReport, ScoreView};
use context_lint::scoring::ScoringVersion;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Default history database when none is configured
const DEFAULT_HISTORY_PATH: &str = "context-lint-history.db";

/// Context-Lint: AI-readiness auditing for web pages and sites
///
/// Checks robots.txt access for AI bots, llms.txt, structured data, content
/// density and agent readiness signals, then scores them under a versioned
/// scheme. Audits a whole site (sampled pages) by default.
#[derive(Parser, Debug)]
#[command(name = "context-lint")]
#[command(version)]
#[command(about = "AI-readiness auditor for web pages and sites", long_about = None)]
struct Cli {
    /// URL to audit
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Audit only the given page instead of sampling the site
    #[arg(long)]
    single: bool,

    /// Maximum pages to sample in a site audit
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Per-probe timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Delay between page fetches in seconds
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Comma-separated AI bot names to check against robots.txt
    #[arg(long, value_delimiter = ',')]
    bots: Option<Vec<String>>,

    /// Scoring scheme version (v2 or v3)
    #[arg(long, value_name = "VERSION")]
    scoring: Option<ScoringVersion>,

    /// File with URLs to audit in batch (one per line, or first CSV column)
    #[arg(short, long, value_name = "FILE", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Number of audits run in parallel in batch mode
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Output format (json or markdown)
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Save the report to the history database and check for regressions
    #[arg(long)]
    save: bool,

    /// Compare against a saved baseline; exit 1 on regression
    #[arg(long, value_name = "FILE", conflicts_with = "file")]
    baseline: Option<PathBuf>,

    /// Save the report scores as a baseline file
    #[arg(long, value_name = "FILE", conflicts_with = "file")]
    save_baseline: Option<PathBuf>,

    /// Exit 1 when the overall score is below this value
    #[arg(long, value_name = "SCORE")]
    fail_under: Option<f64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("context_lint=info,warn"),
            1 => EnvFilter::new("context_lint=debug,info"),
            _ => EnvFilter::new("context_lint=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the requested audit; `Ok(false)` means a gate failed
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&cli, &mut config)?;
    let options = AuditOptions::from_config(&config.audit)?;
    let auditor = Arc::new(Auditor::from_config(&config)?);
    let mode = if cli.single {
        AuditMode::Single
    } else {
        AuditMode::Site
    };

    if let Some(path) = &cli.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let urls: Vec<String> = parse_url_file(&content).into_iter().map(with_scheme).collect();
        if urls.is_empty() {
            bail!("no URLs found in {}", path.display());
        }
        let concurrency = config.audit.concurrency;
        return run_batch_mode(&cli, &config, auditor, urls, mode, concurrency, options).await;
    }

    let Some(url) = cli.url.as_deref().map(with_scheme) else {
        bail!("a URL or --file is required");
    };

    let report = match mode {
        AuditMode::Single => AnyReport::Single(auditor.audit_url(&url, &options).await?),
        AuditMode::Site => {
            let progress = |message: &str| tracing::info!("{}", message);
            AnyReport::Site(
                auditor
                    .audit_site_with_progress(&url, &options, &progress)
                    .await?,
            )
        }
    };

    println!("{}", render_report(&report, cli.format)?);

    let mut passed = true;
    if cli.save {
        save_to_history(&config, &report, config_hash.as_deref())?;
    }
    if let Some(path) = &cli.save_baseline {
        Baseline::from_report(report.view()).save(path)?;
        eprintln!("Baseline saved to: {}", path.display());
    }
    if let Some(path) = &cli.baseline {
        passed &= check_baseline(report.view(), path, config.history.regression_threshold)?;
    }
    passed &= check_gates(report.view(), &config, cli.fail_under);

    Ok(passed)
}

async fn run_batch_mode(
    cli: &Cli,
    config: &Config,
    auditor: Arc<Auditor>,
    urls: Vec<String>,
    mode: AuditMode,
    concurrency: usize,
    options: AuditOptions,
) -> anyhow::Result<bool> {
    let batch = run_batch(auditor, urls, mode, concurrency, options).await;
    println!("{}", render_batch(&batch, cli.format)?);

    let mut passed = true;
    for entry in &batch.reports {
        if cli.save {
            save_to_history(config, &entry.report, None)?;
        }
        passed &= check_gates(entry.report.view(), config, cli.fail_under);
    }
    Ok(passed)
}

/// Writes command-line overrides into the `[audit]` section and revalidates
///
/// The HTTP client and the audit options are both built from the result, so
/// they always agree on the timeout.
fn apply_overrides(cli: &Cli, config: &mut Config) -> anyhow::Result<()> {
    let audit = &mut config.audit;

    if let Some(timeout) = cli.timeout {
        audit.timeout_seconds = timeout;
    }
    if let Some(max_pages) = cli.max_pages {
        audit.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        audit.delay_seconds = delay;
    }
    if let Some(bots) = &cli.bots {
        audit.bots = Some(bots.iter().map(|b| b.trim().to_string()).collect());
    }
    if let Some(scoring) = cli.scoring {
        audit.scoring_version = scoring.to_string();
    }
    if let Some(concurrency) = cli.concurrency {
        audit.concurrency = concurrency;
    }

    validate(config).context("invalid command-line option")?;
    Ok(())
}

/// Stores the report and warns when it regressed against the previous audit
fn save_to_history(config: &Config, report: &AnyReport, config_hash: Option<&str>) -> anyhow::Result<()> {
    let path = config
        .history
        .database_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH));
    let mut store = HistoryStore::open(&path)
        .with_context(|| format!("failed to open history at {}", path.display()))?;

    let view = report.view();
    let previous = store.latest(view.url(), view.scoring_version())?;
    store.save(report, config_hash)?;
    eprintln!("Saved to history: {}", path.display());

    if let Some(previous) = previous {
        let result = detect_regression(
            view,
            previous.report.view(),
            config.history.regression_threshold,
        );
        for regression in result.regressions() {
            eprintln!(
                "Regression detected: {} dropped {:.1} points ({:.1} -> {:.1})",
                regression.pillar,
                regression.delta.abs(),
                regression.previous_score,
                regression.current_score
            );
        }
    }

    Ok(())
}

fn check_baseline(report: &dyn ScoreView, path: &Path, threshold: f64) -> anyhow::Result<bool> {
    let baseline = Baseline::load(path)
        .with_context(|| format!("failed to load baseline {}", path.display()))?;
    let result = compare_baseline(report, &baseline, threshold);

    if result.passed {
        eprintln!("Baseline comparison passed: no regressions detected.");
    } else {
        eprintln!("Baseline comparison failed, regressions detected:");
        for regression in result.regressions() {
            eprintln!(
                "  {}: {:.1} -> {:.1} (delta: {:+.1})",
                regression.pillar,
                regression.previous_score,
                regression.current_score,
                regression.delta
            );
        }
    }
    Ok(result.passed)
}

/// Applies the configured policy and `--fail-under` to one report
fn check_gates(report: &dyn ScoreView, config: &Config, fail_under: Option<f64>) -> bool {
    let mut passed = true;

    if !config.policy.is_empty() {
        let result = check_thresholds(report, &config.policy);
        for failure in &result.failures {
            eprintln!(
                "FAIL {} {}: {:.1} (required {:.1})",
                report.url(),
                failure.pillar,
                failure.actual,
                failure.minimum
            );
        }
        passed &= result.passed;
    }

    if let Some(minimum) = fail_under {
        if report.overall_score() < minimum {
            eprintln!(
                "FAIL {}: overall score {:.1} is below {:.1}",
                report.url(),
                report.overall_score(),
                minimum
            );
            passed = false;
        }
    }

    passed
}

/// Reads URLs from a text or CSV file
///
/// Blank lines and `#` comments are skipped; only the first CSV column is
/// used, and a `url` header row is ignored.
fn parse_url_file(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split(',').next())
        .map(|url| url.trim().trim_matches('"').to_string())
        .filter(|url| !url.is_empty() && !url.eq_ignore_ascii_case("url"))
        .collect()
}

/// Adds `https://` to scheme-less input
fn with_scheme(url: impl AsRef<str>) -> String {
    let url = url.as_ref().trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_url_file() {
        let content = "# sites\nurl,name\nhttps://a.example,A\n\n  https://b.example  \n\"https://c.example\",C\n";
        assert_eq!(
            parse_url_file(content),
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_with_scheme() {
        assert_eq!(with_scheme("example.com"), "https://example.com");
        assert_eq!(with_scheme("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "context-lint",
            "example.com",
            "--single",
            "--bots",
            "GPTBot,ClaudeBot",
            "--scoring",
            "v3",
            "--format",
            "markdown",
        ])
        .unwrap();
        let mut config = Config::default();
        apply_overrides(&cli, &mut config).unwrap();
        let options = AuditOptions::from_config(&config.audit).unwrap();
        assert_eq!(options.scoring, ScoringVersion::V3);
        assert_eq!(options.bot_list(), vec!["GPTBot", "ClaudeBot"]);
        assert_eq!(cli.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_timeout_override_reaches_config() {
        let cli = Cli::try_parse_from(["context-lint", "example.com", "--timeout", "60"]).unwrap();
        let mut config = Config::default();
        apply_overrides(&cli, &mut config).unwrap();

        // Auditor::from_config builds the HTTP client from this value
        assert_eq!(config.audit.timeout_seconds, 60);
        let options = AuditOptions::from_config(&config.audit).unwrap();
        assert_eq!(options.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let cli = Cli::try_parse_from(["context-lint", "example.com", "--max-pages", "0"]).unwrap();
        assert!(apply_overrides(&cli, &mut Config::default()).is_err());

        let cli = Cli::try_parse_from(["context-lint", "example.com", "--delay=-1"]).unwrap();
        assert!(apply_overrides(&cli, &mut Config::default()).is_err());
    }

    #[test]
    fn test_cli_rejects_url_with_file() {
        assert!(Cli::try_parse_from(["context-lint", "example.com", "--file", "urls.txt"]).is_err());
    }
}
