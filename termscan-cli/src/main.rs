//! termscan CLI - flags risky clauses in Terms & Conditions documents

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
// - Diagnostics go to stderr, results to stdout

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};
use termscan_core::chat::ClauseChat;
use termscan_core::config::{self, ResolvedConfig};
use termscan_core::html::render_html;
use termscan_core::{
    analyze, build_report, fetch_document, render_json, render_text, ClauseFilter, RiskTier,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "termscan")]
#[command(about = "Flag risky clauses in Terms & Conditions documents")]
#[command(version = env!("TERMSCAN_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every clause of a document and print a report
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Show only clauses of this tier
        #[arg(long)]
        risk: Option<RiskTier>,

        /// Show only clauses at or above this tier (overrides config file)
        #[arg(long)]
        min_risk: Option<RiskTier>,

        /// Output file path (for HTML format, default: tnc_analysis_report.html)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Ask questions about one clause
    Chat {
        /// Clause id as shown by `analyze`
        id: usize,

        #[command(flatten)]
        input: InputArgs,

        /// Question to ask (repeatable); reads questions from stdin when omitted
        #[arg(long)]
        ask: Vec<String>,
    },
    /// Validate or show the configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Text file to analyze ("-" or omitted reads stdin)
    path: Option<PathBuf>,

    /// Fetch and analyze a web page instead of a file
    #[arg(long, conflicts_with = "path")]
    url: Option<String>,

    /// Path to config file (default: auto-discover)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running analysis
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("termscan=warn,termscan_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            risk,
            min_risk,
            output,
        } => {
            let resolved_config = load_config(input.config.as_deref())?;
            let text = read_input(&input, &resolved_config)?;
            let result = analyze(&text);
            debug!(clauses = result.len(), "analysis complete");

            // CLI flags override config file values
            let filter = ClauseFilter {
                tier: risk,
                min_risk: min_risk.or(resolved_config.min_risk),
            };
            let report = build_report(&result).filtered(&filter);

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&report));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&report));
                }
                OutputFormat::Html => {
                    let path = output.unwrap_or_else(|| resolved_config.report_output.clone());
                    write_html_report(&path, &render_html(&report))?;
                    println!("HTML report written to {}", path.display());
                }
            }
        }
        Commands::Chat { id, input, ask } => {
            check_chat_input(&input, &ask)?;
            let resolved_config = load_config(input.config.as_deref())?;
            let text = read_input(&input, &resolved_config)?;
            let result = analyze(&text);
            let clause = result.clause(id).with_context(|| {
                format!(
                    "clause {} not found ({} clauses analyzed)",
                    id,
                    result.len()
                )
            })?;

            println!("Clause: {}", clause.text.trim());
            println!("Risk Level: {}", clause.risk);
            println!("Why It Matters: {}", clause.impact);
            println!();

            let chat = ClauseChat::new(&clause.text);
            println!("{}", chat.opening_line());

            if ask.is_empty() {
                for line in std::io::stdin().lock().lines() {
                    let question = line.context("failed to read question from stdin")?;
                    if let Some(reply) = chat.reply(&question) {
                        println!("{}", reply);
                    }
                }
            } else {
                for question in &ask {
                    if let Some(reply) = chat.reply(question) {
                        println!("> {}", question);
                        println!("{}", reply);
                    }
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let cwd = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&cwd, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let resolved = load_config(path.as_deref())?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Fetch:");
                println!("  timeout_secs: {}", resolved.fetch.timeout.as_secs());
                println!("  user_agent: {}", resolved.fetch.user_agent);
                println!();
                println!("Filters:");
                println!(
                    "  min_risk: {}",
                    resolved
                        .min_risk
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                println!();
                println!("Report:");
                println!("  report_output: {}", resolved.report_output.display());
            }
        },
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let cwd = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&cwd, config_path)
        .context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        info!(path = %path.display(), "using config");
    }
    Ok(resolved)
}

fn reads_stdin(input: &InputArgs) -> bool {
    input.url.is_none() && !matches!(&input.path, Some(path) if path.as_os_str() != "-")
}

/// stdin can carry the document or the questions, not both
fn check_chat_input(input: &InputArgs, ask: &[String]) -> anyhow::Result<()> {
    if ask.is_empty() && reads_stdin(input) {
        anyhow::bail!(
            "questions must be passed with --ask when the document is read from stdin"
        );
    }
    Ok(())
}

/// Read document text from a URL, a file, or stdin
fn read_input(input: &InputArgs, config: &ResolvedConfig) -> anyhow::Result<String> {
    if let Some(url) = &input.url {
        // Fetched pages are filtered before analysis; typed text is not
        let text = fetch_document(url, &config.fetch)?;
        debug!(chars = text.chars().count(), "extracted text");
        return Ok(text);
    }

    match &input.path {
        Some(path) if !reads_stdin(input) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Write HTML report to file with atomic write pattern
fn write_html_report(path: &Path, html: &str) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directories if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Atomic write (temp + rename pattern)
    let temp_path = path.with_extension("html.tmp");
    fs::write(&temp_path, html)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
