//! Content Match Driver
//!
//! Scores an agent table against one content record and writes the augmented
//! table as JSON or JSONL.

use clap::{Parser, Subcommand, ValueEnum};
use matcher::{
    content_attributes, default_config_toml, ConfigError, MatchScorer, MatcherConfig,
    OutputFormat, ScoreError, ScoreSummary,
};
use profile_types::Content;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod io;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "content_match")]
#[command(about = "Score an agent population against a piece of content")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score an agent table against a content record
    Score(ScoreArgs),
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(clap::Args, Debug)]
struct ScoreArgs {
    /// Agent table: JSON array of records, JSON object of columns, or JSONL
    #[arg(long)]
    agents: PathBuf,

    /// Content record as a JSON object
    #[arg(long)]
    content: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Log filter directive, overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Reject content whose attributes are out of range
    #[arg(long)]
    validate_content: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Json,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::IoError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("content failed validation: {0}")]
    InvalidContent(serde_json::Error),
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn resolve_config(args: &ScoreArgs) -> Result<MatcherConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => MatcherConfig::from_file(path)?,
        None => MatcherConfig::default(),
    };
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if args.pretty {
        config.output.pretty = true;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    Ok(config)
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept. Tests call `run_score` repeatedly in one process.
fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

fn run_score(args: &ScoreArgs) -> Result<ScoreSummary, CliError> {
    let config = resolve_config(args)?;
    if !init_logging(&config.logging.level) {
        tracing::debug!("log subscriber already installed, keeping it");
    }

    tracing::info!(
        agents = %args.agents.display(),
        content = %args.content.display(),
        "scoring agents against content"
    );

    let agents = io::load_table(&args.agents)?;
    let content = io::read_json(&args.content)?;
    let attributes = content_attributes(&content)?;
    if args.validate_content {
        let validated: Content =
            serde_json::from_value(content).map_err(CliError::InvalidContent)?;
        tracing::debug!(content = %validated, "content validated");
    }
    tracing::debug!(rows = agents.num_rows(), "agent table loaded");

    let scored = MatchScorer::new().score(&agents, &attributes);
    let summary = ScoreSummary::from_table(&scored);
    if config.output.include_summary {
        tracing::info!("{}", summary);
    }

    io::write_output(
        args.output.as_deref(),
        &scored,
        config.output.format,
        config.output.pretty,
    )?;
    Ok(summary)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match &args.command {
        Command::Score(score_args) => run_score(score_args).map(|_| ()),
        Command::DefaultConfig => {
            print!("{}", default_config_toml());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn score_args(argv: &[&str]) -> ScoreArgs {
        let mut full = vec!["content_match", "score"];
        full.extend_from_slice(argv);
        match Args::try_parse_from(full).unwrap().command {
            Command::Score(args) => args,
            other => panic!("expected score command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_score_args() {
        let args = score_args(&[
            "--agents",
            "agents.jsonl",
            "--content",
            "content.json",
            "--format",
            "jsonl",
            "--pretty",
        ]);
        assert_eq!(args.agents, PathBuf::from("agents.jsonl"));
        assert_eq!(args.format, Some(FormatArg::Jsonl));
        assert!(args.pretty);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_second_logging_init_keeps_first() {
        init_logging("warn");
        assert!(!init_logging("debug"));
    }

    #[test]
    fn test_agents_and_content_required() {
        assert!(Args::try_parse_from(["content_match", "score", "--agents", "a.json"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("matcher.toml");
        fs::write(&config_path, "[output]\nformat = \"json\"\n[logging]\nlevel = \"warn\"\n").unwrap();

        let args = score_args(&[
            "--agents",
            "a.json",
            "--content",
            "c.json",
            "--config",
            config_path.to_str().unwrap(),
            "--format",
            "jsonl",
            "--log-level",
            "debug",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.output.format, OutputFormat::Jsonl);
        assert_eq!(config.logging.level, "debug");
        assert!(config.output.include_summary);
    }

    #[test]
    fn test_run_score_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let agents = dir.path().join("agents.jsonl");
        let content = dir.path().join("content.json");
        let output = dir.path().join("scored.jsonl");
        fs::write(
            &agents,
            "{\"agent_id\": \"a1\", \"tiered_income\": 3, \"ethics\": 0.4, \"politics\": 1, \
             \"cultural\": \"western\", \"age\": 30, \"sex\": 0}\n\
             {\"agent_id\": \"a2\"}\n",
        )
        .unwrap();
        fs::write(
            &content,
            "{\"tiered_income\": 3, \"ethics\": 0.6, \"politics\": 1, \"cultural\": \"western\", \
             \"age\": 40, \"sex\": 1}",
        )
        .unwrap();

        let args = score_args(&[
            "--agents",
            agents.to_str().unwrap(),
            "--content",
            content.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--format",
            "jsonl",
            "--validate-content",
        ]);
        let summary = run_score(&args).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.scored_rows, 1);

        let written = fs::read_to_string(&output).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["agent_id"], "a1");
        let keys: Vec<&String> = lines[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("agent_id"));
        assert_eq!(keys.last().map(|k| k.as_str()), Some("base_score"));
        let base = lines[0]["base_score"].as_f64().unwrap();
        assert!((base + 0.866_666_666_7).abs() < 1e-6, "{}", base);
        assert!(lines[1]["base_score"].is_null());
    }

    #[test]
    fn test_validate_content_rejects_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let agents = dir.path().join("agents.json");
        let content = dir.path().join("content.json");
        fs::write(&agents, "[{\"age\": 30}]").unwrap();
        fs::write(&content, "{\"sex\": 2}").unwrap();

        let args = score_args(&[
            "--agents",
            agents.to_str().unwrap(),
            "--content",
            content.to_str().unwrap(),
            "--validate-content",
        ]);
        let err = run_score(&args).unwrap_err();
        assert!(matches!(err, CliError::InvalidContent(_)));
        assert!(err.to_string().contains("sex"), "{}", err);
    }

    #[test]
    fn test_non_object_content_is_structural_error() {
        let dir = tempfile::tempdir().unwrap();
        let agents = dir.path().join("agents.json");
        let content = dir.path().join("content.json");
        fs::write(&agents, "[{\"age\": 30}]").unwrap();
        fs::write(&content, "[1, 2]").unwrap();

        let args = score_args(&[
            "--agents",
            agents.to_str().unwrap(),
            "--content",
            content.to_str().unwrap(),
        ]);
        let err = run_score(&args).unwrap_err();
        assert!(matches!(err, CliError::Score(ScoreError::InvalidContent("array"))));
    }
}
