//! OpenSource Scout CLI
//!
//! Ranks good-first-issue candidates for a contributor and evaluates the
//! ranking offline.

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};

use scout_core::{
    init_tracing, FeatureEngineer, LanguageEntry, LanguageProfile, LogFormat, RawIssue,
};
use scout_eval::{write_cv_results_json, CvResultsArtifact, Evaluator};
use scout_kdd::{compare_pipelines, validate_pipeline, KddPipeline, PipelineRun};

use crate::config::ScoutConfig;

#[derive(Parser)]
#[command(name = "scout")]
#[command(author = "OpenSource Scout contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Good-first-issue recommendations from your language profile", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank issues for a language profile
    Recommend {
        #[command(flatten)]
        input: InputArgs,

        /// Override pipeline.top_n
        #[arg(long)]
        top_n: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print engineered-feature statistics for an issue batch
    Features {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Cross-validate the pipeline over an issue batch
    Evaluate {
        #[command(flatten)]
        input: InputArgs,

        /// Override evaluation.n_folds
        #[arg(long)]
        folds: Option<usize>,

        /// Override evaluation.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write the JSON results artifact here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// A/B test two pipeline configurations on one split
    AbTest {
        #[command(flatten)]
        input: InputArgs,

        /// Configuration for model A
        #[arg(long)]
        config_a: PathBuf,

        /// Configuration for model B
        #[arg(long)]
        config_b: PathBuf,

        /// Override evaluation.test_fraction
        #[arg(long)]
        test_fraction: Option<f64>,

        /// Override evaluation.seed
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Inputs shared by every command.
#[derive(clap::Args, Debug, Clone)]
struct InputArgs {
    /// JSON array of issues
    #[arg(long)]
    issues: PathBuf,

    /// Language with repository count, e.g. `Rust:12` (repeatable)
    #[arg(short, long = "language", value_parser = parse_language)]
    languages: Vec<(String, u32)>,

    /// JSON profile of `[name, count]` pairs, read before any --language
    #[arg(long)]
    profile: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "SCOUT_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(LogFormat::from_json_flag(cli.json), level);

    let output = match cli.command {
        Commands::Recommend {
            input,
            top_n,
            format,
        } => cmd_recommend(&input, top_n, format)?,
        Commands::Features { input, format } => cmd_features(&input, format)?,
        Commands::Evaluate {
            input,
            folds,
            seed,
            output,
        } => cmd_evaluate(&input, folds, seed, output.as_deref())?,
        Commands::AbTest {
            input,
            config_a,
            config_b,
            test_fraction,
            seed,
            format,
        } => cmd_ab_test(&input, &config_a, &config_b, test_fraction, seed, format)?,
    };

    print!("{output}");
    Ok(())
}

/// Parse `Name:Count`. The count is split at the last colon.
fn parse_language(value: &str) -> std::result::Result<(String, u32), String> {
    let (name, count) = value
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:COUNT, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing language name in '{value}'"));
    }
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid repository count in '{value}': {e}"))?;
    Ok((name.to_string(), count))
}

fn load_issues(path: &Path) -> Result<Vec<RawIssue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read issues from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse issues in {}", path.display()))
}

fn load_profile(input: &InputArgs) -> Result<LanguageProfile> {
    let mut entries = match &input.profile {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read profile from {}", path.display()))?;
            serde_json::from_str::<LanguageProfile>(&content)
                .with_context(|| format!("failed to parse profile in {}", path.display()))?
                .entries()
                .to_vec()
        }
        None => Vec::new(),
    };
    entries.extend(input.languages.iter().cloned().map(LanguageEntry::from));

    if entries.is_empty() {
        bail!("no languages given; pass --language NAME:COUNT or --profile FILE");
    }
    Ok(LanguageProfile::new(entries))
}

fn load_config(path: Option<&Path>) -> Result<ScoutConfig> {
    ScoutConfig::load_or_default(path).with_context(|| match path {
        Some(p) => format!("invalid configuration in {}", p.display()),
        None => "invalid default configuration".to_string(),
    })
}

fn cmd_recommend(input: &InputArgs, top_n: Option<usize>, format: OutputFormat) -> Result<String> {
    let mut config = load_config(input.config.as_deref())?;
    if let Some(n) = top_n {
        config.pipeline = config.pipeline.with_top_n(n);
    }
    let issues = load_issues(&input.issues)?;
    let profile = load_profile(input)?;

    let pipeline = KddPipeline::new(config.pipeline).context("failed to build pipeline")?;
    let run = pipeline.run(&issues, &profile);

    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&run)?)),
        OutputFormat::Text => Ok(render_run(&run)),
    }
}

fn render_run(run: &PipelineRun) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Run {} (config {})\n\n",
        run.run_id,
        &run.config_digest[..run.config_digest.len().min(12)]
    ));

    if run.recommendations.is_empty() {
        out.push_str("No matching issues.\n");
    }
    for (i, rec) in run.recommendations.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{:.3}] {} (difficulty {}/5)\n",
            i + 1,
            rec.score,
            rec.issue.title,
            rec.difficulty
        ));
        out.push_str(&format!("    {} | {} | {}\n", rec.issue.repo, rec.issue.language, rec.issue.url));
    }

    out.push_str(&format!("\n{}\n", run.interpretation.summary));
    for insight in &run.interpretation.insights {
        out.push_str(&format!("  - {insight}\n"));
    }
    out.push_str(&format!(
        "Quality score: {}/100\n",
        run.interpretation.quality_score
    ));
    out
}

fn cmd_features(input: &InputArgs, format: OutputFormat) -> Result<String> {
    let config = load_config(input.config.as_deref())?;
    let issues = load_issues(&input.issues)?;
    let profile = load_profile(input)?;

    let mut engineer = FeatureEngineer::new(config.features);
    let (vectors, stats) = engineer.extract_features_batch(&issues, &profile);
    info!(issues = vectors.len(), features = stats.len(), "Extracted features");

    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&stats)?));
    }

    let mut out = format!("{} issues, {} features\n\n", vectors.len(), stats.len());
    out.push_str(&format!(
        "{:<32} {:>10} {:>10} {:>10} {:>10}\n",
        "feature", "min", "max", "mean", "std"
    ));
    for (name, s) in &stats {
        out.push_str(&format!(
            "{:<32} {:>10.4} {:>10.4} {:>10.4} {:>10.4}\n",
            name, s.min, s.max, s.mean, s.std
        ));
    }
    Ok(out)
}

fn cmd_evaluate(
    input: &InputArgs,
    folds: Option<usize>,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<String> {
    let config = load_config(input.config.as_deref())?;
    let mut evaluation = config.evaluation;
    if let Some(n) = folds {
        evaluation = evaluation.with_folds(n);
    }
    if let Some(s) = seed {
        evaluation = evaluation.with_seed(s);
    }
    evaluation.validate().context("invalid evaluation settings")?;

    let issues = load_issues(&input.issues)?;
    let profile = load_profile(input)?;
    let pipeline = KddPipeline::new(config.pipeline).context("failed to build pipeline")?;
    let evaluator = Evaluator::new(evaluation);

    let outcome = validate_pipeline(&pipeline, &evaluator, &issues, &profile)
        .context("cross-validation failed")?;

    if let Some(path) = output {
        let artifact = CvResultsArtifact::from_results(&outcome.cv_results);
        write_cv_results_json(path, &artifact)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        info!(path = %path.display(), "Wrote cross-validation results");
    }

    Ok(outcome.report)
}

fn cmd_ab_test(
    input: &InputArgs,
    config_a: &Path,
    config_b: &Path,
    test_fraction: Option<f64>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<String> {
    let base = load_config(input.config.as_deref())?;
    let a = load_config(Some(config_a))?;
    let b = load_config(Some(config_b))?;

    let mut evaluation = base.evaluation;
    if let Some(f) = test_fraction {
        evaluation = evaluation.with_test_fraction(f);
    }
    if let Some(s) = seed {
        evaluation = evaluation.with_seed(s);
    }
    evaluation.validate().context("invalid evaluation settings")?;

    let issues = load_issues(&input.issues)?;
    let profile = load_profile(input)?;
    let pipeline_a = KddPipeline::new(a.pipeline).context("failed to build pipeline A")?;
    let pipeline_b = KddPipeline::new(b.pipeline).context("failed to build pipeline B")?;
    let evaluator = Evaluator::new(evaluation);

    let comparison = compare_pipelines(&pipeline_a, &pipeline_b, &evaluator, &issues, &profile)
        .context("A/B test failed")?;

    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&comparison.result)?)),
        OutputFormat::Text => Ok(comparison.report),
    }
}
