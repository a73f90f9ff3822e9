//! Command handlers for the text heuristics.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use vitrine_heuristics::{recommend_with, Analysis, AnalysisSource, Engine};

/// Where the input text comes from and which backend to use.
#[derive(Debug, Args)]
pub(crate) struct InputArgs {
    /// Text to analyze; read from stdin when neither TEXT nor --file is given
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Try the remote AI service from VITRINE_REMOTE_AI_URL before the local heuristics
    #[arg(long)]
    pub remote: bool,
}

#[derive(Debug, Args)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Seed the local recommender for reproducible output
    #[arg(long, conflicts_with = "remote")]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SentimentOutput {
    rating: u8,
    confidence: f64,
    source: AnalysisSource,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    summary: String,
    source: AnalysisSource,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    recommendations: Vec<String>,
    source: AnalysisSource,
}

/// Score the sentiment of the input text.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the engine cannot be built.
pub(crate) async fn run_sentiment(args: &InputArgs) -> anyhow::Result<Value> {
    let text = read_input(args, std::io::stdin())?;
    let engine = build_engine(args.remote)?;
    let analysis = engine.sentiment(&text).await;
    Ok(serde_json::to_value(SentimentOutput {
        rating: analysis.value.rating,
        confidence: analysis.value.confidence,
        source: analysis.source,
    })?)
}

/// Summarize the input text.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the engine cannot be built.
pub(crate) async fn run_summarize(args: &InputArgs) -> anyhow::Result<Value> {
    let text = read_input(args, std::io::stdin())?;
    let engine = build_engine(args.remote)?;
    let analysis = engine.summary(&text).await;
    Ok(serde_json::to_value(SummaryOutput {
        summary: analysis.value,
        source: analysis.source,
    })?)
}

/// Recommend products for the input description.
///
/// With `--seed` the local recommender runs on a seeded generator and the
/// remote service is never consulted.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the engine cannot be built.
pub(crate) async fn run_recommend(args: &RecommendArgs) -> anyhow::Result<Value> {
    let description = read_input(&args.input, std::io::stdin())?;
    let engine = build_engine(args.input.remote)?;

    let analysis = match args.seed {
        Some(seed) => Analysis {
            value: recommend_with(
                engine.catalog(),
                &description,
                &mut StdRng::seed_from_u64(seed),
            ),
            source: AnalysisSource::Local,
        },
        None => engine.recommendations(&description).await,
    };

    Ok(serde_json::to_value(RecommendOutput {
        recommendations: analysis.value,
        source: analysis.source,
    })?)
}

/// Print the active catalog (built-in, or the file at `VITRINE_CATALOG_PATH`).
///
/// # Errors
///
/// Returns an error if the configured catalog file is unreadable or invalid.
pub(crate) fn run_catalog() -> anyhow::Result<Value> {
    let engine = build_engine(false)?;
    Ok(serde_json::to_value(engine.catalog())?)
}

fn build_engine(remote: bool) -> anyhow::Result<Engine> {
    tracing::debug!(remote, "building heuristics engine");
    let mut config = vitrine_core::load_app_config()?;

    if remote {
        if config.remote_ai_url.is_none() {
            anyhow::bail!("--remote requires VITRINE_REMOTE_AI_URL to be set");
        }
    } else {
        config.remote_ai_url = None;
    }

    Engine::from_config(&config).context("failed to initialise heuristics engine")
}

fn read_input<R: Read>(args: &InputArgs, mut stdin: R) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file '{}'", path.display()));
    }

    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("failed to read text from stdin")?;
    Ok(buf)
}
