mod analyze;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::{InputArgs, RecommendArgs};

#[derive(Debug, Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Run Vitrine text heuristics from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rate the sentiment of a text on a 1-5 scale
    Sentiment(InputArgs),
    /// Condense a text to its three most representative sentences
    Summarize(InputArgs),
    /// Recommend up to five catalog products for a description
    Recommend(RecommendArgs),
    /// Print the active product catalog
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // JSON results go to stdout; logs stay on stderr.
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Sentiment(args) => analyze::run_sentiment(&args).await?,
        Commands::Summarize(args) => analyze::run_summarize(&args).await?,
        Commands::Recommend(args) => analyze::run_recommend(&args).await?,
        Commands::Catalog => analyze::run_catalog()?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
