mod collect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use placerev_core::Location;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placerev")]
#[command(about = "Collect, classify and aggregate place reviews")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the places directory, classify reviews and print a summary
    Collect {
        /// Region name substituted into the default search query
        #[arg(long, default_value = "Madrid")]
        region: String,

        /// Full search text; overrides the region-based query
        #[arg(long)]
        query: Option<String>,

        /// Bias results around "lat,lng"
        #[arg(long)]
        location: Option<Location>,

        /// Search radius in metres (only sent with --location)
        #[arg(long)]
        radius: Option<u32>,

        /// Maximum number of entities to collect
        #[arg(long)]
        max_results: Option<usize>,

        /// Maximum number of reviews per entity
        #[arg(long)]
        max_reviews: Option<usize>,

        /// Write the classified reviews as CSV to this path
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the aggregate report as JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Print the resolved query and limits without calling the directory
        #[arg(long)]
        dry_run: bool,
    },
}

/// A dry run never reaches the directory, so it resolves config without the key.
fn needs_api_key(command: &Commands) -> bool {
    !matches!(command, Commands::Collect { dry_run: true, .. })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("placerev: no command given, try `placerev collect --help`");
        return Ok(());
    };

    let config = if needs_api_key(&command) {
        placerev_core::load_app_config()?
    } else {
        placerev_core::load_app_config_without_key()?
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Collect {
            region,
            query,
            location,
            radius,
            max_results,
            max_reviews,
            output,
            json,
            dry_run,
        } => {
            let request = collect::CollectRequest {
                query: collect::build_search_query(
                    &config,
                    &region,
                    query.as_deref(),
                    location,
                    radius,
                    max_results,
                ),
                max_reviews: max_reviews.unwrap_or(config.max_reviews),
                output,
                json,
            };
            if dry_run {
                collect::print_dry_run(&request);
                return Ok(());
            }
            collect::run_collect(&config, request).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
