//! `collect` command: runs the pipeline once and reports the result.
//!
//! Per-entity and per-review failures are skipped inside the pipeline and
//! only show up as counts in the summary. The command fails only when the
//! first search page fails or the CSV cannot be written.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use placerev_core::{AppConfig, Location};
use placerev_pipeline::{cancel_pair, write_csv_file, Pipeline, PipelineSettings, RunOutcome};
use placerev_places::{PlacesClient, SearchQuery, TokioClock};
use placerev_sentiment::LexiconClassifier;

const QUERY_PREFIX: &str = "FP Grado Superior ASIR";

/// Everything `collect` needs once flags and config are resolved.
#[derive(Debug)]
pub(crate) struct CollectRequest {
    pub query: SearchQuery,
    pub max_reviews: usize,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Resolves the search query from flags, falling back to config defaults.
///
/// Without `--query` the text is built from the region name.
pub(crate) fn build_search_query(
    config: &AppConfig,
    region: &str,
    query: Option<&str>,
    location: Option<Location>,
    radius: Option<u32>,
    max_results: Option<usize>,
) -> SearchQuery {
    let text = match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_owned(),
        _ => format!("{QUERY_PREFIX} {}", region.trim()),
    };
    SearchQuery {
        text,
        location,
        radius_m: radius.unwrap_or(config.search_radius_m),
        max_results: max_results.unwrap_or(config.max_results),
    }
}

pub(crate) fn print_dry_run(request: &CollectRequest) {
    let query = &request.query;
    let location = query.location.map_or_else(
        || "none".to_owned(),
        |l| format!("{l} (radius {} m)", query.radius_m),
    );
    println!("dry-run: would search \"{}\"", query.text);
    println!("  location:     {location}");
    println!("  max results:  {}", query.max_results);
    println!("  max reviews:  {}", request.max_reviews);
    match &request.output {
        Some(path) => println!("  csv output:   {}", path.display()),
        None => println!("  csv output:   (none)"),
    }
}

/// Runs one collection and prints the summary (or JSON report).
///
/// Ctrl-C cancels the run cooperatively; whatever was collected before the
/// signal is still reported and exported.
///
/// # Errors
///
/// Returns an error if the directory client cannot be built, the first
/// search page fails, or the CSV export cannot be written.
pub(crate) async fn run_collect(
    config: &AppConfig,
    request: CollectRequest,
) -> anyhow::Result<()> {
    let client = PlacesClient::from_app_config(config)
        .context("failed to build places directory client")?;
    let settings = PipelineSettings {
        max_reviews: request.max_reviews,
        ..PipelineSettings::from_app_config(config)
    };
    let pipeline = Pipeline::new(client, TokioClock, LexiconClassifier, settings);

    let (handle, signal) = cancel_pair();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("received ctrl-c, finishing in-flight requests and stopping");
            handle.cancel();
        }
    });

    let result = pipeline.run(&request.query, &signal).await;
    watcher.abort();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => anyhow::bail!("review collection failed ({}): {e}", e.kind()),
    };

    if let Some(path) = &request.output {
        write_csv_file(outcome.records(), path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
    }

    if request.json {
        let body = serde_json::json!({
            "report": outcome.report(),
            "diagnostics": outcome.diagnostics(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", format_summary(&outcome));
    }

    Ok(())
}

/// Human-readable run summary.
pub(crate) fn format_summary(outcome: &RunOutcome) -> String {
    let diagnostics = outcome.diagnostics();
    let mut out = String::new();

    let Some(report) = outcome.report() else {
        let _ = writeln!(
            out,
            "no reviews collected ({} entities found, {} skipped)",
            diagnostics.entities_discovered,
            diagnostics.skipped_entities()
        );
        if diagnostics.cancelled {
            let _ = writeln!(out, "run was cancelled");
        }
        return out;
    };

    let _ = writeln!(
        out,
        "collected {} reviews from {} entities",
        outcome.records().len(),
        report.average_rating_by_entity.len()
    );
    if let Some(top) = &report.top_rated_entity {
        let _ = writeln!(out, "top rated:     {} ({:.2})", top.name, top.average_rating);
    }
    match &report.most_positive_entity {
        Some(most) => {
            let _ = writeln!(out, "most positive: {} ({} positive)", most.name, most.count);
        }
        None => {
            let _ = writeln!(out, "most positive: none");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<40} {:>7} {:>4} {:>4} {:>4}", "entity", "avg", "pos", "neu", "neg");
    for (name, avg) in &report.average_rating_by_entity {
        let counts = report
            .sentiment_counts_by_entity
            .get(name)
            .copied()
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{name:<40} {avg:>7.2} {:>4} {:>4} {:>4}",
            counts.positive, counts.neutral, counts.negative
        );
    }

    let skipped_entities = diagnostics.skipped_entities();
    let skipped_reviews = diagnostics.skipped_reviews();
    if skipped_entities > 0 || skipped_reviews > 0 || diagnostics.search_truncated() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "skipped: {skipped_entities} entities, {skipped_reviews} reviews"
        );
        if diagnostics.search_truncated() {
            let _ = writeln!(out, "search stopped early after a failed page");
        }
    }
    if diagnostics.cancelled {
        let _ = writeln!(out, "run was cancelled, results are partial");
    }

    out
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
