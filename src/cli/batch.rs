//! Batch command implementation.

use super::output::{BatchStats, JsonBatchResult, format_batch_text};
use super::{CliError, OutputFormat, Sources, seed_or_clock};
use boardroom::autoplay::simulate_run;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the class is unknown or output fails.
pub(crate) fn execute(
    sources: &Sources,
    class: &str,
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let content = sources.content();
    if content.class(class).is_none() {
        return Err(CliError::new(format!("Unknown class: {class}")));
    }

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_clock(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates into its own BatchStats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            let run_seed = base_seed.wrapping_add(i);
            match simulate_run(run_seed, class, content, &sources.rules) {
                Ok((summary, _)) => local.add_result(&summary),
                Err(e) => {
                    tracing::warn!(seed = run_seed, error = %e, "run failed");
                    local.add_error();
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed().as_secs_f64();
    let runs_per_sec = if duration > 0.0 {
        stats.runs as f64 / duration
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            print!("{}", format_batch_text(&stats, class));
            println!();
            println!("Duration: {duration:.2}s ({runs_per_sec:.0} runs/sec)");
        }
        OutputFormat::Json => {
            let result = JsonBatchResult::from_stats(&stats, class, duration);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
