//! Run command implementation.

use super::output::format_summary_text;
use super::{CliError, OutputFormat, Sources, seed_or_clock};
use boardroom::autoplay::simulate_run;
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the run cannot be played or the recording cannot be
/// saved.
pub(crate) fn execute(
    sources: &Sources,
    class: &str,
    seed: Option<u64>,
    format: OutputFormat,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let seed = seed_or_clock(seed);
    let (summary, recording) = simulate_run(seed, class, sources.content(), &sources.rules)?;

    if let Some(path) = save {
        recording.save(&path)?;
        eprintln!("Recording saved to {}", path.display());
    }

    match format {
        OutputFormat::Text => print!("{}", format_summary_text(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
