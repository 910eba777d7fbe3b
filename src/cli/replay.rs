//! Replay command implementation.

use super::output::{format_map_text, format_session_text};
use super::{CliError, OutputFormat, Sources};
use boardroom::Recording;
use boardroom::replay::replay_steps;
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or does not replay
/// against the selected content.
pub(crate) fn execute(
    sources: &Sources,
    path: &Path,
    step: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let recording = Recording::load(path)?;
    let steps = step.unwrap_or(recording.actions.len());
    let game = replay_steps(sources.content(), &recording, steps)?;

    let Some(session) = game.session() else {
        println!("No run in progress after {steps} actions");
        return Ok(());
    };

    match format {
        OutputFormat::Text => {
            println!(
                "Replay of {} (seed: {}, step {}/{})",
                path.display(),
                recording.seed,
                steps.min(recording.actions.len()),
                recording.actions.len()
            );
            print!("{}", format_map_text(session));
            println!();
            print!("{}", format_session_text(session, sources.content()));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(session)?),
    }
    Ok(())
}
