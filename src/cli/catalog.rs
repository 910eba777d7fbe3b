//! Catalog command implementation.

use super::output::format_catalog_text;
use super::{CliError, OutputFormat, Sources};

/// Execute the catalog command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn execute(sources: &Sources, format: OutputFormat) -> Result<(), CliError> {
    let content = sources.content();
    match format {
        OutputFormat::Text => print!("{}", format_catalog_text(content)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(content.defs())?),
    }
    Ok(())
}
