//! CLI command implementations for Boardroom.

pub(crate) mod batch;
pub(crate) mod catalog;
pub(crate) mod replay;
pub(crate) mod run;

mod output;

use boardroom::{Content, RulesConfig};
use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Output format for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Content catalog and rules selected on the command line.
#[derive(Debug)]
pub(crate) struct Sources {
    custom_content: Option<Content>,
    pub(crate) rules: RulesConfig,
}

impl Sources {
    /// Load the optional content and rules files.
    pub(crate) fn load(content: Option<&Path>, rules: Option<&Path>) -> Result<Self, CliError> {
        let custom_content = content.map(Content::from_json_file).transpose()?;
        let rules = rules
            .map(RulesConfig::from_json_file)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            custom_content,
            rules,
        })
    }

    /// The catalog in use: the loaded file, or the builtin one.
    pub(crate) fn content(&self) -> &Content {
        match &self.custom_content {
            Some(content) => content,
            None => Content::builtin(),
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<boardroom::ContentError> for CliError {
    fn from(e: boardroom::ContentError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<boardroom::ActionError> for CliError {
    fn from(e: boardroom::ActionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<boardroom::ReplayError> for CliError {
    fn from(e: boardroom::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Pick a seed from the clock when none was given.
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_default_to_builtin() {
        let sources = Sources::load(None, None).unwrap();
        assert!(std::ptr::eq(sources.content(), Content::builtin()));
        assert_eq!(sources.rules, RulesConfig::default());
    }

    #[test]
    fn test_sources_prefer_loaded_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        let mut defs = Content::builtin().defs().clone();
        defs.cards[0].name = "Renamed".to_string();
        std::fs::write(&path, serde_json::to_string(&defs).unwrap()).unwrap();

        let sources = Sources::load(Some(&path), None).unwrap();
        assert!(!std::ptr::eq(sources.content(), Content::builtin()));
        assert_eq!(sources.content().cards()[0].name, "Renamed");
    }
}
