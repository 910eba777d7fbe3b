//! Error types for the roguelike engine.
//!
//! Player actions never panic and never partially apply: a rejected action
//! returns an [`ActionError`] and leaves the authoritative state untouched.

use thiserror::Error;

use crate::game::RunPhase;

/// Reason an orchestrator action was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No run is in progress.
    #[error("no active run")]
    NoActiveRun,
    /// The action is not legal in the current phase.
    #[error("action not allowed in {0:?} phase")]
    WrongPhase(RunPhase),
    /// The run is in combat phase but holds no combat state.
    #[error("no active combat")]
    NoCombat,
    /// Unknown class identifier.
    #[error("unknown class: {0}")]
    UnknownClass(String),
    /// Unknown card identifier.
    #[error("unknown card: {0}")]
    UnknownCard(String),
    /// Unknown map node identifier.
    #[error("unknown map node: {0}")]
    UnknownNode(String),
    /// Unknown enemy identifier (either a definition or an encounter id).
    #[error("unknown enemy: {0}")]
    UnknownEnemy(String),
    /// Unknown seat identifier in the active layout.
    #[error("unknown seat: {0}")]
    UnknownSeat(String),
    /// The node exists but is not reachable from the current position.
    #[error("node {0} is not selectable")]
    NodeNotSelectable(String),
    /// The card is not in the player's hand.
    #[error("card {0} is not in hand")]
    CardNotInHand(String),
    /// The card is not among the current shop or reward offers.
    #[error("card {0} is not on offer")]
    CardNotOffered(String),
    /// Not enough energy to pay for the action.
    #[error("insufficient energy: need {needed}, have {available}")]
    InsufficientEnergy {
        /// Energy required.
        needed: u32,
        /// Energy available.
        available: u32,
    },
    /// Not enough gold to pay for the purchase.
    #[error("insufficient gold: need {needed}, have {available}")]
    InsufficientGold {
        /// Gold required.
        needed: u32,
        /// Gold available.
        available: u32,
    },
    /// The player already occupies the requested seat.
    #[error("already seated at {0}")]
    SameSeat(String),
    /// Map generation failed while starting a run.
    #[error(transparent)]
    MapGen(#[from] MapGenError),
}

/// Error type for map generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapGenError {
    /// A map needs at least one row.
    #[error("map needs at least one row")]
    NoRows,
    /// The combat enemy pool is empty.
    #[error("combat enemy pool is empty")]
    EmptyEnemyPool,
}

/// Error type for loading content and rules files.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for the expected schema.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Two definitions share an identifier.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Kind of definition (card, enemy, ...).
        kind: &'static str,
        /// The repeated identifier.
        id: String,
    },
    /// A definition refers to an identifier that does not exist.
    #[error("{owner} references unknown {kind} {id}")]
    DanglingReference {
        /// Definition holding the reference.
        owner: String,
        /// Kind of the missing definition.
        kind: &'static str,
        /// The missing identifier.
        id: String,
    },
    /// A definition violates a content rule.
    #[error("invalid {kind} {id}: {reason}")]
    Invalid {
        /// Kind of definition.
        kind: &'static str,
        /// Definition identifier.
        id: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Error type for saving, loading and re-executing recordings.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing the recording file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path of the recording.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The recording is not valid JSON.
    #[error("invalid recording: {0}")]
    Json(#[from] serde_json::Error),
    /// A recorded action was rejected on re-execution.
    #[error("step {step} rejected: {source}")]
    Rejected {
        /// Zero-based index of the action.
        step: usize,
        /// Why the engine rejected it.
        #[source]
        source: ActionError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_display() {
        let err = ActionError::InsufficientEnergy {
            needed: 2,
            available: 1,
        };
        assert_eq!(err.to_string(), "insufficient energy: need 2, have 1");
        assert_eq!(
            ActionError::WrongPhase(RunPhase::Shop).to_string(),
            "action not allowed in Shop phase"
        );
    }

    #[test]
    fn test_map_gen_error_converts() {
        let err: ActionError = MapGenError::NoRows.into();
        assert_eq!(err, ActionError::MapGen(MapGenError::NoRows));
        assert_eq!(err.to_string(), "map needs at least one row");
    }
}
