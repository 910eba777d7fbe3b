//! Run recording and replay.
//!
//! Because runs are 100% deterministic, a replay requires only:
//! - `seed: u64` - The RNG seed of the orchestrator
//! - `rules: RulesConfig` - The rules the run was played under
//! - `actions: Vec<Action>` - Every player action, in order
//!
//! No state deltas needed. To view step N, re-run the actions from step 0 to N
//! against the same content.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RulesConfig;
use crate::content::Content;
use crate::error::{ActionError, ReplayError};
use crate::game::Roguelike;

/// One player action against the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Start a run with a class.
    StartRun {
        /// Class identifier.
        class_id: String,
    },
    /// Enter a map node.
    SelectNode {
        /// Node identifier.
        node_id: String,
    },
    /// Play a card from hand.
    PlayCard {
        /// Card identifier.
        card_id: String,
        /// Encounter id of the target enemy.
        target_enemy_id: String,
    },
    /// End the player's turn.
    EndPlayerTurn,
    /// Change seats.
    MoveSeat {
        /// Seat identifier.
        seat_id: String,
    },
    /// Rest at a rest node.
    RestHeal,
    /// Buy an offered card.
    BuyCard {
        /// Card identifier.
        card_id: String,
    },
    /// Leave the shop without buying.
    LeaveShop,
    /// Take an offered reward card.
    PickRewardCard {
        /// Card identifier.
        card_id: String,
    },
    /// Take only the reward gold.
    SkipReward,
    /// Drop the run.
    AbandonRun,
}

impl<R: Rng> Roguelike<'_, R> {
    /// Dispatch an [`Action`] to its entry point.
    ///
    /// # Errors
    ///
    /// Returns the entry point's rejection, if any.
    pub fn apply(&mut self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::StartRun { class_id } => self.start_run(class_id),
            Action::SelectNode { node_id } => self.select_node(node_id),
            Action::PlayCard {
                card_id,
                target_enemy_id,
            } => self.play_card(card_id, target_enemy_id),
            Action::EndPlayerTurn => self.end_player_turn(),
            Action::MoveSeat { seat_id } => self.move_seat(seat_id),
            Action::RestHeal => self.rest_heal(),
            Action::BuyCard { card_id } => self.buy_card(card_id),
            Action::LeaveShop => self.leave_shop(),
            Action::PickRewardCard { card_id } => self.pick_reward_card(card_id),
            Action::SkipReward => self.skip_reward(),
            Action::AbandonRun => {
                self.abandon_run();
                Ok(())
            }
        }
    }
}

/// Minimal recording - just seed, rules, and actions.
///
/// Because the engine is deterministic, this is all we need to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Orchestrator RNG seed.
    pub seed: u64,
    /// Rules the run was played under.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Accepted actions, in order.
    pub actions: Vec<Action>,
}

impl Recording {
    /// Create an empty recording.
    #[must_use]
    pub fn new(seed: u64, rules: RulesConfig) -> Self {
        Self {
            seed,
            rules,
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Save the recording as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load a recording saved with [`Recording::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Re-execute the first `steps` actions of a recording.
///
/// # Errors
///
/// Returns [`ReplayError::Rejected`] if any replayed action is rejected,
/// which means the recording does not match the content it is replayed
/// against.
pub fn replay_steps<'c>(
    content: &'c Content,
    recording: &Recording,
    steps: usize,
) -> Result<Roguelike<'c>, ReplayError> {
    let mut game = Roguelike::seeded(content, recording.rules.clone(), recording.seed);
    for (step, action) in recording.actions.iter().take(steps).enumerate() {
        game.apply(action)
            .map_err(|source| ReplayError::Rejected { step, source })?;
    }
    debug!(
        seed = recording.seed,
        steps = steps.min(recording.actions.len()),
        phase = ?game.phase(),
        "recording replayed"
    );
    Ok(game)
}

/// Re-execute a whole recording.
///
/// # Errors
///
/// See [`replay_steps`].
pub fn replay<'c>(content: &'c Content, recording: &Recording) -> Result<Roguelike<'c>, ReplayError> {
    replay_steps(content, recording, recording.actions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RunPhase;

    fn recording() -> Recording {
        let mut rec = Recording::new(7, RulesConfig::default());
        rec.push(Action::StartRun {
            class_id: "pm".to_string(),
        });
        rec.push(Action::SelectNode {
            node_id: "node-0-1".to_string(),
        });
        rec.push(Action::EndPlayerTurn);
        rec
    }

    #[test]
    fn test_action_json_shape() {
        let json = serde_json::to_string(&Action::PlayCard {
            card_id: "strike".to_string(),
            target_enemy_id: "enemy-0".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"action":"play_card","card_id":"strike","target_enemy_id":"enemy-0"}"#
        );
        assert_eq!(
            serde_json::to_string(&Action::EndPlayerTurn).unwrap(),
            r#"{"action":"end_player_turn"}"#
        );
    }

    #[test]
    fn test_replay_matches_live_run() {
        let rec = recording();
        let mut live = Roguelike::seeded(Content::builtin(), RulesConfig::default(), 7);
        for action in &rec.actions {
            live.apply(action).unwrap();
        }
        let replayed = replay(Content::builtin(), &rec).unwrap();
        assert_eq!(replayed.session(), live.session());
    }

    #[test]
    fn test_replay_prefix() {
        let game = replay_steps(Content::builtin(), &recording(), 1).unwrap();
        assert_eq!(game.phase(), RunPhase::Map);
        let game = replay_steps(Content::builtin(), &recording(), 2).unwrap();
        assert_eq!(game.phase(), RunPhase::Combat);
    }

    #[test]
    fn test_rejected_step_reported() {
        let mut rec = recording();
        rec.push(Action::RestHeal);
        let err = replay(Content::builtin(), &rec).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Rejected {
                step: 3,
                source: ActionError::WrongPhase(_)
            }
        ));
    }

    #[test]
    fn test_apply_abandon() {
        let mut game = replay(Content::builtin(), &recording()).unwrap();
        game.apply(&Action::AbandonRun).unwrap();
        assert!(game.session().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let rec = recording();
        rec.save(&path).unwrap();
        assert_eq!(Recording::load(&path).unwrap(), rec);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Recording::load(Path::new("/nonexistent/run.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }
}
