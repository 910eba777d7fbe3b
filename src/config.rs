//! Run rules configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Tunable constants of the run orchestrator.
///
/// Every field has a default, so a rules file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards drawn at the start of each player turn.
    pub hand_size: usize,
    /// Energy refilled at the start of each player turn.
    pub max_energy: u32,
    /// Player turns before a fight ends in a turn limit.
    pub max_turns: u32,
    /// Focus (and max focus) at run start.
    pub initial_focus: u32,
    /// Gold at run start.
    pub initial_gold: u32,
    /// Rows in the generated map.
    pub map_rows: usize,
    /// Focus lost when a fight hits the turn limit.
    pub turn_limit_focus_penalty: u32,
    /// Percent of max focus restored by resting (rounded down).
    pub rest_heal_percent: u32,
    /// Gold price of a shop card.
    pub card_price: u32,
    /// Gold granted after a non-boss victory.
    pub reward_gold: u32,
    /// Energy spent changing seats.
    pub seat_move_cost: u32,
    /// Seat the player occupies when combat starts.
    pub starting_seat: String,
    /// Seat layout used for combat.
    pub seat_layout: String,
    /// Cards offered in shops and rewards.
    pub offer_count: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            max_energy: 3,
            max_turns: 12,
            initial_focus: 100,
            initial_gold: 50,
            map_rows: 8,
            turn_limit_focus_penalty: 20,
            rest_heal_percent: 30,
            card_price: 30,
            reward_gold: 15,
            seat_move_cost: 1,
            starting_seat: "front_center".to_string(),
            seat_layout: "standard_meeting".to_string(),
            offer_count: 3,
        }
    }
}

impl RulesConfig {
    /// Parse rules from JSON, filling missing keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Focus restored by one rest.
    #[must_use]
    pub fn rest_heal(&self, max_focus: u32) -> u32 {
        let heal = u64::from(max_focus) * u64::from(self.rest_heal_percent) / 100;
        u32::try_from(heal).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert_eq!(rules.hand_size, 5);
        assert_eq!(rules.max_energy, 3);
        assert_eq!(rules.initial_focus, 100);
        assert_eq!(rules.initial_gold, 50);
        assert_eq!(rules.map_rows, 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules = RulesConfig::from_json_str(r#"{ "max_turns": 6, "card_price": 10 }"#).unwrap();
        assert_eq!(rules.max_turns, 6);
        assert_eq!(rules.card_price, 10);
        assert_eq!(rules.hand_size, 5);
        assert_eq!(rules.starting_seat, "front_center");
    }

    #[test]
    fn test_rest_heal_rounds_down() {
        let rules = RulesConfig::default();
        assert_eq!(rules.rest_heal(100), 30);
        assert_eq!(rules.rest_heal(95), 28);
        assert_eq!(rules.rest_heal(0), 0);
    }
}
