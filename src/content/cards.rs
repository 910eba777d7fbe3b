//! Card definitions.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Highest cost a card may carry.
pub const MAX_CARD_COST: u32 = 3;

/// Card category, matched against seat damage bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTag {
    /// Persuasion.
    Persuade,
    /// Pressure tactics.
    Pressure,
    /// Evidence and numbers.
    Data,
    /// Easing tension.
    Ease,
}

/// One effect of a card, resolved in declaration order.
///
/// `Damage`, `Block`, `Agreement` and `Energy` are combat-state mutations
/// handled by [`crate::game::apply_card_effects`]. `Draw`, `FocusRestore` and
/// `FocusDamage` touch the deck or the run's focus and are resolved by the
/// run orchestrator after the combat mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CardEffect {
    /// Damage the targeted enemy (block first, then hp).
    Damage(u32),
    /// Gain player block.
    Block(u32),
    /// Raise the agreement counter.
    Agreement(u32),
    /// Draw cards.
    Draw(u32),
    /// Gain energy this turn.
    Energy(u32),
    /// Restore focus, capped at max focus.
    FocusRestore(u32),
    /// Lose focus.
    FocusDamage(u32),
}

/// Static card definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDef {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Energy cost, 0 to [`MAX_CARD_COST`].
    pub cost: u32,
    /// Category used for seat bonuses.
    pub tag: CardTag,
    /// Rules text.
    #[serde(default)]
    pub description: String,
    /// Effects in resolution order.
    pub effects: Vec<CardEffect>,
    /// Class restriction; `None` means any class may hold the card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl CardDef {
    /// Whether a class may be offered this card.
    #[must_use]
    pub fn available_to(&self, class_id: &str) -> bool {
        self.class.as_deref().is_none_or(|c| c == class_id)
    }

    /// Whether any effect damages the target.
    #[must_use]
    pub fn deals_damage(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, CardEffect::Damage(_)))
    }

    pub(super) fn validate(&self) -> Result<(), ContentError> {
        if self.cost > MAX_CARD_COST {
            return Err(ContentError::Invalid {
                kind: "card",
                id: self.id.clone(),
                reason: format!("cost {} exceeds {MAX_CARD_COST}", self.cost),
            });
        }
        if self.effects.is_empty() {
            return Err(ContentError::Invalid {
                kind: "card",
                id: self.id.clone(),
                reason: "card has no effects".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(cost: u32, effects: Vec<CardEffect>) -> CardDef {
        CardDef {
            id: "test".to_string(),
            name: "Test".to_string(),
            cost,
            tag: CardTag::Persuade,
            description: String::new(),
            effects,
            class: None,
        }
    }

    #[test]
    fn test_effect_json_shape() {
        let json = serde_json::to_string(&CardEffect::FocusRestore(5)).unwrap();
        assert_eq!(json, r#"{"type":"focus_restore","value":5}"#);
        let parsed: CardEffect = serde_json::from_str(r#"{"type":"damage","value":6}"#).unwrap();
        assert_eq!(parsed, CardEffect::Damage(6));
    }

    #[test]
    fn test_cost_above_three_invalid() {
        assert!(card(4, vec![CardEffect::Block(1)]).validate().is_err());
        assert!(card(3, vec![CardEffect::Block(1)]).validate().is_ok());
    }

    #[test]
    fn test_no_effects_invalid() {
        assert!(card(1, vec![]).validate().is_err());
    }

    #[test]
    fn test_class_availability() {
        let mut c = card(1, vec![CardEffect::Damage(1)]);
        assert!(c.available_to("pm"));
        c.class = Some("analyst".to_string());
        assert!(!c.available_to("pm"));
        assert!(c.available_to("analyst"));
    }
}
