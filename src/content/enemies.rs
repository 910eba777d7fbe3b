//! Enemy definitions and intent scripts.

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Kind of action an enemy takes on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Hit the player; absorbed by player block.
    Attack,
    /// Gain enemy block.
    Defend,
    /// Drain focus directly, ignoring block.
    Debuff,
    /// Scripted focus drain, ignoring block.
    Special,
}

/// One step of an enemy's cyclic script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// What the enemy does.
    #[serde(rename = "type")]
    pub kind: IntentKind,
    /// Magnitude of the action.
    pub value: u32,
    /// Line shown to the player when the intent is telegraphed.
    #[serde(default)]
    pub description: String,
}

/// Static enemy definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDef {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Starting and maximum hp.
    pub hp: u32,
    /// Boss flag.
    #[serde(default)]
    pub is_boss: bool,
    /// Agreement needed to win in addition to reducing hp to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement_target: Option<u32>,
    /// Intent script, executed cyclically.
    pub intents: Vec<Intent>,
}

impl EnemyDef {
    /// Agreement target, 0 when the encounter has none.
    #[must_use]
    pub fn agreement_target(&self) -> u32 {
        self.agreement_target.unwrap_or(0)
    }

    /// Intent at a cursor position, wrapping around the script.
    #[must_use]
    pub fn intent_at(&self, index: usize) -> Option<&Intent> {
        if self.intents.is_empty() {
            return None;
        }
        self.intents.get(index % self.intents.len())
    }

    pub(super) fn validate(&self) -> Result<(), ContentError> {
        let invalid = |reason: &str| ContentError::Invalid {
            kind: "enemy",
            id: self.id.clone(),
            reason: reason.to_string(),
        };
        if self.hp == 0 {
            return Err(invalid("hp must be positive"));
        }
        if self.intents.is_empty() {
            return Err(invalid("enemy has no intents"));
        }
        if self.agreement_target() > 0 && !self.is_boss {
            return Err(invalid("only bosses may carry an agreement target"));
        }
        if self.is_boss && self.agreement_target() == 0 {
            return Err(invalid("bosses need an agreement target"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(intents: Vec<Intent>) -> EnemyDef {
        EnemyDef {
            id: "e".to_string(),
            name: "E".to_string(),
            hp: 10,
            is_boss: false,
            agreement_target: None,
            intents,
        }
    }

    fn intent(kind: IntentKind, value: u32) -> Intent {
        Intent {
            kind,
            value,
            description: String::new(),
        }
    }

    #[test]
    fn test_intent_cycles() {
        let e = enemy(vec![intent(IntentKind::Attack, 6), intent(IntentKind::Defend, 4)]);
        assert_eq!(e.intent_at(0).unwrap().kind, IntentKind::Attack);
        assert_eq!(e.intent_at(1).unwrap().kind, IntentKind::Defend);
        assert_eq!(e.intent_at(2).unwrap().kind, IntentKind::Attack);
        assert_eq!(e.intent_at(7).unwrap().value, 4);
    }

    #[test]
    fn test_empty_script_has_no_intent() {
        let e = enemy(vec![]);
        assert!(e.intent_at(0).is_none());
        assert!(e.validate().is_err());
    }

    #[test]
    fn test_agreement_target_requires_boss() {
        let mut e = enemy(vec![intent(IntentKind::Attack, 1)]);
        e.agreement_target = Some(10);
        assert!(e.validate().is_err());
        e.is_boss = true;
        assert!(e.validate().is_ok());
        assert_eq!(e.agreement_target(), 10);
    }

    #[test]
    fn test_boss_requires_agreement_target() {
        let mut e = enemy(vec![intent(IntentKind::Attack, 1)]);
        e.is_boss = true;
        assert!(matches!(e.validate(), Err(ContentError::Invalid { .. })));
        e.agreement_target = Some(0);
        assert!(e.validate().is_err());
        e.agreement_target = Some(60);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_intent_json_uses_type_key() {
        let parsed: Intent =
            serde_json::from_str(r#"{"type":"debuff","value":5,"description":"x"}"#).unwrap();
        assert_eq!(parsed.kind, IntentKind::Debuff);
        assert_eq!(parsed.value, 5);
    }
}
