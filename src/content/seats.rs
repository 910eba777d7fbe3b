//! Seat layouts and positional bonuses.

use serde::{Deserialize, Serialize};

use super::CardTag;

/// Bonus granted while the player occupies a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeatEffect {
    /// Extra damage for cards carrying `tag`.
    DamageBonus {
        /// Tag the bonus applies to.
        tag: CardTag,
        /// Extra damage per damage effect.
        value: u32,
    },
    /// Cheaper cards.
    CostReduction {
        /// Energy discount per card.
        value: u32,
    },
    /// Less focus lost on each enemy turn.
    FocusSave {
        /// Focus loss prevented per enemy turn.
        value: u32,
    },
}

/// A seat in a meeting room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatDef {
    /// Identifier, unique within its layout.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Grid row.
    pub row: u32,
    /// Grid column.
    pub col: u32,
    /// Positional bonus, if any.
    #[serde(default)]
    pub effect: Option<SeatEffect>,
}

impl SeatDef {
    /// Damage bonus this seat grants to a card with `tag`.
    #[must_use]
    pub fn damage_bonus(&self, tag: CardTag) -> u32 {
        match self.effect {
            Some(SeatEffect::DamageBonus { tag: t, value }) if t == tag => value,
            _ => 0,
        }
    }

    /// Focus loss this seat prevents per enemy turn.
    #[must_use]
    pub fn focus_save(&self) -> u32 {
        match self.effect {
            Some(SeatEffect::FocusSave { value }) => value,
            _ => 0,
        }
    }
}

/// A named room arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Seats in the room.
    pub seats: Vec<SeatDef>,
}

impl SeatLayout {
    /// Find a seat by id.
    #[must_use]
    pub fn seat(&self, id: &str) -> Option<&SeatDef> {
        self.seats.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(effect: Option<SeatEffect>) -> SeatDef {
        SeatDef {
            id: "s".to_string(),
            name: "S".to_string(),
            row: 0,
            col: 0,
            effect,
        }
    }

    #[test]
    fn test_damage_bonus_matches_tag_only() {
        let s = seat(Some(SeatEffect::DamageBonus {
            tag: CardTag::Data,
            value: 2,
        }));
        assert_eq!(s.damage_bonus(CardTag::Data), 2);
        assert_eq!(s.damage_bonus(CardTag::Ease), 0);
        assert_eq!(s.focus_save(), 0);
    }

    #[test]
    fn test_focus_save() {
        assert_eq!(seat(Some(SeatEffect::FocusSave { value: 2 })).focus_save(), 2);
        assert_eq!(seat(None).focus_save(), 0);
    }

    #[test]
    fn test_seat_effect_json_shape() {
        let parsed: SeatEffect =
            serde_json::from_str(r#"{"type":"damage_bonus","tag":"pressure","value":2}"#).unwrap();
        assert_eq!(
            parsed,
            SeatEffect::DamageBonus {
                tag: CardTag::Pressure,
                value: 2
            }
        );
    }
}
