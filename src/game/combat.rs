//! Combat resolution.
//!
//! Card effects, enemy intents, seat bonuses and end-of-fight checks are
//! pure functions over [`CombatState`]. Effects that reach outside the fight
//! (drawing cards, focus changes) are left to the run orchestrator.

use serde::{Deserialize, Serialize};

use crate::content::{CardDef, CardEffect, Content, EnemyDef, Intent, IntentKind, SeatDef, SeatEffect};
use crate::game::DeckState;

/// Focus lost every enemy turn regardless of what the enemies do.
pub const FOCUS_TAX_PER_TURN: u32 = 2;

/// Agreement never exceeds this value.
pub const AGREEMENT_CAP: u32 = 100;

/// An enemy taking part in a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEnemy {
    /// Encounter-scoped identifier.
    pub id: String,
    /// Id of the enemy definition.
    pub def_id: String,
    /// Current hp, 0..=max_hp.
    pub hp: u32,
    /// Maximum hp.
    pub max_hp: u32,
    /// Block; only consumed by incoming damage, never reset by turns.
    pub block: u32,
    /// Cursor into the definition's intent script. Only ever increases.
    pub intent_index: usize,
}

impl CombatEnemy {
    /// Spawn a fresh enemy from its definition.
    #[must_use]
    pub fn new(id: impl Into<String>, def: &EnemyDef) -> Self {
        Self {
            id: id.into(),
            def_id: def.id.clone(),
            hp: def.hp,
            max_hp: def.hp,
            block: 0,
            intent_index: 0,
        }
    }

    /// Whether the enemy still has hp.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// The intent this enemy will execute on its next turn.
    #[must_use]
    pub fn current_intent<'a>(&self, def: &'a EnemyDef) -> Option<&'a Intent> {
        def.intent_at(self.intent_index)
    }

    /// Apply damage: block absorbs first, the remainder comes off hp.
    fn take_damage(&mut self, damage: u32) {
        let blocked = self.block.min(damage);
        self.block -= blocked;
        self.hp = self.hp.saturating_sub(damage - blocked);
    }
}

/// State of a fight in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Current player turn, starting at 1.
    pub turn: u32,
    /// The fight ends in a turn limit once `turn` exceeds this.
    pub max_turns: u32,
    /// Energy left this turn. Energy effects may push it above `max_energy`.
    pub energy: u32,
    /// Energy refilled at the start of every player turn.
    pub max_energy: u32,
    /// Card piles.
    pub deck: DeckState,
    /// Player block; reset to 0 at the start of every player turn.
    pub player_block: u32,
    /// Seat the player occupies.
    pub player_seat_id: String,
    /// Enemies in encounter order.
    pub enemies: Vec<CombatEnemy>,
    /// Agreement accumulated so far, capped at [`AGREEMENT_CAP`].
    pub agreement: u32,
    /// Agreement needed to win; 0 when the fight has none.
    pub agreement_target: u32,
}

impl CombatState {
    /// Find an enemy by encounter id.
    #[must_use]
    pub fn enemy(&self, id: &str) -> Option<&CombatEnemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Whether every enemy is at 0 hp.
    #[must_use]
    pub fn all_enemies_down(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }
}

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatEnd {
    /// Enemies down (and agreement reached, if required).
    Victory,
    /// Focus ran out.
    Defeat,
    /// The turn cap passed without a decision.
    TurnLimit,
}

/// Outcome of one enemy turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyTurnResult {
    /// Enemies after acting.
    pub enemies: Vec<CombatEnemy>,
    /// Player block left after absorbing attacks.
    pub player_block: u32,
    /// Focus after the summed loss.
    pub focus: u32,
    /// Total focus loss applied, including the per-turn tax.
    pub focus_lost: u32,
}

/// Resolve the combat-state effects of a played card.
///
/// `cost` is the energy actually paid (after any seat reduction) and is
/// deducted once. Damage, block, agreement and energy effects are applied
/// in declaration order; draw and focus effects are skipped here.
#[must_use]
pub fn apply_card_effects(
    state: &CombatState,
    card: &CardDef,
    cost: u32,
    target_enemy_id: &str,
    seat: Option<&SeatDef>,
) -> CombatState {
    let mut next = state.clone();
    next.energy = next.energy.saturating_sub(cost);

    for effect in &card.effects {
        match *effect {
            CardEffect::Damage(value) => {
                let bonus = seat.map_or(0, |s| s.damage_bonus(card.tag));
                if let Some(target) = next.enemies.iter_mut().find(|e| e.id == target_enemy_id) {
                    target.take_damage(value.saturating_add(bonus));
                }
            }
            CardEffect::Block(value) => {
                next.player_block = next.player_block.saturating_add(value);
            }
            CardEffect::Agreement(value) => {
                next.agreement = next.agreement.saturating_add(value).min(AGREEMENT_CAP);
            }
            CardEffect::Energy(value) => {
                next.energy = next.energy.saturating_add(value);
            }
            CardEffect::Draw(_) | CardEffect::FocusRestore(_) | CardEffect::FocusDamage(_) => {}
        }
    }

    next
}

/// Resolve one enemy turn.
///
/// Every living enemy executes its current intent in list order and
/// advances its cursor. Focus loss from all enemies plus
/// [`FOCUS_TAX_PER_TURN`] is summed and applied once, floored at 0.
/// Enemies whose definition is missing from `content` do nothing.
#[must_use]
pub fn apply_enemy_turn(state: &CombatState, focus: u32, content: &Content) -> EnemyTurnResult {
    let mut player_block = state.player_block;
    let mut focus_lost = FOCUS_TAX_PER_TURN;

    let enemies = state
        .enemies
        .iter()
        .map(|enemy| {
            let mut next = enemy.clone();
            if !enemy.is_alive() {
                return next;
            }
            let Some(intent) = content
                .enemy(&enemy.def_id)
                .and_then(|def| enemy.current_intent(def))
            else {
                return next;
            };
            next.intent_index += 1;

            match intent.kind {
                IntentKind::Attack => {
                    let blocked = player_block.min(intent.value);
                    player_block -= blocked;
                    focus_lost = focus_lost.saturating_add(intent.value - blocked);
                }
                IntentKind::Defend => {
                    next.block = next.block.saturating_add(intent.value);
                }
                IntentKind::Debuff | IntentKind::Special => {
                    focus_lost = focus_lost.saturating_add(intent.value);
                }
            }
            next
        })
        .collect();

    EnemyTurnResult {
        enemies,
        player_block,
        focus: focus.saturating_sub(focus_lost),
        focus_lost,
    }
}

/// Energy discount the active seat grants to `card`.
///
/// Only cost reductions count here; damage bonuses and focus saves apply
/// where damage and focus loss are resolved. The discount never exceeds
/// the card's cost.
#[must_use]
pub fn apply_seat_bonus(card: &CardDef, seat: Option<&SeatDef>) -> u32 {
    match seat.and_then(|s| s.effect) {
        Some(SeatEffect::CostReduction { value }) => value.min(card.cost),
        _ => 0,
    }
}

/// Decide whether the fight is over.
///
/// Defeat is checked first, then the turn limit, then victory. A fight with
/// an agreement target only ends in victory once the target is reached,
/// even if every enemy is down.
#[must_use]
pub fn check_combat_end(state: &CombatState, focus: u32) -> Option<CombatEnd> {
    if focus == 0 {
        return Some(CombatEnd::Defeat);
    }
    if state.turn > state.max_turns {
        return Some(CombatEnd::TurnLimit);
    }
    if state.all_enemies_down() {
        if state.agreement_target > 0 && state.agreement < state.agreement_target {
            return None;
        }
        return Some(CombatEnd::Victory);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CardTag;

    fn enemy(id: &str, def_id: &str, hp: u32, block: u32, intent_index: usize) -> CombatEnemy {
        CombatEnemy {
            id: id.to_string(),
            def_id: def_id.to_string(),
            hp,
            max_hp: hp.max(25),
            block,
            intent_index,
        }
    }

    fn combat(enemies: Vec<CombatEnemy>) -> CombatState {
        CombatState {
            turn: 1,
            max_turns: 12,
            energy: 3,
            max_energy: 3,
            deck: DeckState::default(),
            player_block: 0,
            player_seat_id: "front_center".to_string(),
            enemies,
            agreement: 0,
            agreement_target: 0,
        }
    }

    fn card(tag: CardTag, effects: Vec<CardEffect>) -> CardDef {
        CardDef {
            id: "test".to_string(),
            name: "Test".to_string(),
            cost: 1,
            tag,
            description: String::new(),
            effects,
            class: None,
        }
    }

    fn seat(effect: SeatEffect) -> SeatDef {
        SeatDef {
            id: "s".to_string(),
            name: "S".to_string(),
            row: 0,
            col: 0,
            effect: Some(effect),
        }
    }

    #[test]
    fn test_damage_reduces_hp_and_energy() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let c = card(CardTag::Persuade, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &c, 1, "e1", None);
        assert_eq!(next.enemies[0].hp, 19);
        assert_eq!(next.energy, 2);
        // input untouched
        assert_eq!(state.enemies[0].hp, 25);
    }

    #[test]
    fn test_damage_absorbed_by_block_first() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 4, 0)]);
        let c = card(CardTag::Persuade, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &c, 1, "e1", None);
        assert_eq!(next.enemies[0].block, 0);
        assert_eq!(next.enemies[0].hp, 23);
    }

    #[test]
    fn test_block_larger_than_damage() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 10, 0)]);
        let c = card(CardTag::Persuade, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &c, 1, "e1", None);
        assert_eq!(next.enemies[0].block, 4);
        assert_eq!(next.enemies[0].hp, 25);
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let state = combat(vec![enemy("e1", "junior_dev", 3, 0, 0)]);
        let c = card(CardTag::Pressure, vec![CardEffect::Damage(12)]);
        let next = apply_card_effects(&state, &c, 2, "e1", None);
        assert_eq!(next.enemies[0].hp, 0);
    }

    #[test]
    fn test_unknown_target_takes_nothing() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let c = card(CardTag::Persuade, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &c, 1, "nobody", None);
        assert_eq!(next.enemies, state.enemies);
        assert_eq!(next.energy, 2);
    }

    #[test]
    fn test_block_and_agreement() {
        let mut state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        state.player_block = 3;
        state.agreement = 95;
        let c = card(CardTag::Ease, vec![CardEffect::Block(5), CardEffect::Agreement(10)]);
        let next = apply_card_effects(&state, &c, 1, "e1", None);
        assert_eq!(next.player_block, 8);
        assert_eq!(next.agreement, AGREEMENT_CAP);
    }

    #[test]
    fn test_energy_effect_can_exceed_max() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let c = card(CardTag::Ease, vec![CardEffect::Energy(2)]);
        let next = apply_card_effects(&state, &c, 0, "e1", None);
        assert_eq!(next.energy, 5);
    }

    #[test]
    fn test_cross_boundary_effects_ignored() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let c = card(
            CardTag::Data,
            vec![CardEffect::Draw(2), CardEffect::FocusRestore(5), CardEffect::FocusDamage(3)],
        );
        let next = apply_card_effects(&state, &c, 0, "e1", None);
        assert_eq!(next, state);
    }

    #[test]
    fn test_seat_damage_bonus_matching_tag() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let bonus = seat(SeatEffect::DamageBonus {
            tag: CardTag::Data,
            value: 2,
        });
        let data = card(CardTag::Data, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &data, 1, "e1", Some(&bonus));
        assert_eq!(next.enemies[0].hp, 17);

        let ease = card(CardTag::Ease, vec![CardEffect::Damage(6)]);
        let next = apply_card_effects(&state, &ease, 1, "e1", Some(&bonus));
        assert_eq!(next.enemies[0].hp, 19);
    }

    #[test]
    fn test_attack_reduces_focus() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        // junior_dev opens with attack 6, plus the tax
        assert_eq!(result.focus, 80 - 6 - FOCUS_TAX_PER_TURN);
        assert_eq!(result.focus_lost, 8);
        assert_eq!(result.enemies[0].intent_index, 1);
    }

    #[test]
    fn test_player_block_absorbs_attack() {
        let mut state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        state.player_block = 10;
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        assert_eq!(result.focus, 80 - FOCUS_TAX_PER_TURN);
        assert_eq!(result.player_block, 4);
    }

    #[test]
    fn test_defend_adds_enemy_block() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 3, 1)]);
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        assert_eq!(result.enemies[0].block, 7);
        assert_eq!(result.focus, 80 - FOCUS_TAX_PER_TURN);
    }

    #[test]
    fn test_intent_wraps() {
        // junior_dev has two intents; cursor 2 is the attack again
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 2)]);
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        assert_eq!(result.focus, 72);
        assert_eq!(result.enemies[0].intent_index, 3);
    }

    #[test]
    fn test_debuff_ignores_block() {
        // legacy_engineer intent 2 is debuff 5
        let mut state = combat(vec![enemy("e1", "legacy_engineer", 45, 0, 2)]);
        state.player_block = 50;
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        assert_eq!(result.focus, 80 - 5 - FOCUS_TAX_PER_TURN);
        assert_eq!(result.player_block, 50);
    }

    #[test]
    fn test_dead_enemies_do_not_act() {
        let state = combat(vec![
            enemy("e1", "junior_dev", 0, 0, 0),
            enemy("e2", "junior_dev", 25, 0, 0),
        ]);
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        assert_eq!(result.enemies[0].intent_index, 0);
        assert_eq!(result.enemies[1].intent_index, 1);
        assert_eq!(result.focus, 80 - 6 - FOCUS_TAX_PER_TURN);
    }

    #[test]
    fn test_enemies_share_player_block_in_order() {
        let mut state = combat(vec![
            enemy("e1", "junior_dev", 25, 0, 0),
            enemy("e2", "junior_dev", 25, 0, 0),
        ]);
        state.player_block = 8;
        let result = apply_enemy_turn(&state, 80, Content::builtin());
        // 6 fully blocked, then 2 of 6 blocked
        assert_eq!(result.player_block, 0);
        assert_eq!(result.focus_lost, 4 + FOCUS_TAX_PER_TURN);
    }

    #[test]
    fn test_focus_floors_at_zero() {
        let state = combat(vec![enemy("e1", "junior_dev", 25, 0, 0)]);
        let result = apply_enemy_turn(&state, 3, Content::builtin());
        assert_eq!(result.focus, 0);
    }

    #[test]
    fn test_seat_bonus_only_cost_reduction() {
        let c = card(CardTag::Data, vec![CardEffect::Damage(1)]);
        assert_eq!(apply_seat_bonus(&c, None), 0);
        assert_eq!(
            apply_seat_bonus(&c, Some(&seat(SeatEffect::CostReduction { value: 1 }))),
            1
        );
        assert_eq!(
            apply_seat_bonus(&c, Some(&seat(SeatEffect::FocusSave { value: 2 }))),
            0
        );
        let mut free = c.clone();
        free.cost = 0;
        assert_eq!(
            apply_seat_bonus(&free, Some(&seat(SeatEffect::CostReduction { value: 1 }))),
            0
        );
    }

    #[test]
    fn test_end_victory_when_all_down() {
        let state = combat(vec![enemy("e1", "x", 0, 0, 0)]);
        assert_eq!(check_combat_end(&state, 50), Some(CombatEnd::Victory));
    }

    #[test]
    fn test_end_defeat_takes_priority() {
        let state = combat(vec![enemy("e1", "x", 0, 0, 0)]);
        assert_eq!(check_combat_end(&state, 0), Some(CombatEnd::Defeat));
        let alive = combat(vec![enemy("e1", "x", 10, 0, 0)]);
        assert_eq!(check_combat_end(&alive, 0), Some(CombatEnd::Defeat));
    }

    #[test]
    fn test_end_turn_limit_before_hp() {
        let mut state = combat(vec![enemy("e1", "x", 0, 0, 0)]);
        state.turn = 13;
        state.max_turns = 12;
        assert_eq!(check_combat_end(&state, 50), Some(CombatEnd::TurnLimit));
        state.turn = 12;
        assert_eq!(check_combat_end(&state, 50), Some(CombatEnd::Victory));
    }

    #[test]
    fn test_boss_needs_agreement() {
        let mut state = combat(vec![enemy("e1", "boss", 0, 0, 0)]);
        state.agreement_target = 60;
        state.agreement = 55;
        assert_eq!(check_combat_end(&state, 50), None);
        state.agreement = 60;
        assert_eq!(check_combat_end(&state, 50), Some(CombatEnd::Victory));
    }

    #[test]
    fn test_continues_while_enemies_stand() {
        let state = combat(vec![enemy("e1", "x", 10, 0, 0)]);
        assert_eq!(check_combat_end(&state, 50), None);
    }
}
