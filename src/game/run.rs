//! Run orchestrator.
//!
//! [`Roguelike`] owns the single authoritative [`Session`] and drives the
//! phase machine:
//!
//! ```text
//! class_select -> map -> {combat | rest | shop} -> map -> ... -> boss -> boss_victory
//!                           \-> reward -> map            \-> game_over
//! ```
//!
//! Every entry point computes a complete new session from the current one
//! and swaps it in only on success. A rejected action returns an
//! [`ActionError`] and leaves the session exactly as it was.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::content::{CardEffect, Content, SeatDef};
use crate::error::ActionError;
use crate::game::{
    CombatEnd, CombatEnemy, CombatState, MapNode, NodeType, RunPhase, RunState, Session,
    apply_card_effects, apply_enemy_turn, apply_seat_bonus, check_combat_end,
    create_deck_state, discard_from_hand, discard_hand, draw_cards, generate_map, is_selectable,
    selectable_nodes,
};

/// Encounter id given to the single enemy of a fight.
const FIRST_ENEMY_ID: &str = "enemy-0";

/// Read-only inputs shared by every transition.
#[derive(Debug, Clone, Copy)]
struct Rules<'a> {
    content: &'a Content,
    config: &'a RulesConfig,
}

impl<'a> Rules<'a> {
    fn seat(&self, seat_id: &str) -> Option<&'a SeatDef> {
        self.content
            .seat_layout(&self.config.seat_layout)
            .and_then(|layout| layout.seat(seat_id))
    }

    fn offers<R: Rng + ?Sized>(&self, class_id: &str, rng: &mut R) -> Vec<String> {
        let pool: Vec<_> = self.content.cards_for_class(class_id).collect();
        pool.choose_multiple(rng, self.config.offer_count)
            .map(|card| card.id.clone())
            .collect()
    }
}

/// The roguelike run state machine.
#[derive(Debug, Clone)]
pub struct Roguelike<'c, R = ChaCha8Rng> {
    content: &'c Content,
    rules: RulesConfig,
    rng: R,
    session: Option<Session>,
}

impl<'c> Roguelike<'c, ChaCha8Rng> {
    /// Create an orchestrator with a deterministic RNG.
    #[must_use]
    pub fn seeded(content: &'c Content, rules: RulesConfig, seed: u64) -> Self {
        Self::new(content, rules, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<'c, R: Rng> Roguelike<'c, R> {
    /// Create an orchestrator with no run in progress.
    #[must_use]
    pub fn new(content: &'c Content, rules: RulesConfig, rng: R) -> Self {
        Self {
            content,
            rules,
            rng,
            session: None,
        }
    }

    /// Content catalog in use.
    #[must_use]
    pub fn content(&self) -> &'c Content {
        self.content
    }

    /// Rules in use.
    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// The current session, if a run is in progress.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Run-level state, if a run is in progress.
    #[must_use]
    pub fn run(&self) -> Option<&RunState> {
        self.session.as_ref().map(|s| &s.run)
    }

    /// Fight state, if a fight is in progress.
    #[must_use]
    pub fn combat(&self) -> Option<&CombatState> {
        self.session.as_ref().and_then(|s| s.combat.as_ref())
    }

    /// Owned card ids; empty when no run is in progress.
    #[must_use]
    pub fn master_deck(&self) -> &[String] {
        self.session.as_ref().map_or(&[], |s| &s.master_deck)
    }

    /// Current phase; `ClassSelect` when no run is in progress.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.run().map_or(RunPhase::ClassSelect, |r| r.phase)
    }

    /// Nodes the player may enter next.
    #[must_use]
    pub fn selectable_nodes(&self) -> Vec<&MapNode> {
        self.run()
            .map(|r| selectable_nodes(&r.map_nodes, r.current_row))
            .unwrap_or_default()
    }

    /// Seat the player currently occupies.
    #[must_use]
    pub fn active_seat(&self) -> Option<&'c SeatDef> {
        let combat = self.combat()?;
        self.content
            .seat_layout(&self.rules.seat_layout)
            .and_then(|layout| layout.seat(&combat.player_seat_id))
    }

    /// Energy the player would pay for `card_id` from the current seat.
    #[must_use]
    pub fn card_cost(&self, card_id: &str) -> Option<u32> {
        let card = self.content.card(card_id)?;
        Some(card.cost - apply_seat_bonus(card, self.active_seat()))
    }

    fn transition<F>(&mut self, action: &'static str, f: F) -> Result<(), ActionError>
    where
        F: FnOnce(Rules<'_>, &Session, &mut R) -> Result<Session, ActionError>,
    {
        let rules = Rules {
            content: self.content,
            config: &self.rules,
        };
        let result = match &self.session {
            Some(session) => f(rules, session, &mut self.rng),
            None => Err(ActionError::NoActiveRun),
        };
        match result {
            Ok(next) => {
                debug!(action, phase = ?next.run.phase, focus = next.run.focus, "action applied");
                self.session = Some(next);
                Ok(())
            }
            Err(err) => {
                debug!(action, %err, "action rejected");
                Err(err)
            }
        }
    }

    /// Start a new run, discarding any run in progress.
    ///
    /// # Errors
    ///
    /// Rejects unknown classes and content that cannot produce a map.
    pub fn start_run(&mut self, class_id: &str) -> Result<(), ActionError> {
        let rules = Rules {
            content: self.content,
            config: &self.rules,
        };
        match start_run(rules, class_id, &mut self.rng) {
            Ok(session) => {
                info!(
                    class = class_id,
                    deck = session.master_deck.len(),
                    nodes = session.run.map_nodes.len(),
                    "run started"
                );
                self.session = Some(session);
                Ok(())
            }
            Err(err) => {
                debug!(action = "start_run", %err, "action rejected");
                Err(err)
            }
        }
    }

    /// Enter a map node.
    ///
    /// # Errors
    ///
    /// Rejects outside the map phase and for unknown or unreachable nodes.
    pub fn select_node(&mut self, node_id: &str) -> Result<(), ActionError> {
        self.transition("select_node", |rules, s, rng| select_node(rules, s, node_id, rng))
    }

    /// Play a card from hand against an enemy.
    ///
    /// # Errors
    ///
    /// Rejects outside combat, for cards not in hand, unknown targets of
    /// damaging cards, and when energy is short.
    pub fn play_card(&mut self, card_id: &str, target_enemy_id: &str) -> Result<(), ActionError> {
        self.transition("play_card", |rules, s, rng| {
            play_card(rules, s, card_id, target_enemy_id, rng)
        })
    }

    /// End the player's turn: enemies act, then a new hand is drawn.
    ///
    /// # Errors
    ///
    /// Rejects outside combat.
    pub fn end_player_turn(&mut self) -> Result<(), ActionError> {
        self.transition("end_player_turn", end_player_turn)
    }

    /// Change seats for the seat move cost.
    ///
    /// # Errors
    ///
    /// Rejects outside combat, for unknown seats, the current seat, and when
    /// energy is short.
    pub fn move_seat(&mut self, seat_id: &str) -> Result<(), ActionError> {
        self.transition("move_seat", |rules, s, rng| move_seat(rules, s, seat_id, rng))
    }

    /// Recover focus at a rest node and return to the map.
    ///
    /// # Errors
    ///
    /// Rejects outside the rest phase.
    pub fn rest_heal(&mut self) -> Result<(), ActionError> {
        self.transition("rest_heal", |rules, s, _| rest_heal(rules, s))
    }

    /// Buy an offered card and return to the map.
    ///
    /// # Errors
    ///
    /// Rejects outside the shop, for cards not on offer, and when gold is short.
    pub fn buy_card(&mut self, card_id: &str) -> Result<(), ActionError> {
        self.transition("buy_card", |rules, s, _| buy_card(rules, s, card_id))
    }

    /// Leave the shop without buying.
    ///
    /// # Errors
    ///
    /// Rejects outside the shop.
    pub fn leave_shop(&mut self) -> Result<(), ActionError> {
        self.transition("leave_shop", |_, s, _| {
            let mut next = in_phase(s, RunPhase::Shop)?;
            next.run.offers.clear();
            next.run.phase = RunPhase::Map;
            Ok(next)
        })
    }

    /// Take an offered reward card and the reward gold.
    ///
    /// # Errors
    ///
    /// Rejects outside the reward phase and for cards not on offer.
    pub fn pick_reward_card(&mut self, card_id: &str) -> Result<(), ActionError> {
        self.transition("pick_reward_card", |rules, s, _| {
            pick_reward(rules, s, Some(card_id))
        })
    }

    /// Take only the reward gold.
    ///
    /// # Errors
    ///
    /// Rejects outside the reward phase.
    pub fn skip_reward(&mut self) -> Result<(), ActionError> {
        self.transition("skip_reward", |rules, s, _| pick_reward(rules, s, None))
    }

    /// Drop the run in progress, if any.
    pub fn abandon_run(&mut self) {
        if self.session.take().is_some() {
            info!("run abandoned");
        }
    }
}

/// Clone the session after checking the phase.
fn in_phase(session: &Session, phase: RunPhase) -> Result<Session, ActionError> {
    if session.run.phase == phase {
        Ok(session.clone())
    } else {
        Err(ActionError::WrongPhase(session.run.phase))
    }
}

/// Clone the session after checking a fight is in progress.
fn in_combat(session: &Session) -> Result<(Session, CombatState), ActionError> {
    let next = in_phase(session, RunPhase::Combat)?;
    let combat = next.combat.clone().ok_or(ActionError::NoCombat)?;
    Ok((next, combat))
}

fn start_run<R: Rng + ?Sized>(
    rules: Rules<'_>,
    class_id: &str,
    rng: &mut R,
) -> Result<Session, ActionError> {
    let class = rules
        .content
        .class(class_id)
        .ok_or_else(|| ActionError::UnknownClass(class_id.to_string()))?;
    let total_rows = rules.config.map_rows;
    let map_nodes = generate_map(total_rows, rules.content.map_config(), rng)?;

    Ok(Session {
        run: RunState {
            phase: RunPhase::Map,
            class_id: class.id.clone(),
            current_node_id: None,
            map_nodes,
            total_rows,
            current_row: None,
            gold: rules.config.initial_gold,
            focus: rules.config.initial_focus,
            max_focus: rules.config.initial_focus,
            offers: Vec::new(),
        },
        combat: None,
        master_deck: class.starting_deck.clone(),
    })
}

fn select_node<R: Rng + ?Sized>(
    rules: Rules<'_>,
    session: &Session,
    node_id: &str,
    rng: &mut R,
) -> Result<Session, ActionError> {
    let mut next = in_phase(session, RunPhase::Map)?;
    let run = &session.run;
    let node = run
        .node(node_id)
        .ok_or_else(|| ActionError::UnknownNode(node_id.to_string()))?;
    if !is_selectable(&run.map_nodes, run.current_row, node) {
        return Err(ActionError::NodeNotSelectable(node_id.to_string()));
    }

    match node.node_type {
        NodeType::Combat | NodeType::Boss => {
            let enemy_id = node
                .enemy_id
                .as_deref()
                .ok_or_else(|| ActionError::UnknownEnemy(node_id.to_string()))?;
            let def = rules
                .content
                .enemy(enemy_id)
                .ok_or_else(|| ActionError::UnknownEnemy(enemy_id.to_string()))?;

            let deck = create_deck_state(&session.master_deck, rng);
            let deck = draw_cards(&deck, rules.config.hand_size, rng);
            next.combat = Some(CombatState {
                turn: 1,
                max_turns: rules.config.max_turns,
                energy: rules.config.max_energy,
                max_energy: rules.config.max_energy,
                deck,
                player_block: 0,
                player_seat_id: rules.config.starting_seat.clone(),
                enemies: vec![CombatEnemy::new(FIRST_ENEMY_ID, def)],
                agreement: 0,
                agreement_target: def.agreement_target(),
            });
            next.run.phase = RunPhase::Combat;
            info!(node = node_id, enemy = enemy_id, "combat started");
        }
        NodeType::Shop => {
            next.run.offers = rules.offers(&run.class_id, rng);
            next.run.phase = RunPhase::Shop;
        }
        NodeType::Rest => next.run.phase = RunPhase::Rest,
    }

    if let Some(n) = next.run.map_nodes.iter_mut().find(|n| n.id == node_id) {
        n.visited = true;
    }
    next.run.current_node_id = Some(node_id.to_string());
    next.run.current_row = Some(node.row);
    Ok(next)
}

fn play_card<R: Rng + ?Sized>(
    rules: Rules<'_>,
    session: &Session,
    card_id: &str,
    target_enemy_id: &str,
    rng: &mut R,
) -> Result<Session, ActionError> {
    let (mut next, combat) = in_combat(session)?;
    let card = rules
        .content
        .card(card_id)
        .ok_or_else(|| ActionError::UnknownCard(card_id.to_string()))?;
    if !combat.deck.hand.iter().any(|c| c == card_id) {
        return Err(ActionError::CardNotInHand(card_id.to_string()));
    }
    if card.deals_damage() && combat.enemy(target_enemy_id).is_none() {
        return Err(ActionError::UnknownEnemy(target_enemy_id.to_string()));
    }

    let seat = rules.seat(&combat.player_seat_id);
    let cost = card.cost - apply_seat_bonus(card, seat);
    if combat.energy < cost {
        return Err(ActionError::InsufficientEnergy {
            needed: cost,
            available: combat.energy,
        });
    }

    let mut after = apply_card_effects(&combat, card, cost, target_enemy_id, seat);
    after.deck = discard_from_hand(&after.deck, card_id)
        .ok_or_else(|| ActionError::CardNotInHand(card_id.to_string()))?;

    let mut focus = next.run.focus;
    for effect in &card.effects {
        match *effect {
            CardEffect::Draw(n) => {
                after.deck = draw_cards(&after.deck, n as usize, rng);
            }
            CardEffect::FocusRestore(n) => {
                focus = focus.saturating_add(n).min(next.run.max_focus);
            }
            CardEffect::FocusDamage(n) => {
                focus = focus.saturating_sub(n);
            }
            CardEffect::Damage(_)
            | CardEffect::Block(_)
            | CardEffect::Agreement(_)
            | CardEffect::Energy(_) => {}
        }
    }

    debug!(
        card = card_id,
        cost,
        energy = after.energy,
        agreement = after.agreement,
        "card played"
    );
    next.run.focus = focus;
    next.combat = Some(after);
    Ok(resolve_combat_end(rules, next, rng))
}

fn end_player_turn<R: Rng + ?Sized>(
    rules: Rules<'_>,
    session: &Session,
    rng: &mut R,
) -> Result<Session, ActionError> {
    let (mut next, combat) = in_combat(session)?;

    let enemy_turn = apply_enemy_turn(&combat, next.run.focus, rules.content);
    let saved = rules.seat(&combat.player_seat_id).map_or(0, SeatDef::focus_save);
    let loss = enemy_turn.focus_lost.saturating_sub(saved);
    next.run.focus = next.run.focus.saturating_sub(loss);

    let deck = discard_hand(&combat.deck);
    let deck = draw_cards(&deck, rules.config.hand_size, rng);

    debug!(
        turn = combat.turn,
        focus_lost = loss,
        focus = next.run.focus,
        "enemy turn resolved"
    );
    next.combat = Some(CombatState {
        turn: combat.turn + 1,
        energy: combat.max_energy,
        deck,
        player_block: 0,
        enemies: enemy_turn.enemies,
        ..combat
    });
    Ok(resolve_combat_end(rules, next, rng))
}

fn move_seat<R: Rng + ?Sized>(
    rules: Rules<'_>,
    session: &Session,
    seat_id: &str,
    rng: &mut R,
) -> Result<Session, ActionError> {
    let (mut next, mut combat) = in_combat(session)?;
    if rules.seat(seat_id).is_none() {
        return Err(ActionError::UnknownSeat(seat_id.to_string()));
    }
    if combat.player_seat_id == seat_id {
        return Err(ActionError::SameSeat(seat_id.to_string()));
    }
    let cost = rules.config.seat_move_cost;
    if combat.energy < cost {
        return Err(ActionError::InsufficientEnergy {
            needed: cost,
            available: combat.energy,
        });
    }

    combat.energy -= cost;
    combat.player_seat_id = seat_id.to_string();
    next.combat = Some(combat);
    Ok(resolve_combat_end(rules, next, rng))
}

fn rest_heal(rules: Rules<'_>, session: &Session) -> Result<Session, ActionError> {
    let mut next = in_phase(session, RunPhase::Rest)?;
    let run = &mut next.run;
    let heal = rules.config.rest_heal(run.max_focus);
    run.focus = run.focus.saturating_add(heal).min(run.max_focus);
    run.phase = RunPhase::Map;
    Ok(next)
}

fn buy_card(rules: Rules<'_>, session: &Session, card_id: &str) -> Result<Session, ActionError> {
    let mut next = in_phase(session, RunPhase::Shop)?;
    if rules.content.card(card_id).is_none() {
        return Err(ActionError::UnknownCard(card_id.to_string()));
    }
    if !next.run.offers.iter().any(|c| c == card_id) {
        return Err(ActionError::CardNotOffered(card_id.to_string()));
    }
    let price = rules.config.card_price;
    if next.run.gold < price {
        return Err(ActionError::InsufficientGold {
            needed: price,
            available: next.run.gold,
        });
    }

    next.run.gold -= price;
    next.run.offers.clear();
    next.run.phase = RunPhase::Map;
    next.master_deck.push(card_id.to_string());
    Ok(next)
}

fn pick_reward(
    rules: Rules<'_>,
    session: &Session,
    card_id: Option<&str>,
) -> Result<Session, ActionError> {
    let mut next = in_phase(session, RunPhase::Reward)?;
    if let Some(card_id) = card_id {
        if rules.content.card(card_id).is_none() {
            return Err(ActionError::UnknownCard(card_id.to_string()));
        }
        if !next.run.offers.iter().any(|c| c == card_id) {
            return Err(ActionError::CardNotOffered(card_id.to_string()));
        }
        next.master_deck.push(card_id.to_string());
    }
    next.run.gold = next.run.gold.saturating_add(rules.config.reward_gold);
    next.run.offers.clear();
    next.run.phase = RunPhase::Map;
    Ok(next)
}

/// Apply the outcome of a finished fight, if it is finished.
fn resolve_combat_end<R: Rng + ?Sized>(rules: Rules<'_>, mut next: Session, rng: &mut R) -> Session {
    let Some(combat) = next.combat.as_ref() else {
        return next;
    };
    let Some(end) = check_combat_end(combat, next.run.focus) else {
        return next;
    };

    let turns = combat.turn;
    let boss_fight = combat.agreement_target > 0;
    next.combat = None;
    match end {
        CombatEnd::Victory if boss_fight => {
            next.run.phase = RunPhase::BossVictory;
        }
        CombatEnd::Victory => {
            next.run.offers = rules.offers(&next.run.class_id, rng);
            next.run.phase = RunPhase::Reward;
        }
        CombatEnd::Defeat => {
            next.run.focus = 0;
            next.run.phase = RunPhase::GameOver;
        }
        CombatEnd::TurnLimit => {
            next.run.focus = next
                .run
                .focus
                .saturating_sub(rules.config.turn_limit_focus_penalty);
            next.run.phase = if next.run.focus == 0 {
                RunPhase::GameOver
            } else {
                RunPhase::Map
            };
        }
    }
    info!(outcome = ?end, turns, focus = next.run.focus, phase = ?next.run.phase, "combat ended");
    next
}
