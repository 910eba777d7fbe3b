//! Scripted greedy player.
//!
//! Drives a whole run without input: enters the first reachable node
//! (preferring rest when focus is low), plays the best affordable card
//! until nothing worth playing is left, heals at rest, and takes the first
//! offer in shops and rewards. Used by the CLI, integration tests and
//! benches.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RulesConfig;
use crate::content::{CardDef, CardEffect, Content};
use crate::error::ActionError;
use crate::game::{CombatState, NodeType, Roguelike, RunPhase};
use crate::replay::{Action, Recording};

/// Safety cap on actions per simulated run.
pub const MAX_ACTIONS: usize = 5_000;

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Orchestrator seed.
    pub seed: u64,
    /// Class played.
    pub class_id: String,
    /// Phase the run ended in.
    pub phase: RunPhase,
    /// Focus left.
    pub focus: u32,
    /// Gold left.
    pub gold: u32,
    /// Map rows entered.
    pub rows_cleared: usize,
    /// Cards owned at the end.
    pub deck_size: usize,
    /// Player turns ended across all fights.
    pub turns_played: u32,
    /// Fights won, boss included.
    pub combats_won: u32,
    /// Actions taken.
    pub actions: usize,
}

impl RunSummary {
    /// Whether the boss was beaten.
    #[must_use]
    pub fn won(&self) -> bool {
        self.phase == RunPhase::BossVictory
    }
}

/// Greedy value of playing `card` now. Non-positive means "don't".
fn card_value(card: &CardDef, combat: &CombatState) -> i64 {
    let persuading = combat.agreement_target > 0 && combat.agreement < combat.agreement_target;
    let fighting = !combat.all_enemies_down();
    card.effects
        .iter()
        .map(|effect| match *effect {
            CardEffect::Damage(v) if fighting => i64::from(v),
            CardEffect::Damage(_) => 0,
            CardEffect::Block(v) => i64::from(v) / 2,
            CardEffect::Agreement(v) if persuading => i64::from(v) * 2,
            CardEffect::Agreement(_) => 0,
            CardEffect::Draw(v) => i64::from(v) * 2,
            CardEffect::Energy(v) => i64::from(v) * 3,
            CardEffect::FocusRestore(v) => i64::from(v) / 2,
            CardEffect::FocusDamage(v) => -i64::from(v) * 2,
        })
        .sum()
}

fn combat_action(game: &Roguelike<'_>, combat: &CombatState) -> Action {
    let content = game.content();
    let target = combat
        .enemies
        .iter()
        .find(|e| e.is_alive())
        .or_else(|| combat.enemies.first())
        .map_or_else(String::new, |e| e.id.clone());

    let best = combat
        .deck
        .hand
        .iter()
        .filter_map(|id| {
            let card = content.card(id)?;
            let cost = game.card_cost(id)?;
            let value = card_value(card, combat);
            (cost <= combat.energy && value > 0).then_some((value, id))
        })
        .fold(None, |best: Option<(i64, &String)>, (value, id)| match best {
            Some((v, _)) if v >= value => best,
            _ => Some((value, id)),
        });

    match best {
        Some((_, card_id)) => Action::PlayCard {
            card_id: card_id.clone(),
            target_enemy_id: target,
        },
        None => Action::EndPlayerTurn,
    }
}

/// Choose the next action, or `None` when the run cannot continue.
#[must_use]
pub fn next_action(game: &Roguelike<'_>) -> Option<Action> {
    let run = game.run()?;
    match run.phase {
        RunPhase::Map => {
            let open = game.selectable_nodes();
            let tired = run.focus < run.max_focus / 2;
            let node = open
                .iter()
                .find(|n| tired && n.node_type == NodeType::Rest)
                .or_else(|| open.first())?;
            Some(Action::SelectNode {
                node_id: node.id.clone(),
            })
        }
        RunPhase::Combat => game.combat().map(|c| combat_action(game, c)),
        RunPhase::Rest => Some(Action::RestHeal),
        RunPhase::Shop => Some(match run.offers.first() {
            Some(card_id) if run.gold >= game.rules().card_price => Action::BuyCard {
                card_id: card_id.clone(),
            },
            _ => Action::LeaveShop,
        }),
        RunPhase::Reward => Some(match run.offers.first() {
            Some(card_id) => Action::PickRewardCard {
                card_id: card_id.clone(),
            },
            None => Action::SkipReward,
        }),
        RunPhase::ClassSelect | RunPhase::BossVictory | RunPhase::GameOver => None,
    }
}

/// Play a whole run with the greedy policy.
///
/// Returns the summary and the recording of every action taken. The run
/// stops at a terminal phase, when no node is reachable, or after
/// [`MAX_ACTIONS`] actions.
///
/// # Errors
///
/// Returns an error if the class is unknown or the policy produces an
/// action the engine rejects.
pub fn simulate_run(
    seed: u64,
    class_id: &str,
    content: &Content,
    rules: &RulesConfig,
) -> Result<(RunSummary, Recording), ActionError> {
    let mut game = Roguelike::seeded(content, rules.clone(), seed);
    let mut recording = Recording::new(seed, rules.clone());

    let start = Action::StartRun {
        class_id: class_id.to_string(),
    };
    game.apply(&start)?;
    recording.push(start);

    let mut turns_played = 0;
    let mut combats_won = 0;

    while recording.actions.len() < MAX_ACTIONS {
        let Some(action) = next_action(&game) else {
            break;
        };
        let before = game.phase();
        game.apply(&action)?;
        if action == Action::EndPlayerTurn {
            turns_played += 1;
        }
        if before == RunPhase::Combat
            && matches!(game.phase(), RunPhase::Reward | RunPhase::BossVictory)
        {
            combats_won += 1;
        }
        recording.push(action);
    }
    if recording.actions.len() >= MAX_ACTIONS {
        warn!(seed, "simulation hit the action cap");
    }

    let run = game.run().ok_or(ActionError::NoActiveRun)?;
    let summary = RunSummary {
        seed,
        class_id: class_id.to_string(),
        phase: run.phase,
        focus: run.focus,
        gold: run.gold,
        rows_cleared: run.current_row.map_or(0, |r| r + 1),
        deck_size: game.master_deck().len(),
        turns_played,
        combats_won,
        actions: recording.actions.len(),
    };
    debug!(seed, phase = ?summary.phase, actions = summary.actions, "simulation finished");
    Ok((summary, recording))
}
