//! Session invariants - sanity checks that detect bugs.
//!
//! Every accepted action must leave the session in a state where all of
//! these hold. They are bug detectors, not gameplay limits; the property
//! tests and the fuzz target run them after every step.

use std::collections::HashMap;

use crate::game::{AGREEMENT_CAP, NodeType, RunPhase, Session};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn counts(ids: impl IntoIterator<Item = String>) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for id in ids {
        *map.entry(id).or_insert(0) += 1;
    }
    map
}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &Session) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });
    let run = &session.run;

    if run.focus > run.max_focus {
        fail(format!("Focus {} exceeds max {}", run.focus, run.max_focus));
    }

    // Combat presence tracks the phase
    match (run.phase == RunPhase::Combat, session.combat.is_some()) {
        (true, false) => fail("Combat phase without a fight".to_string()),
        (false, true) => fail(format!("Fight present in {:?} phase", run.phase)),
        _ => {}
    }

    if let Some(combat) = &session.combat {
        for enemy in &combat.enemies {
            if enemy.hp > enemy.max_hp {
                fail(format!(
                    "Enemy {} hp {} exceeds max {}",
                    enemy.id, enemy.hp, enemy.max_hp
                ));
            }
        }
        if combat.agreement > AGREEMENT_CAP {
            fail(format!(
                "Agreement {} exceeds cap {AGREEMENT_CAP}",
                combat.agreement
            ));
        }
        if combat.turn > combat.max_turns {
            fail(format!(
                "Fight still running on turn {} of {}",
                combat.turn, combat.max_turns
            ));
        }
        // Pile conservation
        if counts(combat.deck.all_cards()) != counts(session.master_deck.iter().cloned()) {
            fail(format!(
                "Fight piles hold {} cards but the deck owns {}",
                combat.deck.total_cards(),
                session.master_deck.len()
            ));
        }
    }

    // Map shape
    let bosses: Vec<_> = run
        .map_nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Boss)
        .collect();
    if bosses.len() != 1 {
        fail(format!("Map has {} boss nodes", bosses.len()));
    }
    for boss in bosses {
        if boss.row + 1 != run.total_rows {
            fail(format!(
                "Boss {} in row {} of {}",
                boss.id, boss.row, run.total_rows
            ));
        }
    }

    if let Some(node) = run.current_node() {
        if run.current_row != Some(node.row) {
            fail(format!(
                "Current row {:?} does not match node {} in row {}",
                run.current_row, node.id, node.row
            ));
        }
        if !node.visited {
            fail(format!("Current node {} not marked visited", node.id));
        }
    } else if run.current_row.is_some() {
        fail(format!("Current row {:?} without a node", run.current_row));
    }

    if !run.offers.is_empty() && !matches!(run.phase, RunPhase::Shop | RunPhase::Reward) {
        fail(format!("Offers left open in {:?} phase", run.phase));
    }

    violations
}
