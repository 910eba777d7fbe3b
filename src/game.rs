//! Game layer for Boardroom.
//!
//! Pure rules plus the run orchestrator:
//! - Deck engine (draw, discard, reshuffle)
//! - Layered map generation and node reachability
//! - Combat resolution (cards, enemy intents, seats, end conditions)
//! - Run state machine driving a whole run

mod combat;
mod deck;
mod invariants;
mod map;
mod run;
mod state;

pub use combat::{
    AGREEMENT_CAP, CombatEnd, CombatEnemy, CombatState, EnemyTurnResult, FOCUS_TAX_PER_TURN,
    apply_card_effects, apply_enemy_turn, apply_seat_bonus, check_combat_end,
};
pub use deck::{DeckState, create_deck_state, discard_from_hand, discard_hand, draw_cards};
pub use invariants::{InvariantViolation, check_invariants};
pub use map::{MapNode, NodeType, generate_map, is_selectable, row_count, selectable_nodes};
pub use run::Roguelike;
pub use state::{RunPhase, RunState, Session};
