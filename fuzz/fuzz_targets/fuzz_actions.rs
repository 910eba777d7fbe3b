#![no_main]

//! Run orchestrator fuzzer.
//!
//! Feeds arbitrary action sequences into a seeded run and checks that:
//! 1. No action panics
//! 2. Rejected actions leave the session untouched
//! 3. Accepted actions keep every session invariant

use arbitrary::Arbitrary;
use boardroom::game::{Roguelike, check_invariants};
use boardroom::{Action, Content, RulesConfig};
use libfuzzer_sys::fuzz_target;

const SEATS: [&str; 7] = [
    "whiteboard",
    "front_left",
    "front_center",
    "front_right",
    "back_corner",
    "back_center",
    "nowhere",
];

/// A fuzzer-generated action, with ids picked by index.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    SelectNode { row: u8, col: u8 },
    PlayCard { hand_index: u8, catalog_index: u8, from_hand: bool, target: u8 },
    EndPlayerTurn,
    MoveSeat { seat: u8 },
    RestHeal,
    BuyCard { offer: u8 },
    LeaveShop,
    PickRewardCard { offer: u8 },
    SkipReward,
    AbandonRun,
}

/// Structured input for run fuzzing.
#[derive(Arbitrary, Debug)]
struct RunInput {
    seed: u64,
    analyst: bool,
    actions: Vec<FuzzAction>,
}

fn offer(game: &Roguelike<'_>, index: u8) -> String {
    game.run()
        .and_then(|r| r.offers.get(usize::from(index) % r.offers.len().max(1)).cloned())
        .unwrap_or_else(|| "strike".to_string())
}

/// Turn a fuzz action into an engine action against the current state.
fn resolve(game: &Roguelike<'_>, content: &Content, action: &FuzzAction) -> Action {
    match *action {
        FuzzAction::SelectNode { row, col } => Action::SelectNode {
            node_id: format!("node-{}-{}", row % 9, col % 4),
        },
        FuzzAction::PlayCard {
            hand_index,
            catalog_index,
            from_hand,
            target,
        } => {
            let hand = game.combat().map(|c| c.deck.hand.clone()).unwrap_or_default();
            let card_id = if from_hand && !hand.is_empty() {
                hand[usize::from(hand_index) % hand.len()].clone()
            } else {
                let cards = content.cards();
                cards[usize::from(catalog_index) % cards.len()].id.clone()
            };
            Action::PlayCard {
                card_id,
                target_enemy_id: format!("enemy-{}", target % 2),
            }
        }
        FuzzAction::EndPlayerTurn => Action::EndPlayerTurn,
        FuzzAction::MoveSeat { seat } => Action::MoveSeat {
            seat_id: SEATS[usize::from(seat) % SEATS.len()].to_string(),
        },
        FuzzAction::RestHeal => Action::RestHeal,
        FuzzAction::BuyCard { offer: i } => Action::BuyCard {
            card_id: offer(game, i),
        },
        FuzzAction::LeaveShop => Action::LeaveShop,
        FuzzAction::PickRewardCard { offer: i } => Action::PickRewardCard {
            card_id: offer(game, i),
        },
        FuzzAction::SkipReward => Action::SkipReward,
        FuzzAction::AbandonRun => Action::AbandonRun,
    }
}

fuzz_target!(|input: RunInput| {
    let content = Content::builtin();
    let mut game = Roguelike::seeded(content, RulesConfig::default(), input.seed);
    let class = if input.analyst { "analyst" } else { "pm" };
    if game.start_run(class).is_err() {
        return;
    }

    // Cap length to keep iterations fast
    for action in input.actions.iter().take(300) {
        let action = resolve(&game, content, action);
        let before = game.session().cloned();
        match game.apply(&action) {
            Ok(()) => {
                let Some(session) = game.session() else {
                    // abandoned: start over
                    if game.start_run(class).is_err() {
                        return;
                    }
                    continue;
                };
                let violations = check_invariants(session);
                assert!(
                    violations.is_empty(),
                    "Invariants violated after {:?}: {:?}",
                    action,
                    violations
                );
            }
            Err(_) => assert_eq!(
                game.session().cloned(),
                before,
                "Rejected {:?} changed the session",
                action
            ),
        }
    }
});
