//! The builtin meeting-room catalog.

use super::{
    CardDef, CardEffect, CardTag, ClassDef, ContentDefs, EnemyDef, Intent, IntentKind, MapConfig,
    SeatDef, SeatEffect, SeatLayout,
};

use CardEffect::{Agreement, Block, Damage, Draw, Energy, FocusDamage, FocusRestore};
use CardTag::{Data, Ease, Persuade, Pressure};

fn card(
    id: &str,
    name: &str,
    cost: u32,
    tag: CardTag,
    description: &str,
    effects: &[CardEffect],
    class: Option<&str>,
) -> CardDef {
    CardDef {
        id: id.to_string(),
        name: name.to_string(),
        cost,
        tag,
        description: description.to_string(),
        effects: effects.to_vec(),
        class: class.map(str::to_string),
    }
}

fn intent(kind: IntentKind, value: u32, description: &str) -> Intent {
    Intent {
        kind,
        value,
        description: description.to_string(),
    }
}

fn seat(id: &str, name: &str, row: u32, col: u32, effect: Option<SeatEffect>) -> SeatDef {
    SeatDef {
        id: id.to_string(),
        name: name.to_string(),
        row,
        col,
        effect,
    }
}

fn cards() -> Vec<CardDef> {
    const PM: Option<&str> = Some("pm");
    const ANALYST: Option<&str> = Some("analyst");
    vec![
        // basics
        card("strike", "Speak Up", 1, Persuade, "Reduce resistance by 6", &[Damage(6)], None),
        card("defend", "Defensive Logic", 1, Ease, "Gain 5 block", &[Block(5)], None),
        // shared
        card("strong_argument", "Strong Argument", 2, Pressure, "Reduce resistance by 10", &[Damage(10)], None),
        card("quick_note", "Quick Note", 0, Data, "Draw 1 card", &[Draw(1)], None),
        card("coffee_break", "Coffee Break", 1, Ease, "Gain 8 block, restore 5 focus", &[Block(8), FocusRestore(5)], None),
        card("small_talk", "Small Talk", 1, Persuade, "Agreement +5, gain 3 block", &[Agreement(5), Block(3)], None),
        card("redirect", "Redirect", 1, Persuade, "Reduce resistance by 4, draw 1", &[Damage(4), Draw(1)], None),
        card("deadline", "Deadline Pressure", 2, Pressure, "Reduce resistance by 12, lose 5 focus", &[Damage(12), FocusDamage(5)], None),
        card("empathy", "Empathy", 1, Ease, "Agreement +8", &[Agreement(8)], None),
        card("rebuttal", "Rebuttal", 1, Pressure, "Reduce resistance by 8", &[Damage(8)], None),
        card("deep_breath", "Deep Breath", 0, Ease, "Restore 3 focus", &[FocusRestore(3)], None),
        card("data_reference", "Cite the Data", 1, Data, "Reduce resistance by 7", &[Damage(7)], None),
        card("compromise", "Compromise", 2, Persuade, "Agreement +10, gain 5 block", &[Agreement(10), Block(5)], None),
        card("silent_pressure", "Silent Pressure", 0, Pressure, "Reduce resistance by 3", &[Damage(3)], None),
        // pm
        card("pm_facilitate", "Facilitate", 1, Persuade, "Agreement +6, draw 1", &[Agreement(6), Draw(1)], PM),
        card("pm_agenda", "Set the Agenda", 2, Persuade, "Agreement +12, gain 4 block", &[Agreement(12), Block(4)], PM),
        card("pm_timeline", "Present a Timeline", 1, Data, "Reduce resistance by 5, agreement +5", &[Damage(5), Agreement(5)], PM),
        card("pm_delegate", "Delegate", 0, Ease, "Gain 1 energy", &[Energy(1)], PM),
        card("pm_summary", "Interim Summary", 1, Persuade, "Agreement +4, gain 4 block, draw 1", &[Agreement(4), Block(4), Draw(1)], PM),
        card("pm_consensus", "Reach Consensus", 3, Persuade, "Agreement +20", &[Agreement(20)], PM),
        // analyst
        card("analyst_insight", "Insight", 1, Data, "Reduce resistance by 8, draw 1", &[Damage(8), Draw(1)], ANALYST),
        card("analyst_chart", "Show the Chart", 2, Data, "Reduce resistance by 14", &[Damage(14)], ANALYST),
        card("analyst_benchmark", "Benchmark", 1, Data, "Reduce resistance by 5, agreement +3", &[Damage(5), Agreement(3)], ANALYST),
        card("analyst_hypothesis", "Test a Hypothesis", 0, Data, "Draw 2 cards, lose 3 focus", &[Draw(2), FocusDamage(3)], ANALYST),
        card("analyst_ab_test", "A/B Test", 1, Data, "Reduce resistance by 6, gain 6 block", &[Damage(6), Block(6)], ANALYST),
        card("analyst_dashboard", "Dashboard", 2, Data, "Reduce resistance by 10, draw 2", &[Damage(10), Draw(2)], ANALYST),
    ]
}

fn enemies() -> Vec<EnemyDef> {
    use IntentKind::{Attack, Debuff, Defend};
    vec![
        EnemyDef {
            id: "junior_dev".to_string(),
            name: "Junior Developer".to_string(),
            hp: 25,
            is_boss: false,
            agreement_target: None,
            intents: vec![
                intent(Attack, 6, "\"That's technically impossible.\""),
                intent(Defend, 4, "Focuses hard on typing"),
            ],
        },
        EnemyDef {
            id: "marketing_lead".to_string(),
            name: "Marketing Lead".to_string(),
            hp: 35,
            is_boss: false,
            agreement_target: None,
            intents: vec![
                intent(Attack, 8, "\"Hitting the KPI comes first.\""),
                intent(Attack, 5, "\"Look at the customer feedback.\""),
                intent(Defend, 6, "Flips through slides defensively"),
            ],
        },
        EnemyDef {
            id: "legacy_engineer".to_string(),
            name: "Legacy Guardian".to_string(),
            hp: 45,
            is_boss: false,
            agreement_target: None,
            intents: vec![
                intent(Defend, 8, "\"We've always done it this way.\""),
                intent(Attack, 10, "\"A refactor would take six months.\""),
                intent(Debuff, 5, "A rambling explanation saps your focus"),
            ],
        },
        EnemyDef {
            id: "micromanager_boss".to_string(),
            name: "Micromanaging Team Lead".to_string(),
            hp: 80,
            is_boss: true,
            agreement_target: Some(60),
            intents: vec![
                intent(Attack, 8, "\"Why did you do it like this?\""),
                intent(Attack, 12, "\"Do it again.\""),
                intent(Debuff, 8, "Nitpicking drains a lot of focus"),
                intent(Defend, 10, "\"I'll check everything myself.\""),
            ],
        },
    ]
}

fn seat_layouts() -> Vec<SeatLayout> {
    vec![SeatLayout {
        id: "standard_meeting".to_string(),
        name: "Standard Meeting Room".to_string(),
        seats: vec![
            seat("whiteboard", "By the Whiteboard", 0, 1, Some(SeatEffect::DamageBonus { tag: Data, value: 2 })),
            seat("front_left", "Front Left", 1, 0, Some(SeatEffect::DamageBonus { tag: Pressure, value: 2 })),
            seat("front_center", "Front Center", 1, 1, None),
            seat("front_right", "Front Right", 1, 2, Some(SeatEffect::DamageBonus { tag: Persuade, value: 2 })),
            seat("back_corner", "Back Corner", 2, 0, Some(SeatEffect::CostReduction { value: 1 })),
            seat("back_center", "Back Center", 2, 1, Some(SeatEffect::FocusSave { value: 2 })),
        ],
    }]
}

fn classes() -> Vec<ClassDef> {
    let deck = |ids: &[&str]| ids.iter().map(|s| (*s).to_string()).collect();
    vec![
        ClassDef {
            id: "pm".to_string(),
            name: "Project Manager".to_string(),
            description: "Builds agreement and keeps the meeting moving.".to_string(),
            starting_deck: deck(&[
                "strike", "strike", "strike", "defend", "defend", "defend", "pm_facilitate",
                "pm_delegate", "small_talk", "quick_note",
            ]),
        },
        ClassDef {
            id: "analyst".to_string(),
            name: "Data Analyst".to_string(),
            description: "Wears down resistance with evidence.".to_string(),
            starting_deck: deck(&[
                "strike", "strike", "strike", "defend", "defend", "defend", "analyst_insight",
                "analyst_hypothesis", "data_reference", "quick_note",
            ]),
        },
    ]
}

pub(super) fn defs() -> ContentDefs {
    ContentDefs {
        cards: cards(),
        enemies: enemies(),
        seat_layouts: seat_layouts(),
        classes: classes(),
        map: MapConfig {
            combat_enemy_pool: vec![
                "junior_dev".to_string(),
                "marketing_lead".to_string(),
                "legacy_engineer".to_string(),
            ],
            boss_id: "micromanager_boss".to_string(),
            rest_rows: vec![2, 5],
            shop_rows: vec![3],
        },
    }
}
