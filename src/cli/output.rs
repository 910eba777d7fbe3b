//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use boardroom::Content;
use boardroom::autoplay::RunSummary;
use boardroom::game::{NodeType, Session};
use serde::Serialize;

/// Format a run summary as human-readable text.
pub(super) fn format_summary_text(summary: &RunSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Run Result (seed: {}, class: {})", summary.seed, summary.class_id);
    let outcome = if summary.won() { "Boss persuaded" } else { "Run lost" };
    let _ = writeln!(output, "  Outcome: {outcome} ({:?})", summary.phase);
    let _ = writeln!(output, "  Rows cleared: {}", summary.rows_cleared);
    let _ = writeln!(output, "  Fights won: {}", summary.combats_won);
    let _ = writeln!(output, "  Turns: {}", summary.turns_played);
    let _ = writeln!(output, "  Focus: {}  Gold: {}", summary.focus, summary.gold);
    let _ = writeln!(output, "  Deck: {} cards", summary.deck_size);
    let _ = writeln!(output, "  Actions: {}", summary.actions);
    output
}

/// Format a session snapshot as human-readable text.
pub(super) fn format_session_text(session: &Session, content: &Content) -> String {
    let mut output = String::new();
    let run = &session.run;
    let _ = writeln!(output, "Phase: {:?}", run.phase);
    let _ = writeln!(
        output,
        "  Class: {}  Focus: {}/{}  Gold: {}",
        run.class_id, run.focus, run.max_focus, run.gold
    );
    let _ = writeln!(
        output,
        "  Node: {}",
        run.current_node_id.as_deref().unwrap_or("-")
    );
    let _ = writeln!(output, "  Deck: {}", session.master_deck.join(", "));
    if !run.offers.is_empty() {
        let _ = writeln!(output, "  Offers: {}", run.offers.join(", "));
    }

    if let Some(combat) = &session.combat {
        let _ = writeln!(
            output,
            "\nCombat turn {}/{}  Energy: {}/{}  Block: {}  Seat: {}",
            combat.turn,
            combat.max_turns,
            combat.energy,
            combat.max_energy,
            combat.player_block,
            combat.player_seat_id
        );
        if combat.agreement_target > 0 {
            let _ = writeln!(
                output,
                "  Agreement: {}/{}",
                combat.agreement, combat.agreement_target
            );
        }
        for enemy in &combat.enemies {
            let intent = content
                .enemy(&enemy.def_id)
                .and_then(|def| enemy.current_intent(def))
                .map_or_else(|| "-".to_string(), |i| i.description.clone());
            let _ = writeln!(
                output,
                "  {} ({}): {}/{} hp, {} block, next: {intent}",
                enemy.id, enemy.def_id, enemy.hp, enemy.max_hp, enemy.block
            );
        }
        let _ = writeln!(output, "  Hand: {}", combat.deck.hand.join(", "));
        let _ = writeln!(
            output,
            "  Draw: {}  Discard: {}  Exhaust: {}",
            combat.deck.draw_pile.len(),
            combat.deck.discard_pile.len(),
            combat.deck.exhaust_pile.len()
        );
    }
    output
}

/// Render the map one row per line, boss at the top.
pub(super) fn format_map_text(session: &Session) -> String {
    let mut output = String::new();
    let run = &session.run;
    for row in (0..run.total_rows).rev() {
        let _ = write!(output, "{row:>2} ");
        for node in run.map_nodes.iter().filter(|n| n.row == row) {
            let glyph = match node.node_type {
                NodeType::Combat => 'C',
                NodeType::Rest => 'R',
                NodeType::Shop => 'S',
                NodeType::Boss => 'B',
            };
            let mark = if run.current_node_id.as_deref() == Some(node.id.as_str()) {
                '@'
            } else if node.visited {
                '*'
            } else {
                ' '
            };
            let _ = write!(output, "[{glyph}{mark}]");
        }
        output.push('\n');
    }
    output
}

/// Format the content catalog as human-readable text.
pub(super) fn format_catalog_text(content: &Content) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Cards ({})", content.cards().len());
    for card in content.cards() {
        let class = card.class.as_deref().unwrap_or("any");
        let _ = writeln!(
            output,
            "  {:<20} {} [{:?}, {class}] {}",
            card.id, card.cost, card.tag, card.description
        );
    }

    let _ = writeln!(output, "\nEnemies ({})", content.enemies().len());
    for enemy in content.enemies() {
        let boss = if enemy.is_boss { " boss" } else { "" };
        let _ = writeln!(
            output,
            "  {:<20} {} hp{boss}, {} intents",
            enemy.id,
            enemy.hp,
            enemy.intents.len()
        );
    }

    let _ = writeln!(output, "\nClasses ({})", content.classes().len());
    for class in content.classes() {
        let _ = writeln!(
            output,
            "  {:<20} {} ({} cards)",
            class.id,
            class.name,
            class.starting_deck.len()
        );
    }

    for layout in &content.defs().seat_layouts {
        let _ = writeln!(output, "\nSeats: {}", layout.name);
        for seat in &layout.seats {
            let effect = seat
                .effect
                .map_or_else(|| "-".to_string(), |e| format!("{e:?}"));
            let _ = writeln!(
                output,
                "  {:<20} ({}, {}) {effect}",
                seat.id, seat.row, seat.col
            );
        }
    }

    output
}

/// Batch statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Runs played.
    pub(super) runs: u64,
    /// Runs ending in boss victory.
    pub(super) wins: u64,
    /// Runs rejected by the engine.
    pub(super) errors: u64,
    total_rows: u64,
    total_fights_won: u64,
    total_turns: u64,
    total_focus: u64,
    total_deck: u64,
}

impl BatchStats {
    /// Add a run to the stats.
    pub(super) fn add_result(&mut self, summary: &RunSummary) {
        self.runs += 1;
        if summary.won() {
            self.wins += 1;
        }
        self.total_rows += summary.rows_cleared as u64;
        self.total_fights_won += u64::from(summary.combats_won);
        self.total_turns += u64::from(summary.turns_played);
        self.total_focus += u64::from(summary.focus);
        self.total_deck += summary.deck_size as u64;
    }

    /// Record a failed run.
    pub(super) fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Merge another stats object into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        self.wins += other.wins;
        self.errors += other.errors;
        self.total_rows += other.total_rows;
        self.total_fights_won += other.total_fights_won;
        self.total_turns += other.total_turns;
        self.total_focus += other.total_focus;
        self.total_deck += other.total_deck;
    }

    fn avg(&self, total: u64) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        total as f64 / self.runs as f64
    }

    /// Fraction of runs won (0.0-1.0).
    pub(super) fn win_rate(&self) -> f64 {
        self.avg(self.wins)
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    class: String,
    runs: u64,
    wins: u64,
    errors: u64,
    win_rate: f64,
    avg_rows_cleared: f64,
    avg_fights_won: f64,
    avg_turns: f64,
    avg_final_focus: f64,
    avg_deck_size: f64,
    duration_secs: f64,
}

impl JsonBatchResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &BatchStats, class: &str, duration_secs: f64) -> Self {
        Self {
            class: class.to_string(),
            runs: stats.runs,
            wins: stats.wins,
            errors: stats.errors,
            win_rate: stats.win_rate(),
            avg_rows_cleared: stats.avg(stats.total_rows),
            avg_fights_won: stats.avg(stats.total_fights_won),
            avg_turns: stats.avg(stats.total_turns),
            avg_final_focus: stats.avg(stats.total_focus),
            avg_deck_size: stats.avg(stats.total_deck),
            duration_secs,
        }
    }
}

/// Format batch results as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, class: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Batch Results ({} runs, class {class})", stats.runs);
    let _ = writeln!(
        output,
        "  Wins: {} ({:.1}%)",
        stats.wins,
        stats.win_rate() * 100.0
    );
    if stats.errors > 0 {
        let _ = writeln!(output, "  Errors: {}", stats.errors);
    }
    let _ = writeln!(output, "  Avg rows cleared: {:.2}", stats.avg(stats.total_rows));
    let _ = writeln!(output, "  Avg fights won: {:.2}", stats.avg(stats.total_fights_won));
    let _ = writeln!(output, "  Avg turns: {:.1}", stats.avg(stats.total_turns));
    let _ = writeln!(output, "  Avg final focus: {:.1}", stats.avg(stats.total_focus));
    let _ = writeln!(output, "  Avg deck size: {:.1}", stats.avg(stats.total_deck));
    output
}
