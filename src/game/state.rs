//! Run-level state records.

use serde::{Deserialize, Serialize};

use crate::game::{CombatState, MapNode};

/// Phase of the run state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// No run in progress; waiting for a class.
    ClassSelect,
    /// Choosing the next node.
    Map,
    /// Fighting (ordinary or boss).
    Combat,
    /// Picking a card after a won fight.
    Reward,
    /// At a rest node.
    Rest,
    /// At a shop node.
    Shop,
    /// The boss was beaten. Terminal.
    BossVictory,
    /// Focus ran out. Terminal.
    GameOver,
}

impl RunPhase {
    /// Whether no further action can change the run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RunPhase::BossVictory | RunPhase::GameOver)
    }
}

/// Top-level state of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    /// Current phase.
    pub phase: RunPhase,
    /// Selected class id.
    pub class_id: String,
    /// Node the player last entered.
    pub current_node_id: Option<String>,
    /// Every node of the map.
    pub map_nodes: Vec<MapNode>,
    /// Rows in the map.
    pub total_rows: usize,
    /// Row of the last entered node; `None` before the first node.
    pub current_row: Option<usize>,
    /// Gold on hand.
    pub gold: u32,
    /// Focus, 0..=max_focus.
    pub focus: u32,
    /// Focus ceiling.
    pub max_focus: u32,
    /// Card ids on offer in the current shop or reward screen.
    pub offers: Vec<String>,
}

impl RunState {
    /// Find a map node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.map_nodes.iter().find(|n| n.id == id)
    }

    /// The node the player last entered.
    #[must_use]
    pub fn current_node(&self) -> Option<&MapNode> {
        self.current_node_id.as_deref().and_then(|id| self.node(id))
    }
}

/// Everything the orchestrator owns for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Run-level state.
    pub run: RunState,
    /// Fight in progress; present exactly while the phase is combat.
    pub combat: Option<CombatState>,
    /// Owned card ids. Each fight's draw pile is built from this.
    pub master_deck: Vec<String>,
}
