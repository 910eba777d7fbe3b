//! Run map: a layered DAG of encounter nodes.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::content::MapConfig;
use crate::error::MapGenError;

/// Encounter type of a map node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Ordinary fight.
    Combat,
    /// Focus recovery.
    Rest,
    /// Card purchase.
    Shop,
    /// Final fight.
    Boss,
}

impl NodeType {
    /// Whether entering the node starts a fight.
    #[must_use]
    pub const fn is_fight(self) -> bool {
        matches!(self, NodeType::Combat | NodeType::Boss)
    }

    /// Nodes generated for a row of this type.
    #[must_use]
    pub const fn nodes_per_row(self) -> usize {
        match self {
            NodeType::Boss => 1,
            NodeType::Rest | NodeType::Shop => 2,
            NodeType::Combat => 3,
        }
    }
}

/// A node on the run map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    /// Identifier, unique per (row, col).
    pub id: String,
    /// Encounter type.
    pub node_type: NodeType,
    /// Depth layer, 0 is the first row.
    pub row: usize,
    /// Column within the row.
    pub col: usize,
    /// Ids of reachable nodes in the next row.
    pub connections: Vec<String>,
    /// Set once the player enters the node.
    pub visited: bool,
    /// Enemy fought here (combat and boss nodes only).
    pub enemy_id: Option<String>,
}

fn node_id(row: usize, col: usize) -> String {
    format!("node-{row}-{col}")
}

fn row_type(row: usize, total_rows: usize, config: &MapConfig) -> NodeType {
    if row + 1 == total_rows {
        NodeType::Boss
    } else if config.rest_rows.contains(&row) {
        NodeType::Rest
    } else if config.shop_rows.contains(&row) {
        NodeType::Shop
    } else {
        NodeType::Combat
    }
}

/// Generate a map with `total_rows` layers.
///
/// The last row is a single boss node. Every node of every other row
/// connects to the nodes of the next row whose column is within one of its
/// own, falling back to the first node of the next row.
///
/// # Errors
///
/// Returns an error if `total_rows` is zero or the enemy pool is empty.
pub fn generate_map<R: Rng + ?Sized>(
    total_rows: usize,
    config: &MapConfig,
    rng: &mut R,
) -> Result<Vec<MapNode>, MapGenError> {
    if total_rows == 0 {
        return Err(MapGenError::NoRows);
    }
    if config.combat_enemy_pool.is_empty() {
        return Err(MapGenError::EmptyEnemyPool);
    }

    let mut rows: Vec<Vec<MapNode>> = Vec::with_capacity(total_rows);
    for row in 0..total_rows {
        let node_type = row_type(row, total_rows, config);
        let nodes = if node_type == NodeType::Boss {
            // centered under a three-wide combat row
            vec![MapNode {
                id: node_id(row, 1),
                node_type,
                row,
                col: 1,
                connections: Vec::new(),
                visited: false,
                enemy_id: Some(config.boss_id.clone()),
            }]
        } else {
            (0..node_type.nodes_per_row())
                .map(|col| MapNode {
                    id: node_id(row, col),
                    node_type,
                    row,
                    col,
                    connections: Vec::new(),
                    visited: false,
                    enemy_id: if node_type == NodeType::Combat {
                        config.combat_enemy_pool.choose(rng).cloned()
                    } else {
                        None
                    },
                })
                .collect()
        };
        rows.push(nodes);
    }

    for r in 0..total_rows - 1 {
        let (current, rest) = rows.split_at_mut(r + 1);
        let next = &rest[0];
        for node in &mut current[r] {
            node.connections = next
                .iter()
                .filter(|n| n.col.abs_diff(node.col) <= 1)
                .map(|n| n.id.clone())
                .collect();
            if node.connections.is_empty()
                && let Some(first) = next.first()
            {
                node.connections.push(first.id.clone());
            }
        }
    }

    Ok(rows.into_iter().flatten().collect())
}

/// Whether the player may enter `node` given the current row.
///
/// `current_row` is `None` before the first node is chosen; then only row 0
/// is open. Afterwards a node must sit in the next row and be connected
/// from a visited node of the current row.
#[must_use]
pub fn is_selectable(nodes: &[MapNode], current_row: Option<usize>, node: &MapNode) -> bool {
    if node.visited {
        return false;
    }
    match current_row {
        None => node.row == 0,
        Some(row) => {
            node.row == row + 1
                && nodes
                    .iter()
                    .filter(|n| n.row == row && n.visited)
                    .any(|n| n.connections.contains(&node.id))
        }
    }
}

/// Ids of every node the player may enter next.
#[must_use]
pub fn selectable_nodes(nodes: &[MapNode], current_row: Option<usize>) -> Vec<&MapNode> {
    nodes
        .iter()
        .filter(|n| is_selectable(nodes, current_row, n))
        .collect()
}

/// Number of distinct rows in a node list.
#[must_use]
pub fn row_count(nodes: &[MapNode]) -> usize {
    nodes.iter().map(|n| n.row).collect::<HashSet<_>>().len()
}
