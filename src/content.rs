//! Content registry: static card, enemy, seat and class definitions.
//!
//! Definitions are immutable once loaded. The [`Content`] aggregate owns the
//! definition tables and an id index for each, so every lookup is a single
//! hash probe. The builtin catalog is available through [`Content::builtin`];
//! alternative catalogs can be loaded from JSON and are validated on load.

mod builtin;
mod cards;
mod enemies;
mod seats;

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

pub use cards::{CardDef, CardEffect, CardTag, MAX_CARD_COST};
pub use enemies::{EnemyDef, Intent, IntentKind};
pub use seats::{SeatDef, SeatEffect, SeatLayout};

/// A playable class with its starting deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Unique identifier (e.g. `pm`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavour text shown on class selection.
    #[serde(default)]
    pub description: String,
    /// Card ids the master deck starts with. Duplicates are meaningful.
    pub starting_deck: Vec<String>,
}

/// Map generation parameters that depend on content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Enemies bound to ordinary combat nodes, drawn uniformly with replacement.
    pub combat_enemy_pool: Vec<String>,
    /// Enemy bound to the single boss node.
    pub boss_id: String,
    /// Row indices holding rest nodes.
    #[serde(default)]
    pub rest_rows: Vec<usize>,
    /// Row indices holding shop nodes.
    #[serde(default)]
    pub shop_rows: Vec<usize>,
}

/// The raw definition tables, as stored in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDefs {
    /// Card catalog.
    pub cards: Vec<CardDef>,
    /// Enemy catalog.
    pub enemies: Vec<EnemyDef>,
    /// Seat layout catalog.
    pub seat_layouts: Vec<SeatLayout>,
    /// Playable classes.
    pub classes: Vec<ClassDef>,
    /// Map generation parameters.
    pub map: MapConfig,
}

/// Indexed, immutable content catalog.
#[derive(Debug, Clone)]
pub struct Content {
    defs: ContentDefs,
    card_index: HashMap<String, usize>,
    enemy_index: HashMap<String, usize>,
    layout_index: HashMap<String, usize>,
    class_index: HashMap<String, usize>,
}

static BUILTIN: LazyLock<Content> = LazyLock::new(|| Content::indexed(builtin::defs()));

fn index_by<T>(items: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (id(item).to_string(), i))
        .collect()
}

impl Content {
    /// Validate definitions and build the lookup indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if ids repeat, references dangle, or a definition
    /// breaks a content rule (see [`Content::validate`]).
    pub fn new(defs: ContentDefs) -> Result<Self, ContentError> {
        let content = Self::indexed(defs);
        content.validate()?;
        Ok(content)
    }

    /// The builtin meeting-room catalog.
    #[must_use]
    pub fn builtin() -> &'static Content {
        &BUILTIN
    }

    /// Parse and validate a JSON content document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let defs: ContentDefs = serde_json::from_str(json)?;
        Self::new(defs)
    }

    /// Load and validate a JSON content file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_json_file(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn indexed(defs: ContentDefs) -> Self {
        Self {
            card_index: index_by(&defs.cards, |c| &c.id),
            enemy_index: index_by(&defs.enemies, |e| &e.id),
            layout_index: index_by(&defs.seat_layouts, |l| &l.id),
            class_index: index_by(&defs.classes, |c| &c.id),
            defs,
        }
    }

    /// The underlying definition tables.
    #[must_use]
    pub fn defs(&self) -> &ContentDefs {
        &self.defs
    }

    /// All cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[CardDef] {
        &self.defs.cards
    }

    /// All enemies in catalog order.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyDef] {
        &self.defs.enemies
    }

    /// All classes in catalog order.
    #[must_use]
    pub fn classes(&self) -> &[ClassDef] {
        &self.defs.classes
    }

    /// Map generation parameters.
    #[must_use]
    pub fn map_config(&self) -> &MapConfig {
        &self.defs.map
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&CardDef> {
        self.card_index.get(id).map(|&i| &self.defs.cards[i])
    }

    /// Look up an enemy by id.
    #[must_use]
    pub fn enemy(&self, id: &str) -> Option<&EnemyDef> {
        self.enemy_index.get(id).map(|&i| &self.defs.enemies[i])
    }

    /// Look up a seat layout by id.
    #[must_use]
    pub fn seat_layout(&self, id: &str) -> Option<&SeatLayout> {
        self.layout_index.get(id).map(|&i| &self.defs.seat_layouts[i])
    }

    /// Look up a class by id.
    #[must_use]
    pub fn class(&self, id: &str) -> Option<&ClassDef> {
        self.class_index.get(id).map(|&i| &self.defs.classes[i])
    }

    /// Cards a class may be offered: unrestricted cards plus its own.
    pub fn cards_for_class<'a>(&'a self, class_id: &'a str) -> impl Iterator<Item = &'a CardDef> {
        self.defs.cards.iter().filter(move |c| c.available_to(class_id))
    }

    /// Check every content rule.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ContentError> {
        check_unique("card", self.defs.cards.iter().map(|c| c.id.as_str()))?;
        check_unique("enemy", self.defs.enemies.iter().map(|e| e.id.as_str()))?;
        check_unique("seat layout", self.defs.seat_layouts.iter().map(|l| l.id.as_str()))?;
        check_unique("class", self.defs.classes.iter().map(|c| c.id.as_str()))?;

        for card in &self.defs.cards {
            card.validate()?;
            if let Some(class_id) = &card.class
                && self.class(class_id).is_none()
            {
                return Err(ContentError::DanglingReference {
                    owner: card.id.clone(),
                    kind: "class",
                    id: class_id.clone(),
                });
            }
        }

        for enemy in &self.defs.enemies {
            enemy.validate()?;
        }

        for layout in &self.defs.seat_layouts {
            check_unique("seat", layout.seats.iter().map(|s| s.id.as_str()))?;
        }

        for class in &self.defs.classes {
            for card_id in &class.starting_deck {
                if self.card(card_id).is_none() {
                    return Err(ContentError::DanglingReference {
                        owner: class.id.clone(),
                        kind: "card",
                        id: card_id.clone(),
                    });
                }
            }
        }

        self.validate_map_config()
    }

    fn validate_map_config(&self) -> Result<(), ContentError> {
        let map = &self.defs.map;
        for enemy_id in &map.combat_enemy_pool {
            match self.enemy(enemy_id) {
                None => {
                    return Err(ContentError::DanglingReference {
                        owner: "map".to_string(),
                        kind: "enemy",
                        id: enemy_id.clone(),
                    });
                }
                Some(enemy) if enemy.is_boss => {
                    return Err(ContentError::Invalid {
                        kind: "enemy pool entry",
                        id: enemy_id.clone(),
                        reason: "bosses cannot appear in the combat pool".to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        match self.enemy(&map.boss_id) {
            None => Err(ContentError::DanglingReference {
                owner: "map".to_string(),
                kind: "enemy",
                id: map.boss_id.clone(),
            }),
            Some(boss) if !boss.is_boss => Err(ContentError::Invalid {
                kind: "boss",
                id: boss.id.clone(),
                reason: "map boss must be flagged as a boss".to_string(),
            }),
            Some(_) => Ok(()),
        }
    }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_validates() {
        Content::builtin().validate().unwrap();
    }

    #[test]
    fn test_builtin_catalog_sizes() {
        let content = Content::builtin();
        assert!((25..=35).contains(&content.cards().len()));
        assert!(content.enemies().len() >= 4);
        assert!(content.enemies().iter().any(|e| e.is_boss));
        assert_eq!(content.classes().len(), 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let content = Content::builtin();
        let strike = content.card("strike").unwrap();
        assert_eq!(strike.cost, 1);
        assert_eq!(strike.effects, vec![CardEffect::Damage(6)]);

        let junior = content.enemy("junior_dev").unwrap();
        assert_eq!(junior.hp, 25);
        assert!(!junior.is_boss);

        assert!(content.card("nope").is_none());
        assert!(content.enemy("nope").is_none());
        assert!(content.seat_layout("standard_meeting").is_some());
    }

    #[test]
    fn test_starting_decks_in_range() {
        let content = Content::builtin();
        for class in content.classes() {
            assert!(
                (8..=12).contains(&class.starting_deck.len()),
                "class {} has {} starting cards",
                class.id,
                class.starting_deck.len()
            );
        }
    }

    #[test]
    fn test_boss_has_agreement_target() {
        let content = Content::builtin();
        let boss = content.enemy(&content.map_config().boss_id).unwrap();
        assert!(boss.is_boss);
        assert!(boss.agreement_target() > 0);
    }

    #[test]
    fn test_cards_for_class_filters_other_classes() {
        let content = Content::builtin();
        let pm_cards: Vec<_> = content.cards_for_class("pm").collect();
        assert!(pm_cards.iter().any(|c| c.id == "pm_consensus"));
        assert!(pm_cards.iter().any(|c| c.id == "strike"));
        assert!(!pm_cards.iter().any(|c| c.id == "analyst_chart"));
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let json = serde_json::to_string(Content::builtin().defs()).unwrap();
        let loaded = Content::from_json_str(&json).unwrap();
        assert_eq!(loaded.defs(), Content::builtin().defs());
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let mut defs = Content::builtin().defs().clone();
        let dup = defs.cards[0].clone();
        defs.cards.push(dup);
        let err = Content::new(defs).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { kind: "card", .. }));
    }

    #[test]
    fn test_dangling_starting_deck_rejected() {
        let mut defs = Content::builtin().defs().clone();
        defs.classes[0].starting_deck.push("missing_card".to_string());
        let err = Content::new(defs).unwrap_err();
        assert!(matches!(err, ContentError::DanglingReference { kind: "card", .. }));
    }

    #[test]
    fn test_boss_in_combat_pool_rejected() {
        let mut defs = Content::builtin().defs().clone();
        let boss_id = defs.map.boss_id.clone();
        defs.map.combat_enemy_pool.push(boss_id);
        assert!(matches!(
            Content::new(defs),
            Err(ContentError::Invalid { .. })
        ));
    }

    #[test]
    fn test_boss_without_agreement_target_rejected() {
        let mut defs = Content::builtin().defs().clone();
        let boss_id = defs.map.boss_id.clone();
        if let Some(boss) = defs.enemies.iter_mut().find(|e| e.id == boss_id) {
            boss.agreement_target = None;
        }
        assert!(matches!(
            Content::new(defs),
            Err(ContentError::Invalid { kind: "enemy", .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Content::from_json_str("{ not json"),
            Err(ContentError::Json(_))
        ));
    }
}
