// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Boardroom: a deterministic deck-building roguelike engine.
//!
//! The player persuades a sequence of meeting participants by playing
//! cards from a deck, across a layered map of fights, rest stops and shops,
//! ending in a boss meeting that must be won on agreement as well as
//! resistance.
//!
//! Every rule is a pure function over plain state records; the
//! [`game::Roguelike`] orchestrator owns the single authoritative session
//! and is seeded, so a run is fully reproduced by its seed and action log.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / autoplay / replay           │
//! ├─────────────────────────────────────┤
//! │   Run orchestrator (Roguelike)      │
//! ├──────────┬──────────┬───────────────┤
//! │   Deck   │   Map    │    Combat     │
//! ├──────────┴──────────┴───────────────┤
//! │   Content registry + rules config   │
//! └─────────────────────────────────────┘
//! ```

pub mod autoplay;
pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod replay;

pub use config::RulesConfig;
pub use content::Content;
pub use error::{ActionError, ContentError, MapGenError, ReplayError};

// Re-export key game types at crate root for convenience
pub use game::{CombatState, DeckState, MapNode, Roguelike, RunPhase, RunState, Session};
pub use replay::{Action, Recording};
