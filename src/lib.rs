//! # Mon Arena
//!
//! A deterministic, turn-based battle engine for two typed combatants.
//!
//! ## Overview
//!
//! Combatants carry one or two elemental types, a level-derived stat block
//! and up to four actions. The engine arbitrates turn order, resolves
//! actions (accuracy, damage, critical hits, type effectiveness, secondary
//! conditions), processes end-of-turn persistent conditions and produces a
//! structured event log plus an aggregate summary.
//!
//! ## Architecture
//!
//! Every battle owns its two combatants and a single seeded RNG, so a fixed
//! seed replays the same event log byte for byte. Data lookup is behind the
//! [`provider::CombatantProvider`] trait; the engine itself holds no global
//! state and performs no I/O.
//!
//! ```
//! use mon_arena::provider::{CombatantProvider, StaticProvider};
//! use mon_arena::Battle;
//!
//! let provider = StaticProvider::with_canonical();
//! let pikachu = provider.combatant("pikachu", 50).unwrap();
//! let squirtle = provider.combatant("squirtle", 50).unwrap();
//! let result = Battle::new(pikachu, squirtle, 42).unwrap().run();
//! assert!(result.total_turns >= 1);
//! ```

pub mod battle;
pub mod provider;
pub mod rng;
pub mod typing;

pub use battle::event::{BattleOutcome, BattleResult, CombatantSnapshot, Event, Turn};
pub use battle::summary::BattleSummary;
pub use battle::{Battle, BattlePhase, SetupError, MAX_TURNS};
