//! Pokemon Arena Battle Engine
//!
//! Resolves turn-based battles between two creatures: damage, type
//! effectiveness, status effects and turn order, producing a new session state
//! and a player-facing event log for every submitted action. The engine does
//! no I/O of its own and takes all randomness from an injected [`TurnRng`].

pub mod battle;
pub mod catalog;
pub mod combatant;
pub mod errors;
pub mod rules;
pub mod type_chart;

// --- From the `schema` crate ---
pub use schema::{BaseStats, ElementType, MoveData, SecondaryEffect, SpeciesData, StatusKind};

// --- Core engine API ---
pub use battle::ai::{Behavior, RandomAI, ScoringAI};
pub use battle::calculators::{compute_damage, compute_damage_with_rolls, DamageOutcome, DamageRolls};
pub use battle::engine::BattleEngine;
pub use battle::runner::{
    BattleRunner, Offline, RemoteBattleService, RemoteTurn, ResolvedBy, TurnReport,
};
pub use battle::state::{
    BattleEvent, BattleSession, EventBus, GameState, LogCategory, LogEvent, Side, TurnRng,
};

// --- Data and configuration ---
pub use catalog::{normalize_key, Catalog};
pub use combatant::Combatant;
pub use rules::{BattleRules, TurnOrder};
pub use type_chart::TypeChart;

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, CatalogError, CatalogResult,
    RemoteError, RulesError, RulesResult,
};
