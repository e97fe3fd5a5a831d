use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Pokemon Arena battle engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleEngineError {
    /// Error related to catalog lookup or loading
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The session is not in a state that accepts the call
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// The requested action is not legal for the acting combatant
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error reported by a remote battle service
    #[error("Remote service error: {0}")]
    Remote(#[from] RemoteError),
    /// Battle rules failed to load or validate
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),
}

/// Errors related to species and move data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),
    #[error("Move not found: {0}")]
    MoveNotFound(String),
    #[error("Malformed catalog data: {0}")]
    MalformedData(String),
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    #[error("the battle is already over")]
    BattleOver,
    #[error("it is not the player's turn")]
    NotPlayersTurn,
}

/// Errors related to submitted actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The move exists but is not one of the combatant's slotted moves
    #[error("{combatant} does not know {move_key}")]
    MoveNotAvailable { combatant: String, move_key: String },
    #[error("{0} has no moves to choose from")]
    NoMovesAvailable(String),
    #[error("no species other than {0} is available as an opponent")]
    NoDistinctOpponent(String),
}

/// Errors reported by a remote battle service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service could not be reached; local resolution is still possible
    #[error("remote battle service unavailable: {0}")]
    Unavailable(String),
    /// The service answered but refused the move
    #[error("remote battle service rejected the move: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid rule `{field}`: {reason}")]
    InvalidRule { field: &'static str, reason: String },
    #[error("Malformed rules data: {0}")]
    MalformedData(String),
    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Convenience type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Convenience type alias for catalog lookups and loading
pub type CatalogResult<T> = Result<T, CatalogError>;

pub type RulesResult<T> = Result<T, RulesError>;
