use crate::battle::ai::Behavior;
use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleSession, GameState, LogEvent, Side, TurnRng};
use crate::combatant::Combatant;
use crate::errors::{BattleResult, RemoteError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An external service that resolves turns authoritatively for a battle it
/// tracks under its own identifier.
pub trait RemoteBattleService {
    fn submit_move(
        &mut self,
        remote_battle_id: &str,
        move_key: &str,
    ) -> Result<RemoteTurn, RemoteError>;
}

/// State returned by a remote service after it resolved a turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RemoteTurn {
    pub player: Combatant,
    pub opponent: Combatant,
    pub turn_number: u32,
    pub game_state: GameState,
    #[serde(default)]
    pub events: Vec<LogEvent>,
}

/// Stand-in service for battles with no remote: always unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

impl RemoteBattleService for Offline {
    fn submit_move(&mut self, _: &str, _: &str) -> Result<RemoteTurn, RemoteError> {
        Err(RemoteError::Unavailable(
            "no remote battle service configured".to_string(),
        ))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedBy {
    Remote,
    Local,
}

/// What one submitted action produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub events: Vec<LogEvent>,
    pub resolved_by: ResolvedBy,
}

/// High-level interface over one session: validates actions, prefers the
/// remote service when one is attached and falls back to local resolution
/// when it cannot be reached.
///
/// `submit_action` takes `&mut self`, so submissions for a session are
/// serialized by construction.
pub struct BattleRunner<'e, R = Offline> {
    engine: &'e BattleEngine,
    session: BattleSession,
    opponent: Box<dyn Behavior>,
    remote: Option<(R, String)>,
}

impl<'e> BattleRunner<'e, Offline> {
    /// A runner that always resolves locally.
    pub fn new(engine: &'e BattleEngine, session: BattleSession, opponent: Box<dyn Behavior>) -> Self {
        Self {
            engine,
            session,
            opponent,
            remote: None,
        }
    }
}

impl<'e, R: RemoteBattleService> BattleRunner<'e, R> {
    pub fn with_remote(
        engine: &'e BattleEngine,
        session: BattleSession,
        opponent: Box<dyn Behavior>,
        remote: R,
        remote_battle_id: String,
    ) -> Self {
        Self {
            engine,
            session,
            opponent,
            remote: Some((remote, remote_battle_id)),
        }
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn into_session(self) -> BattleSession {
        self.session
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        self.session.combatant(side)
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.session.winner()
    }

    pub fn submit_action(&mut self, move_key: &str, rng: &mut TurnRng) -> BattleResult<TurnReport> {
        self.engine
            .validate_action(&self.session, Side::Player, move_key)?;

        if let Some((remote, remote_battle_id)) = self.remote.as_mut() {
            match remote.submit_move(remote_battle_id, move_key) {
                Ok(turn) => {
                    let events = apply_remote_turn(&mut self.session, turn);
                    return Ok(TurnReport {
                        events,
                        resolved_by: ResolvedBy::Remote,
                    });
                }
                Err(RemoteError::Unavailable(reason)) => {
                    warn!(
                        battle_id = %self.session.battle_id,
                        %reason,
                        "remote battle service unavailable, resolving turn locally"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        let bus = self
            .engine
            .submit_action(&mut self.session, move_key, self.opponent.as_ref(), rng)?;
        Ok(TurnReport {
            events: bus.log_events(),
            resolved_by: ResolvedBy::Local,
        })
    }
}

/// Remote state always replaces the local state wholesale.
fn apply_remote_turn(session: &mut BattleSession, turn: RemoteTurn) -> Vec<LogEvent> {
    debug!(
        battle_id = %session.battle_id,
        turn = turn.turn_number,
        "applying remote turn"
    );
    session.player = turn.player.sanitized();
    session.opponent = turn.opponent.sanitized();
    session.turn_number = turn.turn_number;
    session.game_state = match turn.game_state {
        GameState::TurnInProgress => GameState::WaitingForPlayerAction,
        other => other,
    };
    turn.events
}
