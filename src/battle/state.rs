use crate::combatant::Combatant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::StatusKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    WaitingForPlayerAction,
    TurnInProgress,
    PlayerWin,
    OpponentWin,
    Draw,
    /// The given side left the battle; nobody wins.
    Escaped(Side),
}

impl GameState {
    pub fn win_for(side: Side) -> GameState {
        match side {
            Side::Player => GameState::PlayerWin,
            Side::Opponent => GameState::OpponentWin,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameState::PlayerWin | GameState::OpponentWin | GameState::Draw | GameState::Escaped(_)
        )
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameState::PlayerWin => Some(Side::Player),
            GameState::OpponentWin => Some(Side::Opponent),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum ActionFailureReason {
    IsAsleep,
    IsParalyzed,
    PokemonFainted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded,

    // Actions
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
    },
    ActionFailed {
        side: Side,
        pokemon: String,
        reason: ActionFailureReason,
    },
    CriticalHit {
        attacker: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },

    // Health
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    PokemonHealed {
        side: Side,
        target: String,
        amount: u16,
        new_hp: u16,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },

    // Status
    StatusApplied {
        side: Side,
        target: String,
        status: StatusKind,
        turns: u8,
    },
    StatusDamage {
        side: Side,
        target: String,
        status: StatusKind,
        damage: u16,
        remaining_hp: u16,
    },
    StatusRemoved {
        side: Side,
        target: String,
        status: StatusKind,
    },
    DefenseChanged {
        side: Side,
        target: String,
        old_value: u16,
        new_value: u16,
    },

    // Battle end
    PokemonEscaped {
        side: Side,
        pokemon: String,
    },
    BattleEnded {
        outcome: GameState,
        winner_name: Option<String>,
    },
}

/// The categories a player-facing log line can fall into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Informational,
    Damage,
    Heal,
    Status,
}

/// One rendered line of the battle log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub text: String,
    pub category: LogCategory,
}

impl BattleEvent {
    /// Render the event as player-facing text. Returns `None` for events that
    /// only matter to the engine.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded => None,

            BattleEvent::MoveUsed {
                pokemon, move_name, ..
            } => Some(format!("{} used {}!", pokemon, move_name)),
            BattleEvent::ActionFailed {
                pokemon, reason, ..
            } => Some(match reason {
                ActionFailureReason::IsAsleep => format!("{} is fast asleep.", pokemon),
                ActionFailureReason::IsParalyzed => {
                    format!("{} is paralyzed! It can't move!", pokemon)
                }
                ActionFailureReason::PokemonFainted => format!("{} can't battle!", pokemon),
            }),
            BattleEvent::CriticalHit { .. } => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => {
                if *multiplier == 0.0 {
                    Some("It had no effect...".to_string())
                } else if *multiplier > 1.0 {
                    Some("It's super effective!".to_string())
                } else if *multiplier < 1.0 {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }

            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::PokemonHealed { target, amount, .. } => {
                if *amount == 0 {
                    Some(format!("{}'s HP is already full!", target))
                } else {
                    Some(format!("{} recovered {} HP!", target, amount))
                }
            }
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted!", pokemon)),

            BattleEvent::StatusApplied { target, status, .. } => Some(match status {
                StatusKind::Burn => format!("{} was burned!", target),
                StatusKind::Poison => format!("{} was poisoned!", target),
                StatusKind::Paralyze => {
                    format!("{} is paralyzed! It may be unable to move!", target)
                }
                StatusKind::Sleep => format!("{} fell asleep!", target),
            }),
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target, status, damage
            )),
            BattleEvent::StatusRemoved { target, status, .. } => Some(match status {
                StatusKind::Sleep => format!("{} woke up!", target),
                other => format!("{} recovered from its {}!", target, other),
            }),
            BattleEvent::DefenseChanged {
                target,
                old_value,
                new_value,
                ..
            } => Some(if new_value > old_value {
                format!("{}'s Defense rose!", target)
            } else if new_value < old_value {
                format!("{}'s Defense fell!", target)
            } else {
                format!("{}'s Defense won't go any further!", target)
            }),

            BattleEvent::PokemonEscaped { pokemon, .. } => {
                Some(format!("{} teleported away!", pokemon))
            }
            BattleEvent::BattleEnded {
                outcome,
                winner_name,
            } => Some(match (outcome, winner_name) {
                (GameState::Draw, _) => "The battle ended in a draw!".to_string(),
                (GameState::Escaped(_), _) => "The battle ended with no winner.".to_string(),
                (_, Some(name)) => format!("{} won the battle!", name),
                (_, None) => "The battle is over!".to_string(),
            }),
        }
    }

    pub fn category(&self) -> LogCategory {
        match self {
            BattleEvent::CriticalHit { .. }
            | BattleEvent::DamageDealt { .. }
            | BattleEvent::PokemonFainted { .. } => LogCategory::Damage,
            BattleEvent::PokemonHealed { .. } => LogCategory::Heal,
            BattleEvent::ActionFailed { .. }
            | BattleEvent::StatusApplied { .. }
            | BattleEvent::StatusDamage { .. }
            | BattleEvent::StatusRemoved { .. }
            | BattleEvent::DefenseChanged { .. } => LogCategory::Status,
            BattleEvent::TurnStarted { .. }
            | BattleEvent::TurnEnded
            | BattleEvent::MoveUsed { .. }
            | BattleEvent::AttackTypeEffectiveness { .. }
            | BattleEvent::PokemonEscaped { .. }
            | BattleEvent::BattleEnded { .. } => LogCategory::Informational,
        }
    }

    pub fn to_log_event(&self) -> Option<LogEvent> {
        self.format().map(|text| LogEvent {
            text,
            category: self.category(),
        })
    }
}

/// Event bus for collecting the events of one resolved round.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The player-facing log for the collected events, silent events skipped.
    pub fn log_events(&self) -> Vec<LogEvent> {
        self.events
            .iter()
            .filter_map(BattleEvent::to_log_event)
            .collect()
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Print formatted text for each event, falling back to debug output for
    /// silent events.
    pub fn print_formatted(&self) {
        for event in &self.events {
            match event.format() {
                Some(formatted) => println!("  {}", formatted),
                None => println!("  {:?} (silent)", event),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    /// Fixed outcomes in 1..=100, consumed in order.
    Scripted { outcomes: Vec<u8>, index: usize },
}

/// The single source of randomness for battle resolution.
///
/// Every draw is made through one of the methods below and names the reason it
/// was made, so scripted test runs can state exactly which rolls a round uses.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    fn next_scripted(outcomes: &[u8], index: &mut usize, reason: &str) -> u8 {
        let Some(&outcome) = outcomes.get(*index) else {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        };
        *index += 1;
        outcome
    }

    /// A roll in 1..=100.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(1..=100),
            RngSource::Scripted { outcomes, index } => Self::next_scripted(outcomes, index, reason),
        };
        trace!(outcome, reason, "rng outcome");
        outcome
    }

    /// True with `percent`% probability.
    pub fn chance(&mut self, percent: u8, reason: &str) -> bool {
        self.next_outcome(reason) <= percent
    }

    /// A value in [0, 1). A scripted outcome `n` maps to `(n - 1) / 100`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<f64>(),
            RngSource::Scripted { outcomes, index } => {
                f64::from(Self::next_scripted(outcomes, index, reason).saturating_sub(1)) / 100.0
            }
        };
        trace!(value, reason, "rng unit");
        value
    }

    /// An integer in `low..=high`. A scripted outcome `n` maps to
    /// `low + (n - 1) % (high - low + 1)`.
    pub fn next_in_range(&mut self, low: u8, high: u8, reason: &str) -> u8 {
        let (low, high) = (low.min(high), low.max(high));
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                let span = u16::from(high - low) + 1;
                let roll = u16::from(Self::next_scripted(outcomes, index, reason).saturating_sub(1));
                low + (roll % span) as u8
            }
        };
        trace!(value, reason, "rng range");
        value
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSession {
    pub battle_id: String,
    pub player: Combatant,
    pub opponent: Combatant,
    /// Completed rounds
    pub turn_number: u32,
    pub game_state: GameState,
}

impl BattleSession {
    pub fn new(battle_id: String, player: Combatant, opponent: Combatant) -> Self {
        Self {
            battle_id,
            player,
            opponent,
            turn_number: 0,
            game_state: GameState::WaitingForPlayerAction,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_state.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.game_state.winner()
    }

    pub fn is_player_turn(&self) -> bool {
        self.game_state == GameState::WaitingForPlayerAction
    }

    /// The final state once the battle is over.
    pub fn outcome(&self) -> Option<GameState> {
        self.is_over().then_some(self.game_state)
    }
}
