use crate::battle::ai::{matchup_score, Behavior};
use crate::battle::calculators::calculate_attack_outcome;
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::conditions::{can_act, tick_status_effects};
use crate::battle::move_effects::{apply_secondary_effect, EffectContext};
use crate::battle::state::{BattleEvent, BattleSession, EventBus, GameState, Side, TurnRng};
use crate::catalog::{normalize_key, Catalog};
use crate::combatant::Combatant;
use crate::errors::{ActionError, BattleResult, BattleStateError, RulesResult};
use crate::rules::{BattleRules, TurnOrder};
use crate::type_chart::TypeChart;
use ordered_float::OrderedFloat;
use schema::MoveData;
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};
use tracing::debug;

/// Resolves battles against one catalog, type chart and rule set. The engine
/// itself is read-only once built and can be shared by any number of sessions.
#[derive(Debug)]
pub struct BattleEngine {
    catalog: Catalog,
    chart: TypeChart,
    rules: BattleRules,
    battles_started: AtomicU64,
}

impl BattleEngine {
    /// Fails if `rules` do not validate.
    pub fn new(catalog: Catalog, chart: TypeChart, rules: BattleRules) -> RulesResult<Self> {
        rules.validate()?;
        Ok(Self {
            catalog,
            chart,
            rules,
            battles_started: AtomicU64::new(0),
        })
    }

    /// An engine over the bundled catalog and type chart with default rules.
    pub fn builtin() -> BattleResult<Self> {
        Ok(Self::new(
            Catalog::builtin()?.clone(),
            TypeChart::builtin()?.clone(),
            BattleRules::default(),
        )?)
    }

    /// Replace the rules. Fails if `rules` do not validate.
    pub fn with_rules(mut self, rules: BattleRules) -> RulesResult<Self> {
        rules.validate()?;
        self.rules = rules;
        Ok(self)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn chart(&self) -> &TypeChart {
        &self.chart
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn create_combatant(&self, species_key: &str) -> BattleResult<Combatant> {
        let key = normalize_key(species_key);
        let species = self.catalog.get_species(&key)?;
        Ok(Combatant::from_species(&key, species))
    }

    /// Start a battle. If both keys name the same species the opponent is
    /// reselected at random among the other species.
    pub fn start_battle(
        &self,
        player_key: &str,
        opponent_key: &str,
        rng: &mut TurnRng,
    ) -> BattleResult<BattleSession> {
        let player = self.create_combatant(player_key)?;
        let mut opponent = self.create_combatant(opponent_key)?;
        if opponent.species == player.species {
            let reselected = self.pick_opponent(&player.species, rng)?;
            debug!(
                player = %player.species,
                opponent = %reselected,
                "opponent matched player species, reselected"
            );
            opponent = self.create_combatant(&reselected)?;
        }

        let id = self.battles_started.fetch_add(1, atomic::Ordering::Relaxed) + 1;
        let session = BattleSession::new(format!("battle-{}", id), player, opponent);
        debug!(
            battle_id = %session.battle_id,
            player = %session.player.species,
            opponent = %session.opponent.species,
            "battle started"
        );
        Ok(session)
    }

    /// A random species other than `player_key`.
    pub fn pick_opponent(&self, player_key: &str, rng: &mut TurnRng) -> BattleResult<String> {
        let player_key = normalize_key(player_key);
        let candidates: Vec<&str> = self
            .catalog
            .species_keys()
            .filter(|key| *key != player_key)
            .collect();
        if candidates.is_empty() {
            return Err(ActionError::NoDistinctOpponent(player_key).into());
        }
        let last = u8::try_from(candidates.len() - 1).unwrap_or(u8::MAX);
        let index = rng.next_in_range(0, last, "Opponent Selection");
        Ok(candidates[usize::from(index)].to_string())
    }

    /// The species with the best type matchup against `player_key`. Ties go
    /// to the first species in key order.
    pub fn choose_best_opponent(&self, player_key: &str) -> BattleResult<String> {
        let player_key = normalize_key(player_key);
        let player = self.catalog.get_species(&player_key)?;
        self.catalog
            .species()
            .filter(|(key, _)| *key != player_key)
            .rev()
            .max_by_key(|(_, candidate)| {
                OrderedFloat(matchup_score(&self.chart, &candidate.types, &player.types))
            })
            .map(|(key, _)| key.to_string())
            .ok_or_else(|| ActionError::NoDistinctOpponent(player_key).into())
    }

    /// Check that `side` may use `move_key` in this session, returning its
    /// move data. Nothing is mutated.
    pub fn validate_action(
        &self,
        session: &BattleSession,
        side: Side,
        move_key: &str,
    ) -> BattleResult<&MoveData> {
        if session.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        if !session.is_player_turn() {
            return Err(BattleStateError::NotPlayersTurn.into());
        }
        let key = normalize_key(move_key);
        let move_data = self.catalog.get_move(&key)?;
        let combatant = session.combatant(side);
        if !combatant.knows_move(&key) {
            return Err(ActionError::MoveNotAvailable {
                combatant: combatant.name.clone(),
                move_key: key,
            }
            .into());
        }
        Ok(move_data)
    }

    /// Submit the player's move; the opponent's move comes from `opponent`.
    pub fn submit_action(
        &self,
        session: &mut BattleSession,
        move_key: &str,
        opponent: &dyn Behavior,
        rng: &mut TurnRng,
    ) -> BattleResult<EventBus> {
        self.validate_action(session, Side::Player, move_key)?;
        let opponent_move = opponent.choose_move(Side::Opponent, session, self, rng)?;
        self.submit_turn(session, move_key, &opponent_move, rng)
    }

    /// Resolve one full round with both moves supplied. Either the whole
    /// round is applied or an error is returned with the session untouched.
    pub fn submit_turn(
        &self,
        session: &mut BattleSession,
        player_move: &str,
        opponent_move: &str,
        rng: &mut TurnRng,
    ) -> BattleResult<EventBus> {
        let player_move = self.validate_action(session, Side::Player, player_move)?;
        let opponent_move = self.validate_action(session, Side::Opponent, opponent_move)?;
        Ok(self.resolve_turn(session, player_move, opponent_move, rng))
    }

    fn resolve_turn(
        &self,
        session: &mut BattleSession,
        player_move: &MoveData,
        opponent_move: &MoveData,
        rng: &mut TurnRng,
    ) -> EventBus {
        let mut bus = EventBus::new();
        let round = session.turn_number + 1;
        debug!(
            battle_id = %session.battle_id,
            round,
            player_move = %player_move.name,
            opponent_move = %opponent_move.name,
            "resolving turn"
        );

        session.game_state = GameState::TurnInProgress;
        bus.push(BattleEvent::TurnStarted { turn_number: round });

        for side in self.action_order(session, player_move, opponent_move) {
            let move_data = match side {
                Side::Player => player_move,
                Side::Opponent => opponent_move,
            };
            self.execute_move_action(side, move_data, session, &mut bus, rng);
            if session.is_over() {
                return bus;
            }
        }

        for side in [Side::Player, Side::Opponent] {
            let commands = tick_status_effects(side, session, &self.rules);
            execute_command_batch(commands, session, &mut bus);
        }

        let outcome = match (session.player.is_fainted(), session.opponent.is_fainted()) {
            (true, true) => Some(GameState::Draw),
            (true, false) => Some(GameState::OpponentWin),
            (false, true) => Some(GameState::PlayerWin),
            (false, false) => None,
        };
        if let Some(outcome) = outcome {
            end_battle(outcome, session, &mut bus);
            return bus;
        }

        execute_command_batch(
            vec![
                BattleCommand::IncrementTurnNumber,
                BattleCommand::SetGameState(GameState::WaitingForPlayerAction),
                BattleCommand::EmitEvent(BattleEvent::TurnEnded),
            ],
            session,
            &mut bus,
        );
        bus
    }

    /// Which side acts first this round.
    pub fn action_order(
        &self,
        session: &BattleSession,
        player_move: &MoveData,
        opponent_move: &MoveData,
    ) -> [Side; 2] {
        let opponent_first = match player_move.priority.cmp(&opponent_move.priority) {
            Ordering::Greater => false,
            Ordering::Less => true,
            Ordering::Equal => match self.rules.turn_order {
                TurnOrder::Priority => false,
                TurnOrder::PriorityThenSpeed => session.opponent.speed > session.player.speed,
            },
        };
        if opponent_first {
            [Side::Opponent, Side::Player]
        } else {
            [Side::Player, Side::Opponent]
        }
    }

    fn execute_move_action(
        &self,
        side: Side,
        move_data: &MoveData,
        session: &mut BattleSession,
        bus: &mut EventBus,
        rng: &mut TurnRng,
    ) {
        if !can_act(side, session, &self.rules, bus, rng) {
            return;
        }

        let commands =
            calculate_attack_outcome(session, side, move_data, &self.chart, &self.rules, rng);
        execute_command_batch(commands, session, bus);

        if let Some(effect) = move_data.effect {
            let commands =
                apply_secondary_effect(effect, EffectContext::new(side), session, &self.rules, rng);
            execute_command_batch(commands, session, bus);
        }

        if !session.is_over() && session.combatant(side.opponent()).is_fainted() {
            end_battle(GameState::win_for(side), session, bus);
        }
    }
}

fn end_battle(outcome: GameState, session: &mut BattleSession, bus: &mut EventBus) {
    let winner_name = outcome
        .winner()
        .map(|side| session.combatant(side).name.clone());
    debug!(
        battle_id = %session.battle_id,
        outcome = ?outcome,
        turn = session.turn_number,
        "battle ended"
    );
    execute_command_batch(
        vec![
            BattleCommand::SetGameState(outcome),
            BattleCommand::EmitEvent(BattleEvent::BattleEnded {
                outcome,
                winner_name,
            }),
        ],
        session,
        bus,
    );
}
