//! A module for defining AI behaviors for battle opponents.

use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleSession, Side, TurnRng};
use crate::combatant::Combatant;
use crate::errors::{ActionError, BattleResult};
use crate::type_chart::TypeChart;
use ordered_float::OrderedFloat;
use schema::{ElementType, MoveData, SecondaryEffect};

/// A trait for any system that can pick a move for one side of a battle.
/// The engine only needs a key from the combatant's own move set.
pub trait Behavior {
    fn choose_move(
        &self,
        side: Side,
        session: &BattleSession,
        engine: &BattleEngine,
        rng: &mut TurnRng,
    ) -> BattleResult<String>;
}

/// Picks uniformly among the available moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomAI {
    fn choose_move(
        &self,
        side: Side,
        session: &BattleSession,
        _engine: &BattleEngine,
        rng: &mut TurnRng,
    ) -> BattleResult<String> {
        let combatant = session.combatant(side);
        if combatant.moves.is_empty() {
            return Err(ActionError::NoMovesAvailable(combatant.name.clone()).into());
        }
        let last = u8::try_from(combatant.moves.len() - 1).unwrap_or(u8::MAX);
        let index = rng.next_in_range(0, last, "Random Move Choice");
        Ok(combatant.moves[usize::from(index)].clone())
    }
}

/// Scores every available move and picks the best; ties go to the earliest
/// slot. Uses no randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoringAI;

impl ScoringAI {
    pub fn new() -> Self {
        Self
    }

    /// Damaging moves score by power, type effectiveness and same-type bonus.
    /// Status moves score by the utility of their effect in the current state.
    pub fn score_move(
        &self,
        move_data: &MoveData,
        attacker: &Combatant,
        defender: &Combatant,
        engine: &BattleEngine,
    ) -> f64 {
        if move_data.power > 0 {
            let effectiveness = engine
                .chart()
                .effectiveness(move_data.element, &defender.types);
            // An immune target makes this the worst possible choice.
            if effectiveness == 0.0 {
                return -1.0;
            }
            let stab = if attacker.types.contains(&move_data.element) {
                1.5
            } else {
                1.0
            };
            let heavy_hitter = if move_data.power >= 60 { 1.05 } else { 1.0 };
            return f64::from(move_data.power) * effectiveness * stab * heavy_hitter;
        }

        let rules = engine.rules();
        match move_data.effect {
            Some(SecondaryEffect::Escape) => -100.0,
            Some(SecondaryEffect::Heal) => {
                if u32::from(attacker.current_health()) * 2 < u32::from(attacker.max_health()) {
                    60.0
                } else {
                    -1.0
                }
            }
            Some(SecondaryEffect::RaiseDefense) | Some(SecondaryEffect::LowerDefense) => 10.0,
            Some(effect) => match effect.inflicted_status() {
                Some(status) if !defender.has_status(status) => {
                    45.0 * f64::from(rules.status_chance(status)) / 100.0
                }
                _ => -1.0,
            },
            None => -1.0,
        }
    }
}

impl Behavior for ScoringAI {
    fn choose_move(
        &self,
        side: Side,
        session: &BattleSession,
        engine: &BattleEngine,
        _rng: &mut TurnRng,
    ) -> BattleResult<String> {
        let attacker = session.combatant(side);
        let defender = session.combatant(side.opponent());

        let mut scored = Vec::with_capacity(attacker.moves.len());
        for key in &attacker.moves {
            let move_data = engine.catalog().get_move(key)?;
            scored.push((key, self.score_move(move_data, attacker, defender, engine)));
        }

        // `max_by_key` keeps the last maximum, so walk the slots backwards.
        scored
            .into_iter()
            .rev()
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(key, _)| key.clone())
            .ok_or_else(|| ActionError::NoMovesAvailable(attacker.name.clone()).into())
    }
}

/// How well a species with `candidate` types matches up against `opponent`
/// types: its offensive multipliers times an inverted view of the opponent's
/// multipliers against it. Higher is better for the candidate.
pub fn matchup_score(
    chart: &TypeChart,
    candidate: &[ElementType],
    opponent: &[ElementType],
) -> f64 {
    let mut offensive = 1.0;
    for &attacking in candidate {
        for &defending in opponent {
            offensive *= chart.multiplier(attacking, defending);
        }
    }

    let mut defensive = 1.0;
    for &attacking in opponent {
        for &defending in candidate {
            let incoming = chart.multiplier(attacking, defending);
            if incoming > 1.0 {
                defensive *= 0.5;
            } else if incoming < 1.0 {
                defensive *= 2.0;
            }
        }
    }

    offensive * defensive
}
