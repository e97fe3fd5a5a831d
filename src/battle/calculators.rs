use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleSession, Side, TurnRng};
use crate::combatant::Combatant;
use crate::rules::BattleRules;
use crate::type_chart::TypeChart;
use schema::MoveData;

/// The random inputs of one damage roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRolls {
    pub critical: bool,
    /// Multiplier in `[variance_min, 1.0)`
    pub variance: f64,
}

impl DamageRolls {
    /// No critical hit and no variance.
    pub fn neutral() -> Self {
        Self {
            critical: false,
            variance: 1.0,
        }
    }

    /// Draw the critical-hit roll, then the variance roll.
    pub fn roll(rules: &BattleRules, rng: &mut TurnRng) -> Self {
        let critical = rng.next_unit("Critical Hit Check") < 1.0 / f64::from(rules.critical_chance);
        let spread = 1.0 - rules.variance_min;
        let variance = rules.variance_min + spread * rng.next_unit("Damage Variance");
        Self { critical, variance }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub critical: bool,
    /// Product of the type chart multipliers against the defender's types
    pub effectiveness: f64,
}

/// Damage for `move_data` from `attacker` to `defender` with the given rolls.
///
/// ```text
/// base   = ((2 * level / 5 + 2) * power * attack / defense) / 50 + 2
/// damage = max(1, floor(base * critical * variance * effectiveness))
/// ```
///
/// Status moves (power 0) always deal 0.
pub fn compute_damage_with_rolls(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    chart: &TypeChart,
    rules: &BattleRules,
    rolls: DamageRolls,
) -> DamageOutcome {
    let effectiveness = chart.effectiveness(move_data.element, &defender.types);
    if move_data.power == 0 {
        return DamageOutcome {
            damage: 0,
            critical: false,
            effectiveness,
        };
    }

    let level = f64::from(rules.level);
    let power = f64::from(move_data.power);
    let attack = f64::from(attacker.attack);
    let defense = f64::from(defender.defense().max(1));

    let base = ((2.0 * level / 5.0 + 2.0) * power * attack / defense) / 50.0 + 2.0;
    let critical = if rolls.critical {
        rules.critical_multiplier
    } else {
        1.0
    };
    let raw = (base * critical * rolls.variance * effectiveness).floor();
    let damage = raw.clamp(1.0, f64::from(u16::MAX)) as u16;

    DamageOutcome {
        damage,
        critical: rolls.critical,
        effectiveness,
    }
}

/// Roll and compute damage. Status moves consume no randomness.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_data: &MoveData,
    chart: &TypeChart,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> DamageOutcome {
    let rolls = if move_data.power == 0 {
        DamageRolls::neutral()
    } else {
        DamageRolls::roll(rules, rng)
    };
    compute_damage_with_rolls(attacker, defender, move_data, chart, rules, rolls)
}

/// Commands for the damaging part of a move: the announcement, critical and
/// effectiveness messages, and the damage itself.
pub fn calculate_attack_outcome(
    session: &BattleSession,
    attacker_side: Side,
    move_data: &MoveData,
    chart: &TypeChart,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let attacker = session.combatant(attacker_side);
    let defender_side = attacker_side.opponent();
    let defender = session.combatant(defender_side);

    let mut commands = vec![BattleCommand::EmitEvent(BattleEvent::MoveUsed {
        side: attacker_side,
        pokemon: attacker.name.clone(),
        move_name: move_data.name.clone(),
    })];

    if move_data.power == 0 || defender.is_fainted() {
        return commands;
    }

    let outcome = compute_damage(attacker, defender, move_data, chart, rules, rng);
    if outcome.critical {
        commands.push(BattleCommand::EmitEvent(BattleEvent::CriticalHit {
            attacker: attacker.name.clone(),
        }));
    }
    if outcome.effectiveness != 1.0 {
        commands.push(BattleCommand::EmitEvent(
            BattleEvent::AttackTypeEffectiveness {
                multiplier: outcome.effectiveness,
            },
        ));
    }
    commands.push(BattleCommand::DealDamage {
        target: defender_side,
        amount: outcome.damage,
    });
    commands
}
