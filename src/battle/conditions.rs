//! Status handling outside of move resolution: whether a combatant may act,
//! and the end-of-round tick.

use crate::battle::commands::BattleCommand;
use crate::battle::state::{ActionFailureReason, BattleEvent, BattleSession, EventBus, Side, TurnRng};
use crate::combatant::Combatant;
use crate::rules::BattleRules;
use schema::StatusKind;

/// Why `combatant` cannot act this round, if anything stops it. Sleep blocks
/// without a roll; paralysis rolls for full paralysis.
pub fn check_action_preventing_conditions(
    combatant: &Combatant,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> Option<ActionFailureReason> {
    if combatant.is_fainted() {
        return Some(ActionFailureReason::PokemonFainted);
    }
    if combatant.status_turns(StatusKind::Sleep).is_some_and(|turns| turns > 0) {
        return Some(ActionFailureReason::IsAsleep);
    }
    if combatant
        .status_turns(StatusKind::Paralyze)
        .is_some_and(|turns| turns > 0)
        && rng.chance(rules.full_paralysis_chance, "Full Paralysis Check")
    {
        return Some(ActionFailureReason::IsParalyzed);
    }
    None
}

/// Returns false, logging the reason, when `side` cannot act this round.
pub fn can_act(
    side: Side,
    session: &BattleSession,
    rules: &BattleRules,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> bool {
    let combatant = session.combatant(side);
    match check_action_preventing_conditions(combatant, rules, rng) {
        Some(reason) => {
            bus.push(BattleEvent::ActionFailed {
                side,
                pokemon: combatant.name.clone(),
                reason,
            });
            false
        }
        None => true,
    }
}

/// End-of-round commands for every status `side` holds: expired statuses are
/// removed, the rest count down, and burn and poison deal residual damage.
pub fn tick_status_effects(
    side: Side,
    session: &BattleSession,
    rules: &BattleRules,
) -> Vec<BattleCommand> {
    let combatant = session.combatant(side);
    let residual = combatant.max_health() / rules.residual_damage_divisor;

    let mut commands = Vec::new();
    for (status, turns) in combatant.statuses() {
        if turns == 0 {
            commands.push(BattleCommand::RemoveStatus {
                target: side,
                status,
            });
            continue;
        }
        if status.deals_residual_damage() {
            commands.push(BattleCommand::DealStatusDamage {
                target: side,
                status,
                amount: residual,
            });
        }
        commands.push(BattleCommand::SetStatusTurns {
            target: side,
            status,
            turns: turns - 1,
        });
    }
    commands
}
