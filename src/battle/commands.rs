use crate::battle::state::{BattleEvent, BattleSession, EventBus, GameState, Side};
use schema::StatusKind;

/// Atomic state changes produced by the calculators. The executor is the only
/// place that mutates a session during resolution, and it emits the events
/// describing what actually changed.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    SetGameState(GameState),
    IncrementTurnNumber,

    DealDamage {
        target: Side,
        amount: u16,
    },
    DealStatusDamage {
        target: Side,
        status: StatusKind,
        amount: u16,
    },
    HealCombatant {
        target: Side,
        amount: u16,
    },
    InflictStatus {
        target: Side,
        status: StatusKind,
        turns: u8,
    },
    SetStatusTurns {
        target: Side,
        status: StatusKind,
        turns: u8,
    },
    RemoveStatus {
        target: Side,
        status: StatusKind,
    },
    SetDefense {
        target: Side,
        value: u16,
    },

    EmitEvent(BattleEvent),
}

pub fn execute_command(command: BattleCommand, session: &mut BattleSession, bus: &mut EventBus) {
    match command {
        BattleCommand::SetGameState(state) => session.game_state = state,
        BattleCommand::IncrementTurnNumber => session.turn_number += 1,

        BattleCommand::DealDamage { target, amount } => {
            let combatant = session.combatant_mut(target);
            if combatant.is_fainted() {
                return;
            }
            let damage = combatant.take_damage(amount);
            bus.push(BattleEvent::DamageDealt {
                side: target,
                target: combatant.name.clone(),
                damage,
                remaining_hp: combatant.current_health(),
            });
            if combatant.is_fainted() {
                bus.push(BattleEvent::PokemonFainted {
                    side: target,
                    pokemon: combatant.name.clone(),
                });
            }
        }
        BattleCommand::DealStatusDamage {
            target,
            status,
            amount,
        } => {
            let combatant = session.combatant_mut(target);
            if combatant.is_fainted() {
                return;
            }
            let damage = combatant.take_damage(amount);
            bus.push(BattleEvent::StatusDamage {
                side: target,
                target: combatant.name.clone(),
                status,
                damage,
                remaining_hp: combatant.current_health(),
            });
            if combatant.is_fainted() {
                bus.push(BattleEvent::PokemonFainted {
                    side: target,
                    pokemon: combatant.name.clone(),
                });
            }
        }
        BattleCommand::HealCombatant { target, amount } => {
            let combatant = session.combatant_mut(target);
            let amount = combatant.heal(amount);
            bus.push(BattleEvent::PokemonHealed {
                side: target,
                target: combatant.name.clone(),
                amount,
                new_hp: combatant.current_health(),
            });
        }
        BattleCommand::InflictStatus {
            target,
            status,
            turns,
        } => {
            let combatant = session.combatant_mut(target);
            if combatant.inflict_status(status, turns) {
                bus.push(BattleEvent::StatusApplied {
                    side: target,
                    target: combatant.name.clone(),
                    status,
                    turns,
                });
            }
        }
        BattleCommand::SetStatusTurns {
            target,
            status,
            turns,
        } => session.combatant_mut(target).set_status_turns(status, turns),
        BattleCommand::RemoveStatus { target, status } => {
            let combatant = session.combatant_mut(target);
            if combatant.remove_status(status) {
                bus.push(BattleEvent::StatusRemoved {
                    side: target,
                    target: combatant.name.clone(),
                    status,
                });
            }
        }
        BattleCommand::SetDefense { target, value } => {
            let combatant = session.combatant_mut(target);
            let old_value = combatant.defense();
            combatant.set_defense(value);
            bus.push(BattleEvent::DefenseChanged {
                side: target,
                target: combatant.name.clone(),
                old_value,
                new_value: combatant.defense(),
            });
        }

        BattleCommand::EmitEvent(event) => bus.push(event),
    }
}

pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    session: &mut BattleSession,
    bus: &mut EventBus,
) {
    for command in commands {
        execute_command(command, session, bus);
    }
}
