use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleSession, Side};

/// Restore half of the target's max health. The executor caps the amount.
pub(super) fn apply_heal_effect(target: Side, session: &BattleSession) -> Vec<BattleCommand> {
    let combatant = session.combatant(target);
    if combatant.is_fainted() {
        return Vec::new();
    }
    vec![BattleCommand::HealCombatant {
        target,
        amount: combatant.max_health() / 2,
    }]
}

/// Scale the target's defense by `percent`, flooring and never going below 1.
pub(super) fn apply_defense_change_effect(
    target: Side,
    percent: u16,
    session: &BattleSession,
) -> Vec<BattleCommand> {
    let combatant = session.combatant(target);
    if combatant.is_fainted() {
        return Vec::new();
    }
    let scaled = u32::from(combatant.defense()) * u32::from(percent) / 100;
    let value = scaled.clamp(1, u32::from(u16::MAX)) as u16;
    vec![BattleCommand::SetDefense { target, value }]
}
