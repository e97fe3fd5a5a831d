use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleSession, Side, TurnRng};
use crate::rules::BattleRules;
use schema::StatusKind;

/// Roll to inflict `status` on `target`. A fainted target, or one already
/// holding the status, is skipped without consuming a roll.
pub(super) fn apply_status_effect(
    status: StatusKind,
    target: Side,
    session: &BattleSession,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let combatant = session.combatant(target);
    if combatant.is_fainted() || combatant.has_status(status) {
        return Vec::new();
    }

    let reason = format!("Apply {:?} Check", status);
    if !rng.chance(rules.status_chance(status), &reason) {
        return Vec::new();
    }

    let turns = match status {
        StatusKind::Sleep => {
            rng.next_in_range(rules.sleep_turns_min, rules.sleep_turns_max, "Sleep Duration")
        }
        StatusKind::Burn | StatusKind::Poison | StatusKind::Paralyze => rules.status_duration,
    };

    vec![BattleCommand::InflictStatus {
        target,
        status,
        turns,
    }]
}
