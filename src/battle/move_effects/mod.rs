// Secondary effects applied after a move's damage step.

mod special_effects;
mod stat_effects;
mod status_effects;

use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleSession, Side, TurnRng};
use crate::rules::BattleRules;
use schema::{SecondaryEffect, StatusKind};

use self::{special_effects::*, stat_effects::*, status_effects::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectContext {
    /// The side that used the move
    pub source: Side,
    /// The side the move was aimed at
    pub target: Side,
}

impl EffectContext {
    pub fn new(source: Side) -> Self {
        Self {
            source,
            target: source.opponent(),
        }
    }

    /// The side an effect lands on.
    pub fn recipient(&self, effect: SecondaryEffect) -> Side {
        if effect.targets_user() {
            self.source
        } else {
            self.target
        }
    }
}

/// Commands for one secondary effect, judged against the session as it stands
/// after the move's damage has been applied.
pub fn apply_secondary_effect(
    effect: SecondaryEffect,
    context: EffectContext,
    session: &BattleSession,
    rules: &BattleRules,
    rng: &mut TurnRng,
) -> Vec<BattleCommand> {
    let recipient = context.recipient(effect);
    match effect {
        SecondaryEffect::Burn => {
            apply_status_effect(StatusKind::Burn, recipient, session, rules, rng)
        }
        SecondaryEffect::Poison => {
            apply_status_effect(StatusKind::Poison, recipient, session, rules, rng)
        }
        SecondaryEffect::Paralyze => {
            apply_status_effect(StatusKind::Paralyze, recipient, session, rules, rng)
        }
        SecondaryEffect::Sleep => {
            apply_status_effect(StatusKind::Sleep, recipient, session, rules, rng)
        }
        SecondaryEffect::Heal => apply_heal_effect(recipient, session),
        SecondaryEffect::RaiseDefense => {
            apply_defense_change_effect(recipient, rules.raise_defense_percent, session)
        }
        SecondaryEffect::LowerDefense => {
            apply_defense_change_effect(recipient, rules.lower_defense_percent, session)
        }
        SecondaryEffect::Escape => apply_escape_effect(recipient, session),
    }
}
