use crate::battle::commands::BattleCommand;
use crate::battle::state::{BattleEvent, BattleSession, GameState, Side};

/// The user leaves the field and the battle ends without a winner.
pub(super) fn apply_escape_effect(user: Side, session: &BattleSession) -> Vec<BattleCommand> {
    let outcome = GameState::Escaped(user);
    vec![
        BattleCommand::EmitEvent(BattleEvent::PokemonEscaped {
            side: user,
            pokemon: session.combatant(user).name.clone(),
        }),
        BattleCommand::SetGameState(outcome),
        BattleCommand::EmitEvent(BattleEvent::BattleEnded {
            outcome,
            winner_name: None,
        }),
    ]
}
