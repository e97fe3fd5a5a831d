use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timed conditions a combatant can suffer from. A combatant holds at most
/// one instance of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Burn,
    Poison,
    Paralyze,
    Sleep,
}

impl StatusKind {
    /// Burn and poison hurt their holder at the end of every round.
    pub fn deals_residual_damage(self) -> bool {
        matches!(self, StatusKind::Burn | StatusKind::Poison)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::Burn => "burn",
            StatusKind::Poison => "poison",
            StatusKind::Paralyze => "paralysis",
            StatusKind::Sleep => "sleep",
        };
        write!(f, "{}", name)
    }
}

/// The closed set of secondary effects a move can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryEffect {
    Burn,
    Poison,
    Paralyze,
    Sleep,
    Heal,
    RaiseDefense,
    LowerDefense,
    Escape,
}

impl SecondaryEffect {
    /// The status this effect tries to inflict on the defender, if any.
    pub fn inflicted_status(self) -> Option<StatusKind> {
        match self {
            SecondaryEffect::Burn => Some(StatusKind::Burn),
            SecondaryEffect::Poison => Some(StatusKind::Poison),
            SecondaryEffect::Paralyze => Some(StatusKind::Paralyze),
            SecondaryEffect::Sleep => Some(StatusKind::Sleep),
            SecondaryEffect::Heal
            | SecondaryEffect::RaiseDefense
            | SecondaryEffect::LowerDefense
            | SecondaryEffect::Escape => None,
        }
    }

    /// True when the effect lands on the move's user rather than its target.
    pub fn targets_user(self) -> bool {
        matches!(
            self,
            SecondaryEffect::Heal | SecondaryEffect::RaiseDefense | SecondaryEffect::Escape
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub element: ElementType,
    /// Zero marks a pure status move.
    pub power: u16,
    #[serde(default)]
    pub effect: Option<SecondaryEffect>,
    #[serde(default)]
    pub priority: i8,
}

impl MoveData {
    pub fn is_status_move(&self) -> bool {
        self.power == 0
    }
}
