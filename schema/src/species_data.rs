use crate::ElementType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_health: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

/// Static catalog entry for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    /// Short display tag shown next to the name.
    #[serde(default)]
    pub sprite: String,
    pub types: Vec<ElementType>,
    pub base_stats: BaseStats,
    /// Learnable move keys, in slot order.
    pub moves: Vec<String>,
}

impl fmt::Display for SpeciesData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self
            .types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("/");
        writeln!(f, "{} {} [{}]", self.sprite, self.name, types)?;
        writeln!(
            f,
            "  HP {:>3}  ATK {:>3}  DEF {:>3}  SPD {:>3}",
            self.base_stats.max_health,
            self.base_stats.attack,
            self.base_stats.defense,
            self.base_stats.speed
        )?;
        write!(f, "  Moves: {}", self.moves.join(", "))
    }
}
