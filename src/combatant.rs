use schema::{ElementType, SpeciesData, StatusKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One side's live battle instance of a species.
///
/// `current_health` never exceeds `max_health`; a combatant at zero health is
/// fainted and ignores any further damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Catalog key of the species this combatant was created from
    pub species: String,
    pub name: String,
    pub sprite: String,
    pub types: Vec<ElementType>,
    current_health: u16,
    max_health: u16,
    pub attack: u16,
    defense: u16,
    pub speed: u16,
    /// Slotted move keys, at most `MAX_MOVES`
    pub moves: Vec<String>,
    /// Active status -> remaining rounds
    #[serde(default)]
    statuses: BTreeMap<StatusKind, u8>,
}

impl Combatant {
    pub const MAX_MOVES: usize = 4;

    pub fn from_species(species_key: &str, species: &SpeciesData) -> Self {
        let stats = species.base_stats;
        Self {
            species: species_key.to_string(),
            name: species.name.clone(),
            sprite: species.sprite.clone(),
            types: species.types.clone(),
            current_health: stats.max_health,
            max_health: stats.max_health,
            attack: stats.attack,
            defense: stats.defense.max(1),
            speed: stats.speed,
            moves: species
                .moves
                .iter()
                .take(Self::MAX_MOVES)
                .cloned()
                .collect(),
            statuses: BTreeMap::new(),
        }
    }

    pub fn current_health(&self) -> u16 {
        self.current_health
    }

    pub fn max_health(&self) -> u16 {
        self.max_health
    }

    pub fn defense(&self) -> u16 {
        self.defense
    }

    /// Defense is never allowed to reach zero.
    pub fn set_defense(&mut self, defense: u16) {
        self.defense = defense.max(1);
    }

    pub fn is_fainted(&self) -> bool {
        self.current_health == 0
    }

    pub fn set_health(&mut self, health: u16) {
        self.current_health = health.min(self.max_health);
    }

    /// Apply damage, returning the amount actually removed. Fainted combatants
    /// take no further damage.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Restore health up to the maximum, returning the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let restored = amount.min(self.max_health - self.current_health);
        self.current_health += restored;
        restored
    }

    pub fn knows_move(&self, move_key: &str) -> bool {
        self.moves.iter().any(|m| m == move_key)
    }

    pub fn has_status(&self, status: StatusKind) -> bool {
        self.statuses.contains_key(&status)
    }

    pub fn status_turns(&self, status: StatusKind) -> Option<u8> {
        self.statuses.get(&status).copied()
    }

    /// Active statuses in a fixed order (burn, poison, paralyze, sleep).
    pub fn statuses(&self) -> impl Iterator<Item = (StatusKind, u8)> + '_ {
        self.statuses.iter().map(|(&status, &turns)| (status, turns))
    }

    /// Inflict a status for `turns` rounds. Returns false, leaving the existing
    /// duration untouched, when the status is already active.
    pub fn inflict_status(&mut self, status: StatusKind, turns: u8) -> bool {
        if self.has_status(status) {
            return false;
        }
        self.statuses.insert(status, turns);
        true
    }

    pub(crate) fn set_status_turns(&mut self, status: StatusKind, turns: u8) {
        if let Some(remaining) = self.statuses.get_mut(&status) {
            *remaining = turns;
        }
    }

    pub fn remove_status(&mut self, status: StatusKind) -> bool {
        self.statuses.remove(&status).is_some()
    }

    /// Clamp fields that may have arrived out of bounds from an external source.
    pub fn sanitized(mut self) -> Self {
        self.current_health = self.current_health.min(self.max_health);
        self.defense = self.defense.max(1);
        self.moves.truncate(Self::MAX_MOVES);
        self
    }
}
