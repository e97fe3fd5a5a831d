use crate::battle::engine::BattleEngine;
use crate::battle::state::{BattleSession, TurnRng};
use crate::catalog::Catalog;
use crate::combatant::Combatant;
use crate::errors::BattleResult;
use schema::StatusKind;

/// A builder for creating test combatants from the built-in catalog.
///
/// # Example
/// ```ignore
/// let pikachu = TestCombatantBuilder::new("pikachu")
///     .with_status(StatusKind::Paralyze, 3)
///     .with_hp(10)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    species: String,
    moves: Option<Vec<String>>,
    statuses: Vec<(StatusKind, u8)>,
    current_hp: Option<u16>,
    defense: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(species: &str) -> Self {
        Self {
            species: species.to_string(),
            moves: None,
            statuses: Vec::new(),
            current_hp: None,
            defense: None,
        }
    }

    /// Replaces the slotted moves.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = Some(moves.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_status(mut self, status: StatusKind, turns: u8) -> Self {
        self.statuses.push((status, turns));
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn build(self) -> Combatant {
        let catalog = match Catalog::builtin() {
            Ok(catalog) => catalog,
            Err(err) => panic!("Failed to load built-in catalog: {}", err),
        };
        let species = match catalog.get_species(&self.species) {
            Ok(species) => species,
            Err(err) => panic!("Failed to load species {}: {}", self.species, err),
        };

        let mut combatant = Combatant::from_species(&self.species, species);
        if let Some(moves) = self.moves {
            combatant.moves = moves;
        }
        for (status, turns) in self.statuses {
            combatant.inflict_status(status, turns);
        }
        if let Some(hp) = self.current_hp {
            combatant.set_health(hp);
        }
        if let Some(defense) = self.defense {
            combatant.set_defense(defense);
        }
        combatant
    }
}

/// A session that is waiting for the player's first action.
pub fn create_test_session(player: Combatant, opponent: Combatant) -> BattleSession {
    BattleSession::new("test-battle".to_string(), player, opponent)
}

pub fn test_engine() -> BattleEngine {
    match BattleEngine::builtin() {
        Ok(engine) => engine,
        Err(err) => panic!("Failed to build engine: {}", err),
    }
}

/// Mid-range rolls: no critical hits, no full paralysis, and only effects
/// with a chance of at least 50% trigger.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("expected Ok, got error: {}", err),
    }
}

/// Health must stay within bounds for both combatants.
pub fn assert_health_in_bounds(session: &BattleSession) {
    for combatant in [&session.player, &session.opponent] {
        assert!(
            combatant.current_health() <= combatant.max_health(),
            "{} has {} / {} HP",
            combatant.name,
            combatant.current_health(),
            combatant.max_health()
        );
    }
}
