//! Tunable battle constants.

use crate::errors::{RulesError, RulesResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the two submitted moves of a round are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// Higher move priority acts first; the player acts first otherwise.
    #[default]
    Priority,
    /// Priority, then the faster combatant; the player wins speed ties.
    PriorityThenSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    pub level: u8,
    /// A critical hit happens with odds of 1 in `critical_chance`.
    pub critical_chance: u16,
    pub critical_multiplier: f64,
    /// Lower bound of the random damage variance; the upper bound is 1.0 (exclusive).
    pub variance_min: f64,
    pub status_duration: u8,
    pub sleep_turns_min: u8,
    pub sleep_turns_max: u8,
    pub burn_chance: u8,
    pub poison_chance: u8,
    pub paralyze_chance: u8,
    pub sleep_chance: u8,
    pub full_paralysis_chance: u8,
    /// Burn and poison deal max health / divisor each round.
    pub residual_damage_divisor: u16,
    pub raise_defense_percent: u16,
    pub lower_defense_percent: u16,
    pub turn_order: TurnOrder,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            level: 50,
            critical_chance: 16,
            critical_multiplier: 2.0,
            variance_min: 0.85,
            status_duration: 5,
            sleep_turns_min: 1,
            sleep_turns_max: 3,
            burn_chance: 10,
            poison_chance: 75,
            paralyze_chance: 30,
            sleep_chance: 75,
            full_paralysis_chance: 25,
            residual_damage_divisor: 8,
            raise_defense_percent: 150,
            lower_defense_percent: 67,
            turn_order: TurnOrder::Priority,
        }
    }
}

impl BattleRules {
    pub fn from_ron_str(source: &str) -> RulesResult<Self> {
        let rules: BattleRules =
            ron::from_str(source).map_err(|e| RulesError::MalformedData(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: &Path) -> RulesResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| RulesError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> RulesResult<()> {
        fn invalid(field: &'static str, reason: &str) -> RulesResult<()> {
            Err(RulesError::InvalidRule {
                field,
                reason: reason.to_string(),
            })
        }

        if self.level == 0 {
            return invalid("level", "must be at least 1");
        }
        if self.critical_chance == 0 {
            return invalid("critical_chance", "must be at least 1");
        }
        if !(self.critical_multiplier >= 1.0) {
            return invalid("critical_multiplier", "must be at least 1.0");
        }
        if !(self.variance_min > 0.0 && self.variance_min <= 1.0) {
            return invalid("variance_min", "must be in (0, 1]");
        }
        if self.sleep_turns_min == 0 || self.sleep_turns_min > self.sleep_turns_max {
            return invalid("sleep_turns_min", "must be between 1 and sleep_turns_max");
        }
        let chances = [
            ("burn_chance", self.burn_chance),
            ("poison_chance", self.poison_chance),
            ("paralyze_chance", self.paralyze_chance),
            ("sleep_chance", self.sleep_chance),
            ("full_paralysis_chance", self.full_paralysis_chance),
        ];
        if let Some((field, _)) = chances.iter().find(|(_, chance)| *chance > 100) {
            return invalid(*field, "is a percentage and must not exceed 100");
        }
        if self.residual_damage_divisor == 0 {
            return invalid("residual_damage_divisor", "must be at least 1");
        }
        Ok(())
    }

    pub fn status_chance(&self, status: schema::StatusKind) -> u8 {
        match status {
            schema::StatusKind::Burn => self.burn_chance,
            schema::StatusKind::Poison => self.poison_chance,
            schema::StatusKind::Paralyze => self.paralyze_chance,
            schema::StatusKind::Sleep => self.sleep_chance,
        }
    }
}
