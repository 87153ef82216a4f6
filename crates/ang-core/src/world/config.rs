//! Generation tuning
//!
//! Balance numbers the engine reads: out-of-depth curves, retry budgets,
//! probabilities and the ids of named special races. Loaded from JSON;
//! every field has a default so a partial file is enough.

use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::path::PathBuf;
use std::path::Path;
use thiserror::Error;

use crate::consts::{GROUP_MAX, MAX_DEPTH, MON_SCAT_MAXD};
use crate::monster::RaceId;

/// Errors loading a configuration file
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(String),

    #[error("invalid config: {0}")]
    Parse(String),
}

/// The two "nasty monster" curves
///
/// Both drift with game time: the chance of an out-of-depth boost rises
/// from 1 in `base_chance` toward 1 in `min_chance`, and the boost grows
/// toward `max_bonus` levels. Deeper floors start further behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NastyCurve {
    pub base_chance: u32,
    pub min_chance: u32,
    /// Game turns per step of the chance curve
    pub chance_period: u64,
    /// Game turns per level of the bonus curve
    pub bonus_period: u64,
    pub max_bonus: i32,
    /// Delay used for the town instead of the depth formula
    pub town_delay: i64,
}

impl Default for NastyCurve {
    fn default() -> Self {
        Self {
            base_chance: 25,
            min_chance: 3,
            chance_period: 100_000,
            bonus_period: 400_000,
            max_bonus: 25,
            town_delay: 360,
        }
    }
}

impl NastyCurve {
    /// How far behind the curves a floor of this depth starts
    pub fn delay(&self, depth: i32) -> i64 {
        if depth <= 0 {
            self.town_delay
        } else {
            (depth as u64 * 10_000).isqrt() as i64 + 400
        }
    }

    /// Denominator of the boost chance: a boost happens 1 time in this many
    pub fn chance(&self, depth: i32, turn: u64) -> u32 {
        let steps = (turn / self.chance_period.max(1)) as i64 - self.delay(depth) / 10;
        let chance = self.base_chance as i64 - steps;
        chance.clamp(self.min_chance as i64, self.base_chance as i64) as u32
    }

    /// Levels added when a boost happens
    pub fn bonus(&self, depth: i32, turn: u64) -> i32 {
        let grown = 3 + (turn / self.bonus_period.max(1)) as i64 - self.delay(depth) / 40
            + (depth / 10).min(5) as i64;
        grown.clamp(0, self.max_bonus as i64) as i32
    }
}

/// Ids of races the engine treats specially by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialRaces {
    /// Placeholder shown by kage-disguised monsters
    pub shadow: Option<RaceId>,
    /// Race shown in place of others under the joke personality
    pub jural: Option<RaceId>,
    /// Race generated at half hit points
    pub wounded: Option<RaceId>,
    /// Race never used to seed a horde
    pub horde_excluded: Option<RaceId>,
}

/// All generation tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub nasty: NastyCurve,

    // Retry budgets
    pub horde_race_attempts: u32,
    pub horde_seed_attempts: u32,
    pub guardian_attempts: u32,
    pub alloc_cell_attempts: u32,
    pub nest_pick_attempts: u32,
    pub tanuki_attempts: u32,

    // Probabilities (1 in N unless noted)
    pub kage_chance: u32,
    pub jural_chance: u32,
    /// A horde replaces a single monster when `rnd(horde_divisor) <= depth`
    pub horde_divisor: u32,
    /// Protective rune breaks when `rnd(die) < race level + 20`
    pub protection_rune_die: u32,
    /// Explosive rune detonates when `rnd(die) > race level`
    pub explosive_rune_die: u32,

    // Sizes
    pub group_max: usize,
    pub nest_roster: usize,
    pub scatter_max_radius: i32,
    pub max_depth: i32,

    pub special: SpecialRaces,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            nasty: NastyCurve::default(),

            horde_race_attempts: 1000,
            horde_seed_attempts: 1000,
            guardian_attempts: 4000,
            alloc_cell_attempts: 10_000,
            nest_pick_attempts: 100,
            tanuki_attempts: 1000,

            kage_chance: 333,
            jural_chance: 5,
            horde_divisor: 5000,
            protection_rune_die: 550,
            explosive_rune_die: 299,

            group_max: GROUP_MAX,
            nest_roster: 64,
            scatter_max_radius: MON_SCAT_MAXD,
            max_depth: MAX_DEPTH,

            special: SpecialRaces::default(),
        }
    }
}

impl GenerationConfig {
    /// Load a configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse a configuration from JSON text
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_config_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.nasty.min_chance == 0 || self.nasty.min_chance > self.nasty.base_chance {
            return Err(ConfigError::Parse(
                "nasty.min_chance must be between 1 and nasty.base_chance".to_string(),
            ));
        }
        if self.group_max == 0 {
            return Err(ConfigError::Parse("group_max must be positive".to_string()));
        }
        if self.nest_roster == 0 {
            return Err(ConfigError::Parse("nest_roster must be positive".to_string()));
        }
        if !(0..=MON_SCAT_MAXD).contains(&self.scatter_max_radius) {
            return Err(ConfigError::Parse(format!(
                "scatter_max_radius must be within 0..={MON_SCAT_MAXD}"
            )));
        }
        if self.max_depth <= 0 {
            return Err(ConfigError::Parse("max_depth must be positive".to_string()));
        }
        Ok(())
    }
}
