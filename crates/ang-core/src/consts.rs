//! Core engine constants
//!
//! Structural limits of the population engine. Tunable balance numbers live
//! in `world::GenerationConfig` instead.

/// Deepest level a race or a selection ceiling can name
pub const MAX_DEPTH: i32 = 128;

/// Hard ceiling on a monster's rolled hit points (nightmare doubling caps here)
pub const MAX_MONSTER_HP: i32 = 30000;

/// Hard ceiling on monster speed
pub const MAX_SPEED: i32 = 199;

/// Speed at which a monster gains 10 energy per game tick
pub const NORMAL_SPEED: i32 = 110;

/// Energy a monster must spend before its first move
pub const ENERGY_NEED: i32 = 100;

/// Maximum reinforcement sub-specs a race may carry
pub const MAX_REINFORCEMENTS: usize = 6;

/// Largest radius `mon_scatter` buckets candidates for
pub const MON_SCAT_MAXD: i32 = 10;

/// Default cap on a same-race friends group
pub const GROUP_MAX: usize = 32;

/// Radius searched around a seed monster for each reinforcement
pub const REINFORCE_RADIUS: i32 = 7;

/// Radius searched around each seed of a friends group
pub const FRIENDS_RADIUS: i32 = 4;

/// Scatter attempts per friends seed
pub const FRIENDS_TRIES_PER_SEED: usize = 8;

/// Radius searched around an escort giver
pub const ESCORT_RADIUS: i32 = 3;

/// Escort placement attempts
pub const ESCORT_TRIES: usize = 32;

/// Radius `summon_specific` scatters the summoned monster within
pub const SUMMON_RADIUS: i32 = 2;

/// Distance each horde step wanders from the previous one
pub const HORDE_STEP: i32 = 5;

/// Levels added to the summon ceiling for horde kin
pub const HORDE_SUMMON_BONUS: i32 = 5;

/// Initial haste granted by the `HASTE` placement flag
pub const HASTE_TURNS: u16 = 100;

/// Display symbols eligible for the joke-race substitution
pub const JURAL_SYMBOLS: &str = "hkoptuyAHLOPTUVY";

/// Levels added to the floor depth when a nest draws its roster
pub const NEST_ROSTER_BONUS: i32 = 11;

/// Levels added to the floor depth when a nest locks its theme symbol/race
pub const NEST_PREP_BONUS: i32 = 10;

/// Energy gained per game tick, indexed by speed (`extract_energy`)
pub const EXTRACT_ENERGY: [u8; 200] = [
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* Slow */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* S-50 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* S-40 */ 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    /* S-30 */ 2, 2, 2, 2, 2, 2, 2, 3, 3, 3,
    /* S-20 */ 3, 3, 3, 3, 3, 4, 4, 4, 4, 4,
    /* S-10 */ 5, 5, 5, 5, 6, 6, 7, 7, 8, 9,
    /* Norm */ 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    /* F+10 */ 20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
    /* F+20 */ 30, 31, 32, 33, 34, 35, 36, 36, 37, 37,
    /* F+30 */ 38, 38, 39, 39, 40, 40, 40, 41, 41, 41,
    /* F+40 */ 42, 42, 42, 43, 43, 43, 44, 44, 44, 44,
    /* F+50 */ 45, 45, 45, 45, 45, 46, 46, 46, 46, 46,
    /* F+60 */ 47, 47, 47, 47, 47, 48, 48, 48, 48, 48,
    /* F+70 */ 49, 49, 49, 49, 49, 49, 49, 49, 49, 49,
    /* Fast */ 49, 49, 49, 49, 49, 49, 49, 49, 49, 49,
];

/// Energy per tick for a given speed, clamped to the table
pub fn speed_to_energy(speed: i32) -> i32 {
    EXTRACT_ENERGY[speed.clamp(0, MAX_SPEED) as usize] as i32
}
