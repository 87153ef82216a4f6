//! Race selection (get_mon_num)
//!
//! Draws one race for a target level. Two things pull the result upward:
//! the level itself may be boosted out of depth on a time-dependent curve,
//! and the draw is re-rolled once or twice keeping the harder result.

use tracing::trace;

use super::alloc::{weigh, Hooks};
use super::race::{RaceCatalog, RaceId};
use crate::dungeon::Floor;
use crate::rng::GameRng;
use crate::world::{GenerationConfig, PlacementError};

/// Chance (percent) of one extra draw keeping the harder race
const HARDER_ONCE: u32 = 60;
/// Chance (percent) of a second extra draw
const HARDER_TWICE: u32 = 10;

/// Level actually drawn at after the out-of-depth boost
///
/// Town-level draws and arena fights are never boosted. The curves run
/// on the floor's own depth, so the town keeps its fixed delay.
pub fn effective_level(floor: &Floor, config: &GenerationConfig, level: i32, rng: &mut GameRng) -> i32 {
    if floor.mode.arena || level <= 0 {
        return level;
    }
    let curve = &config.nasty;
    let chance = curve.chance(floor.depth, floor.turn);
    let max_depth = config.max_depth.max(1);

    let boosted = if floor.mode.nightmare && rng.one_in(chance) {
        1 + level * max_depth / rng.rnd(max_depth as u32) as i32
    } else if rng.one_in(chance) {
        level + curve.bonus(floor.depth, floor.turn)
    } else {
        level
    };
    boosted.min(max_depth - 1)
}

/// Draw a race for `level`, filtered through `hooks`
pub fn get_mon_num(
    catalog: &RaceCatalog,
    floor: &Floor,
    config: &GenerationConfig,
    level: i32,
    hooks: &Hooks<'_>,
    rng: &mut GameRng,
) -> Result<RaceId, PlacementError> {
    let level = effective_level(floor, config, level, rng);
    let draw = weigh(catalog, floor, level, hooks);
    let Some(mut pick) = draw.sample(rng) else {
        return Err(PlacementError::NoEligibleRace);
    };

    let p = rng.rn2(100);
    if p < HARDER_ONCE {
        if let Some(other) = draw.sample(rng) {
            if other.1 > pick.1 {
                pick = other;
            }
        }
    }
    if p < HARDER_TWICE {
        if let Some(other) = draw.sample(rng) {
            if other.1 > pick.1 {
                pick = other;
            }
        }
    }

    let (race, race_level) = pick;
    trace!(race = race.0, race_level, ceiling = level, "drew race");
    Ok(race)
}
