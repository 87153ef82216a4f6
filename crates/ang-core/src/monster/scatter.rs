//! Scatter placement (mon_scatter, scatter)

use crate::consts::MON_SCAT_MAXD;
use crate::dungeon::terrain::TerrainQuery;
use crate::dungeon::Pos;
use crate::monster::RaceDefinition;
use crate::rng::GameRng;

/// Random draws `scatter` makes before giving up
const SCATTER_TRIES: u32 = 1000;

/// Nearest usable cell around `target`, ties broken uniformly
///
/// With a race, a cell is usable when the race could be put there now;
/// without one it must be empty and not a pattern tile. Every candidate
/// needs an unobstructed line from the target. Cells are bucketed by
/// distance and one cell per bucket is kept by reservoir sampling.
pub fn mon_scatter<T: TerrainQuery + ?Sized>(
    terrain: &T,
    race: Option<&RaceDefinition>,
    target: Pos,
    max_dist: i32,
    rng: &mut GameRng,
) -> Option<Pos> {
    let max_dist = max_dist.clamp(0, MON_SCAT_MAXD);
    let buckets = max_dist as usize + 1;
    let mut seen = vec![0u32; buckets];
    let mut pick = vec![target; buckets];

    for y in target.y - max_dist..=target.y + max_dist {
        for x in target.x - max_dist..=target.x + max_dist {
            let pos = Pos::new(y, x);
            if !terrain.in_bounds(pos) || !terrain.visible_between(target, pos) {
                continue;
            }
            let usable = match race {
                Some(race) => terrain.is_passable(race, pos),
                None => terrain.is_empty(pos) && !terrain.is_pattern_tile(pos),
            };
            if !usable {
                continue;
            }
            let d = terrain.distance(target, pos);
            if d > max_dist {
                continue;
            }
            let d = d as usize;
            seen[d] += 1;
            if rng.one_in(seen[d]) {
                pick[d] = pos;
            }
        }
    }

    seen.iter().position(|&n| n > 0).map(|d| pick[d])
}

/// Uniformly random in-bounds cell within `d` of `center` with a clear line
/// back to it
pub fn scatter<T: TerrainQuery + ?Sized>(
    terrain: &T,
    center: Pos,
    d: i32,
    rng: &mut GameRng,
) -> Option<Pos> {
    for _ in 0..SCATTER_TRIES {
        let pos = Pos::new(rng.spread(center.y, d), rng.spread(center.x, d));
        if !terrain.in_bounds(pos) {
            continue;
        }
        if d > 1 && terrain.distance(center, pos) > d {
            continue;
        }
        if terrain.visible_between(center, pos) {
            return Some(pos);
        }
    }
    None
}
