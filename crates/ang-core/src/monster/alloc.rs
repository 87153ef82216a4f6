//! Allocation table (alloc_race_table)
//!
//! The catalog's races ordered by level, and the per-call weighting pass
//! that turns them into a drawable table for one depth ceiling and one
//! pair of eligibility hooks.

use super::race::{RaceCatalog, RaceDefinition, RaceFlags, RaceId};
use super::SubAlign;
use crate::dungeon::terrain::{race_can_cross, TerrainQuery};
use crate::dungeon::{Floor, Pos};
use crate::rng::GameRng;

/// Eligibility predicate over a race, evaluated against the floor being populated
pub type RaceHook<'h> = dyn Fn(&RaceDefinition, &Floor) -> bool + 'h;

// ============================================================================
// Table
// ============================================================================

/// One race in level order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEntry {
    pub race: RaceId,
    /// Depth of first eligibility
    pub level: i32,
    pub base_weight: u32,
}

/// Races sorted by level, built once with the catalog
#[derive(Debug, Clone, Default)]
pub struct AllocationTable {
    entries: Vec<AllocationEntry>,
}

impl AllocationTable {
    pub fn new(races: &[RaceDefinition]) -> Self {
        let mut entries: Vec<AllocationEntry> = races
            .iter()
            .filter(|r| r.base_weight() > 0)
            .map(|r| AllocationEntry {
                race: r.id,
                level: r.level,
                base_weight: r.base_weight(),
            })
            .collect();
        // Stable: equal levels keep catalog order
        entries.sort_by_key(|e| e.level);
        Self { entries }
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// The two eligibility hooks of one draw
///
/// `race` judges the race alone (theme, summon kind); `cell` judges the race
/// against the spot it will be put on. Either may be absent.
#[derive(Clone, Copy, Default)]
pub struct Hooks<'h> {
    pub race: Option<&'h RaceHook<'h>>,
    pub cell: Option<&'h RaceHook<'h>>,
}

impl<'h> Hooks<'h> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn race(race: &'h RaceHook<'h>) -> Self {
        Self {
            race: Some(race),
            cell: None,
        }
    }

    pub fn both(race: &'h RaceHook<'h>, cell: &'h RaceHook<'h>) -> Self {
        Self {
            race: Some(race),
            cell: Some(cell),
        }
    }

    fn admits(&self, race: &RaceDefinition, floor: &Floor) -> bool {
        self.race.is_none_or(|hook| hook(race, floor)) && self.cell.is_none_or(|hook| hook(race, floor))
    }
}

/// Races the floor's dungeon can hold at all
///
/// The town only draws town dwellers; below ground, wilderness-only races
/// are refused.
pub fn dungeon_hook(race: &RaceDefinition, floor: &Floor) -> bool {
    if floor.is_town() {
        race.has(RaceFlags::WILD_TOWN)
    } else {
        !race.has(RaceFlags::WILD_ONLY)
    }
}

/// Races that can live on the terrain at `pos`
pub fn cell_hook(pos: Pos) -> impl Fn(&RaceDefinition, &Floor) -> bool {
    move |race: &RaceDefinition, floor: &Floor| {
        let feature = floor.grid.feature(pos);
        !feature.is_placeable() || race_can_cross(feature, race)
    }
}

/// Races a tanuki may pose as
pub fn tanuki_hook(race: &RaceDefinition, floor: &Floor) -> bool {
    !race.has(
        RaceFlags::UNIQUE
            | RaceFlags::MULTIPLY
            | RaceFlags::FRIENDLY
            | RaceFlags::AQUATIC
            | RaceFlags::CHAMELEON
            | RaceFlags::EXPLODES,
    ) && dungeon_hook(race, floor)
}

/// What a newborn chameleon may turn into
#[derive(Debug, Clone, Copy)]
pub struct ChameleonTarget {
    /// Where the chameleon stands
    pub pos: Pos,
    /// The chameleon is a unique lord; holds its own level
    pub lord_level: Option<i32>,
    /// Alignment of the monster that summoned it, if any
    pub summoner_align: Option<SubAlign>,
}

impl ChameleonTarget {
    /// Eligibility of a race as the chameleon's new true race
    pub fn admits(&self, race: &RaceDefinition, floor: &Floor) -> bool {
        if race.has(RaceFlags::FRIENDLY | RaceFlags::CHAMELEON | RaceFlags::EXPLODES) {
            return false;
        }
        if !floor.can_cross(race, self.pos) {
            return false;
        }
        if self
            .summoner_align
            .is_some_and(|align| align.is_hostile_to(race.native_align()))
        {
            return false;
        }
        match self.lord_level {
            Some(level) => race.has(RaceFlags::UNIQUE) && (race.level - level).abs() <= 5,
            None => {
                !race.has(RaceFlags::UNIQUE | RaceFlags::MULTIPLY) && dungeon_hook(race, floor)
            }
        }
    }
}

// ============================================================================
// Weighting
// ============================================================================

/// A weighted table ready to sample
#[derive(Debug, Clone, Default)]
pub struct WeightedDraw {
    /// (race, level, working weight), level order, zero weights dropped
    pub entries: Vec<(RaceId, i32, u32)>,
    pub total: u32,
}

impl WeightedDraw {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Linear-scan weighted sample; None when nothing carries weight
    pub fn sample(&self, rng: &mut GameRng) -> Option<(RaceId, i32)> {
        if self.total == 0 {
            return None;
        }
        let mut roll = rng.rn2(self.total);
        for &(race, level, weight) in &self.entries {
            if roll < weight {
                return Some((race, level));
            }
            roll -= weight;
        }
        self.entries.last().map(|&(race, level, _)| (race, level))
    }
}

/// Weigh every race up to `ceiling` against the hooks and the live caps
///
/// Outside the arena, quest targets and guardians are never drawn, forced-
/// depth races stay below their level, and races failing a singleton cap
/// weigh zero. Reads the catalog counters only.
pub fn weigh(catalog: &RaceCatalog, floor: &Floor, ceiling: i32, hooks: &Hooks<'_>) -> WeightedDraw {
    let exempt = floor.mode.arena;
    let mut draw = WeightedDraw::default();

    for entry in catalog.alloc_table().entries() {
        if entry.level > ceiling {
            break;
        }
        let Some(race) = catalog.get_race(entry.race) else {
            continue;
        };
        if !exempt {
            if race.has(RaceFlags::QUESTOR | RaceFlags::GUARDIAN) {
                continue;
            }
            if race.has(RaceFlags::FORCE_DEPTH) && floor.depth > 0 && race.level > floor.depth {
                continue;
            }
            if catalog.cap_rejection(race.id).is_some() {
                continue;
            }
        }
        if !hooks.admits(race, floor) {
            continue;
        }
        draw.entries.push((entry.race, entry.level, entry.base_weight));
        draw.total += entry.base_weight;
    }

    draw
}
