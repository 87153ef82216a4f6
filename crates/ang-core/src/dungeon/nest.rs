//! Monster nests
//!
//! A nest is a themed room packed wall to wall. The theme filters which
//! races may appear; a roster of races is drawn once, biased a little out
//! of depth, and every interior cell then gets a random roster entry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use super::floor::Floor;
use super::grid::Pos;
use crate::consts::{MAX_DEPTH, NEST_PREP_BONUS, NEST_ROSTER_BONUS};
use crate::monster::{
    dungeon_hook, Hooks, MonsterId, PlaceFlags, RaceDefinition, RaceFlags, RaceId, Spawner,
    SubAlign, Summoner,
};
use crate::rng::GameRng;
use crate::world::PlacementError;

/// Nest themes, shallowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum NestTheme {
    /// Copies of one race
    Clone,
    Jelly,
    /// One display symbol, no evil races
    SymbolGood,
    /// One display symbol, no good races
    SymbolEvil,
    Mimic,
    Horror,
    Kennel,
    Animal,
    Chapel,
    Undead,
}

impl NestTheme {
    /// Shallowest depth the theme appears at
    pub const fn level(self) -> i32 {
        match self {
            NestTheme::Clone | NestTheme::Jelly => 5,
            NestTheme::SymbolGood | NestTheme::SymbolEvil => 25,
            NestTheme::Mimic => 30,
            NestTheme::Horror => 70,
            NestTheme::Kennel => 45,
            NestTheme::Animal => 35,
            NestTheme::Chapel | NestTheme::Undead => 75,
        }
    }

    pub const fn chance(self) -> i32 {
        match self {
            NestTheme::Clone | NestTheme::Jelly => 6,
            NestTheme::SymbolGood | NestTheme::SymbolEvil | NestTheme::Horror => 2,
            NestTheme::Mimic | NestTheme::Kennel | NestTheme::Chapel => 4,
            NestTheme::Animal | NestTheme::Undead => 5,
        }
    }

    /// Selection weight at `depth`; zero when the floor is too shallow
    pub fn weight(self, depth: i32) -> u32 {
        if self.level() > depth {
            return 0;
        }
        let spread = depth.min(MAX_DEPTH - 1) - self.level() + 5;
        (self.chance() * MAX_DEPTH / spread.max(1)) as u32
    }

    /// Theme of a nest built at `depth`
    pub fn pick(depth: i32, rng: &mut GameRng) -> Option<Self> {
        let total: u32 = Self::iter().map(|theme| theme.weight(depth)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = rng.rn2(total);
        for theme in Self::iter() {
            let weight = theme.weight(depth);
            if roll < weight {
                return Some(theme);
            }
            roll -= weight;
        }
        None
    }

    /// Theme's own test, before any lock from preparation
    fn admits(self, race: &RaceDefinition) -> bool {
        match self {
            NestTheme::Clone => true,
            NestTheme::Jelly => !race.has(RaceFlags::EVIL) && "ijm,".contains(race.symbol),
            NestTheme::SymbolGood => !race.has(RaceFlags::EVIL),
            NestTheme::SymbolEvil => !race.has(RaceFlags::GOOD),
            NestTheme::Mimic => "!$&(/=?[\\|".contains(race.symbol),
            NestTheme::Horror => race.has(RaceFlags::ELDRITCH_HORROR),
            NestTheme::Kennel => "CZ".contains(race.symbol),
            NestTheme::Animal => race.has(RaceFlags::ANIMAL),
            NestTheme::Chapel => {
                !race.has(RaceFlags::EVIL)
                    && (race.symbol == 'A' || (race.symbol == 'p' && race.has(RaceFlags::GOOD)))
            }
            NestTheme::Undead => race.has(RaceFlags::UNDEAD),
        }
    }
}

/// Races any nest may hold
pub fn nest_simple_hook(race: &RaceDefinition, floor: &Floor) -> bool {
    dungeon_hook(race, floor)
        && !race.is_unique()
        && !race.has(RaceFlags::UNIQUE2 | RaceFlags::AQUATIC)
}

/// Eligibility of a race for one nest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestFilter {
    pub theme: NestTheme,
    /// Clone nests: the one race allowed
    pub race: Option<RaceId>,
    /// Symbol nests: the one symbol allowed
    pub symbol: Option<char>,
}

impl NestFilter {
    pub fn admits(&self, race: &RaceDefinition, floor: &Floor) -> bool {
        nest_simple_hook(race, floor)
            && self.theme.admits(race)
            && self.race.is_none_or(|id| id == race.id)
            && self.symbol.is_none_or(|symbol| symbol == race.symbol)
    }
}

/// Interior of a room, inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomShape {
    pub center: Pos,
    pub half_height: i32,
    pub half_width: i32,
}

impl RoomShape {
    /// The 5x19 inner room of a standard nest
    pub const fn nest(center: Pos) -> Self {
        Self {
            center,
            half_height: 2,
            half_width: 9,
        }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (pos.y - self.center.y).abs() <= self.half_height
            && (pos.x - self.center.x).abs() <= self.half_width
    }

    /// Interior cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let (cy, cx) = (self.center.y, self.center.x);
        (cy - self.half_height..=cy + self.half_height).flat_map(move |y| {
            (cx - self.half_width..=cx + self.half_width).map(move |x| Pos::new(y, x))
        })
    }
}

/// One roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestSlot {
    pub race: RaceId,
    /// Picked at least once while filling
    pub used: bool,
}

/// What a nest ended up holding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestReport {
    pub theme: NestTheme,
    pub roster: Vec<NestSlot>,
    pub placed: Vec<MonsterId>,
}

impl Spawner<'_> {
    /// Fill `room` with a themed nest
    ///
    /// Fails without placing anything when no theme fits the depth or the
    /// roster cannot be drawn. Cells that reject their pick stay empty.
    pub fn build_nest(&mut self, room: RoomShape) -> Result<NestReport, PlacementError> {
        let depth = self.floor.depth;
        let theme = NestTheme::pick(depth, self.rng).ok_or(PlacementError::NotApplicable)?;
        let filter = self.prepare_nest(theme)?;
        let mut roster: Vec<NestSlot> = self
            .draw_roster(&filter)?
            .into_iter()
            .map(|race| NestSlot { race, used: false })
            .collect();

        let mut placed = Vec::new();
        for cell in room.cells() {
            let i = self.rng.rn2(roster.len() as u32) as usize;
            let Some(slot) = roster.get_mut(i) else {
                break;
            };
            slot.used = true;
            let race = slot.race;
            if let Ok(id) = self.place_monster_with_group(Summoner::Nobody, cell, race, PlaceFlags::empty()) {
                placed.push(id);
            }
        }

        debug!(
            %theme,
            roster = roster.len(),
            used = roster.iter().filter(|s| s.used).count(),
            placed = placed.len(),
            "built nest"
        );
        Ok(NestReport {
            theme,
            roster,
            placed,
        })
    }

    /// One-time draw that locks a clone race or a symbol
    fn prepare_nest(&mut self, theme: NestTheme) -> Result<NestFilter, PlacementError> {
        let mut filter = NestFilter {
            theme,
            race: None,
            symbol: None,
        };
        let lock_race = theme == NestTheme::Clone;
        let lock_symbol = matches!(theme, NestTheme::SymbolGood | NestTheme::SymbolEvil);
        if lock_race || lock_symbol {
            let level = self.floor.depth + NEST_PREP_BONUS;
            let chosen = self.draw_race(level, &Hooks::race(&nest_simple_hook))?;
            if lock_race {
                filter.race = Some(chosen);
            } else {
                filter.symbol = self.races.get_race(chosen).map(|r| r.symbol);
            }
        }
        Ok(filter)
    }

    /// Roster of `nest_roster` races, none hostile to those already drawn
    fn draw_roster(&mut self, filter: &NestFilter) -> Result<Vec<RaceId>, PlacementError> {
        let level = self.floor.depth + NEST_ROSTER_BONUS;
        let hook = |race: &RaceDefinition, floor: &Floor| filter.admits(race, floor);
        let hooks = Hooks::race(&hook);
        let attempts = self.config.nest_pick_attempts;

        let mut align = SubAlign::NEUTRAL;
        let mut roster = Vec::with_capacity(self.config.nest_roster);
        for _ in 0..self.config.nest_roster {
            let mut pick = None;
            for _ in 0..attempts {
                let race = self.draw_race(level, &hooks)?;
                let native = self.races.get_race(race).map_or(SubAlign::NEUTRAL, |r| r.native_align());
                if !align.is_hostile_to(native) {
                    pick = Some((race, native));
                    break;
                }
            }
            let Some((race, native)) = pick else {
                return Err(PlacementError::RetryBudgetExhausted { attempts });
            };
            align |= native;
            roster.push(race);
        }
        Ok(roster)
    }
}
