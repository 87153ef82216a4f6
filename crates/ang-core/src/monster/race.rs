//! Monster races (r_info)
//!
//! A race is the immutable stat block many live monsters share. The only
//! mutable part, the live-count bookkeeping, is kept beside the definitions
//! in `RaceVitals` so definitions can stay `'static` data.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::alloc::AllocationTable;
use super::SubAlign;
use crate::dungeon::FloorId;
use crate::rng::GameRng;
use crate::world::Rejection;

/// Index of a race in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RaceId(pub u16);

impl RaceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Race capability flags (RF1_* .. RF8_* collapsed into one set)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RaceFlags: u64 {
        // Generation caps
        const UNIQUE          = 1 << 0;
        /// Separate singleton category, capped at one live instance
        const UNIQUE2         = 1 << 1;
        /// Nazgul-style race: capped like a unique but with a larger max
        const NAZGUL          = 1 << 2;
        /// Quest target, never drawn at random
        const QUESTOR         = 1 << 3;
        /// Dungeon guardian, never drawn at random
        const GUARDIAN        = 1 << 4;
        /// Refuses to appear above its own level
        const FORCE_DEPTH     = 1 << 5;
        /// Generated asleep and patient
        const FORCE_SLEEP     = 1 << 6;
        /// Always rolls maximum hit dice
        const FORCE_MAXHP     = 1 << 7;

        // Groups
        const FRIENDS         = 1 << 8;
        const ESCORT          = 1 << 9;
        /// Escorts of this race bring their own friends
        const ESCORTS         = 1 << 10;
        const MULTIPLY        = 1 << 11;

        // Attitude
        const FRIENDLY        = 1 << 12;
        const EVIL            = 1 << 13;
        const GOOD            = 1 << 14;

        // Disguise
        /// True race re-rolls into another race at birth
        const CHAMELEON       = 1 << 15;
        /// Appears as a different race
        const TANUKI          = 1 << 16;

        // Movement
        const AQUATIC         = 1 << 17;
        const CAN_FLY         = 1 << 18;
        const CAN_SWIM        = 1 << 19;
        const PASS_WALL       = 1 << 20;
        const KILL_WALL       = 1 << 21;
        const IM_FIRE         = 1 << 22;
        const NEVER_MOVE      = 1 << 23;

        // Kind
        const ANIMAL          = 1 << 24;
        const UNDEAD          = 1 << 25;
        const ELDRITCH_HORROR = 1 << 26;
        /// First blow is an explosion
        const EXPLODES        = 1 << 27;

        // Wilderness
        const WILD_ONLY       = 1 << 28;
        const WILD_TOWN       = 1 << 29;
    }
}

/// Hit dice or reinforcement count dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dice {
    pub num: u16,
    pub sides: u16,
}

impl Dice {
    pub const fn new(num: u16, sides: u16) -> Self {
        Self { num, sides }
    }

    pub fn roll(&self, rng: &mut GameRng) -> u32 {
        rng.dice(self.num as u32, self.sides as u32)
    }

    pub const fn max(&self) -> u32 {
        GameRng::maxroll(self.num as u32, self.sides as u32)
    }
}

/// One configured reinforcement quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reinforcement {
    pub race: RaceId,
    pub count: Dice,
}

/// Immutable race definition
#[derive(Debug, Clone)]
pub struct RaceDefinition {
    pub id: RaceId,
    pub name: &'static str,
    pub symbol: char,
    /// Intended depth
    pub level: i32,
    /// Sampling weight divisor; 0 means never drawn at random
    pub rarity: u8,
    pub hit_dice: Dice,
    pub speed: i32,
    /// Alertness; 0 means never generated asleep
    pub sleep: u16,
    pub flags: RaceFlags,
    /// Simultaneous live cap for uniques and nazgul
    pub max_num: u16,
    pub reinforcements: &'static [Reinforcement],
    /// Races that must all be absent for this one to appear
    pub exclusive_with: &'static [RaceId],
}

impl RaceDefinition {
    /// A plain race; the catalog assigns the id
    pub fn new(name: &'static str, symbol: char, level: i32, rarity: u8) -> Self {
        Self {
            id: RaceId(0),
            name,
            symbol,
            level,
            rarity,
            hit_dice: Dice::new(level.max(1) as u16, 8),
            speed: crate::consts::NORMAL_SPEED,
            sleep: 10,
            flags: RaceFlags::empty(),
            max_num: 100,
            reinforcements: &[],
            exclusive_with: &[],
        }
    }

    pub fn with_flags(mut self, flags: RaceFlags) -> Self {
        self.flags |= flags;
        if flags.intersects(RaceFlags::UNIQUE | RaceFlags::UNIQUE2) {
            self.max_num = 1;
        }
        self
    }

    pub fn with_hit_dice(mut self, num: u16, sides: u16) -> Self {
        self.hit_dice = Dice::new(num, sides);
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sleep(mut self, sleep: u16) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn with_max_num(mut self, max_num: u16) -> Self {
        self.max_num = max_num;
        self
    }

    pub fn with_reinforcements(mut self, reinforcements: &'static [Reinforcement]) -> Self {
        self.reinforcements = reinforcements;
        self
    }

    pub fn with_exclusive(mut self, races: &'static [RaceId]) -> Self {
        self.exclusive_with = races;
        self
    }

    pub const fn has(&self, flags: RaceFlags) -> bool {
        self.flags.intersects(flags)
    }

    /// Unique or nazgul: capped by `max_num`
    pub const fn is_unique(&self) -> bool {
        self.flags.intersects(RaceFlags::UNIQUE.union(RaceFlags::NAZGUL))
    }

    /// Sub-alignment implied by the race's own good/evil flags
    pub fn native_align(&self) -> SubAlign {
        let mut align = SubAlign::NEUTRAL;
        if self.has(RaceFlags::EVIL) {
            align |= SubAlign::EVIL;
        }
        if self.has(RaceFlags::GOOD) {
            align |= SubAlign::GOOD;
        }
        align
    }

    /// Race carries its own good or evil leaning
    pub const fn is_aligned(&self) -> bool {
        self.flags.intersects(RaceFlags::EVIL.union(RaceFlags::GOOD))
    }

    /// Sampling weight before any filtering (`100 / rarity`)
    pub const fn base_weight(&self) -> u32 {
        if self.rarity == 0 {
            0
        } else {
            100 / self.rarity as u32
        }
    }
}

/// Live-count bookkeeping for one race
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceVitals {
    /// Live instances, counted on the race they were born as
    pub cur_num: u32,
    /// Simultaneous live cap
    pub max_num: u32,
    /// Floor a unique was last placed on
    pub floor: Option<FloorId>,
}

/// The race table plus its counters and the level-ordered allocation table
#[derive(Debug, Clone)]
pub struct RaceCatalog {
    races: Vec<RaceDefinition>,
    vitals: Vec<RaceVitals>,
    alloc: AllocationTable,
}

impl RaceCatalog {
    /// Build a catalog; each race's id becomes its position in `races`
    pub fn new(mut races: Vec<RaceDefinition>) -> Self {
        for (i, race) in races.iter_mut().enumerate() {
            race.id = RaceId(i as u16);
        }
        let vitals = races
            .iter()
            .map(|r| RaceVitals {
                cur_num: 0,
                max_num: r.max_num as u32,
                floor: None,
            })
            .collect();
        let alloc = AllocationTable::new(&races);
        Self {
            races,
            vitals,
            alloc,
        }
    }

    pub fn get_race(&self, id: RaceId) -> Option<&RaceDefinition> {
        self.races.get(id.index())
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn races(&self) -> &[RaceDefinition] {
        &self.races
    }

    pub fn find_by_name(&self, name: &str) -> Option<RaceId> {
        self.races.iter().find(|r| r.name == name).map(|r| r.id)
    }

    pub fn vitals(&self, id: RaceId) -> Option<&RaceVitals> {
        self.vitals.get(id.index())
    }

    pub fn vitals_mut(&mut self, id: RaceId) -> Option<&mut RaceVitals> {
        self.vitals.get_mut(id.index())
    }

    pub fn live_count(&self, id: RaceId) -> u32 {
        self.vitals(id).map_or(0, |v| v.cur_num)
    }

    pub fn increment_live_count(&mut self, id: RaceId) {
        if let Some(v) = self.vitals_mut(id) {
            v.cur_num += 1;
        }
    }

    pub fn decrement_live_count(&mut self, id: RaceId) {
        if let Some(v) = self.vitals_mut(id) {
            v.cur_num = v.cur_num.saturating_sub(1);
        }
    }

    pub(crate) fn alloc_table(&self) -> &AllocationTable {
        &self.alloc
    }

    /// Singleton caps a race currently fails, if any
    ///
    /// Checks, in order: unique/nazgul live cap, UNIQUE2 single-instance cap,
    /// and mutually exclusive partners being alive.
    pub fn cap_rejection(&self, id: RaceId) -> Option<Rejection> {
        let race = self.get_race(id)?;
        let vitals = self.vitals(id)?;
        if race.is_unique() && vitals.cur_num >= vitals.max_num {
            return Some(Rejection::UniqueCap);
        }
        if race.has(RaceFlags::UNIQUE2) && vitals.cur_num >= 1 {
            return Some(Rejection::Unique2Cap);
        }
        if race.exclusive_with.iter().any(|&other| self.live_count(other) > 0) {
            return Some(Rejection::ExclusivePair);
        }
        None
    }
}
