//! Monster system
//!
//! Race definitions and live monsters, plus the population engine that
//! draws races for a depth and puts them (and their groups) on a floor.

pub mod alloc;
mod group;
mod makemon;
mod monst;
mod populate;
mod race;
pub mod scatter;
pub mod select;
mod summon;

pub use alloc::{
    cell_hook, dungeon_hook, tanuki_hook, weigh, AllocationEntry, AllocationTable, ChameleonTarget,
    Hooks, RaceHook, WeightedDraw,
};
pub use makemon::{PlaceFlags, Spawner, Summoner};
pub use monst::{Attitude, Disguise, Identity, Monster, MonsterId, MonsterTable, SubAlign, TimedStatus};
pub use race::{Dice, RaceCatalog, RaceDefinition, RaceFlags, RaceId, RaceVitals, Reinforcement};
pub use scatter::{mon_scatter, scatter};
pub use select::{effective_level, get_mon_num};
pub use summon::SummonKind;
