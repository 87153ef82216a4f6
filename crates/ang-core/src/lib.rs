//! ang-core: Monster population engine for an Angband-family roguelike
//!
//! Decides which races appear on a dungeon floor, how many come together
//! and where they stand. The crate is pure logic: callers hand a `Spawner`
//! the floor, the race catalog, quest state, tuning and an RNG, and read
//! back the placed monsters and any player-facing notices.

pub mod consts;
pub mod dungeon;
pub mod monster;
pub mod rng;
pub mod world;

#[cfg(test)]
mod test_support;

pub use dungeon::{Floor, Grid, Pos};
pub use monster::{PlaceFlags, RaceCatalog, RaceDefinition, RaceId, Spawner, Summoner};
pub use rng::GameRng;
pub use world::{GenerationConfig, PlacementError};
