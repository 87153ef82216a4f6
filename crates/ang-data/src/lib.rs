//! ang-data: Static race data for the population engine
//!
//! Contains a sample bestiary and the dungeon it lives in.

pub mod races;

pub use races::*;

use ang_core::monster::RaceCatalog;
use ang_core::world::SpecialRaces;

/// Fresh catalog with every live count at zero
pub fn catalog() -> RaceCatalog {
    RaceCatalog::new(races())
}

/// Resolve the races the engine treats specially
pub fn special_races(catalog: &RaceCatalog) -> SpecialRaces {
    SpecialRaces {
        shadow: catalog.find_by_name("shadow"),
        jural: catalog.find_by_name("jural alien"),
        wounded: catalog.find_by_name("wounded bear"),
        horde_excluded: catalog.find_by_name("metal babble"),
    }
}
