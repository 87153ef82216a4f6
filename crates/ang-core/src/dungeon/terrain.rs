//! Terrain queries the placement code asks of a floor

use super::floor::Floor;
use super::grid::{Feature, Pos};
use crate::monster::{RaceDefinition, RaceFlags};

/// Geometry and passability answers consumed by placement
pub trait TerrainQuery {
    /// Inside the map and off the permanent border
    fn in_bounds(&self, pos: Pos) -> bool;

    /// The race could stand on the cell's terrain (`monster_can_cross_terrain`)
    fn can_cross(&self, race: &RaceDefinition, pos: Pos) -> bool;

    /// The race could be put on the cell right now: crossable, no monster,
    /// not the player (`monster_can_enter`)
    fn is_passable(&self, race: &RaceDefinition, pos: Pos) -> bool;

    /// Placeable terrain with nobody on it (`cave_empty_bold2`)
    fn is_empty(&self, pos: Pos) -> bool;

    fn is_pattern_tile(&self, pos: Pos) -> bool;

    /// Unobstructed line between two cells (`projectable`)
    fn visible_between(&self, a: Pos, b: Pos) -> bool;

    fn distance(&self, a: Pos, b: Pos) -> i32 {
        a.distance(b)
    }
}

/// Whether a race can exist on a feature
pub fn race_can_cross(feature: Feature, race: &RaceDefinition) -> bool {
    let flies = race.has(RaceFlags::CAN_FLY);
    match feature {
        Feature::Granite | Feature::PermanentWall => false,
        Feature::Wall | Feature::Rubble | Feature::ClosedDoor => {
            race.has(RaceFlags::PASS_WALL | RaceFlags::KILL_WALL)
        }
        Feature::Floor | Feature::Pattern => !race.has(RaceFlags::AQUATIC) || flies,
        Feature::ShallowWater => true,
        Feature::DeepWater => flies || race.has(RaceFlags::AQUATIC | RaceFlags::CAN_SWIM),
        Feature::Lava => flies || race.has(RaceFlags::IM_FIRE),
    }
}

impl TerrainQuery for Floor {
    fn in_bounds(&self, pos: Pos) -> bool {
        self.grid.in_bounds(pos)
    }

    fn can_cross(&self, race: &RaceDefinition, pos: Pos) -> bool {
        self.grid.contains(pos) && race_can_cross(self.grid.feature(pos), race)
    }

    fn is_passable(&self, race: &RaceDefinition, pos: Pos) -> bool {
        self.can_cross(race, pos) && self.grid.monster_at(pos).is_none() && self.player.pos != pos
    }

    fn is_empty(&self, pos: Pos) -> bool {
        self.grid.contains(pos)
            && self.grid.feature(pos).is_placeable()
            && self.grid.monster_at(pos).is_none()
            && self.player.pos != pos
    }

    fn is_pattern_tile(&self, pos: Pos) -> bool {
        self.grid.feature(pos) == Feature::Pattern
    }

    fn visible_between(&self, a: Pos, b: Pos) -> bool {
        self.grid.projectable(a, b)
    }
}
