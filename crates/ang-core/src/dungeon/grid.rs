//! Floor cells and the cell grid
//!
//! The grid stores terrain, runes and monster occupancy. Queries that need
//! a race (passability) live in `terrain.rs`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::monster::MonsterId;

/// A cell coordinate, row first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Angband distance: the longer axis plus half the shorter one
    pub const fn distance(self, other: Pos) -> i32 {
        let dy = (self.y - other.y).abs();
        let dx = (self.x - other.x).abs();
        if dy > dx { dy + (dx >> 1) } else { dx + (dy >> 1) }
    }
}

/// Terrain feature of a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Feature {
    /// Solid rock, not part of the map
    #[default]
    Granite,
    /// Dungeon wall that digging monsters can pass
    Wall,
    /// Permanent wall, nothing passes
    PermanentWall,
    Rubble,
    ClosedDoor,
    Floor,
    /// Pattern tile, never a spawn site
    Pattern,
    ShallowWater,
    DeepWater,
    Lava,
}

impl Feature {
    /// Blocks projections and line of sight
    pub const fn blocks_projection(&self) -> bool {
        matches!(
            self,
            Feature::Granite
                | Feature::Wall
                | Feature::PermanentWall
                | Feature::Rubble
                | Feature::ClosedDoor
        )
    }

    /// Monsters may be generated here (`FF_PLACE`)
    pub const fn is_placeable(&self) -> bool {
        matches!(
            self,
            Feature::Floor
                | Feature::Pattern
                | Feature::ShallowWater
                | Feature::DeepWater
                | Feature::Lava
        )
    }
}

/// A rune inscribed on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Rune {
    /// Rune of protection: a monster must break it to arrive here
    Protection,
    /// Explosive rune: detonates or is disarmed when a monster arrives
    Explosive,
}

/// One map cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub feature: Feature,
    pub rune: Option<Rune>,
    /// The player has seen this cell
    pub marked: bool,
    /// Monster standing here
    #[serde(skip)]
    pub monster: Option<MonsterId>,
}

/// Rectangular cell grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    height: i32,
    width: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of solid granite
    pub fn new(height: i32, width: i32) -> Self {
        let height = height.max(1);
        let width = width.max(1);
        Self {
            height,
            width,
            cells: vec![Cell::default(); (height * width) as usize],
        }
    }

    /// Create a grid whose interior is open floor inside a permanent border
    pub fn open(height: i32, width: i32) -> Self {
        let mut grid = Self::new(height, width);
        for y in 0..grid.height {
            for x in 0..grid.width {
                let border = y == 0 || x == 0 || y == grid.height - 1 || x == grid.width - 1;
                grid.cells[(y * grid.width + x) as usize].feature = if border {
                    Feature::PermanentWall
                } else {
                    Feature::Floor
                };
            }
        }
        grid
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Position lies on the grid (border included)
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.y >= 0 && pos.x >= 0 && pos.y < self.height && pos.x < self.width
    }

    /// Position lies strictly inside the permanent border (`in_bounds`)
    pub const fn in_bounds(&self, pos: Pos) -> bool {
        pos.y > 0 && pos.x > 0 && pos.y < self.height - 1 && pos.x < self.width - 1
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get((pos.y * self.width + pos.x) as usize)
    }

    pub fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get_mut((pos.y * self.width + pos.x) as usize)
    }

    /// Feature at a position; off-grid reads as granite
    pub fn feature(&self, pos: Pos) -> Feature {
        self.cell(pos).map(|c| c.feature).unwrap_or_default()
    }

    pub fn set_feature(&mut self, pos: Pos, feature: Feature) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.feature = feature;
        }
    }

    pub fn rune(&self, pos: Pos) -> Option<Rune> {
        self.cell(pos).and_then(|c| c.rune)
    }

    pub fn set_rune(&mut self, pos: Pos, rune: Option<Rune>) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.rune = rune;
        }
    }

    /// Remove a rune and forget it was ever seen
    pub fn clear_rune(&mut self, pos: Pos) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.rune = None;
            cell.marked = false;
        }
    }

    pub fn monster_at(&self, pos: Pos) -> Option<MonsterId> {
        self.cell(pos).and_then(|c| c.monster)
    }

    pub(crate) fn set_monster(&mut self, pos: Pos, id: Option<MonsterId>) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.monster = id;
        }
    }

    /// Unobstructed straight line between two cells (`projectable`)
    ///
    /// Walks a Bresenham line; the destination itself may be a wall, but no
    /// blocking cell may lie strictly between the two ends.
    pub fn projectable(&self, from: Pos, to: Pos) -> bool {
        let mut x = from.x;
        let mut y = from.y;

        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let sx = if x < to.x { 1 } else { -1 };
        let sy = if y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x == to.x && y == to.y {
                return self.contains(to);
            }
            if (x != from.x || y != from.y) && self.feature(Pos::new(y, x)).blocks_projection() {
                return false;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
