//! Dungeon floors
//!
//! The grid, the floor that owns it and the monsters on it, the terrain
//! and quest contracts placement consults, and themed nest rooms.

mod floor;
mod grid;
pub mod nest;
mod quest;
pub mod terrain;

pub use floor::{DungeonInfo, Floor, FloorId, FloorMode, Notice, PlayerContext, WarningColor};
pub use grid::{Cell, Feature, Grid, Pos, Rune};
pub use nest::{NestFilter, NestReport, NestSlot, NestTheme, RoomShape};
pub use quest::{KillQuota, Quest, QuestKind, QuestLog, QuestState};
pub use terrain::{race_can_cross, TerrainQuery};
