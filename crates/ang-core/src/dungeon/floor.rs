//! The dungeon floor being populated
//!
//! Owns the grid and the monster table, and carries everything a placement
//! call reads about where it is happening: depths, the player, game mode
//! and the dungeon's guardian.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::grid::{Grid, Pos, Rune};
use crate::monster::{Monster, MonsterId, MonsterTable, RaceId};

/// Identifier of a saved floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FloorId(pub u32);

/// What the population engine needs to know about the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerContext {
    pub pos: Pos,
    pub level: i32,
    /// Alignment scalar; positive is good
    pub align: i32,
    /// Player senses uniques arriving
    pub warning: bool,
    /// Item that glows when a unique arrives
    pub warning_item: Option<String>,
    /// Personality that swaps some races for the joke race
    pub joke_personality: bool,
}

/// Game mode switches affecting generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorMode {
    /// Nightmare difficulty
    pub nightmare: bool,
    /// Arena fight: uniqueness caps do not apply
    pub arena: bool,
}

/// The dungeon branch this floor belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DungeonInfo {
    pub name: String,
    /// Final guardian race, placed once on the deepest level
    pub guardian: Option<RaceId>,
    pub max_depth: i32,
}

/// Colour of a unique warning, graded by level gap to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum WarningColor {
    #[strum(serialize = "black")]
    Black,
    #[strum(serialize = "purple")]
    Purple,
    #[strum(serialize = "deep red")]
    DeepRed,
    #[strum(serialize = "red")]
    Red,
    #[strum(serialize = "pink")]
    Pink,
    #[strum(serialize = "white")]
    White,
}

impl WarningColor {
    /// Grade a unique of `race_level` against a player of `player_level`
    pub fn grade(race_level: i32, player_level: i32) -> Self {
        if race_level > player_level + 30 {
            WarningColor::Black
        } else if race_level > player_level + 15 {
            WarningColor::Purple
        } else if race_level > player_level + 5 {
            WarningColor::DeepRed
        } else if race_level > player_level - 5 {
            WarningColor::Red
        } else if race_level > player_level - 15 {
            WarningColor::Pink
        } else {
            WarningColor::White
        }
    }
}

/// Player-facing events raised while placing monsters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    UniqueWarning { race: RaceId, color: WarningColor, message: String },
    RuneBroken { pos: Pos },
    RuneExploded { pos: Pos, damage: i32 },
    RuneDisarmed { pos: Pos },
}

/// A dungeon floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    /// Current dungeon level; 0 is the town
    pub depth: i32,
    /// Base object/monster level of the floor
    pub base_level: i32,
    /// Ambient ceiling used when nothing more specific is asked for
    pub monster_level: i32,
    pub dungeon: DungeonInfo,
    pub grid: Grid,
    pub monsters: MonsterTable,
    /// Breeders alive on the floor
    pub num_repro: u32,
    pub player: PlayerContext,
    pub mode: FloorMode,
    /// Floor is kept when the player leaves; uniques remember it
    pub persistent: bool,
    /// Level generation has finished
    pub generated: bool,
    /// Game turn, drives the out-of-depth curves
    pub turn: u64,
    pub notices: Vec<Notice>,
}

impl Floor {
    pub fn new(grid: Grid, depth: i32) -> Self {
        Self {
            id: FloorId::default(),
            depth,
            base_level: depth,
            monster_level: depth,
            dungeon: DungeonInfo::default(),
            grid,
            monsters: MonsterTable::default(),
            num_repro: 0,
            player: PlayerContext::default(),
            mode: FloorMode::default(),
            persistent: false,
            generated: false,
            turn: 0,
            notices: Vec::new(),
        }
    }

    pub const fn is_town(&self) -> bool {
        self.depth == 0
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(id)
    }

    pub fn monster_at(&self, pos: Pos) -> Option<&Monster> {
        self.grid.monster_at(pos).and_then(|id| self.monsters.get(id))
    }

    /// Commit a monster built for the slot `MonsterTable::next_slot` reported
    pub(crate) fn add_monster(&mut self, monster: Monster) -> MonsterId {
        let pos = monster.pos;
        let id = self.monsters.insert(monster);
        self.grid.set_monster(pos, Some(id));
        id
    }

    /// Take a monster off the floor; the caller settles race bookkeeping
    pub(crate) fn remove_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let monster = self.monsters.remove(id)?;
        if self.grid.monster_at(monster.pos) == Some(id) {
            self.grid.set_monster(monster.pos, None);
        }
        Some(monster)
    }

    pub fn inscribe_rune(&mut self, pos: Pos, rune: Rune) {
        self.grid.set_rune(pos, Some(rune));
    }

    pub fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
