//! Shared fixtures for unit tests

use crate::dungeon::{Floor, Grid, QuestLog};
use crate::monster::{RaceCatalog, RaceDefinition, RaceFlags, RaceId, Spawner};
use crate::rng::GameRng;
use crate::world::GenerationConfig;

pub const SHADOW: RaceId = RaceId(0);
pub const JURAL: RaceId = RaceId(1);
pub const RAT: RaceId = RaceId(2);
pub const JACKAL: RaceId = RaceId(3);
pub const ORC: RaceId = RaceId(4);
pub const ORC_CAPTAIN: RaceId = RaceId(5);
pub const TROLL: RaceId = RaceId(6);
pub const ANGEL: RaceId = RaceId(7);
pub const KING: RaceId = RaceId(8);
pub const TANUKI: RaceId = RaceId(9);
pub const CHAMELEON: RaceId = RaceId(10);
pub const EEL: RaceId = RaceId(11);
pub const TOWNSPERSON: RaceId = RaceId(12);
pub const BANDIT: RaceId = RaceId(13);
pub const BEAR: RaceId = RaceId(14);
pub const LOUSE: RaceId = RaceId(15);
pub const GUARDIAN: RaceId = RaceId(16);
pub const CHAMELEON_LORD: RaceId = RaceId(17);

pub fn races() -> Vec<RaceDefinition> {
    vec![
        RaceDefinition::new("shadow", 'G', 0, 0),
        RaceDefinition::new("jural", 'A', 0, 0),
        RaceDefinition::new("rat", 'r', 1, 1),
        RaceDefinition::new("jackal", 'C', 1, 1).with_flags(RaceFlags::FRIENDS),
        RaceDefinition::new("orc", 'o', 10, 1).with_flags(RaceFlags::EVIL),
        RaceDefinition::new("orc captain", 'o', 15, 2)
            .with_flags(RaceFlags::EVIL | RaceFlags::ESCORT),
        RaceDefinition::new("troll", 'T', 20, 1).with_flags(RaceFlags::EVIL),
        RaceDefinition::new("angel", 'A', 20, 2).with_flags(RaceFlags::GOOD),
        RaceDefinition::new("king", 'p', 20, 1).with_flags(RaceFlags::UNIQUE | RaceFlags::EVIL),
        RaceDefinition::new("tanuki", 'q', 12, 3).with_flags(RaceFlags::TANUKI),
        RaceDefinition::new("chameleon", 'R', 10, 3).with_flags(RaceFlags::CHAMELEON),
        RaceDefinition::new("eel", 'l', 5, 2).with_flags(RaceFlags::AQUATIC),
        RaceDefinition::new("townsperson", 't', 0, 1).with_flags(RaceFlags::WILD_TOWN),
        RaceDefinition::new("bandit", 'p', 8, 1),
        RaceDefinition::new("bear", 'q', 9, 1),
        RaceDefinition::new("louse", 'I', 3, 3).with_flags(RaceFlags::MULTIPLY),
        RaceDefinition::new("guardian", 'D', 30, 1)
            .with_flags(RaceFlags::UNIQUE | RaceFlags::GUARDIAN | RaceFlags::FORCE_MAXHP),
        RaceDefinition::new("chameleon lord", 'R', 25, 3)
            .with_flags(RaceFlags::UNIQUE | RaceFlags::CHAMELEON),
    ]
}

pub fn config() -> GenerationConfig {
    let mut config = GenerationConfig::default();
    config.special.shadow = Some(SHADOW);
    config.special.jural = Some(JURAL);
    config.special.wounded = Some(BEAR);
    config
}

/// Owns everything a `Spawner` borrows
pub struct Fixture {
    pub floor: Floor,
    pub races: RaceCatalog,
    pub quests: QuestLog,
    pub config: GenerationConfig,
    pub rng: GameRng,
}

impl Fixture {
    /// Open 22x40 floor at `depth`, player in the top-left corner
    pub fn new(depth: i32) -> Self {
        let mut floor = Floor::new(Grid::open(22, 40), depth);
        floor.player.pos = crate::dungeon::Pos::new(1, 1);
        floor.player.level = 20;
        Self {
            floor,
            races: RaceCatalog::new(races()),
            quests: QuestLog::new(),
            config: config(),
            rng: GameRng::new(42),
        }
    }

    pub fn spawner(&mut self) -> Spawner<'_> {
        Spawner::new(
            &mut self.floor,
            &mut self.races,
            &self.quests,
            &self.config,
            &mut self.rng,
        )
    }
}
