//! Summoning near a point (summon_specific)

use super::alloc::{cell_hook, dungeon_hook, Hooks};
use super::makemon::{PlaceFlags, Spawner, Summoner};
use super::monst::{MonsterId, SubAlign};
use super::race::{RaceDefinition, RaceFlags, RaceId};
use crate::consts::SUMMON_RADIUS;
use crate::dungeon::{Floor, Pos};
use crate::world::PlacementError;

/// What a summon may bring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SummonKind {
    #[default]
    Any,
    /// Races sharing a display symbol
    Kin(char),
    Animal,
    Undead,
}

impl SummonKind {
    fn admits(self, race: &RaceDefinition, horde_excluded: Option<RaceId>) -> bool {
        match self {
            SummonKind::Any => true,
            SummonKind::Kin(symbol) => race.symbol == symbol && Some(race.id) != horde_excluded,
            SummonKind::Animal => race.has(RaceFlags::ANIMAL),
            SummonKind::Undead => race.has(RaceFlags::UNDEAD),
        }
    }
}

impl Spawner<'_> {
    /// Summon one race of `kind` (with its group) next to `center`
    ///
    /// The race is drawn at `(depth + level_bonus) / 2 + 5`. A monster
    /// summoner never brings races hostile to its own alignment; races
    /// hostile to the player's alignment answer a player only sometimes.
    pub fn summon_specific(
        &mut self,
        who: Summoner,
        center: Pos,
        level_bonus: i32,
        kind: SummonKind,
        flags: PlaceFlags,
    ) -> Result<MonsterId, PlacementError> {
        if self.floor.mode.arena {
            return Err(PlacementError::NotApplicable);
        }
        let cell = self.scatter_near(None, center, SUMMON_RADIUS)
            .ok_or(PlacementError::SpaceExhausted)?;

        let summoner_align = who
            .monster()
            .and_then(|id| self.floor.monster(id))
            .map(|m| m.sub_align);

        // The player's reluctant summons are decided once per call, per race
        let player_align = SubAlign::of_player(self.floor.player.align, 10, -10);
        let reluctance = self.floor.player.align.unsigned_abs() / 2 + 1;
        let answers: Vec<bool> = if who == Summoner::Player {
            self.races
                .races()
                .iter()
                .map(|race| !player_align.is_hostile_to(race.native_align()) || self.rng.one_in(reluctance))
                .collect()
        } else {
            Vec::new()
        };

        let allow_unique = flags.contains(PlaceFlags::ALLOW_UNIQUE);
        let horde_excluded = self.config.special.horde_excluded;
        let summon_hook = |race: &RaceDefinition, floor: &Floor| {
            if !dungeon_hook(race, floor) {
                return false;
            }
            if summoner_align.is_some_and(|align| align.is_hostile_to(race.native_align())) {
                return false;
            }
            if !answers.is_empty() && !answers.get(race.id.index()).copied().unwrap_or(false) {
                return false;
            }
            if !allow_unique && race.is_unique() {
                return false;
            }
            kind.admits(race, horde_excluded)
        };
        let terrain_hook = cell_hook(cell);

        let level = (self.floor.depth + level_bonus) / 2 + 5;
        let race = self.draw_race(level, &Hooks::both(&summon_hook, &terrain_hook))?;
        self.place_monster_with_group(who, cell, race, flags)
    }
}
