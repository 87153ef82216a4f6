//! Group expansion (place_monster_aux, place_monster_group)
//!
//! After a seed monster lands, its race may bring configured reinforcements,
//! a pack of its own kind and an escort of related races. Every step is
//! best effort: running out of room thins the group, it never fails the
//! placement of the seed.

use tracing::debug;

use super::alloc::{cell_hook, dungeon_hook, Hooks};
use super::makemon::{PlaceFlags, Spawner, Summoner};
use super::monst::{MonsterId, SubAlign};
use super::race::{RaceDefinition, RaceFlags, RaceId};
use crate::consts::{
    ESCORT_RADIUS, ESCORT_TRIES, FRIENDS_RADIUS, FRIENDS_TRIES_PER_SEED, MAX_REINFORCEMENTS,
    REINFORCE_RADIUS,
};
use crate::dungeon::{Floor, Pos};
use crate::world::PlacementError;

/// Largest depth skew applied to a friends group
const MAX_GROUP_SKEW: i32 = 9;

/// The escort giver as seen by the escort eligibility hook
#[derive(Debug, Clone, Copy)]
struct EscortGiver {
    race: RaceId,
    symbol: char,
    level: i32,
    chameleon: bool,
    friendly: bool,
    in_dungeon: bool,
    sub_align: SubAlign,
    player_align: i32,
}

impl EscortGiver {
    fn admits(&self, race: &RaceDefinition, floor: &Floor) -> bool {
        if dungeon_hook(race, floor) != self.in_dungeon {
            return false;
        }
        if race.symbol != self.symbol || race.level > self.level {
            return false;
        }
        if race.has(RaceFlags::UNIQUE) || race.id == self.race {
            return false;
        }
        if self.sub_align.is_hostile_to(race.native_align()) {
            return false;
        }
        // A friendly giver only brings escorts the player could stand
        if self.friendly
            && SubAlign::of_player(self.player_align, 1, -1).is_hostile_to(race.native_align())
        {
            return false;
        }
        !self.chameleon || race.has(RaceFlags::CHAMELEON)
    }
}

impl Spawner<'_> {
    /// Place a monster and, with `ALLOW_GROUP`, the group it brings
    ///
    /// Returns the seed monster. May also roll the shadow disguise for the
    /// whole group unless `NO_KAGE` is set.
    pub fn place_monster_with_group(
        &mut self,
        who: Summoner,
        pos: Pos,
        race: RaceId,
        mut flags: PlaceFlags,
    ) -> Result<MonsterId, PlacementError> {
        if !flags.contains(PlaceFlags::NO_KAGE) && self.rng.one_in(self.config.kage_chance) {
            flags.insert(PlaceFlags::KAGE);
        }

        let seed = self.place_monster_one(who, pos, race, flags)?;
        if !flags.contains(PlaceFlags::ALLOW_GROUP) {
            return Ok(seed);
        }
        let Some(definition) = self.races.get_race(race).cloned() else {
            return Ok(seed);
        };

        let before = self.floor.monsters.len();

        for reinforcement in definition.reinforcements.iter().take(MAX_REINFORCEMENTS) {
            let Some(unit) = self.races.get_race(reinforcement.race).cloned() else {
                continue;
            };
            let count = reinforcement.count.roll(self.rng);
            for _ in 0..count {
                let Some(cell) = self.scatter_near(Some(&unit), pos, REINFORCE_RADIUS) else {
                    break;
                };
                let _ = self.place_monster_one(Summoner::Monster(seed), cell, unit.id, flags);
            }
        }

        if definition.has(RaceFlags::FRIENDS) {
            self.place_monster_group(who, pos, race, flags);
        }

        if definition.has(RaceFlags::ESCORT) {
            self.place_escorts(seed, pos, &definition, flags);
        }

        debug!(
            race = race.0,
            y = pos.y,
            x = pos.x,
            extra = self.floor.monsters.len() - before,
            "placed group"
        );
        Ok(seed)
    }

    /// Grow a pack of `race` breadth first from the monster already at `pos`
    ///
    /// Returns the pack size, the monster at `pos` included.
    pub fn place_monster_group(
        &mut self,
        who: Summoner,
        pos: Pos,
        race: RaceId,
        flags: PlaceFlags,
    ) -> usize {
        let Some(definition) = self.races.get_race(race).cloned() else {
            return 1;
        };
        let total = self.group_size(definition.level);

        let mut seeds = vec![pos];
        let mut n = 0;
        while n < seeds.len() && seeds.len() < total {
            let hub = seeds[n];
            for _ in 0..FRIENDS_TRIES_PER_SEED {
                if seeds.len() >= total {
                    break;
                }
                let Some(cell) = self.scatter_near(Some(&definition), hub, FRIENDS_RADIUS) else {
                    break;
                };
                if self.place_monster_one(who, cell, race, flags).is_ok() {
                    seeds.push(cell);
                }
            }
            n += 1;
        }

        seeds.len()
    }

    /// Target pack size: 1d10 skewed by how far the race sits from the floor
    /// depth, clamped to `[1, group_max]`
    pub fn group_size(&mut self, race_level: i32) -> usize {
        let depth = self.floor.depth;
        let mut extra = 0;
        if race_level > depth {
            extra = -(self.rng.rnd((race_level - depth) as u32) as i32);
        } else if race_level < depth {
            extra = self.rng.rnd((depth - race_level) as u32) as i32;
        }
        let extra = extra.clamp(-MAX_GROUP_SKEW, MAX_GROUP_SKEW);

        let total = self.rng.rnd(10) as i32 + extra;
        total.clamp(1, self.config.group_max.max(1) as i32) as usize
    }

    fn place_escorts(&mut self, seed: MonsterId, pos: Pos, giver: &RaceDefinition, flags: PlaceFlags) {
        let Some(sub_align) = self.floor.monster(seed).map(|m| m.sub_align) else {
            return;
        };
        let context = EscortGiver {
            race: giver.id,
            symbol: giver.symbol,
            level: giver.level,
            chameleon: giver.has(RaceFlags::CHAMELEON),
            friendly: giver.has(RaceFlags::FRIENDLY),
            in_dungeon: dungeon_hook(giver, self.floor),
            sub_align,
            player_align: self.floor.player.align,
        };
        let escort_hook = |race: &RaceDefinition, floor: &Floor| context.admits(race, floor);

        for _ in 0..ESCORT_TRIES {
            let Some(cell) = self.scatter_near(None, pos, ESCORT_RADIUS) else {
                break;
            };
            let terrain_hook = cell_hook(cell);
            let Ok(escort) = self.draw_race(giver.level, &Hooks::both(&escort_hook, &terrain_hook))
            else {
                break;
            };
            if self.place_monster_one(Summoner::Monster(seed), cell, escort, flags).is_err() {
                continue;
            }
            let escort_has_friends = self
                .races
                .get_race(escort)
                .is_some_and(|r| r.has(RaceFlags::FRIENDS));
            if escort_has_friends || giver.has(RaceFlags::ESCORTS) {
                self.place_monster_group(Summoner::Monster(seed), cell, escort, flags);
            }
        }
    }
}
