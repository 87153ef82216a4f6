//! Level population entry points
//!
//! `alloc_monster` is what level generation and the turn scheduler call to
//! add one more threat to a floor. It defers to the dungeon guardian first,
//! then picks a cell away from the player and drops either a single
//! monster (with its group) or a horde.

use tracing::{debug, warn};

use super::alloc::{cell_hook, dungeon_hook, Hooks};
use super::makemon::{PlaceFlags, Spawner, Summoner};
use super::monst::MonsterId;
use super::race::RaceFlags;
use super::scatter::scatter;
use super::summon::SummonKind;
use crate::consts::{HORDE_STEP, HORDE_SUMMON_BONUS, JURAL_SYMBOLS};
use crate::dungeon::terrain::TerrainQuery;
use crate::dungeon::Pos;
use crate::world::PlacementError;

impl Spawner<'_> {
    /// Place a race drawn at the floor's monster level at `pos`
    ///
    /// Some humanoid races are tagged for the joke-race substitution, one
    /// time in `jural_chance` below ground and always in town.
    pub fn place_monster(&mut self, pos: Pos, mut flags: PlaceFlags) -> Result<MonsterId, PlacementError> {
        let terrain_hook = cell_hook(pos);
        let level = self.floor.monster_level;
        let race = self.draw_race(level, &Hooks::both(&dungeon_hook, &terrain_hook))?;

        let joke_roll = self.rng.one_in(self.config.jural_chance) || self.floor.is_town();
        if joke_roll
            && self
                .races
                .get_race(race)
                .is_some_and(|r| {
                    !r.is_unique() && !r.has(RaceFlags::MULTIPLY) && JURAL_SYMBOLS.contains(r.symbol)
                })
        {
            flags.insert(PlaceFlags::JURAL);
        }

        self.place_monster_with_group(Summoner::Nobody, pos, race, flags)
    }

    /// Seed a horde of one race at `pos` and trail kin away from it
    ///
    /// Returns the seed monster. The trail is best effort.
    pub fn alloc_horde(&mut self, pos: Pos) -> Result<MonsterId, PlacementError> {
        let horde_excluded = self.config.special.horde_excluded;
        let terrain_hook = cell_hook(pos);
        let hooks = Hooks::both(&dungeon_hook, &terrain_hook);

        let mut race = None;
        for _ in 0..self.config.horde_race_attempts {
            let pick = self.draw_race(self.floor.monster_level, &hooks)?;
            let suitable = self
                .races
                .get_race(pick)
                .is_some_and(|r| !r.is_unique() && Some(r.id) != horde_excluded);
            if suitable {
                race = Some(pick);
                break;
            }
        }
        let Some(race) = race else {
            return Err(PlacementError::RetryBudgetExhausted {
                attempts: self.config.horde_race_attempts,
            });
        };

        let mut seed = None;
        for _ in 0..self.config.horde_seed_attempts {
            if let Ok(id) = self.place_monster_with_group(Summoner::Nobody, pos, race, PlaceFlags::empty()) {
                seed = Some(id);
                break;
            }
        }
        let Some(seed) = seed else {
            return Err(PlacementError::RetryBudgetExhausted {
                attempts: self.config.horde_seed_attempts,
            });
        };

        // Kin follow the seed's true race, which a chameleon may have changed
        let Some(symbol) = self
            .floor
            .monster(seed)
            .and_then(|m| self.races.get_race(m.race()))
            .map(|r| r.symbol)
        else {
            return Ok(seed);
        };

        let steps = self.rng.rnd(10) + 5;
        let level_bonus = self.floor.monster_level + HORDE_SUMMON_BONUS;
        let mut prev = pos;
        let mut summoned = 0;
        for _ in 0..steps {
            let Some(cell) = scatter(&*self.floor, prev, HORDE_STEP, self.rng) else {
                continue;
            };
            if self
                .summon_specific(
                    Summoner::Monster(seed),
                    cell,
                    level_bonus,
                    SummonKind::Kin(symbol),
                    PlaceFlags::ALLOW_GROUP,
                )
                .is_ok()
            {
                summoned += 1;
            }
            prev = cell;
        }

        debug!(race = race.0, %symbol, steps, summoned, "allocated horde");
        Ok(seed)
    }

    /// Place the dungeon's guardian on its deepest level
    ///
    /// Declines with `NotApplicable` when the dungeon has no guardian, this
    /// is not its floor, or the guardian is already alive.
    pub fn alloc_guardian(&mut self) -> Result<MonsterId, PlacementError> {
        let Some(guardian) = self.floor.dungeon.guardian else {
            return Err(PlacementError::NotApplicable);
        };
        if self.floor.depth != self.floor.dungeon.max_depth || self.races.cap_rejection(guardian).is_some() {
            return Err(PlacementError::NotApplicable);
        }
        let Some(definition) = self.races.get_race(guardian).cloned() else {
            return Err(PlacementError::NotApplicable);
        };

        let flags = PlaceFlags::ALLOW_GROUP | PlaceFlags::NO_KAGE | PlaceFlags::NO_PET;
        let attempts = self.config.guardian_attempts;
        for _ in 0..attempts {
            let pos = self.random_interior_cell();
            if !self.floor.is_empty(pos) || !self.floor.can_cross(&definition, pos) {
                continue;
            }
            if let Ok(id) = self.place_monster_with_group(Summoner::Nobody, pos, guardian, flags) {
                debug!(race = guardian.0, y = pos.y, x = pos.x, "placed guardian");
                return Ok(id);
            }
        }

        warn!(race = definition.name, attempts, "could not place the dungeon guardian");
        Err(PlacementError::RetryBudgetExhausted { attempts })
    }

    /// Add one monster (or horde) more than `dis` cells from the player
    pub fn alloc_monster(&mut self, dis: i32, flags: PlaceFlags) -> Result<MonsterId, PlacementError> {
        if let Ok(id) = self.alloc_guardian() {
            return Ok(id);
        }

        let attempts = self.config.alloc_cell_attempts;
        let Some(pos) = self.far_empty_cell(dis, attempts) else {
            warn!(attempts, "could not allocate a new monster, small level?");
            return Err(PlacementError::RetryBudgetExhausted { attempts });
        };

        if self.rng.rnd(self.config.horde_divisor) as i32 <= self.floor.depth {
            self.alloc_horde(pos)
        } else {
            self.place_monster(pos, flags | PlaceFlags::ALLOW_GROUP)
        }
    }

    fn random_interior_cell(&mut self) -> Pos {
        let height = self.floor.grid.height();
        let width = self.floor.grid.width();
        Pos::new(
            self.rng.rnd((height - 4).max(1) as u32) as i32 + 1,
            self.rng.rnd((width - 4).max(1) as u32) as i32 + 1,
        )
    }

    fn far_empty_cell(&mut self, dis: i32, attempts: u32) -> Option<Pos> {
        let height = self.floor.grid.height().max(1) as u32;
        let width = self.floor.grid.width().max(1) as u32;
        let player = self.floor.player.pos;
        (0..attempts).find_map(|_| {
            let pos = Pos::new(self.rng.rn2(height) as i32, self.rng.rn2(width) as i32);
            (self.floor.is_empty(pos) && self.floor.distance(pos, player) > dis).then_some(pos)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Grid;
    use crate::monster::{RaceCatalog, RaceFlags};
    use crate::test_support::*;

    const SPOT: Pos = Pos::new(10, 20);

    #[test]
    fn test_place_monster_below_ground() {
        let mut fx = Fixture::new(10);
        let id = fx.spawner().place_monster(SPOT, PlaceFlags::ALLOW_SLEEP).unwrap();
        let monster = fx.floor.monster(id).unwrap();
        assert_eq!(monster.pos, SPOT);
        let race = fx.races.get_race(monster.identity.counted_race()).unwrap();
        assert!(!race.has(RaceFlags::AQUATIC));
        assert!(race.rarity > 0);
    }

    #[test]
    fn test_town_draws_town_dwellers_and_jokes() {
        let mut fx = Fixture::new(0);
        fx.floor.player.joke_personality = true;
        let id = fx.spawner().place_monster(SPOT, PlaceFlags::empty()).unwrap();
        let monster = fx.floor.monster(id).unwrap();
        assert_eq!(monster.race(), TOWNSPERSON);
        assert_eq!(monster.identity.apparent, JURAL);
    }

    #[test]
    fn test_empty_town_places_nothing() {
        let mut races = races();
        races[TOWNSPERSON.index()] = crate::monster::RaceDefinition::new("townsperson", 't', 0, 1);
        let mut fx = Fixture::new(0);
        fx.races = RaceCatalog::new(races);
        assert_eq!(
            fx.spawner().place_monster(SPOT, PlaceFlags::empty()),
            Err(PlacementError::NoEligibleRace)
        );
        assert!(fx.floor.monsters.is_empty());
    }

    #[test]
    fn test_horde_is_never_unique_or_excluded() {
        let mut most = 0;
        for seed in 0..10 {
            let mut fx = Fixture::new(10);
            fx.rng = crate::rng::GameRng::new(seed);
            fx.config.special.horde_excluded = Some(ORC);
            let id = fx.spawner().alloc_horde(SPOT).unwrap();
            let seed_race = fx.floor.monster(id).unwrap().identity.counted_race();
            assert_ne!(seed_race, ORC);
            for monster in fx.floor.monsters.iter() {
                let race = fx.races.get_race(monster.identity.counted_race()).unwrap();
                assert!(!race.is_unique(), "{} in a horde", race.name);
            }
            most = most.max(fx.floor.monsters.len());
        }
        assert!(most > 1);
    }

    #[test]
    fn test_horde_leader_drawn_at_monster_level() {
        for seed in 0..10 {
            let mut fx = Fixture::new(25);
            fx.rng = crate::rng::GameRng::new(seed);
            fx.floor.monster_level = 1;
            fx.config.nasty.base_chance = 1_000_000;
            let id = fx.spawner().alloc_horde(SPOT).unwrap();
            let leader = fx.floor.monster(id).unwrap();
            assert!(matches!(leader.race(), RAT | JACKAL), "leader {:?}", leader.race());
        }
    }

    #[test]
    fn test_horde_gives_up_on_uniques_only() {
        let mut fx = Fixture::new(25);
        fx.races = RaceCatalog::new(vec![crate::monster::RaceDefinition::new("king", 'p', 20, 1)
            .with_flags(RaceFlags::UNIQUE)]);
        fx.config.horde_race_attempts = 20;
        assert_eq!(
            fx.spawner().alloc_horde(SPOT),
            Err(PlacementError::RetryBudgetExhausted { attempts: 20 })
        );
        assert!(fx.floor.monsters.is_empty());
    }

    #[test]
    fn test_guardian_once_on_its_floor() {
        let mut fx = Fixture::new(30);
        fx.floor.dungeon.guardian = Some(GUARDIAN);
        fx.floor.dungeon.max_depth = 30;
        let id = fx.spawner().alloc_guardian().unwrap();
        assert_eq!(fx.floor.monster(id).unwrap().race(), GUARDIAN);
        assert!(fx.floor.monster(id).unwrap().no_pet);
        assert_eq!(fx.races.live_count(GUARDIAN), 1);
        assert_eq!(fx.spawner().alloc_guardian(), Err(PlacementError::NotApplicable));
    }

    #[test]
    fn test_guardian_not_applicable() {
        let mut fx = Fixture::new(29);
        assert_eq!(fx.spawner().alloc_guardian(), Err(PlacementError::NotApplicable));
        fx.floor.dungeon.guardian = Some(GUARDIAN);
        fx.floor.dungeon.max_depth = 30;
        assert_eq!(fx.spawner().alloc_guardian(), Err(PlacementError::NotApplicable));
    }

    #[test]
    fn test_alloc_monster_keeps_distance() {
        for seed in 0..20 {
            let mut fx = Fixture::new(10);
            fx.rng = crate::rng::GameRng::new(seed);
            let id = fx.spawner().alloc_monster(8, PlaceFlags::ALLOW_SLEEP).unwrap();
            let pos = fx.floor.monster(id).unwrap().pos;
            assert!(pos.distance(fx.floor.player.pos) > 8);
        }
    }

    #[test]
    fn test_alloc_monster_prefers_guardian() {
        let mut fx = Fixture::new(30);
        fx.floor.dungeon.guardian = Some(GUARDIAN);
        fx.floor.dungeon.max_depth = 30;
        let id = fx.spawner().alloc_monster(5, PlaceFlags::empty()).unwrap();
        assert_eq!(fx.floor.monster(id).unwrap().race(), GUARDIAN);
    }

    #[test]
    fn test_alloc_monster_small_level() {
        let mut fx = Fixture::new(10);
        fx.floor.grid = Grid::open(5, 5);
        fx.floor.player.pos = Pos::new(2, 2);
        fx.config.alloc_cell_attempts = 50;
        assert_eq!(
            fx.spawner().alloc_monster(10, PlaceFlags::empty()),
            Err(PlacementError::RetryBudgetExhausted { attempts: 50 })
        );
    }
}
