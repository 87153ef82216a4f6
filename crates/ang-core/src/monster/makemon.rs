//! Monster creation (place_monster_one)
//!
//! Turns a race and a cell into a committed live monster, or rejects the
//! placement without touching any state. Everything that places monsters
//! goes through `Spawner`, which borrows the floor, the race catalog, quest
//! state, tuning and the RNG for the duration of one population call.

use bitflags::bitflags;
use tracing::{debug, trace};

use super::alloc::{tanuki_hook, ChameleonTarget, Hooks};
use super::monst::{Attitude, Disguise, Identity, Monster, MonsterId, SubAlign, TimedStatus};
use super::race::{RaceCatalog, RaceDefinition, RaceFlags, RaceId};
use super::scatter::mon_scatter;
use super::select::get_mon_num;
use crate::consts::{speed_to_energy, ENERGY_NEED, HASTE_TURNS, MAX_MONSTER_HP, MAX_SPEED};
use crate::dungeon::terrain::TerrainQuery;
use crate::dungeon::{Floor, Notice, Pos, QuestState, Rune, WarningColor};
use crate::rng::GameRng;
use crate::world::{GenerationConfig, PlacementError, Rejection};

// ============================================================================
// Types
// ============================================================================

bitflags! {
    /// Behaviour modifiers of one placement request (PM_* in C)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlaceFlags: u32 {
        /// Roll an initial sleep counter
        const ALLOW_SLEEP     = 0x0001;
        /// Expand reinforcements, friends and escorts
        const ALLOW_GROUP     = 0x0002;
        /// Summons may pick uniques
        const ALLOW_UNIQUE    = 0x0004;
        const FORCE_FRIENDLY  = 0x0008;
        const FORCE_PET       = 0x0010;
        /// Never wear the shadow disguise
        const NO_KAGE         = 0x0020;
        /// May never be tamed
        const NO_PET          = 0x0040;
        /// Skip the pattern and terrain checks
        const IGNORE_TERRAIN  = 0x0080;
        const HASTE           = 0x0100;
        /// Wear the shadow disguise
        const KAGE            = 0x0200;
        /// Breeding copy of the summoner
        const MULTIPLY        = 0x0400;
        /// Candidate for the joke-race substitution
        const JURAL           = 0x0800;
    }
}

/// Who asked for a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Summoner {
    /// Level generation
    #[default]
    Nobody,
    Player,
    Monster(MonsterId),
}

impl Summoner {
    pub const fn monster(self) -> Option<MonsterId> {
        match self {
            Summoner::Monster(id) => Some(id),
            _ => None,
        }
    }
}

/// What a new monster inherits from the monster that summoned it
#[derive(Debug, Clone, Copy)]
struct Parent {
    id: MonsterId,
    identity: Identity,
    sub_align: SubAlign,
    attitude: Attitude,
}

/// Borrowed context of a population call
pub struct Spawner<'a> {
    pub floor: &'a mut Floor,
    pub races: &'a mut RaceCatalog,
    pub quests: &'a dyn QuestState,
    pub config: &'a GenerationConfig,
    pub rng: &'a mut GameRng,
}

impl<'a> Spawner<'a> {
    pub fn new(
        floor: &'a mut Floor,
        races: &'a mut RaceCatalog,
        quests: &'a dyn QuestState,
        config: &'a GenerationConfig,
        rng: &'a mut GameRng,
    ) -> Self {
        Self {
            floor,
            races,
            quests,
            config,
            rng,
        }
    }

    /// Draw a race for `level` on this floor
    pub fn draw_race(&mut self, level: i32, hooks: &Hooks<'_>) -> Result<RaceId, PlacementError> {
        get_mon_num(self.races, self.floor, self.config, level, hooks, self.rng)
    }

    /// `mon_scatter` around `target`, the radius capped by the config
    pub fn scatter_near(
        &mut self,
        race: Option<&RaceDefinition>,
        target: Pos,
        radius: i32,
    ) -> Option<Pos> {
        let radius = radius.min(self.config.scatter_max_radius);
        mon_scatter(&*self.floor, race, target, radius, self.rng)
    }

    fn race_level(&self, race: RaceId) -> i32 {
        self.races.get_race(race).map_or(0, |r| r.level)
    }

    fn parent(&self, who: Summoner) -> Option<Parent> {
        let monster = self.floor.monster(who.monster()?)?;
        Some(Parent {
            id: monster.id,
            identity: monster.identity,
            sub_align: monster.sub_align,
            attitude: monster.attitude,
        })
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Place one monster of `race` at `pos`
    ///
    /// On rejection neither the monster table nor any live count changes.
    pub fn place_monster_one(
        &mut self,
        who: Summoner,
        pos: Pos,
        race: RaceId,
        flags: PlaceFlags,
    ) -> Result<MonsterId, PlacementError> {
        match self.admit(pos, race, flags) {
            Ok((definition, id)) => Ok(self.build(who, pos, id, definition, flags)),
            Err(rejection) => {
                debug!(race = race.0, y = pos.y, x = pos.x, %rejection, "placement rejected");
                Err(rejection.into())
            }
        }
    }

    /// Preconditions, in order; only a broken rune of protection mutates,
    /// and only on the success path
    fn admit(
        &mut self,
        pos: Pos,
        race: RaceId,
        flags: PlaceFlags,
    ) -> Result<(RaceDefinition, MonsterId), Rejection> {
        if !self.floor.in_bounds(pos) {
            return Err(Rejection::OutOfBounds);
        }
        let definition = self.races.get_race(race).cloned().ok_or(Rejection::UnknownRace)?;

        if self.floor.grid.monster_at(pos).is_some() || self.floor.player.pos == pos {
            return Err(Rejection::Occupied);
        }

        if !flags.contains(PlaceFlags::IGNORE_TERRAIN) {
            if self.floor.is_pattern_tile(pos) {
                return Err(Rejection::PatternTile);
            }
            if !self.floor.is_passable(&definition, pos) {
                return Err(Rejection::Terrain);
            }
        }

        if !self.floor.mode.arena {
            if let Some(rejection) = self.races.cap_rejection(race) {
                return Err(rejection);
            }
            if definition.has(RaceFlags::FORCE_DEPTH)
                && self.floor.depth < definition.level
                && (!self.floor.mode.nightmare || definition.has(RaceFlags::QUESTOR))
            {
                return Err(Rejection::ForceDepth);
            }
        }

        if let Some(quota) = self.quests.active_kill_quota(self.floor.depth) {
            if quota.race == race {
                let alive = self.floor.monsters.count_race(race) as u32;
                if alive + quota.cur_num >= quota.max_num {
                    return Err(Rejection::QuestQuota);
                }
            }
        }

        let id = self.floor.monsters.next_slot().ok_or(Rejection::TableFull)?;

        if self.floor.grid.rune(pos) == Some(Rune::Protection) {
            let roll = self.rng.rnd(self.config.protection_rune_die) as i32;
            if roll >= definition.level + 20 {
                return Err(Rejection::RuneOfProtection);
            }
            self.floor.grid.clear_rune(pos);
            self.floor.notice(Notice::RuneBroken { pos });
        }

        Ok((definition, id))
    }

    fn build(
        &mut self,
        who: Summoner,
        pos: Pos,
        id: MonsterId,
        definition: RaceDefinition,
        mut flags: PlaceFlags,
    ) -> MonsterId {
        let nightmare = self.floor.mode.nightmare;
        let arena = self.floor.mode.arena;
        let parent = self.parent(who);

        if definition.is_unique() || definition.level < 10 {
            flags.remove(PlaceFlags::KAGE);
        }

        let mut monster = Monster::new(id, definition.id, pos);
        let (apparent, disguise) = self.initial_appearance(&definition, flags);
        monster.identity.apparent = apparent;
        monster.identity.disguise = disguise;

        if flags.contains(PlaceFlags::MULTIPLY) {
            if let Some(parent) = parent.filter(|p| p.identity.is_disguised()) {
                monster.identity.apparent = parent.identity.apparent;
                monster.identity.disguise = match parent.identity.disguise {
                    Disguise::Chameleon { .. } => Disguise::None,
                    other => other,
                };
            }
        }

        monster.sub_align = match parent {
            Some(parent) if !definition.is_aligned() => parent.sub_align,
            _ => definition.native_align(),
        };

        if let Some(parent) = parent.filter(|p| p.attitude == Attitude::Pet) {
            flags.insert(PlaceFlags::FORCE_PET);
            monster.parent = Some(parent.id);
        }

        // Stats come from the race the monster ends up as
        let mut race = definition;
        if race.has(RaceFlags::CHAMELEON) {
            let origin = race.id;
            let chosen = self.choose_chameleon_race(&race, pos, parent.map(|p| p.sub_align));
            monster.identity = Identity {
                race: chosen.as_ref().map_or(origin, |r| r.id),
                apparent: chosen.as_ref().map_or(origin, |r| r.id),
                disguise: Disguise::Chameleon { origin },
            };
            if let Some(chosen) = chosen {
                race = chosen;
                if race.is_aligned() {
                    monster.sub_align = race.native_align();
                }
                if race.has(RaceFlags::UNIQUE) && parent.is_none() {
                    monster.sub_align = SubAlign::NEUTRAL;
                }
            }
        } else if flags.contains(PlaceFlags::KAGE) && !flags.contains(PlaceFlags::FORCE_PET) {
            if let Some(shadow) = self.config.special.shadow {
                monster.identity.apparent = shadow;
                monster.identity.disguise = Disguise::Kage;
            }
        }

        monster.no_pet = flags.contains(PlaceFlags::NO_PET);

        monster.attitude = if flags.contains(PlaceFlags::FORCE_PET) {
            Attitude::Pet
        } else if (race.has(RaceFlags::FRIENDLY)
            || flags.contains(PlaceFlags::FORCE_FRIENDLY)
            || parent.is_some_and(|p| p.attitude == Attitude::Friendly))
            && !race
                .native_align()
                .is_hostile_to(SubAlign::of_player(self.floor.player.align, 0, -1))
        {
            Attitude::Friendly
        } else {
            Attitude::Hostile
        };

        if flags.contains(PlaceFlags::ALLOW_SLEEP) && race.sleep > 0 && !nightmare {
            let sleep = race.sleep as u32;
            let turns = sleep * 2 + self.rng.rnd(sleep * 10);
            monster.set_timed(TimedStatus::Sleep, turns.min(u16::MAX as u32) as u16);
        }

        let mut max_maxhp = if race.has(RaceFlags::FORCE_MAXHP) {
            race.hit_dice.max()
        } else {
            race.hit_dice.roll(self.rng)
        } as i32;
        if nightmare {
            max_maxhp = (max_maxhp * 2).min(MAX_MONSTER_HP);
        }
        monster.max_maxhp = max_maxhp.max(1);
        monster.maxhp = monster.max_maxhp;
        monster.hp = if self.config.special.wounded == Some(race.id) {
            (monster.maxhp / 2).max(1)
        } else {
            monster.maxhp
        };

        let mut speed = race.speed;
        if !race.has(RaceFlags::UNIQUE) && !arena {
            let divisor = if self.rng.one_in(4) { 3 } else { 10 };
            let jitter = speed_to_energy(speed) / divisor;
            if jitter > 0 {
                speed = self.rng.spread(speed, jitter);
            }
        }
        monster.speed = speed.min(MAX_SPEED);

        if flags.contains(PlaceFlags::HASTE) {
            monster.set_timed(TimedStatus::Fast, HASTE_TURNS);
        }

        let stagger = self.rng.rn2(100) as i32;
        monster.energy_need = ENERGY_NEED - if nightmare { stagger * 2 } else { stagger };

        monster.nice = race.has(RaceFlags::FORCE_SLEEP) && !nightmare;
        monster.born = self.floor.monsters.is_born_slot(id);

        self.commit(monster, &race)
    }

    fn commit(&mut self, monster: Monster, race: &RaceDefinition) -> MonsterId {
        let pos = monster.pos;
        let identity = monster.identity;
        let counted = identity.counted_race();
        let id = self.floor.add_monster(monster);
        self.races.increment_live_count(counted);

        let counted_unique = self.races.get_race(counted).is_some_and(|r| r.is_unique());
        if counted_unique && !self.floor.mode.arena && self.floor.persistent {
            let floor_id = self.floor.id;
            if let Some(vitals) = self.races.vitals_mut(counted) {
                vitals.floor = Some(floor_id);
            }
        }

        if race.has(RaceFlags::MULTIPLY) {
            self.floor.num_repro += 1;
        }

        if self.floor.player.warning && self.floor.generated && race.has(RaceFlags::UNIQUE) {
            let color = WarningColor::grade(race.level, self.floor.player.level);
            let message = match &self.floor.player.warning_item {
                Some(item) => format!("{item} glows {color}."),
                None => format!("An {color} image forms in your mind."),
            };
            self.floor.notice(Notice::UniqueWarning {
                race: race.id,
                color,
                message,
            });
        }

        if self.floor.grid.rune(pos) == Some(Rune::Explosive) {
            if self.rng.rnd(self.config.explosive_rune_die) as i32 > race.level {
                let damage = 2 * (self.floor.player.level + self.rng.dice(7, 7) as i32);
                self.floor.notice(Notice::RuneExploded { pos, damage });
            } else {
                self.floor.notice(Notice::RuneDisarmed { pos });
            }
            self.floor.grid.clear_rune(pos);
        }

        trace!(
            id = id.0,
            race = identity.race.0,
            apparent = identity.apparent.0,
            y = pos.y,
            x = pos.x,
            "placed monster"
        );
        id
    }

    /// Displayed race chosen at birth
    fn initial_appearance(&mut self, race: &RaceDefinition, flags: PlaceFlags) -> (RaceId, Disguise) {
        if flags.contains(PlaceFlags::JURAL)
            && !flags.contains(PlaceFlags::KAGE)
            && self.floor.player.joke_personality
            && !race.has(RaceFlags::UNIQUE | RaceFlags::QUESTOR | RaceFlags::MULTIPLY)
        {
            if let Some(jural) = self.config.special.jural {
                return (jural, Disguise::Jural);
            }
        }

        if race.has(RaceFlags::TANUKI) {
            let base = self.floor.base_level;
            let floor_level = (base - 5).min(50);
            let hooks = Hooks::race(&tanuki_hook);
            for _ in 0..self.config.tanuki_attempts {
                let Ok(pose) = self.draw_race(base + 10, &hooks) else {
                    break;
                };
                if self.race_level(pose) >= floor_level {
                    return (pose, Disguise::Tanuki);
                }
            }
        }

        (race.id, Disguise::None)
    }

    /// New true race for a chameleon being born
    fn choose_chameleon_race(
        &mut self,
        race: &RaceDefinition,
        pos: Pos,
        summoner_align: Option<SubAlign>,
    ) -> Option<RaceDefinition> {
        let lord = race.has(RaceFlags::UNIQUE);
        let target = ChameleonTarget {
            pos,
            lord_level: lord.then_some(race.level),
            summoner_align,
        };
        let hook = |candidate: &RaceDefinition, floor: &Floor| target.admits(candidate, floor);
        let level = if lord { race.level } else { self.floor.depth };
        let chosen = self.draw_race(level, &Hooks::race(&hook)).ok()?;
        self.races.get_race(chosen).cloned()
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove a live monster and release its race's live count
    pub fn delete_monster(&mut self, id: MonsterId) -> Option<Monster> {
        let monster = self.floor.remove_monster(id)?;
        self.races.decrement_live_count(monster.identity.counted_race());
        if self
            .races
            .get_race(monster.race())
            .is_some_and(|r| r.has(RaceFlags::MULTIPLY))
        {
            self.floor.num_repro = self.floor.num_repro.saturating_sub(1);
        }
        trace!(id = id.0, race = monster.race().0, "deleted monster");
        Some(monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Feature, Quest, QuestKind};
    use crate::test_support::*;

    const SPOT: Pos = Pos::new(10, 20);

    fn snapshot(fx: &Fixture) -> (usize, Vec<u32>) {
        let counts = (0..fx.races.race_count() as u16)
            .map(|i| fx.races.live_count(RaceId(i)))
            .collect();
        (fx.floor.monsters.len(), counts)
    }

    #[test]
    fn test_place_basic() {
        let mut fx = Fixture::new(10);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty())
            .unwrap();
        let orc = fx.floor.monster(id).unwrap();
        assert_eq!(orc.race(), ORC);
        assert_eq!(orc.pos, SPOT);
        assert_eq!(orc.sub_align, SubAlign::EVIL);
        assert!(orc.is_hostile());
        assert!(!orc.is_asleep());
        assert!(orc.hp > 0 && orc.hp <= orc.maxhp && orc.maxhp <= orc.max_maxhp);
        assert!((1..=100).contains(&orc.energy_need));
        assert_eq!(fx.races.live_count(ORC), 1);
        assert_eq!(fx.floor.monster_at(SPOT).map(|m| m.id), Some(id));
    }

    #[test]
    fn test_reject_out_of_bounds_and_unknown() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, Pos::new(0, 5), ORC, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::OutOfBounds))
        );
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, SPOT, RaceId(999), PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::UnknownRace))
        );
    }

    #[test]
    fn test_reject_terrain_and_pattern() {
        let mut fx = Fixture::new(10);
        fx.floor.grid.set_feature(SPOT, Feature::DeepWater);
        fx.floor.grid.set_feature(Pos::new(5, 5), Feature::Pattern);
        let mut sp = fx.spawner();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::Terrain))
        );
        assert!(sp.place_monster_one(Summoner::Nobody, SPOT, EEL, PlaceFlags::empty()).is_ok());
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::PatternTile))
        );
        assert!(sp
            .place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::IGNORE_TERRAIN)
            .is_ok());
    }

    #[test]
    fn test_reject_occupied_cell() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let orc = sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty()).unwrap();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, SPOT, RAT, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::Occupied))
        );
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, SPOT, RAT, PlaceFlags::IGNORE_TERRAIN),
            Err(PlacementError::Rejected(Rejection::Occupied))
        );
        let player = sp.floor.player.pos;
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, player, JACKAL, PlaceFlags::IGNORE_TERRAIN),
            Err(PlacementError::Rejected(Rejection::Occupied))
        );
        assert_eq!(sp.floor.monsters.len(), 1);
        assert_eq!(sp.floor.monster_at(SPOT).map(|m| m.id), Some(orc));
        assert_eq!(sp.races.live_count(RAT), 0);
    }

    #[test]
    fn test_unique_cap_until_death() {
        let mut fx = Fixture::new(25);
        let mut sp = fx.spawner();
        let king = sp.place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty()).unwrap();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), KING, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::UniqueCap))
        );
        sp.delete_monster(king).unwrap();
        assert_eq!(sp.races.live_count(KING), 0);
        assert!(sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), KING, PlaceFlags::empty()).is_ok());
    }

    #[test]
    fn test_arena_ignores_caps() {
        let mut fx = Fixture::new(25);
        fx.floor.mode.arena = true;
        let mut sp = fx.spawner();
        sp.place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty()).unwrap();
        assert!(sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), KING, PlaceFlags::empty()).is_ok());
    }

    #[test]
    fn test_force_depth() {
        let mut races = races();
        races[TROLL.index()] = races[TROLL.index()].clone().with_flags(RaceFlags::FORCE_DEPTH);
        let mut fx = Fixture::new(10);
        fx.races = RaceCatalog::new(races);
        assert_eq!(
            fx.spawner().place_monster_one(Summoner::Nobody, SPOT, TROLL, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::ForceDepth))
        );
        fx.floor.mode.nightmare = true;
        assert!(fx.spawner().place_monster_one(Summoner::Nobody, SPOT, TROLL, PlaceFlags::empty()).is_ok());
    }

    #[test]
    fn test_quest_quota() {
        let mut fx = Fixture::new(8);
        fx.quests.add(
            8,
            Quest {
                kind: QuestKind::KillLevel,
                race: BANDIT,
                cur_num: 2,
                max_num: 3,
                completed: false,
            },
        );
        let mut sp = fx.spawner();
        sp.place_monster_one(Summoner::Nobody, SPOT, BANDIT, PlaceFlags::empty()).unwrap();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), BANDIT, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::QuestQuota))
        );
        assert!(sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::empty()).is_ok());
    }

    #[test]
    fn test_table_full() {
        let mut fx = Fixture::new(10);
        fx.floor.monsters = crate::monster::MonsterTable::with_capacity(1);
        let mut sp = fx.spawner();
        sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty()).unwrap();
        assert_eq!(
            sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::empty()),
            Err(PlacementError::Rejected(Rejection::TableFull))
        );
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let mut fx = Fixture::new(25);
        fx.spawner()
            .place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty())
            .unwrap();
        let before = snapshot(&fx);
        let _ = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, Pos::new(3, 3), KING, PlaceFlags::empty());
        let _ = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty());
        assert_eq!(snapshot(&fx), before);
    }

    #[test]
    fn test_protection_rune_holds_or_breaks() {
        let mut held = 0;
        let mut broken = 0;
        for seed in 0..200 {
            let mut fx = Fixture::new(10);
            fx.rng = GameRng::new(seed);
            fx.floor.inscribe_rune(SPOT, Rune::Protection);
            let before = snapshot(&fx);
            match fx.spawner().place_monster_one(Summoner::Nobody, SPOT, RAT, PlaceFlags::empty()) {
                Ok(_) => {
                    broken += 1;
                    assert_eq!(fx.floor.grid.rune(SPOT), None);
                    assert!(fx.floor.notices.contains(&Notice::RuneBroken { pos: SPOT }));
                }
                Err(e) => {
                    held += 1;
                    assert_eq!(e, PlacementError::Rejected(Rejection::RuneOfProtection));
                    assert_eq!(fx.floor.grid.rune(SPOT), Some(Rune::Protection));
                    assert_eq!(snapshot(&fx), before);
                }
            }
        }
        // A level 1 rat breaks it 20 times in 550
        assert!(held > broken);
        assert!(broken > 0);
    }

    #[test]
    fn test_explosive_rune_is_always_cleared() {
        for seed in 0..50 {
            let mut fx = Fixture::new(10);
            fx.rng = GameRng::new(seed);
            fx.floor.inscribe_rune(SPOT, Rune::Explosive);
            fx.spawner()
                .place_monster_one(Summoner::Nobody, SPOT, RAT, PlaceFlags::empty())
                .unwrap();
            assert_eq!(fx.floor.grid.rune(SPOT), None);
            assert!(matches!(
                fx.floor.notices.last(),
                Some(Notice::RuneExploded { .. }) | Some(Notice::RuneDisarmed { .. })
            ));
        }
    }

    #[test]
    fn test_forced_max_hp_and_nightmare_cap() {
        let mut races = races();
        races[GUARDIAN.index()] = races[GUARDIAN.index()].clone().with_hit_dice(200, 100);
        let mut fx = Fixture::new(30);
        fx.races = RaceCatalog::new(races);
        fx.floor.mode.nightmare = true;
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, GUARDIAN, PlaceFlags::empty())
            .unwrap();
        let guardian = fx.floor.monster(id).unwrap();
        assert_eq!(guardian.max_maxhp, MAX_MONSTER_HP);
        assert_eq!(guardian.hp, guardian.maxhp);
    }

    #[test]
    fn test_wounded_bear_starts_at_half() {
        let mut fx = Fixture::new(10);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, BEAR, PlaceFlags::empty())
            .unwrap();
        let bear = fx.floor.monster(id).unwrap();
        assert_eq!(bear.hp, (bear.maxhp / 2).max(1));
    }

    #[test]
    fn test_sleep_only_when_allowed() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let awake = sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::empty()).unwrap();
        let asleep = sp
            .place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::ALLOW_SLEEP)
            .unwrap();
        assert!(!fx.floor.monster(awake).unwrap().is_asleep());
        let turns = fx.floor.monster(asleep).unwrap().timed(TimedStatus::Sleep);
        assert!((21..=120).contains(&turns), "sleep {turns}");
    }

    #[test]
    fn test_nightmare_never_sleeps() {
        let mut fx = Fixture::new(10);
        fx.floor.mode.nightmare = true;
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::ALLOW_SLEEP)
            .unwrap();
        let orc = fx.floor.monster(id).unwrap();
        assert!(!orc.is_asleep());
        assert!((-98..=100).contains(&orc.energy_need));
    }

    #[test]
    fn test_speed_jitter_bounds() {
        let mut fx = Fixture::new(10);
        for i in 0..60 {
            let pos = Pos::new(2 + i / 30, 2 + i % 30);
            let id = fx
                .spawner()
                .place_monster_one(Summoner::Nobody, pos, ORC, PlaceFlags::empty())
                .unwrap();
            let speed = fx.floor.monster(id).unwrap().speed;
            // Normal speed gives 10 energy, so jitter is at most 10 / 3
            assert!((107..=113).contains(&speed), "speed {speed}");
        }
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty())
            .unwrap();
        assert_eq!(fx.floor.monster(id).unwrap().speed, 110);
    }

    #[test]
    fn test_haste() {
        let mut fx = Fixture::new(10);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::HASTE)
            .unwrap();
        assert_eq!(fx.floor.monster(id).unwrap().timed(TimedStatus::Fast), HASTE_TURNS);
    }

    #[test]
    fn test_kage_disguise() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let troll = sp.place_monster_one(Summoner::Nobody, SPOT, TROLL, PlaceFlags::KAGE).unwrap();
        let rat = sp.place_monster_one(Summoner::Nobody, Pos::new(5, 5), RAT, PlaceFlags::KAGE).unwrap();
        let king = sp.place_monster_one(Summoner::Nobody, Pos::new(6, 6), KING, PlaceFlags::KAGE).unwrap();
        let troll = fx.floor.monster(troll).unwrap();
        assert_eq!(troll.identity.apparent, SHADOW);
        assert!(troll.identity.is_kage());
        assert_eq!(troll.race(), TROLL);
        assert!(!fx.floor.monster(rat).unwrap().identity.is_kage());
        assert!(!fx.floor.monster(king).unwrap().identity.is_kage());
    }

    #[test]
    fn test_jural_needs_personality() {
        let mut fx = Fixture::new(10);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::JURAL)
            .unwrap();
        assert_eq!(fx.floor.monster(id).unwrap().identity.apparent, ORC);

        fx.floor.player.joke_personality = true;
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, Pos::new(5, 5), ORC, PlaceFlags::JURAL)
            .unwrap();
        let orc = fx.floor.monster(id).unwrap();
        assert_eq!(orc.identity.apparent, JURAL);
        assert_eq!(orc.identity.disguise, Disguise::Jural);
        assert_eq!(orc.race(), ORC);
    }

    #[test]
    fn test_jural_skips_breeders_and_shadows() {
        let mut fx = Fixture::new(25);
        fx.floor.player.joke_personality = true;
        let mut sp = fx.spawner();
        let louse = sp
            .place_monster_one(Summoner::Nobody, SPOT, LOUSE, PlaceFlags::JURAL)
            .unwrap();
        let troll = sp
            .place_monster_one(Summoner::Nobody, Pos::new(5, 5), TROLL, PlaceFlags::JURAL | PlaceFlags::KAGE)
            .unwrap();

        let louse = fx.floor.monster(louse).unwrap();
        assert_eq!(louse.identity.apparent, LOUSE);
        assert_eq!(louse.identity.disguise, Disguise::None);
        let troll = fx.floor.monster(troll).unwrap();
        assert_ne!(troll.identity.disguise, Disguise::Jural);
        assert!(troll.identity.is_kage());
    }

    #[test]
    fn test_tanuki_poses_as_other_race() {
        let mut fx = Fixture::new(15);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, TANUKI, PlaceFlags::empty())
            .unwrap();
        let tanuki = fx.floor.monster(id).unwrap();
        assert_eq!(tanuki.race(), TANUKI);
        assert_eq!(tanuki.identity.counted_race(), TANUKI);
        if tanuki.identity.disguise == Disguise::Tanuki {
            let pose = fx.races.get_race(tanuki.identity.apparent).unwrap();
            assert!(!pose.has(RaceFlags::UNIQUE | RaceFlags::MULTIPLY | RaceFlags::AQUATIC));
            assert!(pose.level >= 10);
        } else {
            assert_eq!(tanuki.identity.apparent, TANUKI);
        }
    }

    #[test]
    fn test_chameleon_changes_true_race() {
        let mut fx = Fixture::new(10);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, CHAMELEON, PlaceFlags::empty())
            .unwrap();
        let chameleon = fx.floor.monster(id).unwrap();
        assert_eq!(chameleon.identity.disguise, Disguise::Chameleon { origin: CHAMELEON });
        assert_ne!(chameleon.race(), CHAMELEON);
        assert_eq!(chameleon.identity.apparent, chameleon.race());
        assert_eq!(fx.races.live_count(CHAMELEON), 1);
        assert_eq!(fx.races.live_count(chameleon.race()), 0);

        let mut sp = fx.spawner();
        sp.delete_monster(id).unwrap();
        assert_eq!(sp.races.live_count(CHAMELEON), 0);
    }

    #[test]
    fn test_chameleon_lord_becomes_unique() {
        let mut fx = Fixture::new(25);
        let id = fx
            .spawner()
            .place_monster_one(Summoner::Nobody, SPOT, CHAMELEON_LORD, PlaceFlags::empty())
            .unwrap();
        let lord = fx.floor.monster(id).unwrap();
        assert_eq!(lord.identity.counted_race(), CHAMELEON_LORD);
        // The only unique within five levels of 25 is the king
        assert_eq!(lord.race(), KING);
        assert_eq!(lord.sub_align, SubAlign::NEUTRAL);
    }

    #[test]
    fn test_pet_summons_pet() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let pet = sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::FORCE_PET).unwrap();
        let child = sp
            .place_monster_one(Summoner::Monster(pet), Pos::new(10, 21), RAT, PlaceFlags::empty())
            .unwrap();
        let child = fx.floor.monster(child).unwrap();
        assert!(child.is_pet());
        assert_eq!(child.parent, Some(pet));
        // Unaligned rat takes the summoner's alignment
        assert_eq!(child.sub_align, SubAlign::EVIL);
    }

    #[test]
    fn test_friendly_respects_player_alignment() {
        let mut fx = Fixture::new(10);
        fx.floor.player.align = 50;
        let mut sp = fx.spawner();
        let orc = sp.place_monster_one(Summoner::Nobody, SPOT, ORC, PlaceFlags::FORCE_FRIENDLY).unwrap();
        let rat = sp
            .place_monster_one(Summoner::Nobody, Pos::new(5, 5), RAT, PlaceFlags::FORCE_FRIENDLY)
            .unwrap();
        assert!(fx.floor.monster(orc).unwrap().is_hostile());
        assert!(fx.floor.monster(rat).unwrap().is_friendly());
    }

    #[test]
    fn test_multiply_copies_disguise() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let parent = sp.place_monster_one(Summoner::Nobody, SPOT, TROLL, PlaceFlags::KAGE).unwrap();
        let child = sp
            .place_monster_one(Summoner::Monster(parent), Pos::new(10, 21), TROLL, PlaceFlags::MULTIPLY)
            .unwrap();
        let child = fx.floor.monster(child).unwrap();
        assert_eq!(child.identity.apparent, SHADOW);
        assert!(child.identity.is_kage());
    }

    #[test]
    fn test_breeders_counted() {
        let mut fx = Fixture::new(10);
        let mut sp = fx.spawner();
        let louse = sp.place_monster_one(Summoner::Nobody, SPOT, LOUSE, PlaceFlags::empty()).unwrap();
        assert_eq!(sp.floor.num_repro, 1);
        sp.delete_monster(louse);
        assert_eq!(sp.floor.num_repro, 0);
    }

    #[test]
    fn test_unique_warning() {
        let mut fx = Fixture::new(25);
        fx.floor.player.warning = true;
        fx.floor.generated = true;
        fx.floor.player.warning_item = Some("Your amulet".to_string());
        fx.spawner()
            .place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty())
            .unwrap();
        assert_eq!(
            fx.floor.notices,
            vec![Notice::UniqueWarning {
                race: KING,
                color: WarningColor::Red,
                message: "Your amulet glows red.".to_string(),
            }]
        );
    }

    #[test]
    fn test_persistent_floor_remembers_unique() {
        let mut fx = Fixture::new(25);
        fx.floor.persistent = true;
        fx.floor.id = crate::dungeon::FloorId(7);
        fx.spawner()
            .place_monster_one(Summoner::Nobody, SPOT, KING, PlaceFlags::empty())
            .unwrap();
        assert_eq!(fx.races.vitals(KING).unwrap().floor, Some(crate::dungeon::FloorId(7)));
    }
}
