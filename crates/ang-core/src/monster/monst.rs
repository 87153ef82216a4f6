//! Live monsters (m_list)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use super::RaceId;
use crate::dungeon::Pos;

/// Slot index of a live monster; slot 0 is never used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

impl MonsterId {
    pub const NONE: MonsterId = MonsterId(0);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Sub-alignment of a live monster; the empty set is neutral
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SubAlign: u8 {
        const EVIL = 0x01;
        const GOOD = 0x02;
    }
}

impl SubAlign {
    pub const NEUTRAL: SubAlign = SubAlign::empty();

    /// Two alignments are hostile when one leans evil and the other good
    pub fn is_hostile_to(self, other: SubAlign) -> bool {
        (self.contains(SubAlign::EVIL) && other.contains(SubAlign::GOOD))
            || (self.contains(SubAlign::GOOD) && other.contains(SubAlign::EVIL))
    }

    /// Alignment the player presents, given thresholds on the alignment scalar
    pub fn of_player(align: i32, good_at: i32, evil_at: i32) -> SubAlign {
        let mut sub = SubAlign::NEUTRAL;
        if align >= good_at {
            sub |= SubAlign::GOOD;
        }
        if align <= evil_at {
            sub |= SubAlign::EVIL;
        }
        sub
    }
}

/// Timed status counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
#[repr(u8)]
pub enum TimedStatus {
    Sleep = 0,
    Fast = 1,
    Slow = 2,
    Stun = 3,
    Confused = 4,
    Fear = 5,
    Invulnerable = 6,
}

/// How a monster stands toward the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum Attitude {
    #[default]
    Hostile,
    Friendly,
    Pet,
}

/// Which disguise layer a monster wears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Disguise {
    #[default]
    None,
    /// Shows a different race drawn from a constrained pool
    Tanuki,
    /// Shows the generic shadow placeholder
    Kage,
    /// Shows the themed joke race
    Jural,
    /// True race was re-rolled at birth; `origin` is the race it was born as
    Chameleon { origin: RaceId },
}

/// True race, displayed race and the disguise linking them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub race: RaceId,
    pub apparent: RaceId,
    pub disguise: Disguise,
}

impl Identity {
    pub const fn plain(race: RaceId) -> Self {
        Self {
            race,
            apparent: race,
            disguise: Disguise::None,
        }
    }

    /// Race whose live count this monster occupies
    pub const fn counted_race(&self) -> RaceId {
        match self.disguise {
            Disguise::Chameleon { origin } => origin,
            _ => self.race,
        }
    }

    pub const fn is_kage(&self) -> bool {
        matches!(self.disguise, Disguise::Kage)
    }

    /// Displayed race differs from the true one
    pub fn is_disguised(&self) -> bool {
        self.apparent != self.race
    }
}

/// A live monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub identity: Identity,
    pub pos: Pos,

    pub hp: i32,
    pub maxhp: i32,
    /// Highest max hp this monster has had
    pub max_maxhp: i32,

    pub speed: i32,
    /// Energy to spend before the next move
    pub energy_need: i32,
    pub timed: [u16; TimedStatus::COUNT],

    pub sub_align: SubAlign,
    pub attitude: Attitude,
    /// May never be tamed
    pub no_pet: bool,
    /// Forced-sleep race generated patient
    pub nice: bool,
    /// Created during the current turn pass, skips its first move
    pub born: bool,
    /// Monster that summoned this one
    pub parent: Option<MonsterId>,
    pub target: Option<Pos>,
    pub nickname: Option<String>,
    pub exp: u32,
    /// Damage dealt to this monster by the player
    pub dealt_damage: u32,
}

impl Monster {
    pub fn new(id: MonsterId, race: RaceId, pos: Pos) -> Self {
        Self {
            id,
            identity: Identity::plain(race),
            pos,
            hp: 1,
            maxhp: 1,
            max_maxhp: 1,
            speed: crate::consts::NORMAL_SPEED,
            energy_need: crate::consts::ENERGY_NEED,
            timed: [0; TimedStatus::COUNT],
            sub_align: SubAlign::NEUTRAL,
            attitude: Attitude::Hostile,
            no_pet: false,
            nice: false,
            born: false,
            parent: None,
            target: None,
            nickname: None,
            exp: 0,
            dealt_damage: 0,
        }
    }

    pub const fn race(&self) -> RaceId {
        self.identity.race
    }

    pub fn timed(&self, status: TimedStatus) -> u16 {
        self.timed[status as usize]
    }

    pub fn set_timed(&mut self, status: TimedStatus, turns: u16) {
        self.timed[status as usize] = turns;
    }

    pub fn is_asleep(&self) -> bool {
        self.timed(TimedStatus::Sleep) > 0
    }

    pub fn is_pet(&self) -> bool {
        self.attitude == Attitude::Pet
    }

    pub fn is_friendly(&self) -> bool {
        self.attitude == Attitude::Friendly
    }

    pub fn is_hostile(&self) -> bool {
        self.attitude == Attitude::Hostile
    }
}

/// The floor's monster table with slot recycling
///
/// Slot 0 stays empty so `MonsterId::NONE` never names a monster. Freed
/// slots are reused before the table grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterTable {
    slots: Vec<Option<Monster>>,
    free: Vec<u32>,
    capacity: usize,
    /// Slot the turn scheduler is processing; lower fresh slots are `born`
    #[serde(skip)]
    pass_cursor: Option<u32>,
}

impl Default for MonsterTable {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

impl MonsterTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None],
            free: Vec::new(),
            capacity,
            pass_cursor: None,
        }
    }

    /// Reserve a slot id (`m_pop`); None when the table is full
    pub(crate) fn next_slot(&self) -> Option<MonsterId> {
        if let Some(&slot) = self.free.last() {
            return Some(MonsterId(slot));
        }
        if self.slots.len() - 1 >= self.capacity {
            return None;
        }
        Some(MonsterId(self.slots.len() as u32))
    }

    /// Store a monster in the slot `next_slot` reported
    pub(crate) fn insert(&mut self, monster: Monster) -> MonsterId {
        let id = monster.id;
        if self.free.last() == Some(&id.0) {
            self.free.pop();
            self.slots[id.index()] = Some(monster);
        } else {
            self.slots.push(Some(monster));
        }
        id
    }

    pub(crate) fn remove(&mut self, id: MonsterId) -> Option<Monster> {
        if id == MonsterId::NONE {
            return None;
        }
        let monster = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.0);
        Some(monster)
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live monsters of a race (true race, not disguise)
    pub fn count_race(&self, race: RaceId) -> usize {
        self.iter().filter(|m| m.race() == race).count()
    }

    pub fn set_pass_cursor(&mut self, cursor: Option<MonsterId>) {
        self.pass_cursor = cursor.map(|id| id.0);
    }

    /// A monster stored in this slot now was born during the current pass
    pub(crate) fn is_born_slot(&self, id: MonsterId) -> bool {
        self.pass_cursor.is_some_and(|cursor| id.0 < cursor)
    }
}
