//! Race definitions (r_info)
//!
//! A compact sample bestiary. Ids are positions in `races()` and must stay
//! in step with the `MON_*` constants below.

use ang_core::dungeon::DungeonInfo;
use ang_core::monster::{Dice, RaceDefinition, RaceFlags, RaceId, Reinforcement};

pub const MON_SHADOW: RaceId = RaceId(0);
pub const MON_JURAL: RaceId = RaceId(1);
pub const MON_VILLAGE_IDIOT: RaceId = RaceId(2);
pub const MON_MERCHANT: RaceId = RaceId(3);
pub const MON_VETERAN: RaceId = RaceId(4);
pub const MON_GRIP: RaceId = RaceId(5);
pub const MON_FANG: RaceId = RaceId(6);
pub const MON_GIANT_RAT: RaceId = RaceId(7);
pub const MON_JACKAL: RaceId = RaceId(8);
pub const MON_CAVE_SPIDER: RaceId = RaceId(9);
pub const MON_YELLOW_MOLD: RaceId = RaceId(10);
pub const MON_WHITE_JELLY: RaceId = RaceId(11);
pub const MON_WHITE_LOUSE: RaceId = RaceId(12);
pub const MON_KOBOLD: RaceId = RaceId(13);
pub const MON_LARGE_KOBOLD: RaceId = RaceId(14);
pub const MON_KOBOLD_CHIEFTAIN: RaceId = RaceId(15);
pub const MON_CAVE_ORC: RaceId = RaceId(16);
pub const MON_SNAGA: RaceId = RaceId(17);
pub const MON_BLACK_ORC: RaceId = RaceId(18);
pub const MON_ORC_CAPTAIN: RaceId = RaceId(19);
pub const MON_GRISHNAKH: RaceId = RaceId(20);
pub const MON_BULLROARER: RaceId = RaceId(21);
pub const MON_ACOLYTE: RaceId = RaceId(22);
pub const MON_CUTPURSE: RaceId = RaceId(23);
pub const MON_EASTERLING: RaceId = RaceId(24);
pub const MON_ULFANG: RaceId = RaceId(25);
pub const MON_BANOR: RaceId = RaceId(26);
pub const MON_RUPART: RaceId = RaceId(27);
pub const MON_BANORLUPART: RaceId = RaceId(28);
pub const MON_FALLEN_PALADIN: RaceId = RaceId(29);
pub const MON_ANGEL: RaceId = RaceId(30);
pub const MON_ARCHON: RaceId = RaceId(31);
pub const MON_TANUKI: RaceId = RaceId(32);
pub const MON_WOUNDED_BEAR: RaceId = RaceId(33);
pub const MON_CHAMELEON: RaceId = RaceId(34);
pub const MON_CHAMELEON_LORD: RaceId = RaceId(35);
pub const MON_ELECTRIC_EEL: RaceId = RaceId(36);
pub const MON_POLTERGEIST: RaceId = RaceId(37);
pub const MON_ZOMBIFIED_ORC: RaceId = RaceId(38);
pub const MON_RINGWRAITH: RaceId = RaceId(39);
pub const MON_HELLHOUND: RaceId = RaceId(40);
pub const MON_FIRE_VORTEX: RaceId = RaceId(41);
pub const MON_COPPER_COINS: RaceId = RaceId(42);
pub const MON_DEATH_SWORD: RaceId = RaceId(43);
pub const MON_SHOGGOTH: RaceId = RaceId(44);
pub const MON_MIND_FLAYER: RaceId = RaceId(45);
pub const MON_WARDEN: RaceId = RaceId(46);
pub const MON_BOLG: RaceId = RaceId(47);
pub const MON_WOLF: RaceId = RaceId(48);
pub const MON_METAL_BABBLE: RaceId = RaceId(49);

/// Depth of the sample dungeon's last level
pub const ANGBAND_DEPTH: i32 = 40;

static ULFANG_GUARD: [Reinforcement; 1] = [Reinforcement {
    race: MON_EASTERLING,
    count: Dice::new(3, 2),
}];

static CHIEFTAIN_GUARD: [Reinforcement; 2] = [
    Reinforcement {
        race: MON_LARGE_KOBOLD,
        count: Dice::new(1, 3),
    },
    Reinforcement {
        race: MON_KOBOLD,
        count: Dice::new(2, 2),
    },
];

// Banor and Rupart walk alone or as one
static NOT_BANORLUPART: [RaceId; 1] = [MON_BANORLUPART];
static NOT_BANOR_OR_RUPART: [RaceId; 2] = [MON_BANOR, MON_RUPART];

/// The full bestiary, in id order
pub fn races() -> Vec<RaceDefinition> {
    use RaceFlags as F;

    vec![
        // Placeholders, never drawn at random
        RaceDefinition::new("shadow", 'G', 0, 0),
        RaceDefinition::new("jural alien", 'h', 0, 0),
        // Town
        RaceDefinition::new("village idiot", 't', 0, 1)
            .with_flags(F::WILD_TOWN)
            .with_hit_dice(4, 4)
            .with_sleep(0),
        RaceDefinition::new("aimless merchant", 't', 0, 1)
            .with_flags(F::WILD_TOWN)
            .with_hit_dice(3, 3),
        RaceDefinition::new("battle-scarred veteran", 't', 0, 1)
            .with_flags(F::WILD_TOWN)
            .with_hit_dice(7, 8)
            .with_sleep(250),
        RaceDefinition::new("Grip, Farmer Maggot's Dog", 'C', 2, 1)
            .with_flags(F::UNIQUE | F::ANIMAL | F::WILD_TOWN)
            .with_speed(120)
            .with_hit_dice(5, 1),
        RaceDefinition::new("Fang, Farmer Maggot's Dog", 'C', 5, 1)
            .with_flags(F::UNIQUE | F::ANIMAL)
            .with_speed(120)
            .with_hit_dice(28, 1),
        // Shallow dungeon
        RaceDefinition::new("giant rat", 'r', 1, 1)
            .with_flags(F::ANIMAL | F::MULTIPLY)
            .with_hit_dice(2, 3)
            .with_sleep(30),
        RaceDefinition::new("jackal", 'C', 1, 1)
            .with_flags(F::ANIMAL | F::FRIENDS)
            .with_hit_dice(3, 8),
        RaceDefinition::new("cave spider", 'S', 2, 1)
            .with_flags(F::ANIMAL | F::FRIENDS)
            .with_speed(120)
            .with_hit_dice(1, 4),
        RaceDefinition::new("yellow mold", 'm', 3, 1)
            .with_flags(F::NEVER_MOVE)
            .with_hit_dice(11, 8)
            .with_sleep(99),
        RaceDefinition::new("white jelly", 'j', 10, 1)
            .with_flags(F::NEVER_MOVE | F::FORCE_SLEEP)
            .with_hit_dice(8, 36)
            .with_sleep(99),
        RaceDefinition::new("giant white louse", 'I', 3, 1)
            .with_flags(F::ANIMAL | F::MULTIPLY)
            .with_hit_dice(1, 1),
        RaceDefinition::new("kobold", 'k', 2, 1)
            .with_flags(F::EVIL)
            .with_hit_dice(12, 9),
        RaceDefinition::new("large kobold", 'k', 13, 1)
            .with_flags(F::EVIL)
            .with_hit_dice(60, 10),
        RaceDefinition::new("kobold chieftain", 'k', 20, 3)
            .with_flags(F::EVIL | F::ESCORT)
            .with_hit_dice(60, 10)
            .with_reinforcements(&CHIEFTAIN_GUARD),
        RaceDefinition::new("cave orc", 'o', 7, 1)
            .with_flags(F::EVIL | F::FRIENDS)
            .with_hit_dice(11, 10),
        RaceDefinition::new("snaga", 'o', 9, 1)
            .with_flags(F::EVIL | F::FRIENDS)
            .with_hit_dice(8, 8),
        RaceDefinition::new("black orc", 'o', 13, 1)
            .with_flags(F::EVIL | F::FRIENDS)
            .with_hit_dice(12, 10),
        RaceDefinition::new("orc captain", 'o', 16, 3)
            .with_flags(F::EVIL | F::ESCORT | F::ESCORTS)
            .with_hit_dice(20, 10),
        RaceDefinition::new("Grishnakh, the Hill Orc", 'o', 10, 3)
            .with_flags(F::UNIQUE | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(230, 1),
        RaceDefinition::new("Bullroarer the Hobbit", 'h', 10, 3)
            .with_flags(F::UNIQUE | F::FORCE_MAXHP)
            .with_hit_dice(200, 1),
        RaceDefinition::new("acolyte", 'p', 2, 1)
            .with_flags(F::GOOD)
            .with_hit_dice(6, 8),
        RaceDefinition::new("cutpurse", 'p', 2, 1)
            .with_flags(F::EVIL)
            .with_hit_dice(4, 4),
        RaceDefinition::new("Easterling warrior", 'p', 18, 1)
            .with_flags(F::EVIL | F::FRIENDS)
            .with_hit_dice(15, 11),
        RaceDefinition::new("Ulfang the Black", 'p', 34, 3)
            .with_flags(F::UNIQUE | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(1000, 1)
            .with_reinforcements(&ULFANG_GUARD),
        RaceDefinition::new("Banor", 'p', 30, 3)
            .with_flags(F::UNIQUE | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(750, 1)
            .with_exclusive(&NOT_BANORLUPART),
        RaceDefinition::new("Rupart", 'p', 30, 3)
            .with_flags(F::UNIQUE | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(750, 1)
            .with_exclusive(&NOT_BANORLUPART),
        RaceDefinition::new("Banor=Rupart", 'p', 32, 4)
            .with_flags(F::UNIQUE | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(1500, 1)
            .with_exclusive(&NOT_BANOR_OR_RUPART),
        RaceDefinition::new("fallen paladin", 'p', 25, 4)
            .with_flags(F::UNIQUE2 | F::EVIL)
            .with_hit_dice(30, 10),
        // Deeper
        RaceDefinition::new("angel", 'A', 35, 2)
            .with_flags(F::GOOD | F::CAN_FLY)
            .with_hit_dice(30, 30)
            .with_speed(120),
        RaceDefinition::new("archon", 'A', 60, 3)
            .with_flags(F::GOOD | F::CAN_FLY)
            .with_hit_dice(55, 50)
            .with_speed(130),
        RaceDefinition::new("tanuki", 'q', 12, 2)
            .with_flags(F::TANUKI | F::ANIMAL)
            .with_hit_dice(10, 10),
        RaceDefinition::new("wounded bear", 'q', 8, 2)
            .with_flags(F::ANIMAL)
            .with_hit_dice(12, 12),
        RaceDefinition::new("chameleon", 'R', 10, 3)
            .with_flags(F::CHAMELEON | F::ANIMAL)
            .with_hit_dice(14, 8),
        RaceDefinition::new("chameleon lord", 'R', 40, 3)
            .with_flags(F::CHAMELEON | F::UNIQUE | F::FORCE_MAXHP)
            .with_hit_dice(1300, 1),
        RaceDefinition::new("electric eel", 'l', 9, 1)
            .with_flags(F::AQUATIC | F::ANIMAL)
            .with_hit_dice(10, 8),
        RaceDefinition::new("poltergeist", 'G', 3, 1)
            .with_flags(F::UNDEAD | F::EVIL | F::PASS_WALL | F::CAN_FLY)
            .with_speed(140)
            .with_hit_dice(2, 5),
        RaceDefinition::new("zombified orc", 'z', 11, 1)
            .with_flags(F::UNDEAD | F::EVIL | F::FRIENDS)
            .with_hit_dice(11, 8),
        RaceDefinition::new("ringwraith", 'W', 45, 3)
            .with_flags(F::NAZGUL | F::UNDEAD | F::EVIL | F::FORCE_DEPTH)
            .with_max_num(9)
            .with_hit_dice(90, 30),
        RaceDefinition::new("hellhound", 'C', 40, 3)
            .with_flags(F::ANIMAL | F::EVIL | F::FRIENDS | F::IM_FIRE)
            .with_speed(120)
            .with_hit_dice(48, 10),
        RaceDefinition::new("fire vortex", 'v', 21, 1)
            .with_flags(F::IM_FIRE | F::CAN_FLY | F::EXPLODES)
            .with_hit_dice(9, 9)
            .with_sleep(0),
        RaceDefinition::new("creeping copper coins", '$', 4, 3)
            .with_hit_dice(7, 8),
        RaceDefinition::new("death sword", '|', 33, 5)
            .with_flags(F::NEVER_MOVE | F::EVIL)
            .with_hit_dice(40, 20),
        RaceDefinition::new("shoggoth", 'j', 65, 3)
            .with_flags(F::ELDRITCH_HORROR | F::EVIL | F::CAN_SWIM)
            .with_hit_dice(100, 40),
        RaceDefinition::new("mind flayer", 'h', 22, 1)
            .with_flags(F::ELDRITCH_HORROR | F::EVIL)
            .with_hit_dice(15, 10),
        RaceDefinition::new("Warden of the Deep", 'D', ANGBAND_DEPTH, 1)
            .with_flags(F::UNIQUE | F::GUARDIAN | F::FORCE_MAXHP | F::FORCE_DEPTH | F::EVIL)
            .with_hit_dice(3000, 1)
            .with_speed(130),
        RaceDefinition::new("Bolg, Son of Azog", 'o', 20, 3)
            .with_flags(F::UNIQUE | F::QUESTOR | F::EVIL | F::FORCE_MAXHP)
            .with_hit_dice(500, 1),
        RaceDefinition::new("wolf", 'C', 10, 1)
            .with_flags(F::ANIMAL | F::FRIENDS | F::WILD_ONLY)
            .with_hit_dice(28, 1),
        RaceDefinition::new("metal babble", 'j', 30, 8)
            .with_speed(130)
            .with_hit_dice(5, 5),
    ]
}

/// The sample dungeon, guarded on its last level
pub fn angband() -> DungeonInfo {
    DungeonInfo {
        name: "Angband".to_string(),
        guardian: Some(MON_WARDEN),
        max_depth: ANGBAND_DEPTH,
    }
}
