//! Quest kill quotas consulted during placement

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::monster::RaceId;

/// An active "kill N of race R" quota on a floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillQuota {
    pub race: RaceId,
    /// Already killed
    pub cur_num: u32,
    /// Required kills
    pub max_num: u32,
}

/// Source of quest quotas
pub trait QuestState {
    /// Kill quota bound to the dungeon level, if a kill quest is active there
    fn active_kill_quota(&self, depth: i32) -> Option<KillQuota>;
}

/// Kind of quest bound to a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestKind {
    /// Kill every monster of a race on the level
    KillLevel,
    /// Randomly assigned kill quest
    Random,
    /// Any other quest; never limits placement
    Other,
}

/// One quest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub kind: QuestKind,
    pub race: RaceId,
    pub cur_num: u32,
    pub max_num: u32,
    pub completed: bool,
}

/// Quests indexed by the dungeon level they live on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestLog {
    quests: HashMap<i32, Quest>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, depth: i32, quest: Quest) {
        self.quests.insert(depth, quest);
    }

    pub fn quest(&self, depth: i32) -> Option<&Quest> {
        self.quests.get(&depth)
    }

    /// Count a kill toward the level's quest
    pub fn record_kill(&mut self, depth: i32, race: RaceId) {
        if let Some(quest) = self.quests.get_mut(&depth) {
            if quest.race == race && !quest.completed {
                quest.cur_num += 1;
                if quest.cur_num >= quest.max_num {
                    quest.completed = true;
                }
            }
        }
    }
}

impl QuestState for QuestLog {
    fn active_kill_quota(&self, depth: i32) -> Option<KillQuota> {
        let quest = self.quests.get(&depth)?;
        if quest.completed || !matches!(quest.kind, QuestKind::KillLevel | QuestKind::Random) {
            return None;
        }
        Some(KillQuota {
            race: quest.race,
            cur_num: quest.cur_num,
            max_num: quest.max_num,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kill_quest(race: u16, max_num: u32) -> Quest {
        Quest {
            kind: QuestKind::KillLevel,
            race: RaceId(race),
            cur_num: 0,
            max_num,
            completed: false,
        }
    }

    #[test]
    fn test_quota_on_bound_level_only() {
        let mut log = QuestLog::new();
        log.add(7, kill_quest(3, 3));
        let quota = log.active_kill_quota(7).unwrap();
        assert_eq!(quota.race, RaceId(3));
        assert_eq!(quota.max_num, 3);
        assert!(log.active_kill_quota(8).is_none());
    }

    #[test]
    fn test_record_kill_completes() {
        let mut log = QuestLog::new();
        log.add(7, kill_quest(3, 2));
        log.record_kill(7, RaceId(4));
        assert_eq!(log.active_kill_quota(7).unwrap().cur_num, 0);
        log.record_kill(7, RaceId(3));
        assert_eq!(log.active_kill_quota(7).unwrap().cur_num, 1);
        log.record_kill(7, RaceId(3));
        assert!(log.active_kill_quota(7).is_none());
        assert!(log.quest(7).unwrap().completed);
    }

    #[test]
    fn test_other_quests_have_no_quota() {
        let mut log = QuestLog::new();
        let mut quest = kill_quest(3, 2);
        quest.kind = QuestKind::Other;
        log.add(4, quest);
        assert!(log.active_kill_quota(4).is_none());
    }
}
