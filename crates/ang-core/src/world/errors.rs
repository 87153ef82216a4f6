//! Placement outcomes
//!
//! Every variant is an expected, recoverable result: callers skip the
//! placement, try another cell, or accept a thinner population.

use strum::Display;
use thiserror::Error;

/// Why `place_monster_one` refused a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Rejection {
    OutOfBounds,
    UnknownRace,
    /// A monster or the player already stands there
    Occupied,
    PatternTile,
    Terrain,
    UniqueCap,
    Unique2Cap,
    ExclusivePair,
    ForceDepth,
    QuestQuota,
    RuneOfProtection,
    TableFull,
}

/// Failure of a placement operation
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no race is eligible at this depth")]
    NoEligibleRace,

    #[error("placement rejected: {0}")]
    Rejected(Rejection),

    #[error("no free cell within range")]
    SpaceExhausted,

    #[error("gave up after {attempts} attempts")]
    RetryBudgetExhausted { attempts: u32 },

    #[error("nothing to place here")]
    NotApplicable,
}

impl From<Rejection> for PlacementError {
    fn from(rejection: Rejection) -> Self {
        PlacementError::Rejected(rejection)
    }
}
