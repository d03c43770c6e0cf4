//! Dashboard figures: server-wide totals and the top-N rankings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSummary {
    pub player_total: u64,
    /// Players at or above the advanced realm.
    pub advanced_player_total: u64,
    pub sect_total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRank {
    pub rank: u32,
    pub name: String,
    pub realm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectRank {
    pub rank: u32,
    pub name: String,
    pub level: String,
}

/// How many entries a ranking returns, `1..=1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLimit(u32);

impl RankLimit {
    pub const MAX: u32 = 1000;

    pub fn new(limit: u32) -> Result<Self, Error> {
        if (1..=Self::MAX).contains(&limit) {
            Ok(Self(limit))
        } else {
            Err(InvalidInputError::Other {
                message: format!("limit must be between 1 and {}, got {}", Self::MAX, limit),
            }
            .into())
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for RankLimit {
    fn default() -> Self {
        Self(30)
    }
}
