use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One leaderboard participant.
///
/// `rank` is 1 for the highest XP and is NULL only on a row the
/// recalculator has never touched. `seq` is the creation sequence and is
/// the stable tie-break between equal XP scores; it is internal and never
/// serialized to API clients.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub character: Option<String>,
    pub xp: i64,
    pub rank: Option<i64>,
    #[serde(skip)]
    pub seq: i64,
    pub created_at: i64,
}

/// Attributes required to create a player. XP always starts at 0 and rank
/// unassigned; neither is caller-controlled.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub name: String,
    pub email: String,
    pub character: Option<String>,
}

pub fn now_unix_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
        })
}
