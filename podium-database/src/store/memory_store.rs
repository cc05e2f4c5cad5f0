use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::PodiumError,
    model::{NewPlayer, Player},
    ranking::{ScoreRow, dense_rank_assignments},
};

/// In-memory player store for tests and database-less development.
///
/// Every operation runs under one mutex, so XP adjustments are atomic and
/// recalculation passes are mutually exclusive, matching the discipline the
/// Postgres backend gets from atomic UPDATEs and the advisory lock.
#[derive(Clone, Debug, Default)]
pub struct MemoryPlayerStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    players: HashMap<Uuid, Player>,
    next_seq: i64,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        id: Uuid,
        new: &NewPlayer,
        created_at: i64,
    ) -> Result<(), PodiumError> {
        let mut state = self.state.lock().await;

        if state.players.values().any(|p| p.email == new.email) {
            return Err(PodiumError::DuplicateIdentity);
        }

        state.next_seq += 1;
        let seq = state.next_seq;
        state.players.insert(
            id,
            Player {
                id,
                name: new.name.clone(),
                email: new.email.clone(),
                character: new.character.clone(),
                xp: 0,
                rank: None,
                seq,
                created_at,
            },
        );

        Ok(())
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Player, PodiumError> {
        let state = self.state.lock().await;

        state.players.get(&id).cloned().ok_or(PodiumError::NotFound)
    }

    pub async fn fetch_all(&self) -> Result<Vec<Player>, PodiumError> {
        let state = self.state.lock().await;

        let mut players: Vec<Player> = state.players.values().cloned().collect();
        players.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.seq.cmp(&b.seq)));

        Ok(players)
    }

    pub async fn adjust_xp(&self, id: Uuid, delta: i64) -> Result<(), PodiumError> {
        let mut state = self.state.lock().await;

        let player = state.players.get_mut(&id).ok_or(PodiumError::NotFound)?;
        player.xp = player.xp.saturating_add(delta).max(0);

        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), PodiumError> {
        let mut state = self.state.lock().await;

        state
            .players
            .remove(&id)
            .map(|_| ())
            .ok_or(PodiumError::NotFound)
    }

    pub async fn recalculate(&self) -> Result<(), PodiumError> {
        let mut state = self.state.lock().await;

        let rows: Vec<ScoreRow> = state
            .players
            .values()
            .map(|p| ScoreRow {
                id: p.id,
                xp: p.xp,
                seq: p.seq,
            })
            .collect();

        for (id, rank) in dense_rank_assignments(&rows) {
            if let Some(player) = state.players.get_mut(&id) {
                player.rank = Some(rank);
            }
        }

        Ok(())
    }
}
