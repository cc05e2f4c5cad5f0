mod memory_store;
mod pg_store;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    cache::CacheService,
    database::Database,
    error::PodiumError,
    model::{CallerIdentity, NewPlayer, Player, player::now_unix_secs},
};

use memory_store::MemoryPlayerStore;
use pg_store::PgPlayerStore;

const LEADERBOARD_CACHE_SUFFIX: &str = "leaderboard";

#[derive(Clone, Debug)]
enum StoreBackend {
    Postgres(PgPlayerStore),
    Memory(MemoryPlayerStore),
}

/// The score store: durable CRUD over players plus the rank-consistency
/// discipline.
///
/// Every mutating operation follows the same sequence: validate, apply the
/// single atomic store mutation, run a full rank recalculation pass, read
/// the final record back, and only then report success. A recalculation
/// failure after a successful mutation is surfaced to the caller without
/// rolling the mutation back; retrying [`PlayerStore::recalculate_ranks`]
/// converges the collection because the pass is idempotent over current
/// state.
#[derive(Clone, Debug)]
pub struct PlayerStore {
    backend: StoreBackend,
    cache: CacheService,
}

impl PlayerStore {
    /// Production store backed by Postgres, reusing the handle's cache
    /// service for the leaderboard read path.
    pub fn postgres(db: Database) -> Self {
        let cache = db.cache().clone();
        Self {
            backend: StoreBackend::Postgres(PgPlayerStore::new(db)),
            cache,
        }
    }

    /// Volatile store for tests and database-less development.
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory(MemoryPlayerStore::new()),
            cache: CacheService::disabled("podium:memory"),
        }
    }

    /// Create a player with xp 0 and an unassigned rank, then rank the
    /// whole collection so the response already carries a final rank.
    pub async fn create_player(&self, new: NewPlayer) -> Result<Player, PodiumError> {
        if new.name.trim().is_empty() {
            return Err(PodiumError::InvalidInput("name is required".into()));
        }
        if new.email.trim().is_empty() {
            return Err(PodiumError::InvalidInput("email is required".into()));
        }

        let id = Uuid::new_v4();
        match &self.backend {
            StoreBackend::Postgres(store) => store.insert(id, &new, now_unix_secs()).await?,
            StoreBackend::Memory(store) => store.insert(id, &new, now_unix_secs()).await?,
        }
        info!(player = %id, email = %new.email, "player created");

        self.finish_mutation().await?;
        self.fetch(id).await
    }

    pub async fn player_by_id(&self, id: Uuid) -> Result<Player, PodiumError> {
        self.fetch(id).await
    }

    /// All players ordered by XP descending, read through the cache.
    pub async fn leaderboard(&self) -> Result<Vec<Player>, PodiumError> {
        let key = self.cache.key(LEADERBOARD_CACHE_SUFFIX);

        match self.cache.get_json::<Vec<Player>>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(?e, "leaderboard cache get failed; falling back to database"),
        }

        let players = match &self.backend {
            StoreBackend::Postgres(store) => store.fetch_all().await?,
            StoreBackend::Memory(store) => store.fetch_all().await?,
        };

        if let Err(e) = self
            .cache
            .set_json(&key, &players, self.cache.leaderboard_ttl())
            .await
        {
            warn!(?e, "leaderboard cache set failed; returning database value");
        }

        Ok(players)
    }

    /// Apply an XP delta on behalf of `actor` as one atomic increment,
    /// clamped at zero, then rank the whole collection.
    pub async fn adjust_xp(
        &self,
        id: Uuid,
        delta: i64,
        actor: &CallerIdentity,
    ) -> Result<Player, PodiumError> {
        match &self.backend {
            StoreBackend::Postgres(store) => store.adjust_xp(id, delta).await?,
            StoreBackend::Memory(store) => store.adjust_xp(id, delta).await?,
        }
        info!(player = %id, delta, actor = %actor, "xp adjusted");

        self.finish_mutation().await?;
        self.fetch(id).await
    }

    pub async fn delete_player(&self, id: Uuid) -> Result<(), PodiumError> {
        match &self.backend {
            StoreBackend::Postgres(store) => store.remove(id).await?,
            StoreBackend::Memory(store) => store.remove(id).await?,
        }
        info!(player = %id, "player deleted");

        self.finish_mutation().await
    }

    /// Run one full rank recalculation pass.
    ///
    /// Public so a caller that saw a recalculation failure can retry the
    /// pass alone, without repeating the mutation that preceded it.
    pub async fn recalculate_ranks(&self) -> Result<(), PodiumError> {
        match &self.backend {
            StoreBackend::Postgres(store) => store.recalculate().await?,
            StoreBackend::Memory(store) => store.recalculate().await?,
        }
        debug!("rank recalculation pass complete");

        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Player, PodiumError> {
        match &self.backend {
            StoreBackend::Postgres(store) => store.fetch(id).await,
            StoreBackend::Memory(store) => store.fetch(id).await,
        }
    }

    /// Invalidate the cached leaderboard, then restore the dense-rank
    /// invariant. Invalidation comes first so a failed pass never leaves a
    /// stale cached view behind.
    async fn finish_mutation(&self) -> Result<(), PodiumError> {
        let key = self.cache.key(LEADERBOARD_CACHE_SUFFIX);
        if let Err(e) = self.cache.del(&key).await {
            warn!(?e, "leaderboard cache invalidation failed");
        }

        self.recalculate_ranks().await
    }
}
