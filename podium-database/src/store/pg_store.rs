use uuid::Uuid;

use crate::{
    database::Database,
    error::{PodiumError, map_sqlx_err},
    model::{NewPlayer, Player},
};

/// Advisory lock key serializing rank recalculation passes.
const RANK_PASS_LOCK_KEY: i64 = 0x706f_6469;

/// How long a pass waits for the advisory lock before giving up with a
/// retryable conflict.
const RANK_PASS_LOCK_TIMEOUT: &str = "5s";

const PLAYER_COLUMNS: &str = r#"id, name, email, "character", xp, rank, seq, created_at"#;

#[derive(Clone, Debug)]
pub struct PgPlayerStore {
    db: Database,
}

impl PgPlayerStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a fresh player row with xp 0 and no rank.
    pub async fn insert(
        &self,
        id: Uuid,
        new: &NewPlayer,
        created_at: i64,
    ) -> Result<(), PodiumError> {
        sqlx::query(
            r#"INSERT INTO players (id, name, email, "character", xp, rank, created_at)
               VALUES ($1, $2, $3, $4, 0, NULL, $5)"#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.character)
        .bind(created_at)
        .execute(self.db.pool())
        .await
        .map_err(map_sqlx_err)?;

        Ok(())
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Player, PodiumError> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");

        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(map_sqlx_err)?
            .ok_or(PodiumError::NotFound)
    }

    /// Full scan ordered for the leaderboard: XP descending, creation
    /// sequence ascending.
    pub async fn fetch_all(&self) -> Result<Vec<Player>, PodiumError> {
        let query = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY xp DESC, seq ASC");

        sqlx::query_as::<_, Player>(&query)
            .fetch_all(self.db.pool())
            .await
            .map_err(map_sqlx_err)
    }

    /// Apply an XP delta as one atomic statement.
    ///
    /// The clamp and the increment happen inside a single UPDATE, so two
    /// concurrent deltas against the same row both land; there is no
    /// read-then-write window to lose one in.
    pub async fn adjust_xp(&self, id: Uuid, delta: i64) -> Result<(), PodiumError> {
        let updated = sqlx::query("UPDATE players SET xp = GREATEST(0, xp + $2) WHERE id = $1")
            .bind(id)
            .bind(delta)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_err)?
            .rows_affected();

        if updated == 0 {
            return Err(PodiumError::NotFound);
        }

        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), PodiumError> {
        let deleted = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_err)?
            .rows_affected();

        if deleted == 0 {
            return Err(PodiumError::NotFound);
        }

        Ok(())
    }

    /// Reassign dense ranks 1..N over the whole table in one pass.
    ///
    /// The pass runs inside a transaction holding an advisory lock, so two
    /// concurrent passes cannot interleave their read and write phases. The
    /// `IS DISTINCT FROM` guard skips rows whose rank is already correct,
    /// which makes a second consecutive pass write nothing.
    pub async fn recalculate(&self) -> Result<(), PodiumError> {
        let mut tx = self.db.pool().begin().await.map_err(map_sqlx_err)?;

        let set_timeout = format!("SET LOCAL lock_timeout = '{RANK_PASS_LOCK_TIMEOUT}'");
        sqlx::query(&set_timeout)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(RANK_PASS_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        sqlx::query(
            "WITH ordered AS (
                SELECT id, ROW_NUMBER() OVER (ORDER BY xp DESC, seq ASC) AS new_rank
                FROM players
            )
            UPDATE players p
            SET rank = o.new_rank
            FROM ordered o
            WHERE p.id = o.id AND p.rank IS DISTINCT FROM o.new_rank",
        )
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;

        Ok(())
    }
}
