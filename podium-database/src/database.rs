use sqlx::{PgPool, migrate::Migrator, postgres::PgPoolOptions};

use crate::cache::CacheService;

/// Compile-time discovered SQLx migrations for the `podium-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
    cache: CacheService,
}

impl Database {
    /// Connect a fresh pool to the given Postgres URL.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create a database handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: CacheService::disabled("podium:prod"),
        }
    }

    /// Replace the cache service on this handle.
    pub fn attach_cache(mut self, cache: CacheService) -> Self {
        self.cache = cache;
        self
    }

    /// Run pending migrations against the pool.
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Expose the cache service for query modules.
    pub fn cache(&self) -> &CacheService {
        &self.cache
    }
}
