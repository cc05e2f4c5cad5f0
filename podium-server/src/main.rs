use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use podium_core::AppState;
use podium_database::{CacheService, Database, PlayerStore, cache::DEFAULT_LEADERBOARD_TTL};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        // sqlx logs every statement; the access log from the trace layer
        // is enough.
        !target.starts_with("sqlx::query")
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let port = env_u64("PORT", 8080);
    let store_backend = env::var("STORE_BACKEND").unwrap_or_else(|_| "postgres".to_string());

    let store = match store_backend.as_str() {
        "memory" => {
            warn!("STORE_BACKEND=memory: players are volatile and lost on restart.");
            PlayerStore::memory()
        }
        _ => {
            let database_url = env::var("DATABASE_URL")?;
            let db = Database::connect(&database_url, 5).await?;
            info!("PostgreSQL connection established.");

            let redis_enabled = env_bool("REDIS_ENABLED", false);
            let redis_key_prefix =
                env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "podium:prod".to_string());

            let mut cache = if redis_enabled {
                match env::var("REDIS_URL") {
                    Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone())
                    {
                        Ok(cache) => {
                            info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                            cache
                        }
                        Err(err) => {
                            warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                            CacheService::disabled(redis_key_prefix.clone())
                        }
                    },
                    Err(_) => {
                        warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                        CacheService::disabled(redis_key_prefix.clone())
                    }
                }
            } else {
                info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
                CacheService::disabled(redis_key_prefix.clone())
            };

            let leaderboard_ttl_seconds = env_u64(
                "LEADERBOARD_CACHE_TTL_SECONDS",
                DEFAULT_LEADERBOARD_TTL.as_secs(),
            );
            cache.configure_leaderboard_ttl(Duration::from_secs(leaderboard_ttl_seconds));
            info!(
                leaderboard_ttl_seconds = cache.leaderboard_ttl().as_secs(),
                "Leaderboard cache TTL configured."
            );

            if cache.is_redis_enabled() {
                if let Err(err) = cache.ping().await {
                    warn!(
                        ?err,
                        "Redis cache ping failed; cache operations will continue with fallback behavior."
                    );
                } else {
                    info!("Redis cache health check passed.");
                }
            }

            let db = db.attach_cache(cache);

            let auto_run_migrations = env_bool("AUTO_RUN_MIGRATIONS", true);
            if auto_run_migrations {
                db.run_migrations().await?;
                info!("Database migrations applied.");
            } else {
                info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
            }

            PlayerStore::postgres(db)
        }
    };

    let app = podium_http::router(AppState::new(store));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, u16::try_from(port)?));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Podium is listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to install ctrl-c handler");
        return;
    }
    info!("Shutdown signal received.");
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}
