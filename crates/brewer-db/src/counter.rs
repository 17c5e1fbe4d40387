use async_trait::async_trait;
use brewer_core::{CallCounter, CounterError};
use sqlx::PgPool;

/// Row key shared by every instance of the service.
pub const BREW_COUNTER_KEY: &str = "brew-coffee-counter";

/// Call counter stored in Postgres and shared by every running instance.
///
/// Each increment is a single upsert, so concurrent callers get distinct
/// values without any locking on this side.
#[derive(Debug, Clone)]
pub struct PgCallCounter {
    pool: PgPool,
    key: String,
}

impl PgCallCounter {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_key(pool, BREW_COUNTER_KEY)
    }

    #[must_use]
    pub fn with_key(pool: PgPool, key: &str) -> Self {
        Self {
            pool,
            key: key.to_owned(),
        }
    }
}

#[async_trait]
impl CallCounter for PgCallCounter {
    async fn increment_and_get(&self) -> Result<u64, CounterError> {
        let value = increment_counter(&self.pool, &self.key)
            .await
            .map_err(|e| CounterError::Backend(e.into()))?;

        u64::try_from(value).map_err(|_| CounterError::OutOfRange(value))
    }
}

/// Atomically bump the named counter, creating it at 1 if absent.
async fn increment_counter(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO call_counters (name, value) VALUES ($1, 1) \
         ON CONFLICT (name) DO UPDATE \
         SET value = call_counters.value + 1, updated_at = NOW() \
         RETURNING value",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}
