use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("stored call count is out of range: {0}")]
    OutOfRange(i64),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A monotonically increasing count of brew requests.
///
/// Each successful call returns a value exactly one higher than the previous
/// successful call observed by the same backing store, so no two callers ever
/// see the same count.
#[async_trait]
pub trait CallCounter: Send + Sync {
    async fn increment_and_get(&self) -> Result<u64, CounterError>;
}

/// Process-local counter. Starts at zero and is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCallCounter {
    count: AtomicU64,
}

impl InMemoryCallCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn current(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallCounter for InMemoryCallCounter {
    async fn increment_and_get(&self) -> Result<u64, CounterError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn in_memory_counter_starts_at_one() {
        let counter = InMemoryCallCounter::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.increment_and_get().await.unwrap(), 1);
        assert_eq!(counter.increment_and_get().await.unwrap(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[tokio::test]
    async fn in_memory_counter_hands_out_distinct_values_under_contention() {
        let counter = Arc::new(InMemoryCallCounter::new());

        let calls = (0..64).map(|_| {
            let counter = Arc::clone(&counter);
            tokio::spawn(async move { counter.increment_and_get().await.unwrap() })
        });
        let seen: HashSet<u64> = futures::future::join_all(calls)
            .await
            .into_iter()
            .map(|joined| joined.expect("task panicked"))
            .collect();

        assert_eq!(seen.len(), 64);
        assert_eq!(seen.iter().copied().min(), Some(1));
        assert_eq!(seen.iter().copied().max(), Some(64));
    }
}
