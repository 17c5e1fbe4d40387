//! The brew decision: date check, then busy check, then weather.
//!
//! [`CoffeeMachine`] owns no state of its own; the only value that survives
//! between requests lives behind the injected [`CallCounter`].

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset};
use thiserror::Error;

use crate::clock::Clock;
use crate::counter::{CallCounter, CounterError};
use crate::weather::WeatherSource;

pub const HOT_COFFEE_MESSAGE: &str = "Your piping hot coffee is ready";
pub const ICED_COFFEE_MESSAGE: &str = "Your refreshing iced coffee is ready";

/// Every n-th brew request is turned away.
const BUSY_EVERY: u64 = 5;

const DEFAULT_COUNTER_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrewOutcome {
    Ready {
        message: &'static str,
        prepared_at: DateTime<FixedOffset>,
    },
    TooBusy,
    HolidayEasterEgg,
}

impl BrewOutcome {
    /// HTTP status code this outcome is reported with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Ready { .. } => 200,
            Self::TooBusy => 503,
            Self::HolidayEasterEgg => 418,
        }
    }
}

#[derive(Debug, Error)]
pub enum BrewError {
    #[error("call counter failed: {0}")]
    Counter(#[from] CounterError),

    #[error("call counter did not answer within {0:?}")]
    CounterTimeout(Duration),
}

pub struct CoffeeMachine {
    clock: Arc<dyn Clock>,
    counter: Arc<dyn CallCounter>,
    weather: Arc<dyn WeatherSource>,
    counter_timeout: Duration,
}

impl CoffeeMachine {
    pub fn new(
        clock: Arc<dyn Clock>,
        counter: Arc<dyn CallCounter>,
        weather: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            clock,
            counter,
            weather,
            counter_timeout: DEFAULT_COUNTER_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_counter_timeout(mut self, timeout: Duration) -> Self {
        self.counter_timeout = timeout;
        self
    }

    /// Decides the outcome of one brew request.
    ///
    /// On April 1st the counter is left untouched and the weather is never
    /// consulted. Otherwise the counter is incremented exactly once; the
    /// weather is only asked when the request is not turned away as busy.
    ///
    /// # Errors
    ///
    /// Returns [`BrewError`] if the call counter fails or does not answer in
    /// time. Weather lookups cannot fail.
    pub async fn brew(&self, caller_ip: Option<IpAddr>) -> Result<BrewOutcome, BrewError> {
        let now = self.clock.now();

        if now.month() == 4 && now.day() == 1 {
            tracing::debug!("april fools, refusing to brew");
            return Ok(BrewOutcome::HolidayEasterEgg);
        }

        let count = tokio::time::timeout(self.counter_timeout, self.counter.increment_and_get())
            .await
            .map_err(|_| BrewError::CounterTimeout(self.counter_timeout))??;

        if count % BUSY_EVERY == 0 {
            tracing::debug!(count, "machine busy");
            return Ok(BrewOutcome::TooBusy);
        }

        let too_hot = self.weather.too_hot_for_hot_drink(caller_ip).await;
        tracing::debug!(count, too_hot, "coffee brewed");

        Ok(BrewOutcome::Ready {
            message: if too_hot {
                ICED_COFFEE_MESSAGE
            } else {
                HOT_COFFEE_MESSAGE
            },
            prepared_at: now,
        })
    }
}

#[cfg(test)]
#[path = "brew_test.rs"]
mod tests;
