//! Injected dependencies shared by every storefront reducer.

use crate::config::StorefrontConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use storefront_core::environment::{Clock, IdGenerator, SystemClock, UuidIdGenerator};

/// Environment passed to all storefront reducers
///
/// Cloning is cheap; the clock and id source are shared.
#[derive(Clone)]
pub struct StorefrontEnvironment {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    /// Delays, limits and demo credentials
    pub config: StorefrontConfig,
}

impl StorefrontEnvironment {
    /// Build an environment from explicit dependencies
    #[must_use]
    pub fn new(
        clock: impl Clock + 'static,
        ids: impl IdGenerator + 'static,
        config: StorefrontConfig,
    ) -> Self {
        Self {
            clock: Arc::new(clock),
            ids: Arc::new(ids),
            config,
        }
    }

    /// System clock and random UUIDs
    #[must_use]
    pub fn production(config: StorefrontConfig) -> Self {
        Self::new(SystemClock, UuidIdGenerator, config)
    }

    /// Current time from the injected clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Next unused identifier
    #[must_use]
    pub fn next_id(&self) -> String {
        self.ids.next_id()
    }
}

impl std::fmt::Debug for StorefrontEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Fixed clock, `id-1, id-2, ..` ids and default config
#[cfg(test)]
pub(crate) fn test_environment() -> StorefrontEnvironment {
    StorefrontEnvironment::new(
        storefront_testing::test_clock(),
        storefront_testing::SequentialIds::new("id-"),
        StorefrontConfig::default(),
    )
}
