//! # Storefront Testing
//!
//! Testing utilities and helpers for the storefront reducers.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (fixed clock, sequential ids)
//! - A Given/When/Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for returned effects
//!
//! ## Example
//!
//! ```ignore
//! use storefront_testing::{test_clock, SequentialIds};
//! use storefront_runtime::Store;
//!
//! #[tokio::test(start_paused = true)]
//! async fn test_checkout_flow() {
//!     let env = StorefrontEnvironment::new(test_clock(), SequentialIds::new("order-"), config);
//!     let store = Store::new(AppState::default(), AppReducer::new(), env);
//!
//!     store.send(AppAction::Checkout(CheckoutAction::Submit)).await?;
//!
//!     let phase = store.state(|s| s.checkout.phase).await;
//!     assert_eq!(phase, CheckoutPhase::Submitting);
//! }
//! ```

use chrono::{DateTime, Utc};
use storefront_core::environment::{Clock, IdGenerator};


pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::FixedClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: `"{prefix}1"`, `"{prefix}2"`, ...
    ///
    /// ```
    /// use storefront_testing::mocks::SequentialIds;
    /// use storefront_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::new("txn-");
    /// assert_eq!(ids.next_id(), "txn-1");
    /// assert_eq!(ids.next_id(), "txn-2");
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Start a sequence at 1 with the given prefix
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}{n}", self.prefix)
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a test-writer tracing subscriber once per test binary
    ///
    /// Honors `RUST_LOG`, defaulting to `warn`. Later calls are no-ops.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{test_clock, FixedClock, SequentialIds};
