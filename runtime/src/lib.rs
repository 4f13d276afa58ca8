//! # Storefront Runtime
//!
//! Runtime implementation for the storefront reducers.
//!
//! This crate provides the [`Store`] that owns a feature's state, runs its
//! reducer for every dispatched action, and executes the effect descriptions
//! the reducer returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns state behind a lock; one dispatch runs to completion
//!   before the next one starts
//! - **Effect execution**: Delays and futures run on tokio and feed their
//!   actions back into the store
//! - **Cancellation registry**: Cancellable effects are tasks keyed by
//!   [`EffectId`], so a timer can be cancelled without touching its siblings
//!
//! ## Example
//!
//! ```ignore
//! use storefront_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! let mut handle = store.send(Action::DoSomething).await?;
//!
//! // Wait until every effect it started has finished
//! handle.wait().await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use futures::future::{join_all, BoxFuture};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use storefront_core::effect::{Effect, EffectId};
use storefront_core::reducer::Reducer;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for an action or for effects to finish
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

/// Handle for waiting on the effects started by one `send()`
///
/// Only effects started directly by the dispatched action are tracked.
/// Actions fed back by those effects get their own handles.
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a handle and the tracking context that feeds it
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Number of tracked effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all tracked effects to complete
    ///
    /// Cancelled effects count as complete.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: tracking context shared by the effects of one dispatch
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the dispatch counter on drop
///
/// Dropped when the effect task finishes, panics, or is aborted.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Internal: cancellable tasks keyed by effect id
///
/// Each entry carries a generation so a finishing task only unregisters
/// itself, never a newer task that replaced it under the same id.
#[derive(Default)]
struct CancellationRegistry {
    tasks: Mutex<HashMap<EffectId, (u64, AbortHandle)>>,
    generation: AtomicU64,
}

impl CancellationRegistry {
    fn cancel(&self, id: &EffectId) -> bool {
        let removed = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        match removed {
            Some((_, task)) => {
                task.abort();
                true
            },
            None => false,
        }
    }

    fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        for (_, (_, task)) in &drained {
            task.abort();
        }
        drained.len()
    }

    fn finish(&self, id: &EffectId, generation: u64) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if tasks.get(id).is_some_and(|(current, _)| *current == generation) {
            tasks.remove(id);
        }
    }

    fn contains(&self, id: &EffectId) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    fn len(&self) -> usize {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        join_all, Arc, AtomicCounterGuard, AtomicUsize, BoxFuture, CancellationRegistry,
        DecrementGuard, Duration, Effect, EffectHandle, EffectId, EffectTracking, JoinHandle,
        Ordering, PoisonError, Reducer, StoreError,
    };
    use std::sync::atomic::AtomicBool;
    use tokio::sync::{broadcast, RwLock};

    struct StoreInner<S, A, E, R> {
        state: RwLock<S>,
        reducer: R,
        environment: E,
        shutdown: AtomicBool,
        pending_effects: Arc<AtomicUsize>,
        cancellable: CancellationRegistry,
        /// Every action produced by an effect is broadcast here before it is
        /// fed back into the store.
        action_broadcast: broadcast::Sender<A>,
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind an async `RwLock`; a dispatch holds the write lock
    ///    for the whole reducer call)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// Cloning a store is cheap and yields a handle to the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        inner: Arc<StoreInner<S, A, E, R>>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast channel holds 16 actions; use
        /// [`Store::with_broadcast_capacity`] for chattier stores.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a store with a custom action broadcast capacity
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                inner: Arc::new(StoreInner {
                    state: RwLock::new(initial_state),
                    reducer,
                    environment,
                    shutdown: AtomicBool::new(false),
                    pending_effects: Arc::new(AtomicUsize::new(0)),
                    cancellable: CancellationRegistry::default(),
                    action_broadcast,
                }),
            }
        }

        /// Send an action to the store
        ///
        /// The reducer runs under the state write lock, then the returned
        /// effects are started. `send()` returns as soon as they are started;
        /// use the returned [`EffectHandle`] to wait for them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.inner.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.inner.state.write().await;

                let start = std::time::Instant::now();
                let effects = self
                    .inner
                    .reducer
                    .reduce(&mut *state, action, &self.inner.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, &tracking);
            }

            Ok(handle)
        }

        /// Send an action and wait for a matching action produced by its effects
        ///
        /// Subscribes before sending, so a fast effect cannot be missed.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action before `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.inner.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {},
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Action observer lagged");
                        },
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        },
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.inner.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let line_count = store.state(|s| s.cart.lines.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.inner.state.read().await;
            f(&*state)
        }

        /// Number of effects still running across all dispatches
        #[must_use]
        pub fn pending_effects(&self) -> usize {
            self.inner.pending_effects.load(Ordering::SeqCst)
        }

        /// Whether a cancellable effect is currently scheduled under `id`
        #[must_use]
        pub fn is_scheduled(&self, id: &EffectId) -> bool {
            self.inner.cancellable.contains(id)
        }

        /// Number of cancellable effects currently scheduled
        #[must_use]
        pub fn scheduled_count(&self) -> usize {
            self.inner.cancellable.len()
        }

        /// Stop accepting actions, cancel scheduled tasks, and wait for the rest
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when `timeout` elapses.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            self.inner.shutdown.store(true, Ordering::Release);

            let cancelled = self.inner.cancellable.cancel_all();
            tracing::info!(cancelled, "Store shutting down");

            let wait = async {
                while self.inner.pending_effects.load(Ordering::SeqCst) > 0 {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            };

            if tokio::time::timeout(timeout, wait).await.is_err() {
                let remaining = self.inner.pending_effects.load(Ordering::SeqCst);
                tracing::error!(remaining, "Shutdown timed out");
                return Err(StoreError::ShutdownTimeout(remaining));
            }

            Ok(())
        }

        /// Start one effect returned by the reducer
        ///
        /// `None` and `Cancel` are handled inline so that a cancellation takes
        /// effect within the same dispatch. Cancellable effects are registered
        /// before `send()` returns. Everything else runs on a spawned task.
        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Cancel(id) => self.cancel(&id),
                Effect::Cancellable { id, effect } => {
                    let work = self.run(*effect);
                    let _ = self.spawn_cancellable(id, work, Some(tracking));
                },
                Effect::Parallel(effects) => {
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
                other => {
                    let work = self.run(other);
                    let _ = self.spawn_tracked(work, Some(tracking));
                },
            }
        }

        /// Run an effect to completion, feeding produced actions back
        fn run(&self, effect: Effect<A>) -> BoxFuture<'static, ()> {
            let store = self.clone();
            Box::pin(async move {
                match effect {
                    Effect::None => {},
                    Effect::Future(fut) => {
                        metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                        if let Some(action) = fut.await {
                            store.feed_back(action).await;
                        }
                    },
                    Effect::Delay { duration, action } => {
                        metrics::counter!("store.effects.executed", "type" => "delay").increment(1);
                        tokio::time::sleep(duration).await;
                        tracing::trace!(?duration, "Delay elapsed, sending action");
                        store.feed_back(*action).await;
                    },
                    Effect::Parallel(effects) => {
                        join_all(effects.into_iter().map(|effect| store.run(effect))).await;
                    },
                    Effect::Sequential(effects) => {
                        for effect in effects {
                            store.run(effect).await;
                        }
                    },
                    Effect::Cancellable { id, effect } => {
                        let work = store.run(*effect);
                        let task = store.spawn_cancellable(id, work, None);
                        // A cancelled task resolves with a JoinError; either way it is over.
                        let _ = task.await;
                    },
                    Effect::Cancel(id) => store.cancel(&id),
                }
            })
        }

        async fn feed_back(&self, action: A) {
            let _ = self.inner.action_broadcast.send(action.clone());
            if let Err(error) = self.send(action).await {
                tracing::debug!(%error, "Dropped effect action");
            }
        }

        fn cancel(&self, id: &EffectId) {
            if self.inner.cancellable.cancel(id) {
                metrics::counter!("store.effects.cancelled").increment(1);
                tracing::debug!(effect_id = %id, "Cancelled effect");
            } else {
                tracing::trace!(effect_id = %id, "Nothing to cancel");
            }
        }

        fn spawn_tracked(
            &self,
            work: BoxFuture<'static, ()>,
            tracking: Option<&EffectTracking>,
        ) -> JoinHandle<()> {
            let guard = tracking.map(|tracking| {
                tracking.increment();
                DecrementGuard(tracking.clone())
            });
            self.inner.pending_effects.fetch_add(1, Ordering::SeqCst);
            let pending_guard = AtomicCounterGuard(Arc::clone(&self.inner.pending_effects));

            tokio::spawn(async move {
                let _guard = guard;
                let _pending_guard = pending_guard;
                work.await;
            })
        }

        fn spawn_cancellable(
            &self,
            id: EffectId,
            work: BoxFuture<'static, ()>,
            tracking: Option<&EffectTracking>,
        ) -> JoinHandle<()> {
            let registry = &self.inner.cancellable;
            // Hold the lock across spawn + insert so the task cannot unregister
            // itself before it is registered.
            let mut tasks = registry.tasks.lock().unwrap_or_else(PoisonError::into_inner);
            let generation = registry.generation.fetch_add(1, Ordering::SeqCst);

            let store = self.clone();
            let task_id = id.clone();
            let task = self.spawn_tracked(
                Box::pin(async move {
                    work.await;
                    store.inner.cancellable.finish(&task_id, generation);
                }),
                tracking,
            );

            if let Some((_, previous)) = tasks.insert(id.clone(), (generation, task.abort_handle())) {
                tracing::debug!(effect_id = %id, "Replacing scheduled effect");
                previous.abort();
            }
            metrics::counter!("store.effects.executed", "type" => "cancellable").increment(1);

            task
        }
    }
}
