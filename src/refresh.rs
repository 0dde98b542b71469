//! Epoch-guarded auto-refresh engine.
//!
//! [`AutoRefresh`] keeps a [`RefreshState`] fresh by invoking an asynchronous
//! fetch callback immediately and then on a fixed interval. Each polling
//! cycle is tagged with a monotonically increasing epoch; changing the
//! dependency set (or disposing the engine) invalidates the epoch so results
//! from superseded cycles are discarded instead of overwriting fresher state.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Error shape accepted from fetch callbacks; rendered to a description
/// string before it reaches [`RefreshState::error`].
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Boxed future produced by one fetch invocation.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send>>;

/// A shareable fetch callback.
pub type Fetcher<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

// ============================================================================
// RefreshState
// ============================================================================

/// Externally observable product of the polling engine.
#[derive(Debug, Clone)]
pub struct RefreshState<T> {
    /// Last successfully fetched payload; survives failed refreshes
    pub data: Option<T>,
    /// True only while the first fetch of the current epoch is outstanding
    pub loading: bool,
    /// Description of the most recent failure; cleared on success
    pub error: Option<String>,
    /// Completion time of the most recent successful fetch
    pub last_refresh_time: Option<DateTime<Local>>,
}

impl<T> Default for RefreshState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_refresh_time: None,
        }
    }
}

// ============================================================================
// AutoRefresh
// ============================================================================

/// Periodically refreshed view of an external data source.
///
/// One live polling cycle (one timer, one outstanding fetch) exists per
/// dependency-set identity. The fetch callback sits behind an indirection
/// cell: [`set_fetcher`] swaps the callback without touching the timer or
/// the epoch, while [`set_dependencies`] restarts the whole cycle.
///
/// [`set_fetcher`]: AutoRefresh::set_fetcher
/// [`set_dependencies`]: AutoRefresh::set_dependencies
pub struct AutoRefresh<T> {
    state: Arc<Mutex<RefreshState<T>>>,
    fetcher: Arc<RwLock<Fetcher<T>>>,
    epoch: Arc<AtomicU64>,
    interval: Duration,
    deps: Vec<String>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> AutoRefresh<T> {
    /// Start polling: immediate fetch, then one fetch per `interval`.
    pub fn new(fetcher: Fetcher<T>, interval: Duration, deps: Vec<String>) -> Self {
        let mut engine = Self {
            state: Arc::new(Mutex::new(RefreshState::default())),
            fetcher: Arc::new(RwLock::new(fetcher)),
            epoch: Arc::new(AtomicU64::new(0)),
            interval,
            deps,
            task: None,
        };
        engine.restart();
        engine
    }

    /// Convenience constructor from a plain async closure.
    pub fn from_fn<F, Fut>(f: F, interval: Duration, deps: Vec<String>) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        Self::new(
            Arc::new(move || Box::pin(f()) as FetchFuture<T>),
            interval,
            deps,
        )
    }

    /// Snapshot of the current refresh state.
    pub fn state(&self) -> RefreshState<T>
    where
        T: Clone,
    {
        lock_state(&self.state).clone()
    }

    /// Shared handle for consumers that read the state every frame.
    pub fn state_handle(&self) -> Arc<Mutex<RefreshState<T>>> {
        Arc::clone(&self.state)
    }

    /// Current dependency set.
    pub fn dependencies(&self) -> &[String] {
        &self.deps
    }

    /// Replace the fetch callback without restarting the cycle.
    ///
    /// The timer keeps its phase and the epoch is untouched; the next tick
    /// simply invokes the new callback.
    pub fn set_fetcher(&self, fetcher: Fetcher<T>) {
        *self
            .fetcher
            .write()
            .expect("fetcher cell lock poisoned") = fetcher;
    }

    /// Update the dependency set, restarting the cycle if any member changed.
    pub fn set_dependencies(&mut self, deps: Vec<String>) {
        if deps == self.deps {
            return;
        }
        debug!(old = ?self.deps, new = ?deps, "dependency set changed, restarting cycle");
        self.deps = deps;
        self.restart();
    }

    /// Force an immediate re-fetch by starting a fresh epoch.
    pub fn refresh_now(&mut self) {
        self.restart();
    }

    /// Stop polling and invalidate the current epoch; no further writes.
    pub fn dispose(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Begin a new epoch: invalidate the old cycle, then fetch immediately
    /// and reschedule the interval.
    fn restart(&mut self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        lock_state(&self.state).loading = true;

        let state = Arc::clone(&self.state);
        let fetcher = Arc::clone(&self.fetcher);
        let epoch_cell = Arc::clone(&self.epoch);
        let interval = self.interval;

        self.task = Some(tokio::spawn(async move {
            run_cycle(epoch, epoch_cell, state, fetcher, interval).await;
        }));
    }
}

impl<T> Drop for AutoRefresh<T> {
    fn drop(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ============================================================================
// Cycle internals
// ============================================================================

/// One epoch's polling loop: immediate fetch, then strictly sequential ticks.
async fn run_cycle<T>(
    epoch: u64,
    epoch_cell: Arc<AtomicU64>,
    state: Arc<Mutex<RefreshState<T>>>,
    fetcher: Arc<RwLock<Fetcher<T>>>,
    interval: Duration,
) {
    run_tick(epoch, &epoch_cell, &state, &fetcher, true).await;

    let mut ticker = interval_at(Instant::now() + interval, interval);
    // A slow fetch delays the next tick rather than producing a burst
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if epoch_cell.load(Ordering::SeqCst) != epoch {
            break;
        }
        run_tick(epoch, &epoch_cell, &state, &fetcher, false).await;
    }
}

/// Run one fetch and apply its result under the epoch guard.
async fn run_tick<T>(
    epoch: u64,
    epoch_cell: &AtomicU64,
    state: &Arc<Mutex<RefreshState<T>>>,
    fetcher: &Arc<RwLock<Fetcher<T>>>,
    is_initial: bool,
) {
    // Invoke through the indirection cell so callback swaps take effect on
    // the very next tick. The guard is dropped before awaiting.
    let fetch = Arc::clone(&*fetcher.read().expect("fetcher cell lock poisoned"));
    let result = fetch().await;

    let mut st = lock_state(state);
    if epoch_cell.load(Ordering::SeqCst) != epoch {
        debug!(epoch, "discarding fetch result from superseded epoch");
        return;
    }

    match result {
        Ok(data) => {
            st.data = Some(data);
            st.error = None;
            st.last_refresh_time = Some(Local::now());
        }
        Err(e) => {
            // Stale-but-valid: keep data, keep last_refresh_time
            warn!(epoch, error = %e, "refresh tick failed");
            st.error = Some(e.to_string());
        }
    }

    if is_initial {
        st.loading = false;
    }
}

fn lock_state<T>(state: &Arc<Mutex<RefreshState<T>>>) -> MutexGuard<'_, RefreshState<T>> {
    state.lock().expect("refresh state lock poisoned")
}
