use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pairwatch_core::{PairwatchError, Series, SeriesId, SeriesSource};

/// Instruction for how a fetch should behave for a given identifier.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PairwatchError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<SeriesId, MockBehavior<Series>>,
    calls: HashMap<SeriesId, usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for fetches of a specific identifier.
    pub async fn set_behavior(&self, id: impl Into<SeriesId>, behavior: MockBehavior<Series>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(id.into(), behavior);
    }

    /// Shortcut for `set_behavior(id, MockBehavior::Return(series))` keyed by the series id.
    pub async fn serve(&self, series: Series) {
        let id = series.id().clone();
        self.set_behavior(id, MockBehavior::Return(series)).await;
    }

    /// Number of fetches observed for `id`, including failed and hanging ones.
    pub async fn calls(&self, id: impl Into<SeriesId>) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(&id.into()).copied().unwrap_or(0)
    }

    /// Number of fetches observed across all identifiers.
    pub async fn total_calls(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.values().sum()
    }

    /// Clear all configured behaviors and call counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.calls.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Identifiers without a configured behavior report `NotFound`.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn SeriesSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SeriesSource>, controller)
    }
}

#[async_trait]
impl SeriesSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_series(&self, id: &SeriesId) -> Result<Series, PairwatchError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.calls.entry(id.clone()).or_default() += 1;
            guard.rules.get(id).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(PairwatchError::not_found(format!("series for {id}"))),
        }
    }
}
