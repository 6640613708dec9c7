//! Search-As-You-Type Controller
//!
//! Debounces keystrokes into searches against the catalog.
//!
//! ## Behavior
//! - **Debounce**: every input cancels the pending scheduled search and schedules a new one
//!   after `delay`; only the last input of a burst reaches the backend.
//! - **Minimum length**: scheduled searches run only when the trimmed text has at least
//!   `min_chars` characters. Explicit submits (button, Enter) skip this check.
//! - **Sequencing**: each input or submit takes a new sequence number. A search already in
//!   flight is not cancelled, but its result is dropped if a newer sequence exists. Input too
//!   short to search resets a `Searching` state to `Idle`; earlier `Results` stay visible.

use super::api::ApiClient;
use crate::model::types::Institution;

use anyhow::Result;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Type-erased search backend: query in, matching institutions out.
pub type SearchFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<Vec<Institution>>> + Send>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum LiveSearchState {
    /// Nothing typed; the view shows its search hint.
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        items: Vec<Institution>,
    },
    Failed {
        query: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSearchConfig {
    pub delay: Duration,
    pub min_chars: usize,
}

impl Default for LiveSearchConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

pub struct LiveSearch {
    config: LiveSearchConfig,
    search: SearchFn,
    /// The scheduled (not yet started) search, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
    sequence: Arc<AtomicU64>,
    state: Arc<watch::Sender<LiveSearchState>>,
}

impl LiveSearch {
    pub fn new<F, Fut>(config: LiveSearchConfig, search: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Institution>>> + Send + 'static,
    {
        let search: SearchFn = Arc::new(move |query: String| {
            Box::pin(search(query)) as Pin<Box<dyn Future<Output = Result<Vec<Institution>>> + Send>>
        });
        let (state, _) = watch::channel(LiveSearchState::Idle);

        Self {
            config,
            search,
            pending: Mutex::new(None),
            sequence: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    /// Searches through the catalog API.
    pub fn with_client(config: LiveSearchConfig, client: ApiClient) -> Self {
        Self::new(config, move |query: String| {
            let client = client.clone();
            async move { client.search(&query).await.map_err(anyhow::Error::from) }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<LiveSearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LiveSearchState {
        self.state.borrow().clone()
    }

    /// Handles a change of the search box contents.
    pub fn on_input(&self, text: &str) {
        self.cancel_pending();
        let sequence = self.next_sequence();

        let query = text.trim().to_string();
        if query.is_empty() {
            self.state.send_replace(LiveSearchState::Idle);
            return;
        }
        if query.chars().count() < self.config.min_chars {
            tracing::trace!("Input {:?} below minimum length, not scheduling", query);
            // The superseded search can no longer publish; never leave `Searching` behind.
            self.state.send_if_modified(|current| {
                let searching = matches!(current, LiveSearchState::Searching { .. });
                if searching {
                    *current = LiveSearchState::Idle;
                }
                searching
            });
            return;
        }

        let delay = self.config.delay;
        let search = self.search.clone();
        let latest = self.sequence.clone();
        let state = self.state.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // In-flight searches are never aborted; run_search drops stale results.
            tokio::spawn(run_search(sequence, query, search, latest, state));
        });

        self.replace_pending(Some(handle));
    }

    /// Searches immediately, regardless of length (search button or Enter).
    pub fn submit(&self, text: &str) {
        self.cancel_pending();
        let sequence = self.next_sequence();

        let query = text.trim().to_string();
        if query.is_empty() {
            self.state.send_replace(LiveSearchState::Idle);
            return;
        }

        tokio::spawn(run_search(
            sequence,
            query,
            self.search.clone(),
            self.sequence.clone(),
            self.state.clone(),
        ));
    }

    pub fn has_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn cancel_pending(&self) {
        self.replace_pending(None);
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = handle;
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for LiveSearch {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn run_search(
    sequence: u64,
    query: String,
    search: SearchFn,
    latest: Arc<AtomicU64>,
    state: Arc<watch::Sender<LiveSearchState>>,
) {
    let searching = LiveSearchState::Searching {
        query: query.clone(),
    };
    if !publish(&state, &latest, sequence, searching) {
        return;
    }
    tracing::debug!("Searching for {:?} (sequence {})", query, sequence);

    let next = match search(query.clone()).await {
        Ok(items) => LiveSearchState::Results {
            query: query.clone(),
            items,
        },
        Err(e) => LiveSearchState::Failed {
            query: query.clone(),
            message: e.to_string(),
        },
    };

    if let LiveSearchState::Failed { message, .. } = &next {
        tracing::warn!("Search for {:?} failed: {}", query, message);
    }
    if !publish(&state, &latest, sequence, next) {
        tracing::debug!("Discarding stale results for {:?} (sequence {})", query, sequence);
    }
}

/// Replaces the state only while `sequence` is still the latest one.
///
/// The check runs under the channel's lock, and `on_input`/`submit` bump the sequence before
/// touching the state, so a superseded search can never overwrite a newer state.
fn publish(
    state: &watch::Sender<LiveSearchState>,
    latest: &AtomicU64,
    sequence: u64,
    next: LiveSearchState,
) -> bool {
    state.send_if_modified(|current| {
        if latest.load(Ordering::SeqCst) != sequence {
            return false;
        }
        *current = next;
        true
    })
}
