//! Growable, reloadable lists backed by cursor pagination.
//!
//! A [`ListStore`] owns the items of one list domain together with two flags:
//! `exhausted` (the server reported no further pages) and `failed` (the most
//! recent load did not succeed). Observers subscribe to a `watch` channel and
//! see every state change.
//!
//! Two rules keep concurrent callers from corrupting the list:
//! - only one "load more" runs at a time; overlapping calls return
//!   [`LoadOutcome::Busy`] without contacting the server;
//! - every reload starts a new generation when it is issued and another when
//!   its page lands, so a load that read the generation before either point is
//!   discarded as [`LoadOutcome::Superseded`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use pagination::{PageItem, PageRequest};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::domain::ApiError;
use crate::domain::ports::{NotificationLevel, Notifier, PageSource};

/// Items requested per page unless configured otherwise.
pub const EVENTS_PER_PAGE: u32 = 10;

/// Observable contents of a list store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// The server reported that no further pages exist.
    pub exhausted: bool,
    /// The most recent load failed.
    pub failed: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            exhausted: false,
            failed: false,
        }
    }
}

/// Result of a store action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived and was applied.
    Loaded {
        /// Number of items in the page.
        received: usize,
    },
    /// The request failed; `failed` is now set.
    Failed,
    /// Another "load more" was already running; nothing was requested.
    Busy,
    /// A newer reload started while this load was running; its page was
    /// dropped.
    Superseded,
}

/// Paginated list for one list domain.
pub struct ListStore<S: PageSource> {
    name: &'static str,
    source: Arc<S>,
    notifier: Arc<dyn Notifier>,
    page_size: u32,
    state: watch::Sender<ListState<S::Item>>,
    loading_more: AtomicBool,
    generation: AtomicU64,
}

impl<S: PageSource> ListStore<S> {
    /// Create an empty store.
    ///
    /// `name` labels log records and notifications.
    pub fn new(
        name: &'static str,
        source: Arc<S>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
    ) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            name,
            source,
            notifier,
            page_size: page_size.max(1),
            state,
            loading_more: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Label used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ListState<S::Item> {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState<S::Item>> {
        self.state.subscribe()
    }

    /// Whether a "load more" is currently running.
    #[must_use]
    pub fn is_loading_more(&self) -> bool {
        self.loading_more.load(Ordering::Acquire)
    }

    /// Fetch the page after the last held item and append it.
    ///
    /// Does not refuse to run once the list is exhausted; callers hide the
    /// trigger instead, and the server answers with an empty page.
    pub async fn load_more(&self, filter: S::Filter) -> LoadOutcome {
        let Some(_admission) = Admission::acquire(&self.loading_more) else {
            debug!(store = self.name, "load more already running; skipped");
            return LoadOutcome::Busy;
        };
        let generation = self.generation.load(Ordering::Acquire);
        let cursor = self.state.borrow().items.last().map(PageItem::cursor);
        let request = PageRequest::after(self.page_size, cursor, filter);

        match self.source.fetch_page(request).await {
            Ok(page) => {
                if !self.is_current(generation) {
                    return self.superseded();
                }
                let received = page.items.len();
                self.state.send_modify(|state| {
                    state.items.extend(page.items);
                    state.exhausted = !page.has_more;
                    state.failed = false;
                });
                debug!(store = self.name, received, "appended page");
                LoadOutcome::Loaded { received }
            }
            Err(err) => self.record_failure(generation, &err),
        }
    }

    /// Fetch the first page and replace the held items with it.
    ///
    /// On failure the previous items stay in place.
    pub async fn reload(&self, filter: S::Filter) -> LoadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let request = PageRequest::first(self.page_size, filter);

        match self.source.fetch_page(request).await {
            Ok(page) => {
                // Loads issued while this reload was in flight hold `generation`
                // and a cursor into the content being replaced.
                if !self.advance(generation) {
                    return self.superseded();
                }
                let received = page.items.len();
                self.state.send_modify(|state| {
                    state.items = page.items;
                    state.exhausted = !page.has_more;
                    state.failed = false;
                });
                debug!(store = self.name, received, "replaced list");
                LoadOutcome::Loaded { received }
            }
            Err(err) => self.record_failure(generation, &err),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    fn advance(&self, generation: u64) -> bool {
        self.generation
            .compare_exchange(generation, generation + 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn superseded(&self) -> LoadOutcome {
        debug!(store = self.name, "page arrived after a newer reload; dropped");
        LoadOutcome::Superseded
    }

    fn record_failure(&self, generation: u64, err: &ApiError) -> LoadOutcome {
        if !self.is_current(generation) {
            debug!(
                store = self.name,
                kind = err.kind(),
                error = %err,
                "failure arrived after a newer reload; dropped"
            );
            return LoadOutcome::Superseded;
        }
        error!(store = self.name, kind = err.kind(), error = %err, "could not load list page");
        self.notifier.notify(
            NotificationLevel::Error,
            &format!("Could not load {}: {err}", self.name),
        );
        self.state.send_modify(|state| state.failed = true);
        LoadOutcome::Failed
    }
}

/// Holds the "load more" slot until dropped.
struct Admission<'a>(&'a AtomicBool);

impl<'a> Admission<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
