use reelist_config::SearchOptions;
use reelist_models::Movie;
use reelist_providers::MovieProvider;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::StateCell;

/// Observable snapshot of one search session.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// Accumulated results in relevance order; page order is preserved.
    pub results: Vec<Movie>,
    pub is_loading_more: bool,
    pub has_more_pages: bool,
    /// Message of the last failed fetch, cleared by the next success.
    pub last_error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            is_loading_more: false,
            has_more_pages: true,
            last_error: None,
        }
    }
}

struct PaginatorInner {
    active_query: String,
    current_page: u32,
    total_results: u32,
    is_loading: bool,
    // Bumped on every query change; a completed fetch whose generation
    // no longer matches was superseded and must be discarded.
    generation: u64,
}

/// Incremental pagination over one active query.
///
/// All mutation funnels through a single sequential task chain; the
/// loading flag is a cooperative guard, so overlapping page requests are
/// dropped rather than queued.
pub struct SearchPaginator {
    provider: Arc<dyn MovieProvider>,
    state: StateCell<SearchState>,
    inner: Mutex<PaginatorInner>,
}

impl SearchPaginator {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            state: StateCell::new(SearchState::default()),
            inner: Mutex::new(PaginatorInner {
                active_query: String::new(),
                current_page: 1,
                total_results: 0,
                is_loading: false,
                generation: 0,
            }),
        }
    }

    pub fn state(&self) -> SearchState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn active_query(&self) -> String {
        self.inner.lock().unwrap().active_query.clone()
    }

    /// Switch to a new query, resetting all pagination state. A repeat
    /// of the current query is a no-op.
    pub fn set_query(&self, query: &str) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.active_query == query {
                return;
            }
            debug!("New query {:?}, resetting pagination", query);
            inner.active_query = query.to_string();
            inner.generation = inner.generation.wrapping_add(1);
            inner.current_page = 1;
            inner.total_results = 0;
            inner.is_loading = false;
        }
        self.state.publish(SearchState::default());
    }

    /// Clear the session back to its initial empty state.
    pub fn reset(&self) {
        self.set_query("");
    }

    pub async fn load_first_page(&self) {
        self.load_page(true).await;
    }

    pub async fn load_next_page(&self) {
        self.load_page(false).await;
    }

    async fn load_page(&self, first: bool) {
        let (query, page, generation) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.is_loading {
                debug!("A page fetch is already in flight, dropping request");
                return;
            }
            if inner.active_query.is_empty() {
                return;
            }
            if first {
                inner.current_page = 1;
            } else {
                if !self.state.get().has_more_pages {
                    debug!("No more pages for {:?}", inner.active_query);
                    return;
                }
                inner.current_page += 1;
            }
            inner.is_loading = true;
            (
                inner.active_query.clone(),
                inner.current_page,
                inner.generation,
            )
        };
        self.state.modify(|s| s.is_loading_more = true);

        let outcome = self.provider.search(&query, page).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            // A newer query took over while this fetch was in flight. Its
            // reset already cleared the flags this fetch set.
            debug!("Discarding stale page {} for superseded query {:?}", page, query);
            return;
        }
        inner.is_loading = false;

        match outcome {
            Ok(page_data) => {
                if page == 1 {
                    if let Some(total) = page_data.total_results {
                        inner.total_results = total;
                    }
                }
                let page_size = self.provider.page_size();
                let reported_pages = (inner.total_results + page_size - 1) / page_size;
                let max_pages = self.provider.max_page().min(reported_pages);
                let has_more = page < max_pages && !page_data.movies.is_empty();
                if let Some(message) = &page_data.error {
                    debug!("Page {} for {:?} was empty: {}", page, query, message);
                }
                drop(inner);

                self.state.modify(|s| {
                    if page == 1 {
                        s.results = page_data.movies;
                    } else {
                        s.results.extend(page_data.movies);
                    }
                    s.has_more_pages = has_more;
                    s.last_error = None;
                    s.is_loading_more = false;
                });
            }
            Err(err) => {
                warn!("Search for {:?} page {} failed: {}", query, page, err);
                drop(inner);

                self.state.modify(|s| {
                    s.has_more_pages = false;
                    s.last_error = Some(err.to_string());
                    s.is_loading_more = false;
                });
            }
        }
    }
}

/// Turns a stream of keystrokes into at most one search per settled
/// query: each input aborts the previously scheduled fetch, and text
/// under the minimum length never schedules one. A fetch already in
/// flight when its query is superseded is handled by the paginator's
/// apply-time generation check.
pub struct SearchDebouncer {
    paginator: Arc<SearchPaginator>,
    debounce: Duration,
    min_query_len: usize,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    pub fn new(paginator: Arc<SearchPaginator>, options: &SearchOptions) -> Self {
        Self {
            paginator,
            debounce: Duration::from_millis(options.debounce_ms),
            min_query_len: options.min_query_len,
            pending: Mutex::new(None),
        }
    }

    /// Feed the current contents of the search box.
    pub fn input(&self, text: &str) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }

        if text.is_empty() {
            self.paginator.reset();
            return;
        }
        if text.chars().count() < self.min_query_len {
            return;
        }

        let paginator = Arc::clone(&self.paginator);
        let text = text.to_string();
        let delay = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            paginator.set_query(&text);
            paginator.load_first_page().await;
        });
        *self.pending.lock().unwrap() = Some(handle);
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }
}
