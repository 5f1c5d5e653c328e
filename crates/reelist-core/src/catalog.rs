use rand::seq::SliceRandom;
use reelist_models::{Movie, SearchPage};
use reelist_providers::{CatalogProvider, Category, ProviderError};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::state::StateCell;

// Curated listings page deeper than anyone scrolls; cap instead of
// trusting the remote-reported total.
const POPULAR_PAGE_CAP: u32 = 10;

/// Observable snapshot of the browse screen's data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub popular: Vec<Movie>,
    pub top_rated: Vec<Movie>,
    pub upcoming: Vec<Movie>,
    /// Featured title, picked once per cold load from `popular`.
    pub hero: Option<Movie>,
    /// True once all three categories have settled, successfully or not.
    pub is_ready: bool,
    pub popular_loading: bool,
    pub popular_has_more: bool,
}

struct CatalogInner {
    popular_page: u32,
    popular_loading: bool,
}

/// Fetches the three browse categories concurrently and republishes
/// them as they land. Only "popular" paginates further.
pub struct MultiQueryAggregator {
    provider: Arc<dyn CatalogProvider>,
    state: StateCell<CatalogState>,
    inner: Mutex<CatalogInner>,
}

impl MultiQueryAggregator {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            state: StateCell::new(CatalogState {
                popular_has_more: true,
                ..CatalogState::default()
            }),
            inner: Mutex::new(CatalogInner {
                popular_page: 1,
                popular_loading: false,
            }),
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Cold-load all three categories in parallel. Each category
    /// publishes independently the moment its fetch settles; readiness
    /// flips only after the slowest one.
    pub async fn load_initial(&self) {
        let categories = [Category::Popular, Category::TopRated, Category::Upcoming];
        let fetches = categories.map(|category| async move {
            let outcome = self.provider.discover(category, 1).await;
            self.apply_initial(category, outcome);
        });
        futures::future::join_all(fetches).await;

        self.state.modify(|s| s.is_ready = true);
        info!("Catalog ready");
    }

    fn apply_initial(&self, category: Category, outcome: Result<SearchPage, ProviderError>) {
        let movies = match outcome {
            Ok(page) => page.movies,
            Err(err) => {
                warn!("Fetching {} failed: {}", category.name(), err);
                Vec::new()
            }
        };
        debug!("Category {} settled with {} movies", category.name(), movies.len());

        self.state.modify(|s| {
            match category {
                Category::Popular => {
                    if s.hero.is_none() && !movies.is_empty() {
                        s.hero = movies.choose(&mut rand::thread_rng()).cloned();
                    }
                    s.popular_has_more = !movies.is_empty();
                    s.popular = movies;
                }
                Category::TopRated => s.top_rated = movies,
                Category::Upcoming => s.upcoming = movies,
            };
        });
    }

    /// Fetch the next page of "popular". Same drop-not-queue contract
    /// as the search paginator, with a fixed page cap instead of a
    /// remote-reported total.
    pub async fn load_more_popular(&self) {
        let page = {
            let mut inner = self.inner.lock().unwrap();
            if inner.popular_loading {
                debug!("A popular page fetch is already in flight, dropping request");
                return;
            }
            if !self.state.get().popular_has_more {
                return;
            }
            inner.popular_page += 1;
            inner.popular_loading = true;
            inner.popular_page
        };
        self.state.modify(|s| s.popular_loading = true);

        let outcome = self.provider.discover(Category::Popular, page).await;

        self.inner.lock().unwrap().popular_loading = false;
        match outcome {
            Ok(page_data) => {
                let has_more = page < POPULAR_PAGE_CAP && !page_data.movies.is_empty();
                self.state.modify(|s| {
                    // The hero stays whatever the cold load picked.
                    s.popular.extend(page_data.movies);
                    s.popular_has_more = has_more;
                    s.popular_loading = false;
                });
            }
            Err(err) => {
                warn!("Fetching popular page {} failed: {}", page, err);
                self.state.modify(|s| {
                    s.popular_has_more = false;
                    s.popular_loading = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelist_models::{MediaType, SearchPage};
    use reelist_providers::ProviderError;
    use std::collections::HashMap;
    use std::time::Duration;

    fn make_movies(prefix: &str, count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| Movie {
                id: format!("{}{}", prefix, i),
                title: format!("{} {}", prefix, i),
                year: "2021".to_string(),
                media_type: MediaType::Movie,
                poster: None,
            })
            .collect()
    }

    #[derive(Default)]
    struct ScriptedCatalog {
        responses: Mutex<HashMap<(Category, u32), Vec<Movie>>>,
        delays: Mutex<HashMap<Category, Duration>>,
        failing: Mutex<HashMap<(Category, u32), String>>,
        calls: Mutex<Vec<(Category, u32)>>,
    }

    impl ScriptedCatalog {
        fn respond(&self, category: Category, page: u32, movies: Vec<Movie>) {
            self.responses.lock().unwrap().insert((category, page), movies);
        }

        fn delay(&self, category: Category, delay: Duration) {
            self.delays.lock().unwrap().insert(category, delay);
        }

        fn fail(&self, category: Category, page: u32, message: &str) {
            self.failing
                .lock()
                .unwrap()
                .insert((category, page), message.to_string());
        }

        fn calls(&self) -> Vec<(Category, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogProvider for ScriptedCatalog {
        fn source_name(&self) -> &str {
            "scripted"
        }

        async fn discover(
            &self,
            category: Category,
            page: u32,
        ) -> Result<SearchPage, ProviderError> {
            self.calls.lock().unwrap().push((category, page));
            let delay = self.delays.lock().unwrap().get(&category).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(message) = self.failing.lock().unwrap().get(&(category, page)) {
                return Err(ProviderError::FetchFailed(message.clone()));
            }
            let movies = self
                .responses
                .lock()
                .unwrap()
                .get(&(category, page))
                .cloned()
                .unwrap_or_default();
            let total = movies.len() as u32;
            Ok(SearchPage {
                movies,
                total_results: Some(total),
                error: None,
            })
        }
    }

    #[tokio::test]
    async fn test_cold_load_fills_all_categories() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop", 20));
        provider.respond(Category::TopRated, 1, make_movies("top", 20));
        provider.respond(Category::Upcoming, 1, make_movies("up", 20));
        let aggregator = MultiQueryAggregator::new(provider.clone());

        assert!(!aggregator.state().is_ready);
        aggregator.load_initial().await;

        let state = aggregator.state();
        assert_eq!(state.popular.len(), 20);
        assert_eq!(state.top_rated.len(), 20);
        assert_eq!(state.upcoming.len(), 20);
        assert!(state.is_ready);
        assert_eq!(provider.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_hero_comes_from_popular() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop", 5));
        let aggregator = MultiQueryAggregator::new(provider);

        aggregator.load_initial().await;

        let state = aggregator.state();
        let hero = state.hero.expect("hero picked from non-empty popular");
        assert!(state.popular.contains(&hero));
        // The other categories were empty; readiness still flips.
        assert!(state.is_ready);
        assert!(state.top_rated.is_empty());
    }

    #[tokio::test]
    async fn test_failed_category_settles_empty() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop", 20));
        provider.fail(Category::TopRated, 1, "timeout");
        provider.respond(Category::Upcoming, 1, make_movies("up", 20));
        let aggregator = MultiQueryAggregator::new(provider);

        aggregator.load_initial().await;

        let state = aggregator.state();
        assert!(state.top_rated.is_empty());
        assert_eq!(state.popular.len(), 20);
        assert!(state.is_ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_categories_publish_independently() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop", 20));
        provider.respond(Category::TopRated, 1, make_movies("top", 20));
        provider.respond(Category::Upcoming, 1, make_movies("up", 20));
        provider.delay(Category::TopRated, Duration::from_secs(5));
        let aggregator = Arc::new(MultiQueryAggregator::new(provider));

        let load = {
            let aggregator = Arc::clone(&aggregator);
            tokio::spawn(async move { aggregator.load_initial().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Popular and upcoming landed while top-rated is still pending.
        let state = aggregator.state();
        assert_eq!(state.popular.len(), 20);
        assert_eq!(state.upcoming.len(), 20);
        assert!(state.top_rated.is_empty());
        assert!(!state.is_ready);

        load.await.unwrap();
        let state = aggregator.state();
        assert_eq!(state.top_rated.len(), 20);
        assert!(state.is_ready);
    }

    #[tokio::test]
    async fn test_popular_pagination_appends_and_keeps_hero() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop1-", 20));
        provider.respond(Category::Popular, 2, make_movies("pop2-", 20));
        let aggregator = MultiQueryAggregator::new(provider.clone());

        aggregator.load_initial().await;
        let hero_before = aggregator.state().hero.clone();

        aggregator.load_more_popular().await;

        let state = aggregator.state();
        assert_eq!(state.popular.len(), 40);
        assert!(state.popular_has_more);
        assert_eq!(state.hero, hero_before);
        assert!(!state.popular_loading);
    }

    #[tokio::test]
    async fn test_popular_pagination_stops_at_cap() {
        let provider = Arc::new(ScriptedCatalog::default());
        for page in 1..=POPULAR_PAGE_CAP {
            provider.respond(Category::Popular, page, make_movies(&format!("p{}-", page), 20));
        }
        let aggregator = MultiQueryAggregator::new(provider.clone());

        aggregator.load_initial().await;
        for _ in 1..POPULAR_PAGE_CAP {
            aggregator.load_more_popular().await;
        }

        let state = aggregator.state();
        assert_eq!(state.popular.len(), 20 * POPULAR_PAGE_CAP as usize);
        assert!(!state.popular_has_more);

        // Past the cap the guard short-circuits before the provider.
        aggregator.load_more_popular().await;
        assert_eq!(provider.calls().len(), (POPULAR_PAGE_CAP + 2) as usize);
    }

    #[tokio::test]
    async fn test_popular_pagination_failure_stops() {
        let provider = Arc::new(ScriptedCatalog::default());
        provider.respond(Category::Popular, 1, make_movies("pop", 20));
        provider.fail(Category::Popular, 2, "boom");
        let aggregator = MultiQueryAggregator::new(provider);

        aggregator.load_initial().await;
        aggregator.load_more_popular().await;

        let state = aggregator.state();
        assert_eq!(state.popular.len(), 20);
        assert!(!state.popular_has_more);
        assert!(!state.popular_loading);
    }
}
