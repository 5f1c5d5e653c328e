use async_trait::async_trait;
use reelist_models::{MovieDetail, SearchPage};

use crate::error::ProviderError;

/// A remote movie-metadata backend. Each implementation owns its own
/// response decoding and maps into the shared model types.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn source_name(&self) -> &str;

    /// Results per page, fixed server-side.
    fn page_size(&self) -> u32;

    /// Highest page the provider will serve for any query.
    fn max_page(&self) -> u32;

    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError>;

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ProviderError>;
}

/// Named browse categories served by the discovery provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Popular,
    TopRated,
    Upcoming,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::TopRated => "top-rated",
            Category::Upcoming => "upcoming",
        }
    }
}

/// Category discovery, separate from text search: only some providers
/// can serve curated listings.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn source_name(&self) -> &str;

    async fn discover(&self, category: Category, page: u32) -> Result<SearchPage, ProviderError>;
}
