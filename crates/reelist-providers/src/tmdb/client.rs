use async_trait::async_trait;
use reelist_models::{MovieDetail, SearchPage};
use reqwest::Client;
use std::time::Duration;

use crate::error::ProviderError;
use crate::tmdb::api;
use crate::traits::{CatalogProvider, Category, MovieProvider};

const PAGE_SIZE: u32 = 20;
const MAX_PAGE: u32 = 500;

pub struct TmdbClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        base_url: String,
        image_base_url: String,
        api_key: String,
        language: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            image_base_url,
            api_key,
            language,
        })
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn max_page(&self) -> u32 {
        MAX_PAGE
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError> {
        api::search(
            &self.client,
            &self.base_url,
            &self.image_base_url,
            &self.api_key,
            &self.language,
            query,
            page,
        )
        .await
    }

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ProviderError> {
        api::fetch_detail(
            &self.client,
            &self.base_url,
            &self.image_base_url,
            &self.api_key,
            &self.language,
            id,
        )
        .await
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn discover(&self, category: Category, page: u32) -> Result<SearchPage, ProviderError> {
        api::discover(
            &self.client,
            &self.base_url,
            &self.image_base_url,
            &self.api_key,
            &self.language,
            category,
            page,
        )
        .await
    }
}
