use async_trait::async_trait;
use reelist_models::{MovieDetail, SearchPage};
use reqwest::Client;
use std::time::Duration;

use crate::error::ProviderError;
use crate::omdb::api;
use crate::traits::MovieProvider;

// Server-side pagination limits, fixed by the provider.
const PAGE_SIZE: u32 = 10;
const MAX_PAGE: u32 = 100;

pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn max_page(&self) -> u32 {
        MAX_PAGE
    }

    async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ProviderError> {
        api::search(&self.client, &self.base_url, &self.api_key, query, page).await
    }

    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ProviderError> {
        api::fetch_detail(&self.client, &self.base_url, &self.api_key, id).await
    }
}
