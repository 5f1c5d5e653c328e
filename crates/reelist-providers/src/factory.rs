/// Provider construction from configuration.
///
/// Centralizes which concrete client backs each role: text search can be
/// served by either provider, category discovery only by the one that
/// has curated listings.
use anyhow::{anyhow, Result};
use reelist_config::{Config, CredentialStore};
use std::sync::Arc;
use std::time::Duration;

use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::traits::{CatalogProvider, MovieProvider};

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.search.request_timeout_secs)
}

fn build_tmdb(config: &Config, credentials: &CredentialStore) -> Result<Option<TmdbClient>> {
    let Some(tmdb) = config.providers.tmdb.as_ref().filter(|c| c.enabled) else {
        return Ok(None);
    };
    let api_key = credentials
        .get_tmdb_api_key()
        .ok_or_else(|| anyhow!("tmdb is enabled but no API key is stored"))?;
    let client = TmdbClient::new(
        tmdb.base_url.clone(),
        tmdb.image_base_url.clone(),
        api_key.clone(),
        tmdb.language.clone(),
        request_timeout(config),
    )?;
    Ok(Some(client))
}

/// Build the provider that serves text search and detail lookups.
/// Prefers the id-portable provider when both are enabled.
pub fn build_search_provider(
    config: &Config,
    credentials: &CredentialStore,
) -> Result<Arc<dyn MovieProvider>> {
    if let Some(omdb) = config.providers.omdb.as_ref().filter(|c| c.enabled) {
        let api_key = credentials
            .get_omdb_api_key()
            .ok_or_else(|| anyhow!("omdb is enabled but no API key is stored"))?;
        let client = OmdbClient::new(
            omdb.base_url.clone(),
            api_key.clone(),
            request_timeout(config),
        )?;
        return Ok(Arc::new(client));
    }

    if let Some(client) = build_tmdb(config, credentials)? {
        return Ok(Arc::new(client));
    }

    Err(anyhow!("no search provider is enabled in the configuration"))
}

/// Build the provider that serves category discovery.
pub fn build_catalog_provider(
    config: &Config,
    credentials: &CredentialStore,
) -> Result<Arc<dyn CatalogProvider>> {
    build_tmdb(config, credentials)?
        .map(|client| Arc::new(client) as Arc<dyn CatalogProvider>)
        .ok_or_else(|| anyhow!("no catalog provider is enabled in the configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelist_config::{OmdbConfig, ProviderConfig, SearchOptions, TmdbConfig};
    use std::path::PathBuf;

    fn test_config(omdb: bool, tmdb: bool) -> Config {
        Config {
            providers: ProviderConfig {
                omdb: omdb.then(|| OmdbConfig {
                    enabled: true,
                    base_url: "https://www.omdbapi.com".to_string(),
                }),
                tmdb: tmdb.then(|| TmdbConfig {
                    enabled: true,
                    base_url: "https://api.themoviedb.org/3".to_string(),
                    image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
                    language: "en-US".to_string(),
                }),
            },
            search: SearchOptions::default(),
        }
    }

    fn test_credentials() -> CredentialStore {
        let mut store = CredentialStore::new(PathBuf::from("/dev/null"));
        store.set_omdb_api_key("omdb-key".to_string());
        store.set_tmdb_api_key("tmdb-key".to_string());
        store
    }

    #[test]
    fn test_search_provider_prefers_omdb() {
        let provider = build_search_provider(&test_config(true, true), &test_credentials()).unwrap();
        assert_eq!(provider.source_name(), "omdb");
    }

    #[test]
    fn test_search_provider_falls_back_to_tmdb() {
        let provider = build_search_provider(&test_config(false, true), &test_credentials()).unwrap();
        assert_eq!(provider.source_name(), "tmdb");
    }

    #[test]
    fn test_no_enabled_provider_is_an_error() {
        assert!(build_search_provider(&test_config(false, false), &test_credentials()).is_err());
        assert!(build_catalog_provider(&test_config(true, false), &test_credentials()).is_err());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let empty = CredentialStore::new(PathBuf::from("/dev/null"));
        assert!(build_search_provider(&test_config(true, false), &empty).is_err());
    }
}
