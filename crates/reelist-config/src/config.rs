use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub search: SearchOptions,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OmdbConfig {
    pub enabled: bool,
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    pub enabled: bool,
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_tmdb_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

/// Knobs for the search pipeline. Defaults match the shipped behavior;
/// they are configurable so tests can tighten the timings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchOptions {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_omdb_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_len() -> usize {
    3
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            providers: ProviderConfig {
                omdb: Some(OmdbConfig {
                    enabled: true,
                    base_url: default_omdb_base_url(),
                }),
                tmdb: None,
            },
            search: SearchOptions::default(),
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.providers.omdb.unwrap().enabled);
        assert!(loaded.providers.tmdb.is_none());
        assert_eq!(loaded.search.debounce_ms, 500);
        assert_eq!(loaded.search.min_query_len, 3);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [providers.omdb]
            enabled = true
            "#,
        )
        .unwrap();
        let omdb = config.providers.omdb.unwrap();
        assert_eq!(omdb.base_url, "https://www.omdbapi.com");
        assert_eq!(config.search.request_timeout_secs, 10);
    }

    #[test]
    fn test_tmdb_defaults() {
        let config: Config = toml::from_str(
            r#"
            [providers.tmdb]
            enabled = true
            language = "fr-FR"
            "#,
        )
        .unwrap();
        let tmdb = config.providers.tmdb.unwrap();
        assert_eq!(tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(tmdb.language, "fr-FR");
    }
}
