pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, OmdbConfig, ProviderConfig, SearchOptions, TmdbConfig};
pub use credentials::CredentialStore;
pub use paths::PathManager;
