pub mod error;
pub mod factory;
pub mod omdb;
pub mod tmdb;
pub mod traits;

pub use error::ProviderError;
pub use factory::{build_catalog_provider, build_search_provider};
pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;
pub use traits::{CatalogProvider, Category, MovieProvider};
