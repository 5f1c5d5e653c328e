pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod search;
pub mod state;
pub mod store;
pub mod validate;

pub use catalog::{CatalogState, MultiQueryAggregator};
pub use favorites::{EntryDraft, EntryPatch, FavoritesError, FavoritesStore};
pub use filter::{apply_filters, FavoritesQuery, SortKey, SourceFilter};
pub use search::{SearchDebouncer, SearchPaginator, SearchState};
pub use state::StateCell;
pub use store::{FavoritesRepo, JsonFavoritesRepo, RepoError};
pub use validate::ValidationError;
