pub mod detail;
pub mod favorite;
pub mod movie;
pub mod search_page;
pub mod user;

pub use detail::{MovieDetail, RatingScore};
pub use favorite::{EntryOrigin, FavoriteEntry, PosterSource};
pub use movie::{MediaType, Movie};
pub use search_page::SearchPage;
pub use user::User;
