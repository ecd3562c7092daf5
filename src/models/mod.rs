pub mod favorite;
pub mod format;
pub mod movie;
pub mod trending;

pub use favorite::{FavoriteMovie, MovieRecord};
pub use movie::{
    Genre, Movie, MovieDetails, MovieId, ProductionCompany, ProductionCountry, Video, pick_trailer,
};
pub use trending::{TrendingEntry, rank_trending};
