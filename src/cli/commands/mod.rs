mod browse;
mod favorites;
mod info;
mod render;
mod search;
mod trending;

pub use browse::cmd_browse;
pub use favorites::{
    cmd_favorites_add, cmd_favorites_list, cmd_favorites_remove, cmd_favorites_toggle,
};
pub use info::cmd_movie_info;
pub use search::{cmd_popular, cmd_search};
pub use trending::cmd_trending;
