use super::render::print_movie_page;
use crate::models::MovieId;
use crate::state::SharedState;

pub async fn cmd_movie_info(state: &SharedState, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = MovieId::parse(id_str) else {
        println!("Invalid movie ID: {id_str}");
        return Ok(());
    };

    let page = match state.discovery.movie_page(&id).await {
        Ok(page) => page,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let is_favorite = state.favorites.lock().await.is_favorite(&id);
    print_movie_page(&page, state.image_base_url(), is_favorite);
    println!();

    Ok(())
}
