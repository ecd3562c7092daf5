use super::render::print_movie_cards;
use crate::services::ListingKind;
use crate::state::SharedState;

pub async fn cmd_search(state: &SharedState, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");
    println!();

    let listing = match state.discovery.load_movies(Some(query)).await {
        Ok(listing) => listing,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    if listing.kind == ListingKind::Search && listing.movies.is_empty() {
        println!("No movies found matching '{query}'");
        return Ok(());
    }

    let favorites = state.favorites.lock().await;
    print_movie_cards("Search Results", &listing.movies, &favorites);

    println!();
    println!("For details: cinefind info <id>");

    Ok(())
}

pub async fn cmd_popular(state: &SharedState) -> anyhow::Result<()> {
    let listing = match state.discovery.load_movies(None).await {
        Ok(listing) => listing,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    let favorites = state.favorites.lock().await;
    print_movie_cards("Popular Movies", &listing.movies, &favorites);

    Ok(())
}
