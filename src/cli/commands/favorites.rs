//! Favorites command handlers

use super::render::print_favorite_cards;
use crate::models::{MovieId, MovieRecord};
use crate::state::SharedState;

pub async fn cmd_favorites_list(state: &SharedState) -> anyhow::Result<()> {
    let favorites = state.favorites.lock().await;

    if favorites.is_empty() {
        println!("No favorite movies yet.");
        println!();
        println!("Add one with: cinefind favorites add <id>");
        return Ok(());
    }

    println!("Favorite Movies ({} total)", favorites.len());
    println!("{:-<70}", "");
    print_favorite_cards(favorites.favorites(), state.image_base_url());

    Ok(())
}

pub async fn cmd_favorites_add(state: &SharedState, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = MovieId::parse(id_str) else {
        println!("Invalid movie ID: {id_str}");
        return Ok(());
    };

    if state.favorites.lock().await.is_favorite(&id) {
        println!("Movie {id} is already a favorite.");
        return Ok(());
    }

    let details = match state.discovery.movie(&id).await {
        Ok(details) => details,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };

    state.favorites.lock().await.add(&details)?;
    println!("✓ Added {} to favorites", details.movie.title);

    Ok(())
}

pub async fn cmd_favorites_remove(state: &SharedState, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = MovieId::parse(id_str) else {
        println!("Invalid movie ID: {id_str}");
        return Ok(());
    };

    if state.favorites.lock().await.remove(&id)? {
        println!("✓ Removed {id} from favorites");
    } else {
        println!("Movie {id} is not a favorite.");
    }

    Ok(())
}

pub async fn cmd_favorites_toggle(state: &SharedState, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = MovieId::parse(id_str) else {
        println!("Invalid movie ID: {id_str}");
        return Ok(());
    };

    let existing = state.favorites.lock().await.get(&id).cloned();

    let record = if let Some(favorite) = existing {
        MovieRecord::from(favorite)
    } else {
        match state.discovery.movie(&id).await {
            Ok(details) => MovieRecord::from(&details),
            Err(e) => {
                println!("{e}");
                return Ok(());
            }
        }
    };

    if state.favorites.lock().await.toggle(record)? {
        println!("♥ {id} is now a favorite");
    } else {
        println!("♡ {id} removed from favorites");
    }

    Ok(())
}
