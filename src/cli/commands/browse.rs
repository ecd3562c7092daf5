//! Interactive debounced search

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::debug;

use super::render::print_movie_cards;
use crate::services::{DiscoveryError, ListingKind, MovieListing, SearchGate, debounce};
use crate::state::SharedState;

fn listing_heading(listing: &MovieListing) -> String {
    match (listing.kind, listing.query.as_deref()) {
        (ListingKind::Search, Some(query)) => format!("Results for \"{query}\""),
        _ => "Popular Movies".to_string(),
    }
}

async fn show_listing(state: &SharedState, result: Result<MovieListing, DiscoveryError>) {
    match result {
        Ok(listing) => {
            let favorites = state.favorites.lock().await;
            print_movie_cards(&listing_heading(&listing), &listing.movies, &favorites);
            println!();
        }
        Err(e) => println!("{e}"),
    }
}

pub async fn cmd_browse(state: &SharedState) -> anyhow::Result<()> {
    let quiet = state.config.search.debounce();

    println!("Type a movie title and pause to search. An empty line lists popular movies.");
    println!("Press Ctrl-D to quit.");
    println!();

    show_listing(state, state.discovery.load_movies(None).await).await;

    let (input_tx, input_rx) = mpsc::channel(32);
    let mut requests = debounce(quiet, input_rx);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let gate = SearchGate::new();
    let mut in_flight = JoinSet::new();

    while let Some(request) = requests.recv().await {
        gate.observe(request.generation);

        let state = state.clone();
        let gate = gate.clone();

        in_flight.spawn(async move {
            let result = state.discovery.load_movies(Some(&request.term)).await;

            if !gate.is_current(request.generation) {
                debug!(
                    term = %request.term,
                    generation = request.generation,
                    "Discarding stale search results"
                );
                return;
            }

            show_listing(&state, result).await;
        });
    }

    while in_flight.join_next().await.is_some() {}
    reader.await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(kind: ListingKind, query: Option<&str>) -> MovieListing {
        MovieListing {
            kind,
            query: query.map(str::to_string),
            movies: Vec::new(),
        }
    }

    #[test]
    fn test_listing_heading() {
        assert_eq!(
            listing_heading(&listing(ListingKind::Search, Some("alien"))),
            "Results for \"alien\""
        );
        assert_eq!(
            listing_heading(&listing(ListingKind::Popular, None)),
            "Popular Movies"
        );
    }
}
