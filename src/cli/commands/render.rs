//! Terminal rendering of movie cards, detail pages and trending lists.

use crate::constants::limits::MAX_CARDS_PER_PAGE;
use crate::favorites::FavoritesStore;
use crate::models::format::{
    NO_OVERVIEW, display_title, format_language, format_money, format_rating,
    format_rating_out_of_ten, format_runtime, join_names, poster_url, release_year,
};
use crate::models::{FavoriteMovie, Movie, TrendingEntry};
use crate::services::MoviePage;

const FAVORITE_MARK: &str = "♥";
const NOT_FAVORITE_MARK: &str = "♡";

const fn mark(is_favorite: bool) -> &'static str {
    if is_favorite {
        FAVORITE_MARK
    } else {
        NOT_FAVORITE_MARK
    }
}

pub fn print_movie_cards(heading: &str, movies: &[Movie], favorites: &FavoritesStore) {
    println!("{heading}");
    println!("{:-<70}", "");

    for movie in movies.iter().take(MAX_CARDS_PER_PAGE) {
        print_card(
            mark(favorites.is_favorite(&movie.id)),
            display_title(&movie.title),
            movie.id.as_str(),
            movie.vote_average,
            movie.release_date.as_deref(),
            movie.original_language.as_deref(),
        );
    }

    if movies.len() > MAX_CARDS_PER_PAGE {
        println!("  ... and {} more", movies.len() - MAX_CARDS_PER_PAGE);
    }
}

pub fn print_favorite_cards(favorites: &[FavoriteMovie], image_base_url: &str) {
    for favorite in favorites {
        print_card(
            FAVORITE_MARK,
            display_title(&favorite.title),
            favorite.id.as_str(),
            favorite.vote_average,
            favorite.release_date.as_deref(),
            favorite.original_language.as_deref(),
        );
        if let Some(url) = poster_url(image_base_url, favorite.poster_path.as_deref()) {
            println!("  Poster: {url}");
        }
    }
}

fn print_card(
    marker: &str,
    title: &str,
    id: &str,
    vote_average: Option<f64>,
    release_date: Option<&str>,
    language: Option<&str>,
) {
    println!("{marker} {title}");
    println!(
        "  ID: {} | ★ {} | {} | {}",
        id,
        format_rating(vote_average),
        release_year(release_date),
        format_language(language)
    );
}

pub fn print_movie_page(page: &MoviePage, image_base_url: &str, is_favorite: bool) {
    let details = &page.details;
    let movie = &details.movie;

    println!("{} {}", mark(is_favorite), display_title(&movie.title));
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.trim().is_empty()) {
        println!("\"{tagline}\"");
    }
    println!("{:-<70}", "");
    println!("ID:        {}", movie.id);
    println!("Rating:    {}", format_rating_out_of_ten(movie.vote_average));
    println!(
        "Released:  {}",
        movie.release_date.as_deref().unwrap_or(crate::constants::NOT_AVAILABLE)
    );
    println!("Runtime:   {}", format_runtime(details.runtime));
    println!(
        "Status:    {}",
        details.status.as_deref().unwrap_or(crate::constants::NOT_AVAILABLE)
    );
    println!(
        "Language:  {}",
        format_language(movie.original_language.as_deref())
    );
    println!(
        "Genres:    {}",
        join_names(details.genres.iter().map(|g| g.name.as_str()))
    );
    println!("Budget:    {}", format_money(details.budget));
    println!("Revenue:   {}", format_money(details.revenue));
    println!(
        "Companies: {}",
        join_names(details.production_companies.iter().map(|c| c.name.as_str()))
    );
    println!(
        "Countries: {}",
        join_names(details.production_countries.iter().map(|c| c.name.as_str()))
    );
    if let Some(url) = poster_url(image_base_url, movie.poster_path.as_deref()) {
        println!("Poster:    {url}");
    }
    match &page.trailer_url {
        Some(url) => println!("Trailer:   {url}"),
        None => println!("Trailer:   none available"),
    }

    println!();
    println!(
        "{}",
        movie
            .overview
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(NO_OVERVIEW)
    );
}

pub fn print_trending(entries: &[TrendingEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let title = entry.title.as_deref().unwrap_or(&entry.search_term);
        print!("{:>2}. {} ({} searches)", i + 1, title, entry.count);
        if let Some(id) = &entry.movie_id {
            print!(" | ID: {id}");
        }
        println!();
    }
}
