use serde::Serialize;

use crate::models::format::{
    NO_OVERVIEW, display_title, format_language, format_money, format_rating,
    format_rating_out_of_ten, format_runtime, join_names, poster_url, release_year,
};
use crate::models::{FavoriteMovie, Movie, MovieId, TrendingEntry};
use crate::services::{ListingKind, MovieListing, MoviePage};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A movie card as shown in listings and on the favorites page.
#[derive(Debug, Serialize)]
pub struct MovieCardDto {
    pub id: MovieId,
    pub title: String,
    pub poster_url: Option<String>,
    pub vote_average: Option<f64>,
    pub rating: String,
    pub release_date: Option<String>,
    pub release_year: String,
    pub language: String,
    pub is_favorite: bool,
}

impl MovieCardDto {
    pub fn from_movie(movie: &Movie, image_base_url: &str, is_favorite: bool) -> Self {
        Self {
            id: movie.id.clone(),
            title: display_title(&movie.title).to_string(),
            poster_url: poster_url(image_base_url, movie.poster_path.as_deref()),
            vote_average: movie.vote_average,
            rating: format_rating(movie.vote_average),
            release_date: movie.release_date.clone(),
            release_year: release_year(movie.release_date.as_deref()),
            language: format_language(movie.original_language.as_deref()),
            is_favorite,
        }
    }

    pub fn from_favorite(favorite: &FavoriteMovie, image_base_url: &str) -> Self {
        Self {
            id: favorite.id.clone(),
            title: display_title(&favorite.title).to_string(),
            poster_url: poster_url(image_base_url, favorite.poster_path.as_deref()),
            vote_average: favorite.vote_average,
            rating: format_rating(favorite.vote_average),
            release_date: favorite.release_date.clone(),
            release_year: release_year(favorite.release_date.as_deref()),
            language: format_language(favorite.original_language.as_deref()),
            is_favorite: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListDto {
    pub kind: ListingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub movies: Vec<MovieCardDto>,
}

impl MovieListDto {
    pub fn new(
        listing: MovieListing,
        image_base_url: &str,
        is_favorite: impl Fn(&MovieId) -> bool,
    ) -> Self {
        let movies = listing
            .movies
            .iter()
            .map(|m| MovieCardDto::from_movie(m, image_base_url, is_favorite(&m.id)))
            .collect();

        Self {
            kind: listing.kind,
            query: listing.query,
            movies,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieDetailDto {
    pub id: MovieId,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub poster_url: Option<String>,
    pub rating: String,
    pub release_date: Option<String>,
    pub status: Option<String>,
    pub runtime: String,
    pub language: String,
    pub genres: Vec<String>,
    pub budget: String,
    pub revenue: String,
    pub production_companies: String,
    pub production_countries: String,
    pub trailer_url: Option<String>,
    pub is_favorite: bool,
}

impl MovieDetailDto {
    pub fn new(page: MoviePage, image_base_url: &str, is_favorite: bool) -> Self {
        let details = page.details;
        let movie = &details.movie;

        Self {
            id: movie.id.clone(),
            title: display_title(&movie.title).to_string(),
            tagline: details.tagline.clone().filter(|t| !t.trim().is_empty()),
            overview: movie
                .overview
                .clone()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
            poster_url: poster_url(image_base_url, movie.poster_path.as_deref()),
            rating: format_rating_out_of_ten(movie.vote_average),
            release_date: movie.release_date.clone(),
            status: details.status.clone(),
            runtime: format_runtime(details.runtime),
            language: format_language(movie.original_language.as_deref()),
            genres: details.genres.iter().map(|g| g.name.clone()).collect(),
            budget: format_money(details.budget),
            revenue: format_money(details.revenue),
            production_companies: join_names(
                details.production_companies.iter().map(|c| c.name.as_str()),
            ),
            production_countries: join_names(
                details.production_countries.iter().map(|c| c.name.as_str()),
            ),
            trailer_url: page.trailer_url,
            is_favorite,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrendingDto {
    pub rank: usize,
    pub search_term: String,
    pub count: u64,
    pub poster_url: Option<String>,
    pub movie_id: Option<MovieId>,
    pub title: Option<String>,
}

impl TrendingDto {
    pub fn ranked(entries: Vec<TrendingEntry>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| Self {
                rank: i + 1,
                search_term: e.search_term,
                count: e.count,
                poster_url: e.poster_url,
                movie_id: e.movie_id,
                title: e.title,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatusDto {
    pub id: MovieId,
    pub is_favorite: bool,
    /// Whether the request changed the collection.
    pub changed: bool,
}
