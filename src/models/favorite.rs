use serde::{Deserialize, Serialize};

use super::movie::{Movie, MovieDetails, MovieId};

/// A movie the user has marked for quick access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_language: Option<String>,
}

/// Incoming movie record before identifier normalization.
///
/// Records coming from the catalog carry `id`; records that went through the
/// analytics document store carry the document id under `$id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(rename = "$id", default)]
    pub document_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl MovieRecord {
    /// Primary id first, then the document id.
    #[must_use]
    pub fn canonical_id(&self) -> Option<&MovieId> {
        self.id.as_ref().or(self.document_id.as_ref())
    }

    /// Maps the record onto the canonical favorite shape.
    ///
    /// Returns `None` when neither id field is present.
    #[must_use]
    pub fn normalize(self) -> Option<FavoriteMovie> {
        let id = self.id.or(self.document_id)?;

        Some(FavoriteMovie {
            id,
            title: self.title.unwrap_or_default(),
            poster_path: self.poster_path,
            release_date: self.release_date,
            vote_average: self.vote_average,
            original_language: self.original_language,
        })
    }
}

impl From<&Movie> for MovieRecord {
    fn from(movie: &Movie) -> Self {
        Self {
            id: Some(movie.id.clone()),
            document_id: None,
            title: Some(movie.title.clone()),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            original_language: movie.original_language.clone(),
        }
    }
}

impl From<&MovieDetails> for MovieRecord {
    fn from(details: &MovieDetails) -> Self {
        Self::from(&details.movie)
    }
}

impl From<FavoriteMovie> for MovieRecord {
    fn from(favorite: FavoriteMovie) -> Self {
        Self {
            id: Some(favorite.id),
            document_id: None,
            title: Some(favorite.title),
            poster_path: favorite.poster_path,
            release_date: favorite.release_date,
            vote_average: favorite.vote_average,
            original_language: favorite.original_language,
        }
    }
}
