use serde::Deserialize;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
};

/// A movie resolved from the provider, ready to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub img_url: String,
}

/// One provider search hit. Only the id is guaranteed.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl Candidate {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.split('-').next()).filter(|y| !y.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct RankedMovie {
    pub rank: i32,
    pub movie: movie::Model,
}

// Form and query fields arrive as raw text so bad input reaches the handlers
// and renders through the error page.

#[derive(Debug, Deserialize)]
pub struct FindMovieRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectCandidateRequest {
    #[serde(default)]
    pub id: String,
}

impl SelectCandidateRequest {
    pub fn provider_id(&self) -> AppResult<i64> {
        parse_id(&self.id, "movie database id")
    }
}

#[derive(Debug, Deserialize)]
pub struct RateMovieRequest {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Deserialize)]
pub struct MovieIdQuery {
    #[serde(default)]
    pub id: String,
}

impl MovieIdQuery {
    pub fn movie_id(&self) -> AppResult<i32> {
        parse_id(&self.id, "movie id")
    }
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> AppResult<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::InvalidInput(format!("{what} is required")));
    }
    raw.parse().map_err(|_| AppError::InvalidInput(format!("{what} must be a number, got {raw:?}")))
}
