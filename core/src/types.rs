//! Domain DTOs for the movie catalog API.
//!
//! # Design
//! Field names follow the API's snake_case JSON. Everything the API may
//! omit is an `Option`; nothing downstream unwraps them. `genres` keeps the
//! absent / empty distinction because the details screen renders the two
//! differently.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the popular-movies catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieSummary {
    pub fn rating(&self) -> Rating {
        Rating::from_vote_average(self.vote_average)
    }
}

/// Vote average as reported by the API.
///
/// The API uses `0.0` both for "nobody voted" and for a genuine zero and
/// gives us no way to tell them apart, so `Zero` is kept separate from
/// `Absent` rather than folded into either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Absent,
    Zero,
    Score(f64),
}

impl Rating {
    pub fn from_vote_average(value: Option<f64>) -> Self {
        match value {
            None => Rating::Absent,
            Some(v) if v == 0.0 => Rating::Zero,
            Some(v) => Rating::Score(v),
        }
    }
}

/// Envelope returned by the popular-movies endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<MovieSummary>,
}

/// A genre attached to a movie. Unnamed genres are skipped when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// The extended record fetched on demand for the details screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, rename = "runtime")]
    pub runtime_minutes: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
