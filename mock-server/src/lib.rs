//! Fixture catalog server for integration tests and local development.
//!
//! Serves the same routes as the real catalog API from a fixed in-memory
//! data set, plus a tiny PNG poster. Types are defined here independently
//! of `movie-core`, so integration tests catch schema drift.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

/// A 1x1 PNG, served for every known poster file.
const POSTER_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub const POSTER_FILE: &str = "answer.png";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub vote_average: f64,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub tagline: Option<String>,
    pub overview: Option<String>,
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    pub runtime: Option<u32>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct Catalog {
    pub results: Vec<Movie>,
}

#[derive(Clone, Debug)]
pub struct Fixtures {
    pub popular: Vec<Movie>,
    pub details: HashMap<i64, MovieDetails>,
}

pub type Db = Arc<Fixtures>;

impl Default for Fixtures {
    fn default() -> Self {
        let answer = MovieDetails {
            id: 42,
            title: "The Answer".to_string(),
            tagline: Some("Don't panic.".to_string()),
            overview: Some("A tale.".to_string()),
            homepage: Some("https://example.com/answer".to_string()),
            genres: Some(vec![
                Genre {
                    id: 878,
                    name: "Science Fiction".to_string(),
                },
                Genre {
                    id: 35,
                    name: "Comedy".to_string(),
                },
            ]),
            runtime: Some(125),
            release_date: Some("2005-04-28".to_string()),
            poster_path: Some(format!("/{POSTER_FILE}")),
        };
        let unknown = MovieDetails {
            id: 7,
            title: "Untitled Short".to_string(),
            tagline: Some(String::new()),
            overview: None,
            homepage: Some(String::new()),
            genres: None,
            runtime: None,
            release_date: None,
            poster_path: Some("/missing.png".to_string()),
        };

        let popular = vec![
            Movie {
                id: answer.id,
                title: answer.title.clone(),
                overview: answer.overview.clone(),
                vote_average: 7.5,
                release_date: answer.release_date.clone(),
                poster_path: answer.poster_path.clone(),
            },
            Movie {
                id: unknown.id,
                title: unknown.title.clone(),
                overview: Some(String::new()),
                vote_average: 0.0,
                release_date: None,
                poster_path: unknown.poster_path.clone(),
            },
        ];

        Self {
            popular,
            details: HashMap::from([(answer.id, answer), (unknown.id, unknown)]),
        }
    }
}

pub fn app() -> Router {
    app_with(Fixtures::default())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/popular", get(popular))
        .route("/movie/{id}", get(movie_details))
        .route("/poster/{file}", get(poster))
        .route("/broken", get(broken))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn popular(State(db): State<Db>) -> Json<Catalog> {
    info!(count = db.popular.len(), "serving popular movies");
    Json(Catalog {
        results: db.popular.clone(),
    })
}

async fn movie_details(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetails>, StatusCode> {
    info!(id, "serving movie details");
    db.details.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn poster(Path(file): Path<String>) -> Response {
    if file != POSTER_FILE {
        return StatusCode::NOT_FOUND.into_response();
    }
    match STANDARD.decode(POSTER_PNG_BASE64) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// A 200 whose body does not match the catalog schema.
async fn broken() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"results":"not a list"}"#,
    )
}
