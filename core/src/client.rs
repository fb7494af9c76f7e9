//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `MovieClient` holds only base URLs. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`, so a native host can do the I/O itself.
//! `fetch_*` composes the two over a [`Transport`] for Rust callers.

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CatalogResponse, MovieDetails};

#[derive(Debug, Clone)]
pub struct MovieClient {
    api_base_url: String,
    popular_url: String,
    poster_base_url: String,
}

impl MovieClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            popular_url: config.popular_movies_url(),
            poster_base_url: config.poster_base_url.clone(),
        }
    }

    /// URL of the popular-movies endpoint this client was configured with.
    pub fn popular_url(&self) -> &str {
        &self.popular_url
    }

    /// Absolute poster URL, or `None` when the movie has no poster path.
    pub fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        match poster_path {
            Some(path) if !path.trim().is_empty() => {
                Some(format!("{}{path}", self.poster_base_url))
            }
            _ => None,
        }
    }

    pub fn build_fetch_movies(&self, url: &str) -> HttpRequest {
        HttpRequest::get_json(url.to_string())
    }

    /// Fails with `MissingIdentifier` for a blank id; no request is built.
    pub fn build_fetch_movie_details(&self, movie_id: &str) -> Result<HttpRequest, FetchError> {
        let movie_id = movie_id.trim();
        if movie_id.is_empty() {
            return Err(FetchError::MissingIdentifier);
        }
        Ok(HttpRequest::get_json(format!(
            "{}/movie/{}",
            self.api_base_url,
            urlencoding::encode(movie_id)
        )))
    }

    pub fn parse_fetch_movies(&self, response: HttpResponse) -> Result<CatalogResponse, FetchError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    pub fn parse_fetch_movie_details(
        &self,
        response: HttpResponse,
    ) -> Result<MovieDetails, FetchError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Issue exactly one GET for the catalog at `url`.
    pub fn fetch_movies(
        &self,
        transport: &dyn Transport,
        url: &str,
    ) -> Result<CatalogResponse, FetchError> {
        let request = self.build_fetch_movies(url);
        debug!(url = %request.path, "fetching catalog");
        let result = transport
            .execute(&request)
            .and_then(|response| self.parse_fetch_movies(response));
        match &result {
            Ok(catalog) => debug!(count = catalog.results.len(), "catalog decoded"),
            Err(e) => warn!(url = %request.path, error = %e, "catalog fetch failed"),
        }
        result
    }

    /// Issue exactly one GET for the movie `movie_id`, or none if it is blank.
    pub fn fetch_movie_details(
        &self,
        transport: &dyn Transport,
        movie_id: &str,
    ) -> Result<MovieDetails, FetchError> {
        let request = self.build_fetch_movie_details(movie_id)?;
        debug!(url = %request.path, "fetching movie details");
        let result = transport
            .execute(&request)
            .and_then(|response| self.parse_fetch_movie_details(response));
        if let Err(e) = &result {
            warn!(movie_id, error = %e, "details fetch failed");
        }
        result
    }
}

/// Map non-success status codes to the appropriate `FetchError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), FetchError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(FetchError::NotFound);
    }
    Err(FetchError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
