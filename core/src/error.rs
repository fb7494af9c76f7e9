//! Error types for the movie catalog client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a details screen for a
//! removed movie is a distinct case from an unexpected status. Transport
//! and decode failures carry the underlying message only, so the errors
//! stay `Clone` and can sit inside presenter state.

use thiserror::Error;

/// Errors returned by catalog and details fetches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No connectivity, timeout, or any other failure before a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not the JSON shape we expect.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Details were requested without a movie identifier.
    #[error("movie identifier is missing")]
    MissingIdentifier,
}

/// Errors returned by an [`ImageLoader`](crate::poster::ImageLoader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("poster transport failed: {0}")]
    Transport(String),

    #[error("poster could not be decoded: {0}")]
    Decode(String),
}

/// Errors returned while loading a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors returned by a [`LinkOpener`](crate::browser::LinkOpener).
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("could not open {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
