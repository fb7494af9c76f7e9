//! Client core for the movie catalog app.
//!
//! # Overview
//! Fetches the popular-movies catalog and single-movie details from a
//! remote JSON API, decodes them into typed records, and exposes headless
//! presenters a native UI binds to.
//!
//! # Design
//! - `MovieClient` is stateless. Each operation is split into `build_*`
//!   (produces an `HttpRequest`) and `parse_*` (consumes an
//!   `HttpResponse`), so a native host can own the I/O through the C ABI.
//! - Rust callers go through a [`Transport`]; `UreqTransport` is the
//!   default.
//! - Presenters run fetches on the tokio blocking pool and apply results
//!   on the UI context through a channel, never a blocking rendezvous.
//! - Poster loading and link opening are injected collaborators.

pub mod browser;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod poster;
pub mod presenter;
pub mod transport;
pub mod types;

pub use browser::{LinkOpener, SystemBrowser};
pub use client::MovieClient;
pub use config::ClientConfig;
pub use error::{ConfigError, FetchError, ImageError, LinkError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use poster::{ImageLoader, PosterImage, UreqImageLoader, PLACEHOLDER_POSTER};
pub use presenter::{
    Collaborators, DetailsPresenter, DetailsView, ListPresenter, MovieRow, Phase, Poster,
};
pub use transport::{Transport, UreqTransport};
pub use types::{CatalogResponse, Genre, MovieDetails, MovieSummary, Rating};
