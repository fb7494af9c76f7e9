//! The popular-movies list screen.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::client::MovieClient;
use crate::dispatch::{InFlight, Ticket, UiChannel};
use crate::error::FetchError;
use crate::presenter::{Phase, WORKER_PANICKED};
use crate::transport::Transport;
use crate::types::{CatalogResponse, MovieSummary, Rating};

pub const PLOT_UNKNOWN: &str = "Plot unknown";

/// One rendered list row. `None` fields are hidden in the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub rating: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
}

impl MovieRow {
    pub fn new(summary: &MovieSummary, client: &MovieClient) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            overview: row_overview(summary.overview.as_deref()),
            rating: rating_text(summary.rating()),
            release_date: summary
                .release_date
                .as_deref()
                .filter(|date| !date.trim().is_empty())
                .map(str::to_string),
            poster_url: client.poster_url(summary.poster_path.as_deref()),
        }
    }
}

/// Row overview, falling back to [`PLOT_UNKNOWN`] when blank.
pub fn row_overview(overview: Option<&str>) -> String {
    match overview {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => PLOT_UNKNOWN.to_string(),
    }
}

/// Rating indicator text, or `None` to hide it. A zero average is hidden
/// just like a missing one.
pub fn rating_text(rating: Rating) -> Option<String> {
    match rating {
        Rating::Score(score) => Some(format!("{score:.1}")),
        Rating::Zero | Rating::Absent => None,
    }
}

type CatalogResult = Result<CatalogResponse, FetchError>;

pub struct ListPresenter {
    client: MovieClient,
    transport: Arc<dyn Transport>,
    runtime: Handle,
    url: String,
    channel: UiChannel<CatalogResult>,
    phase: Phase,
    movies: Vec<MovieSummary>,
    request: Option<InFlight<String>>,
}

impl ListPresenter {
    pub fn new(client: MovieClient, transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        let url = client.popular_url().to_string();
        Self {
            client,
            transport,
            runtime,
            url,
            channel: UiChannel::new(),
            phase: Phase::Idle,
            movies: Vec::new(),
            request: None,
        }
    }

    /// Fetch from `url` instead of the configured popular endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Initial display. Starts the first load; later calls do nothing.
    pub fn appear(&mut self) {
        if self.phase == Phase::Idle {
            self.load();
        }
    }

    /// Start a catalog fetch unless one is already in flight.
    pub fn load(&mut self) {
        if self.request.is_some() {
            debug!(url = %self.url, "catalog fetch already in flight");
            return;
        }
        self.phase = Phase::Loading;
        let client = self.client.clone();
        let transport = Arc::clone(&self.transport);
        let url = self.url.clone();
        let work_url = url.clone();
        self.request = Some(self.channel.spawn(
            &self.runtime,
            url,
            move || client.fetch_movies(transport.as_ref(), &work_url),
            || Err(FetchError::Transport(WORKER_PANICKED.to_string())),
        ));
    }

    /// Retry after a failure. Does nothing in any other phase.
    pub fn retry(&mut self) {
        if matches!(self.phase, Phase::Failed(_)) {
            self.load();
        }
    }

    /// Apply every completion that has arrived, without waiting.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some((ticket, result)) = self.channel.try_next() {
            if self.apply(ticket, result) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the in-flight fetch to complete and apply it. Returns
    /// `false` immediately when nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        while self.request.is_some() {
            let Some((ticket, result)) = self.channel.next().await else {
                return false;
            };
            if self.apply(ticket, result) {
                return true;
            }
        }
        false
    }

    fn apply(&mut self, ticket: Ticket, result: CatalogResult) -> bool {
        if self.request.as_ref().map(|r| r.ticket) != Some(ticket) {
            debug!(?ticket, "dropping stale catalog completion");
            return false;
        }
        self.request = None;
        match result {
            Ok(catalog) => {
                debug!(count = catalog.results.len(), "catalog applied");
                self.movies = catalog.results;
                self.phase = Phase::Loaded;
            }
            Err(e) => {
                warn!(error = %e, kept = self.movies.len(), "catalog load failed");
                self.phase = Phase::Failed(e);
            }
        }
        true
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the busy indicator is showing.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.phase {
            Phase::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<MovieRow> {
        self.movies
            .get(index)
            .map(|summary| MovieRow::new(summary, &self.client))
    }

    pub fn rows(&self) -> Vec<MovieRow> {
        self.movies
            .iter()
            .map(|summary| MovieRow::new(summary, &self.client))
            .collect()
    }

    /// The summary to hand to the details screen, copied out of the list.
    pub fn select(&self, index: usize) -> Option<MovieSummary> {
        let selected = self.movies.get(index).cloned();
        if let Some(movie) = &selected {
            debug!(id = movie.id, title = %movie.title, "movie selected");
        }
        selected
    }
}
