//! The single-movie details screen.
//!
//! # Design
//! Activation renders the summary's title straight away and fetches the
//! details in the background. Once details land, the poster is requested
//! separately; its outcome is recorded once and never retried. Each fetch
//! is tracked as an [`InFlight`] keyed by what it loads, so re-activating
//! the same movie reuses the running fetch and switching movies discards
//! the old one's result.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::browser::parse_link;
use crate::client::MovieClient;
use crate::dispatch::{InFlight, Ticket, UiChannel};
use crate::error::{FetchError, ImageError, LinkError};
use crate::poster::{PosterImage, PLACEHOLDER_POSTER};
use crate::presenter::{Collaborators, Phase, WORKER_PANICKED};
use crate::types::{Genre, MovieDetails, MovieSummary};

pub const NO_GENRES: &str = "No genres available";
pub const UNKNOWN_RUNTIME: &str = "Unknown runtime";
pub const OPEN_LINK_TITLE: &str = "Open the movie's webpage...";

/// Rendered text for every details label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub title: String,
    pub tagline: String,
    pub genres: String,
    pub runtime: String,
    pub release_date: String,
    pub overview: String,
    pub link_title: &'static str,
}

impl DetailsView {
    pub fn new(details: &MovieDetails) -> Self {
        Self {
            title: details.title.clone(),
            tagline: format_tagline(details.tagline.as_deref()),
            genres: format_genres(details.genres.as_deref()),
            runtime: format_runtime(details.runtime_minutes),
            release_date: details.release_date.clone().unwrap_or_default(),
            overview: details.overview.clone().unwrap_or_default(),
            link_title: OPEN_LINK_TITLE,
        }
    }
}

/// Quoted tagline, or empty.
pub fn format_tagline(tagline: Option<&str>) -> String {
    match tagline {
        Some(text) if !text.is_empty() => format!("\"{text}\""),
        _ => String::new(),
    }
}

/// Comma-joined genre names. A missing list gets [`NO_GENRES`]; an empty
/// one renders as an empty string.
pub fn format_genres(genres: Option<&[Genre]>) -> String {
    match genres {
        Some(genres) => genres
            .iter()
            .filter_map(|genre| genre.name.as_deref())
            .collect::<Vec<_>>()
            .join(", "),
        None => NO_GENRES.to_string(),
    }
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(total) if total >= 60 => format!("{}h {}m", total / 60, total % 60),
        Some(total) => format!("{total}m"),
        None => UNKNOWN_RUNTIME.to_string(),
    }
}

/// What the poster area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poster {
    /// Activity indicator.
    Pending,
    Image(PosterImage),
    /// The bundled [`PLACEHOLDER_POSTER`] asset.
    Placeholder,
}

impl Poster {
    pub fn placeholder_asset(&self) -> Option<&'static str> {
        match self {
            Poster::Placeholder => Some(PLACEHOLDER_POSTER),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum DetailsMessage {
    Details(Result<MovieDetails, FetchError>),
    Poster(Result<PosterImage, ImageError>),
}

pub struct DetailsPresenter {
    client: MovieClient,
    collaborators: Collaborators,
    runtime: Handle,
    channel: UiChannel<DetailsMessage>,
    summary: Option<MovieSummary>,
    phase: Phase,
    details: Option<MovieDetails>,
    poster: Poster,
    details_request: Option<InFlight<String>>,
    poster_request: Option<InFlight<String>>,
}

impl DetailsPresenter {
    pub fn new(client: MovieClient, collaborators: Collaborators, runtime: Handle) -> Self {
        Self {
            client,
            collaborators,
            runtime,
            channel: UiChannel::new(),
            summary: None,
            phase: Phase::Idle,
            details: None,
            poster: Poster::Pending,
            details_request: None,
            poster_request: None,
        }
    }

    /// Show `summary` and start loading its details.
    pub fn activate(&mut self, summary: MovieSummary) {
        let movie_id = summary.id.to_string();
        let same_movie = self.summary.as_ref().map(|s| s.id) == Some(summary.id);
        if same_movie && self.details_request.as_ref().is_some_and(|r| r.key == movie_id) {
            debug!(movie_id = %movie_id, "details already loading");
            return;
        }

        self.cancel_in_flight();
        self.summary = Some(summary);
        self.details = None;
        self.poster = Poster::Pending;
        self.phase = Phase::Idle;
        if let Err(e) = self.request_details(&movie_id) {
            warn!(movie_id = %movie_id, error = %e, "details not requested");
        }
    }

    /// Start fetching details for `movie_id`. A blank id is rejected with
    /// `MissingIdentifier` and leaves the screen as it was.
    pub fn request_details(&mut self, movie_id: &str) -> Result<(), FetchError> {
        self.client.build_fetch_movie_details(movie_id)?;

        if let Some(previous) = self.details_request.take() {
            previous.abort();
        }
        self.phase = Phase::Loading;
        let client = self.client.clone();
        let transport = Arc::clone(&self.collaborators.transport);
        let key = movie_id.trim().to_string();
        let work_id = key.clone();
        let work = move || {
            DetailsMessage::Details(client.fetch_movie_details(transport.as_ref(), &work_id))
        };
        self.details_request = Some(self.channel.spawn(
            &self.runtime,
            key,
            work,
            || DetailsMessage::Details(Err(FetchError::Transport(WORKER_PANICKED.to_string()))),
        ));
        Ok(())
    }

    /// Retry a failed details fetch for the current movie.
    pub fn retry(&mut self) {
        if !matches!(self.phase, Phase::Failed(_)) {
            return;
        }
        if let Some(movie_id) = self.summary.as_ref().map(|s| s.id.to_string()) {
            if let Err(e) = self.request_details(&movie_id) {
                warn!(movie_id = %movie_id, error = %e, "details retry not requested");
            }
        }
    }

    /// Apply every completion that has arrived, without waiting.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some((ticket, message)) = self.channel.try_next() {
            if self.apply(ticket, message) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next relevant completion and apply it. Returns `false`
    /// immediately when nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        while self.details_request.is_some() || self.poster_request.is_some() {
            let Some((ticket, message)) = self.channel.next().await else {
                return false;
            };
            if self.apply(ticket, message) {
                return true;
            }
        }
        false
    }

    fn apply(&mut self, ticket: Ticket, message: DetailsMessage) -> bool {
        match message {
            DetailsMessage::Details(result) => {
                if !take_if_current(&mut self.details_request, ticket) {
                    debug!(?ticket, "dropping stale details completion");
                    return false;
                }
                match result {
                    Ok(details) => {
                        debug!(id = details.id, "details applied");
                        let poster_path = details.poster_path.clone();
                        self.details = Some(details);
                        self.phase = Phase::Loaded;
                        self.load_poster(poster_path.as_deref());
                    }
                    Err(e) => {
                        warn!(error = %e, "details load failed");
                        self.phase = Phase::Failed(e);
                    }
                }
            }
            DetailsMessage::Poster(result) => {
                if !take_if_current(&mut self.poster_request, ticket) {
                    debug!(?ticket, "dropping stale poster completion");
                    return false;
                }
                self.poster = match result {
                    Ok(image) => Poster::Image(image),
                    Err(e) => {
                        warn!(error = %e, "poster load failed, showing placeholder");
                        Poster::Placeholder
                    }
                };
            }
        }
        true
    }

    fn load_poster(&mut self, poster_path: Option<&str>) {
        let Some(url) = self.client.poster_url(poster_path) else {
            debug!("movie has no poster, showing placeholder");
            self.poster = Poster::Placeholder;
            return;
        };
        if let Some(previous) = self.poster_request.take() {
            previous.abort();
        }
        let images = Arc::clone(&self.collaborators.images);
        let work_url = url.clone();
        self.poster_request = Some(self.channel.spawn(
            &self.runtime,
            url,
            move || DetailsMessage::Poster(images.load(&work_url)),
            || DetailsMessage::Poster(Err(ImageError::Transport(WORKER_PANICKED.to_string()))),
        ));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(request) = self.details_request.take() {
            debug!(movie_id = %request.key, "cancelling superseded details fetch");
            request.abort();
        }
        if let Some(request) = self.poster_request.take() {
            request.abort();
        }
    }

    /// Open the movie's homepage. Returns `Ok(false)` when there is no
    /// usable link.
    pub fn open_homepage(&self) -> Result<bool, LinkError> {
        let Some(url) = self
            .details
            .as_ref()
            .and_then(|d| d.homepage.as_deref())
            .and_then(parse_link)
        else {
            debug!("no valid homepage to open");
            return Ok(false);
        };
        self.collaborators.links.open(&url)?;
        Ok(true)
    }

    /// Screen title, available as soon as the movie is activated.
    pub fn title(&self) -> Option<&str> {
        self.summary.as_ref().map(|s| s.title.as_str())
    }

    pub fn summary(&self) -> Option<&MovieSummary> {
        self.summary.as_ref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn details(&self) -> Option<&MovieDetails> {
        self.details.as_ref()
    }

    pub fn view(&self) -> Option<DetailsView> {
        self.details.as_ref().map(DetailsView::new)
    }

    pub fn poster(&self) -> &Poster {
        &self.poster
    }
}

fn take_if_current<K>(slot: &mut Option<InFlight<K>>, ticket: Ticket) -> bool {
    if slot.as_ref().map(|r| r.ticket) == Some(ticket) {
        *slot = None;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> MovieDetails {
        MovieDetails {
            id: 42,
            title: "The Answer".to_string(),
            tagline: Some("Don't panic.".to_string()),
            overview: Some("A tale.".to_string()),
            homepage: Some("https://example.com/answer".to_string()),
            genres: Some(vec![
                Genre {
                    id: 878,
                    name: Some("Science Fiction".to_string()),
                },
                Genre {
                    id: 35,
                    name: Some("Comedy".to_string()),
                },
            ]),
            runtime_minutes: Some(125),
            release_date: Some("2005-04-28".to_string()),
            poster_path: Some("/answer.jpg".to_string()),
        }
    }

    #[test]
    fn view_renders_every_label() {
        let view = DetailsView::new(&details());
        assert_eq!(view.tagline, "\"Don't panic.\"");
        assert_eq!(view.genres, "Science Fiction, Comedy");
        assert_eq!(view.runtime, "2h 5m");
        assert_eq!(view.release_date, "2005-04-28");
        assert_eq!(view.overview, "A tale.");
        assert_eq!(view.link_title, OPEN_LINK_TITLE);
    }

    #[test]
    fn runtime_formats() {
        assert_eq!(format_runtime(Some(125)), "2h 5m");
        assert_eq!(format_runtime(Some(60)), "1h 0m");
        assert_eq!(format_runtime(Some(45)), "45m");
        assert_eq!(format_runtime(Some(0)), "0m");
        assert_eq!(format_runtime(None), UNKNOWN_RUNTIME);
    }

    #[test]
    fn empty_genres_differ_from_missing_genres() {
        assert_eq!(format_genres(Some(&[] as &[Genre])), "");
        assert_eq!(format_genres(None), NO_GENRES);
    }

    #[test]
    fn unnamed_genres_are_skipped() {
        let genres = [
            Genre { id: 1, name: None },
            Genre {
                id: 2,
                name: Some("Drama".to_string()),
            },
        ];
        assert_eq!(format_genres(Some(&genres[..])), "Drama");
    }

    #[test]
    fn tagline_is_quoted_or_blank() {
        assert_eq!(format_tagline(Some("Hi")), "\"Hi\"");
        assert_eq!(format_tagline(Some("")), "");
        assert_eq!(format_tagline(None), "");
    }

    #[test]
    fn missing_fields_render_without_placeholders() {
        let bare = MovieDetails {
            tagline: None,
            overview: None,
            homepage: None,
            genres: None,
            runtime_minutes: None,
            release_date: None,
            poster_path: None,
            ..details()
        };
        let view = DetailsView::new(&bare);
        assert_eq!(view.overview, "");
        assert_eq!(view.release_date, "");
        assert_eq!(view.genres, NO_GENRES);
        assert_eq!(view.runtime, UNKNOWN_RUNTIME);
    }

    #[test]
    fn only_placeholder_names_an_asset() {
        assert_eq!(Poster::Placeholder.placeholder_asset(), Some(PLACEHOLDER_POSTER));
        assert_eq!(Poster::Pending.placeholder_asset(), None);
    }
}
