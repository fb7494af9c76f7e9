//! Headless presenters the native UI binds to.
//!
//! # Design
//! Presenters are owned by the UI context and mutated only through
//! `&mut self`. Fetches run on worker tasks and come back through a
//! [`UiChannel`](crate::dispatch::UiChannel); a presenter applies them when
//! the UI calls `pump()` (from a frame tick) or awaits `next_update()`.
//! Stored data is replaced only by a fully decoded value.

pub mod details;
pub mod list;

use std::fmt;
use std::sync::Arc;

use crate::browser::{LinkOpener, SystemBrowser};
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::poster::{ImageLoader, UreqImageLoader};
use crate::transport::{Transport, UreqTransport};

pub use details::{DetailsPresenter, DetailsView, Poster};
pub use list::{ListPresenter, MovieRow};

/// Error text posted in place of a result when a worker panics.
pub const WORKER_PANICKED: &str = "worker panicked";

/// Load state of a presenter's primary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed; previously loaded data is still shown and the
    /// UI offers `retry()`.
    Failed(FetchError),
}

/// The outside world a presenter talks to, injected rather than global.
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Arc<dyn Transport>,
    pub images: Arc<dyn ImageLoader>,
    pub links: Arc<dyn LinkOpener>,
}

impl Collaborators {
    /// ureq for HTTP and posters, the platform browser for links.
    pub fn system(config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(UreqTransport::new(config.timeout())),
            images: Arc::new(UreqImageLoader::new(config.timeout())),
            links: Arc::new(SystemBrowser),
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_collaborators_build_without_io() {
        let collaborators = Collaborators::system(&ClientConfig::default());
        let other = collaborators.clone();
        assert!(Arc::ptr_eq(&collaborators.transport, &other.transport));
        assert_eq!(format!("{collaborators:?}"), "Collaborators { .. }");
    }
}
