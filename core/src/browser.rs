//! External browsing context for a movie's homepage.

use tracing::info;
use url::Url;

use crate::error::LinkError;

pub trait LinkOpener: Send + Sync {
    /// Open an absolute URL outside the app.
    fn open(&self, url: &Url) -> Result<(), LinkError>;
}

/// Opens links in the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &Url) -> Result<(), LinkError> {
        info!(%url, "opening homepage");
        webbrowser::open(url.as_str()).map_err(|source| LinkError::Launch {
            url: url.to_string(),
            source,
        })
    }
}

/// Parse `raw` as an absolute http(s) URL. Anything else is not a link.
pub fn parse_link(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
