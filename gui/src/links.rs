use std::io;
use tracing::info;

/// Opens a record's source url outside the app.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands urls to the platform's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        info!("Opening {} in the system browser", url);
        open::that(url)
    }
}
