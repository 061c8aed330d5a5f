//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use roster::outbound::persistence::DbPool;
use roster::settings::RosterSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) media_root: PathBuf,
    pub(crate) media_url: String,
    pub(crate) serve_media: bool,
}

impl ServerConfig {
    /// Derive a configuration from loaded settings. No pool is attached.
    #[must_use]
    pub fn from_settings(settings: &RosterSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            db_pool: None,
            media_root: settings.media_root().to_path_buf(),
            media_url: settings.media_url(),
            serve_media: settings.serve_media(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// With a pool the server stores records in PostgreSQL; without one it
    /// keeps them in memory for the life of the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Media prefix to register for file serving, if enabled.
    pub(crate) fn served_media_url(&self) -> Option<&str> {
        self.serve_media.then_some(self.media_url.as_str())
    }
}
