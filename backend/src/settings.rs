//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ROSTER_*` environment variables, command-line flags or a
//! configuration file. Every field is optional; accessors apply defaults.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MEDIA_ROOT: &str = "media";
const DEFAULT_MEDIA_URL: &str = "/media/";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the roster server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct RosterSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection URL. Without it records are kept in memory.
    pub database_url: Option<String>,
    /// Directory holding uploaded files.
    pub media_root: Option<PathBuf>,
    /// URL prefix under which uploaded files are linked.
    pub media_url: Option<String>,
    /// Serve uploaded files from this process.
    pub serve_media: Option<bool>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl RosterSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured database URL; blank values count as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Media root directory, defaulting to `media`.
    pub fn media_root(&self) -> &Path {
        self.media_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_MEDIA_ROOT))
    }

    /// Media URL prefix with leading and trailing slashes, defaulting to
    /// `/media/`.
    pub fn media_url(&self) -> String {
        let trimmed = self
            .media_url
            .as_deref()
            .map(|url| url.trim().trim_matches('/'))
            .unwrap_or_else(|| DEFAULT_MEDIA_URL.trim_matches('/'));
        if trimmed.is_empty() {
            "/".to_owned()
        } else {
            format!("/{trimmed}/")
        }
    }

    /// Whether uploaded files are served; on by default in debug builds.
    pub fn serve_media(&self) -> bool {
        self.serve_media.unwrap_or(cfg!(debug_assertions))
    }

    /// Connection pool size, defaulting to ten.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
