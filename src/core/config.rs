//! Runtime configuration.
//!
//! One structure covering the server, read from the environment at
//! startup with sane defaults for everything but the Plex connection.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::TransportConfig;
use crate::playlist::verifier::{PollOrder, ReconcileConfig};

/// Everything the server reads at startup, grouped by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identity reported to clients.
    pub server: ServerConfig,

    /// Log level and formatting.
    pub logging: LoggingConfig,

    /// Which transport to run and where to bind it.
    pub transport: TransportConfig,

    /// Plex server connection configuration.
    pub plex: PlexConfig,

    /// Playlist write verification configuration.
    pub reconcile: ReconcileSettings,
}

/// Name and version handed out during initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name clients see.
    pub name: String,

    /// Server version clients see.
    pub version: String,
}

/// Log level and formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter ("info", "debug", "trace").
    pub level: String,

    /// Include timestamps in log lines.
    pub with_timestamps: bool,
}

/// Connection settings for the Plex Media Server.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlexConfig {
    /// Base URL of the server, e.g. `http://127.0.0.1:32400`.
    pub base_url: String,

    /// X-Plex-Token for authentication. Requests go out unauthenticated
    /// when unset, which only works on servers with auth disabled.
    pub token: Option<String>,

    /// Client-side timeout applied to every request, in seconds.
    pub request_timeout_secs: u64,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for PlexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlexConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for PlexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:32400".to_string(),
            token: None,
            request_timeout_secs: 30,
        }
    }
}

/// Tuning knobs for playlist write verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileSettings {
    /// Verification polling rounds before falling back to an estimate.
    pub max_retries: u32,

    /// Base verification delay; round `n` waits `n` times this.
    pub base_delay_ms: u64,

    /// Pause between sequential write calls.
    pub write_pause_ms: u64,

    /// Which count source verification polls first.
    pub poll_order: PollOrder,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        let defaults = ReconcileConfig::default();
        Self {
            max_retries: defaults.max_retries,
            base_delay_ms: defaults.base_delay_ms,
            write_pause_ms: 250,
            poll_order: defaults.poll_order,
        }
    }
}

impl ReconcileSettings {
    /// The verifier's view of these settings.
    pub fn verifier_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            max_retries: self.max_retries,
            base_delay_ms: self.base_delay_ms,
            poll_order: self.poll_order,
        }
    }

    pub fn write_pause(&self) -> Duration {
        Duration::from_millis(self.write_pause_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "plex-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            plex: PlexConfig::default(),
            reconcile: ReconcileSettings::default(),
        }
    }
}

impl Config {
    /// Defaults suitable for a local unauthenticated server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the full configuration from the environment.
    ///
    /// Server variables are prefixed with `MCP_` (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`). The Plex connection uses the conventional
    /// `PLEX_URL` and `PLEX_TOKEN` names.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Transport selection has its own env reader
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("PLEX_URL") {
            config.plex.base_url = base_url;
            info!("Plex server URL loaded from environment");
        } else {
            warn!(
                "PLEX_URL not set, defaulting to {}. Set PLEX_URL to point \
                 at your Plex Media Server.",
                config.plex.base_url
            );
        }

        if let Ok(token) = std::env::var("PLEX_TOKEN") {
            config.plex.token = Some(token);
            info!("Plex token loaded from environment");
        } else {
            warn!(
                "PLEX_TOKEN not set - requests will be unauthenticated and \
                 most servers will refuse them."
            );
        }

        if let Ok(timeout) = std::env::var("MCP_PLEX_TIMEOUT_SECS") {
            config.plex.request_timeout_secs =
                timeout.parse().unwrap_or(config.plex.request_timeout_secs);
        }

        if let Ok(retries) = std::env::var("MCP_RECONCILE_MAX_RETRIES") {
            config.reconcile.max_retries = retries.parse().unwrap_or(config.reconcile.max_retries);
        }

        if let Ok(delay) = std::env::var("MCP_RECONCILE_BASE_DELAY_MS") {
            config.reconcile.base_delay_ms = delay.parse().unwrap_or(config.reconcile.base_delay_ms);
        }

        if let Ok(pause) = std::env::var("MCP_WRITE_PAUSE_MS") {
            config.reconcile.write_pause_ms =
                pause.parse().unwrap_or(config.reconcile.write_pause_ms);
        }

        if let Ok(order) = std::env::var("MCP_RECONCILE_POLL_ORDER") {
            match order.parse() {
                Ok(poll_order) => config.reconcile.poll_order = poll_order,
                Err(err) => warn!("Ignoring MCP_RECONCILE_POLL_ORDER: {}", err),
            }
        }

        config
    }
}
