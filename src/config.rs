//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::time::Duration;

use crate::constants::{canvas, history};
use crate::error::{Error, Result};

/// Undo depth variable.
pub const UNDO_DEPTH_VAR: &str = "SLIDEPILOT_UNDO_DEPTH";
/// Assistant reply delay variable, in milliseconds.
pub const RESPONSE_DELAY_VAR: &str = "SLIDEPILOT_RESPONSE_DELAY_MS";
/// Render viewport variable, `WIDTHxHEIGHT`.
pub const VIEWPORT_VAR: &str = "SLIDEPILOT_VIEWPORT";
/// Log filter variable read by the binary.
pub const LOG_VAR: &str = "SLIDEPILOT_LOG";

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: canvas::WIDTH, height: canvas::HEIGHT }
    }
}

impl Viewport {
    /// Parse `WIDTHxHEIGHT`, e.g. `1024x768`.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::config(format!("invalid viewport {value:?}"), "Use WIDTHxHEIGHT, e.g. 1024x768");

        let (width, height) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: f64 = width.trim().parse().map_err(|_| invalid())?;
        let height: f64 = height.trim().parse().map_err(|_| invalid())?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Number of snapshots kept by the undo log
    pub undo_depth: usize,
    /// Simulated latency before the assistant answers
    pub response_delay: Duration,
    /// Viewport used when projecting slides
    pub viewport: Viewport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            undo_depth: history::DEFAULT_UNDO_DEPTH,
            response_delay: Duration::ZERO,
            viewport: Viewport::default(),
        }
    }
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(depth) = lookup(UNDO_DEPTH_VAR) {
            config.undo_depth = depth
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|d| *d >= 1)
                .ok_or_else(|| {
                    Error::config(format!("{UNDO_DEPTH_VAR}={depth:?} is not valid"), "Use a positive integer such as 50")
                })?;
        }

        if let Some(delay) = lookup(RESPONSE_DELAY_VAR) {
            let millis = delay.trim().parse::<u64>().map_err(|_| {
                Error::config(
                    format!("{RESPONSE_DELAY_VAR}={delay:?} is not valid"),
                    "Use a whole number of milliseconds, 0 to disable",
                )
            })?;
            config.response_delay = Duration::from_millis(millis);
        }

        if let Some(viewport) = lookup(VIEWPORT_VAR) {
            config.viewport = Viewport::parse(&viewport)?;
        }

        Ok(config)
    }
}
