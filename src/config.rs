//! Application configuration.
//!
//! Loaded from an optional `jadwal.toml` next to the binary, overridden by
//! `JADWAL_`-prefixed environment variables. Every field has a default so a
//! bare invocation works.

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base tracing level for the crate's own modules.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How long to wait before reading the page, giving asynchronously
    /// populated captures time to settle. A heuristic carried over from the
    /// portal, not a completion signal; slower population still loses rows.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Command used to open the viewer context. When unset, the merged list
    /// is printed to stdout instead of handed off.
    #[serde(default)]
    pub viewer_command: Option<String>,

    /// Viewer endpoint, appended to the viewer command.
    #[serde(default = "default_viewer_url")]
    pub viewer_url: String,
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_viewer_url() -> String {
    "https://jadwal.example.edu/viewer".to_owned()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Figment::new()
            .merge(Toml::file("jadwal.toml"))
            .merge(Env::prefixed("JADWAL_"))
            .extract()
            .context("Failed to load config")
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Origin of the viewer endpoint; deliveries are restricted to it.
    pub fn viewer_origin(&self) -> anyhow::Result<String> {
        let url = Url::parse(&self.viewer_url).context("Invalid viewer URL")?;
        Ok(url.origin().ascii_serialization())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> Config {
        Config {
            log_level: default_log_level(),
            settle_delay_ms: default_settle_delay_ms(),
            viewer_command: None,
            viewer_url: default_viewer_url(),
        }
    }

    #[test]
    fn test_viewer_origin_strips_path() {
        let config = default_config();
        assert_eq!(
            config.viewer_origin().unwrap(),
            "https://jadwal.example.edu"
        );
    }

    #[test]
    fn test_viewer_origin_rejects_garbage() {
        let config = Config {
            viewer_url: "not a url".to_owned(),
            ..default_config()
        };
        assert!(config.viewer_origin().is_err());
    }
}
