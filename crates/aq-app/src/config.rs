//! Application configuration

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use aq_core::ScrubberConfig;

/// Top-level configuration, loadable from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrubber: ScrubberConfig,
    /// Initially selected country.
    pub default_country: Option<String>,
    /// Display-refresh cadence override for frame-driven playback, in
    /// milliseconds.
    pub frame_interval_ms: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // The explorer steps one year per second out of the box.
            scrubber: ScrubberConfig {
                delay_ms: Some(1000),
                ..ScrubberConfig::default()
            },
            default_country: Some("France".to_owned()),
            frame_interval_ms: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::Direction;

    #[test]
    fn defaults_match_the_interactive_explorer() {
        let config = AppConfig::default();
        assert_eq!(config.scrubber.delay_ms, Some(1000));
        assert!(config.scrubber.autoplay);
        assert!(config.scrubber.looping);
        assert_eq!(config.default_country.as_deref(), Some("France"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "scrubber": { "delay_ms": 250, "alternate": true },
                "default_country": "Brazil"
            }"#,
        )
        .unwrap();

        assert_eq!(config.scrubber.delay_ms, Some(250));
        assert!(config.scrubber.alternate);
        assert!(config.scrubber.looping);
        assert_eq!(config.scrubber.direction, Direction::Forward);
        assert_eq!(config.default_country.as_deref(), Some("Brazil"));
        assert_eq!(config.frame_interval_ms, None);
    }
}
