//! Configuration types for the room monitor service

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::zone::DEFAULT_ZONES;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Streaming update feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_feed_url")]
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_feed_url(),
        }
    }
}

/// Zones known before any update arrives; position is the zone index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonesConfig {
    #[serde(default = "default_zone_flags")]
    pub defaults: Vec<bool>,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            defaults: default_zone_flags(),
        }
    }
}

/// Embedded camera stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
    #[serde(default = "default_video_width")]
    pub width: u32,
    #[serde(default = "default_video_height")]
    pub height: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            stream_url: default_stream_url(),
            width: default_video_width(),
            height: default_video_height(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl Config {
    /// Check URLs and intervals before anything is started
    pub fn validate(&self) -> crate::Result<()> {
        check_url(&self.feed.url, &["ws"], "feed url")?;
        check_url(&self.video.stream_url, &["http", "https"], "video stream url")?;
        if self.dashboard.refresh_interval_ms == 0 {
            return Err(crate::RoomMonitorError::Config(
                "dashboard refresh_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_url(raw: &str, schemes: &[&str], what: &str) -> crate::Result<()> {
    let parsed = Url::parse(raw).map_err(|e| {
        crate::RoomMonitorError::Config(format!("Invalid {} {:?}: {}", what, raw, e))
    })?;
    if !schemes.contains(&parsed.scheme()) {
        return Err(crate::RoomMonitorError::Config(format!(
            "Invalid {} {:?}: scheme must be one of {:?}",
            what, raw, schemes
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(crate::RoomMonitorError::Config(format!(
            "Invalid {} {:?}: missing host",
            what, raw
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_feed_url() -> String {
    "ws://127.0.0.1:5000/ws".to_string()
}

fn default_zone_flags() -> Vec<bool> {
    DEFAULT_ZONES.to_vec()
}

fn default_stream_url() -> String {
    "http://10.9.84.177:4747/video".to_string()
}

fn default_video_width() -> u32 {
    425
}

fn default_video_height() -> u32 {
    319
}

fn default_dashboard_port() -> u16 {
    11120
}

fn default_refresh_interval_ms() -> u64 {
    1000
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::RoomMonitorError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
