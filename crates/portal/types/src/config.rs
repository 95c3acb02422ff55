//! Configuration for a portal visit

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete portal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    pub video: VideoConfig,
    pub connect: ConnectConfig,
}

/// Descriptor of the required video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Source URL handed to the playback surface on attach.
    pub url: String,
    /// Title shown by the presentation layer.
    pub title: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            url: "https://www.w3schools.com/html/mov_bbb.mp4".to_string(),
            title: "Digital Safety Essentials".to_string(),
        }
    }
}

/// Tuning for the connect sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Fixed "establishing connection" delay before the gateway
    /// handshake, in milliseconds.
    pub delay_ms: u64,
}

impl ConnectConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self { delay_ms: 2000 }
    }
}
