//! Capture timing and device thresholds

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capture::{IDLE_TIMEOUT_MS, SAMPLE_RATE_HZ};

/// Tunables for the sampler and the input sources.
///
/// The defaults match the uplink contract; they are exposed in the station
/// config file mainly for bench testing with different hardware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Sample rate for both channels, Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Idle time that closes a recording, milliseconds.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
    /// Raw stick units below this read as centered.
    #[serde(default = "default_stick_deadzone")]
    pub stick_deadzone: i16,
    /// Raw trigger travel past this registers as a button press.
    #[serde(default = "default_trigger_threshold")]
    pub trigger_threshold: i16,
}

fn default_sample_rate() -> u32 {
    SAMPLE_RATE_HZ
}
fn default_idle_timeout_ms() -> u64 {
    IDLE_TIMEOUT_MS
}
fn default_stick_deadzone() -> i16 {
    8_000
}
fn default_trigger_threshold() -> i16 {
    16_000
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            idle_timeout_ms: default_idle_timeout_ms(),
            stick_deadzone: default_stick_deadzone(),
            trigger_threshold: default_trigger_threshold(),
        }
    }
}

impl CaptureConfig {
    /// Interval between samples.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.sample_rate as f64)
    }

    /// Idle window as a duration.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}
