//! Stratocast Core - Input capture pipeline for the ground station
//!
//! This crate turns live keyboard and gamepad input into compact,
//! fixed-width recordings suitable for replay over a bandwidth-limited
//! telemetry uplink.
//!
//! # Architecture
//!
//! - [`Sampler`] - Fixed-rate segmenter that buffers ticks and closes a
//!   recording after two seconds of idle input
//! - [`KeystrokeTick`] / [`GamepadTick`] - One 30 Hz sample of each channel,
//!   encoded at a fixed width
//! - [`KeyboardSource`] / `GamepadSource` - Device adapters feeding the
//!   sampler with snapshots and last-change timestamps
//! - [`export`] - Reader and writer for the `.scap` capture container

pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod input;

// Re-export the capture pipeline types
pub use capture::{
    GamepadStream, GamepadTick, IndicatorState, KeystrokeStream, KeystrokeTick, Modifier,
    PadButton, Recording, Sampler, SamplerPhase, StreamKind,
};

// Re-export input sources and snapshots
#[cfg(feature = "gamepad")]
pub use input::GamepadSource;
pub use input::{KeySnapshot, KeyboardSource, PadSnapshot};

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use export::{RecordingReader, RecordingWriter};
