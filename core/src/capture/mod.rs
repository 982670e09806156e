//! Stratocast capture pipeline
//!
//! Samples keyboard and gamepad state at a fixed rate, segments the ticks
//! into recordings separated by idle gaps, and packs each recording into a
//! minimal fixed-width binary layout for the uplink.
//!
//! # Tick formats
//!
//! Keystroke tick (4 bytes):
//!
//! ```text
//! [ modifiers u8 | key0 u8 | key1 u8 | key2 u8 ]
//! ```
//!
//! `modifiers` is the USB HID boot-report bitmask (LCtrl = bit 0 through
//! RGui = bit 7). The key slots hold HID keyboard usage codes, `0` for an
//! unused slot. Slots are filled lowest-code-first, so a tick never depends
//! on the order keys went down.
//!
//! Gamepad tick (6 bytes, little-endian):
//!
//! ```text
//! [ stick_x i16 | stick_y i16 | buttons u16 ]
//! ```
//!
//! Axes carry raw SDL-style stick units with the dead zone already applied.
//! Trigger pulls past the digitize threshold appear as button bits.
//!
//! # Segmentation
//!
//! ```text
//! input change -> ticks buffered at 30 Hz -> 2 s of idle
//!   -> trailing idle ticks trimmed -> non-empty streams finalized
//!   -> Recording handed to the caller, buffers cleared
//! ```
//!
//! Both channels share one idle clock but keep separate buffers, so a
//! session can finalize a keystroke recording, a gamepad recording, or both.

mod recording;
mod sampler;
mod stream;
mod tick;

pub use recording::{Recording, StreamKind};
pub use sampler::{IndicatorState, Sampler, SamplerPhase};
pub use stream::{GamepadStream, KeystrokeStream};
pub use tick::{
    GAMEPAD_TICK_BYTES, GamepadTick, KEY_NONE, KEYSTROKE_TICK_BYTES, KeystrokeTick,
    MAX_KEYS_PER_TICK, Modifier, PadButton,
};

/// Nominal sample rate for both channels.
pub const SAMPLE_RATE_HZ: u32 = 30;

/// Idle time that closes a recording.
pub const IDLE_TIMEOUT_MS: u64 = 2_000;
