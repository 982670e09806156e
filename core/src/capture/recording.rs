//! Finalized recordings
//!
//! A `Recording` is the immutable artifact the sampler produces once a
//! stream survives trimming: the channel kind, the tick count, and the
//! encoded bytes exactly as they will travel over the uplink.

use super::SAMPLE_RATE_HZ;
use super::tick::{GAMEPAD_TICK_BYTES, GamepadTick, KEYSTROKE_TICK_BYTES, KeystrokeTick};
use crate::error::CaptureError;

/// Which input channel a recording captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Keystroke,
    Gamepad,
}

impl StreamKind {
    /// Encoded width of one tick of this kind.
    pub fn tick_width(self) -> usize {
        match self {
            StreamKind::Keystroke => KEYSTROKE_TICK_BYTES,
            StreamKind::Gamepad => GAMEPAD_TICK_BYTES,
        }
    }

    /// Lowercase channel name for logs and filenames.
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Keystroke => "keystroke",
            StreamKind::Gamepad => "gamepad",
        }
    }

    /// Kind byte in the capture file header.
    pub(crate) fn to_wire(self) -> u8 {
        match self {
            StreamKind::Keystroke => 1,
            StreamKind::Gamepad => 2,
        }
    }

    /// Parse the kind byte from a capture file header.
    pub(crate) fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(StreamKind::Keystroke),
            2 => Some(StreamKind::Gamepad),
            _ => None,
        }
    }
}

/// A finalized capture segment: trimmed, encoded, immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    kind: StreamKind,
    tick_count: usize,
    bytes: Vec<u8>,
}

impl Recording {
    /// Built only by the sampler and the capture file reader, which both
    /// guarantee `bytes.len() == tick_count * tick width`.
    pub(crate) fn new(kind: StreamKind, tick_count: usize, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), tick_count * kind.tick_width());
        Self {
            kind,
            tick_count,
            bytes,
        }
    }

    /// Which channel this recording captured.
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// Number of ticks in the recording.
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    /// Encoded ticks, `tick_count * tick_width` bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Exact uplink payload size.
    pub fn size_in_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Wall-clock length at the nominal 30 Hz sample rate.
    pub fn duration_ms(&self) -> u64 {
        self.tick_count as u64 * 1000 / SAMPLE_RATE_HZ as u64
    }

    /// Decode every tick of a keystroke recording.
    pub fn decode_keystrokes(&self) -> Result<Vec<KeystrokeTick>, CaptureError> {
        if self.kind != StreamKind::Keystroke {
            return Err(CaptureError::corrupt(format!(
                "expected a keystroke recording, found {}",
                self.kind.label()
            )));
        }
        self.bytes
            .chunks_exact(KEYSTROKE_TICK_BYTES)
            .map(KeystrokeTick::decode)
            .collect()
    }

    /// Decode every tick of a gamepad recording.
    pub fn decode_gamepad(&self) -> Result<Vec<GamepadTick>, CaptureError> {
        if self.kind != StreamKind::Gamepad {
            return Err(CaptureError::corrupt(format!(
                "expected a gamepad recording, found {}",
                self.kind.label()
            )));
        }
        self.bytes
            .chunks_exact(GAMEPAD_TICK_BYTES)
            .map(GamepadTick::decode)
            .collect()
    }
}
