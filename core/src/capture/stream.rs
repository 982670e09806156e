//! Append-only tick buffers with idle trimming
//!
//! One stream per channel. The sampler appends a tick per 30 Hz sample,
//! trims the trailing idle run right before finalization, and clears the
//! buffer for the next recording. Byte size is always `len * tick width`;
//! there is no per-tick framing.

use super::tick::{
    GAMEPAD_TICK_BYTES, GamepadTick, KEYSTROKE_TICK_BYTES, KeystrokeTick,
};

/// Buffered keystroke ticks for the recording being captured.
#[derive(Debug, Default)]
pub struct KeystrokeStream {
    ticks: Vec<KeystrokeTick>,
}

impl KeystrokeStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sampled tick.
    pub fn append(&mut self, tick: KeystrokeTick) {
        self.ticks.push(tick);
    }

    /// Drop idle ticks from the tail until a non-idle tick (or emptiness).
    ///
    /// Idempotent; interior idle runs are untouched.
    pub fn remove_trailing_idles(&mut self) {
        while self.ticks.last().is_some_and(|t| t.is_idle()) {
            self.ticks.pop();
        }
    }

    /// Empty the stream, keeping its capacity for the next recording.
    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    /// Number of buffered ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Exact encoded size of the buffered ticks.
    pub fn size_in_bytes(&self) -> usize {
        self.ticks.len() * KEYSTROKE_TICK_BYTES
    }

    /// Buffered ticks in sample order.
    pub fn ticks(&self) -> &[KeystrokeTick] {
        &self.ticks
    }

    /// Encode every buffered tick into one flat byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_in_bytes());
        for tick in &self.ticks {
            bytes.extend_from_slice(&tick.encode());
        }
        bytes
    }
}

/// Buffered gamepad ticks for the recording being captured.
#[derive(Debug, Default)]
pub struct GamepadStream {
    ticks: Vec<GamepadTick>,
}

impl GamepadStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sampled tick.
    pub fn append(&mut self, tick: GamepadTick) {
        self.ticks.push(tick);
    }

    /// Drop idle ticks from the tail until a non-idle tick (or emptiness).
    pub fn remove_trailing_idles(&mut self) {
        while self.ticks.last().is_some_and(|t| t.is_idle()) {
            self.ticks.pop();
        }
    }

    /// Empty the stream, keeping its capacity for the next recording.
    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    /// Number of buffered ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Exact encoded size of the buffered ticks.
    pub fn size_in_bytes(&self) -> usize {
        self.ticks.len() * GAMEPAD_TICK_BYTES
    }

    /// Buffered ticks in sample order.
    pub fn ticks(&self) -> &[GamepadTick] {
        &self.ticks
    }

    /// Encode every buffered tick into one flat byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_in_bytes());
        for tick in &self.ticks {
            bytes.extend_from_slice(&tick.encode());
        }
        bytes
    }
}
