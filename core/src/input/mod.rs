//! Input source tracking
//!
//! Sources turn device events into per-sample snapshots. They track held
//! state and the time of the last effective change; the sampler reads the
//! snapshots at the capture rate and never touches the devices directly.

pub mod hid;
mod keyboard;

#[cfg(feature = "gamepad")]
mod gamepad;

#[cfg(feature = "gamepad")]
pub use gamepad::GamepadSource;
pub use keyboard::KeyboardSource;

use std::time::Instant;

use smallvec::SmallVec;

/// Keyboard state at one sample point.
///
/// `keys` holds the HID usage codes currently down, unordered and
/// unlimited; the tick codec decides what fits on the wire.
#[derive(Debug, Clone, Default)]
pub struct KeySnapshot {
    /// Usage codes of held non-modifier keys.
    pub keys: SmallVec<[u8; 8]>,
    /// Modifier bitmask, one bit per [`crate::capture::Modifier`].
    pub modifiers: u8,
    /// When the held set last changed, if it ever has.
    pub last_change: Option<Instant>,
}

impl KeySnapshot {
    /// Whether any key or modifier is held.
    pub fn is_active(&self) -> bool {
        !self.keys.is_empty() || self.modifiers != 0
    }
}

/// Gamepad state at one sample point, already dead-zone filtered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PadSnapshot {
    /// Left stick horizontal, positive right.
    pub x: i16,
    /// Left stick vertical, positive down.
    pub y: i16,
    /// Button bitmask, one bit per [`crate::capture::PadButton`].
    pub buttons: u16,
    /// Whether a pad is currently bound.
    pub connected: bool,
    /// When the effective state last changed, if it ever has.
    pub last_change: Option<Instant>,
}

impl PadSnapshot {
    /// Whether the stick is deflected or any button is down.
    pub fn is_active(&self) -> bool {
        self.x != 0 || self.y != 0 || self.buttons != 0
    }
}
