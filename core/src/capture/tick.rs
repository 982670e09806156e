//! Fixed-width tick encoding for both capture channels
//!
//! Ticks are the atoms of a recording: one snapshot of a channel per
//! 30 Hz sample, encoded at a constant width so the replay side can walk
//! a recording with plain pointer arithmetic.

use smallvec::SmallVec;

use crate::error::CaptureError;

/// Sentinel for an unused key slot.
pub const KEY_NONE: u8 = 0;

/// Encoded width of a keystroke tick.
pub const KEYSTROKE_TICK_BYTES: usize = 4;

/// Encoded width of a gamepad tick.
pub const GAMEPAD_TICK_BYTES: usize = 6;

/// Concurrent non-modifier keys a keystroke tick can hold.
pub const MAX_KEYS_PER_TICK: usize = 3;

/// First HID keyboard usage that names a real key (1-3 are error sentinels).
const KEY_USAGE_MIN: u8 = 0x04;

/// Last defined non-modifier HID keyboard usage.
const KEY_USAGE_MAX: u8 = 0xDD;

/// Modifier keys packed into the keystroke tick bitmask.
///
/// Bit order follows the USB HID boot keyboard report, so the mask can be
/// replayed into a HID report byte unchanged (usages 0xE0-0xE7).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    LeftCtrl = 0,
    LeftShift = 1,
    LeftAlt = 2,
    LeftGui = 3,
    RightCtrl = 4,
    RightShift = 5,
    RightAlt = 6,
    RightGui = 7,
}

impl Modifier {
    /// Every modifier in bit order.
    pub const ALL: [Modifier; 8] = [
        Modifier::LeftCtrl,
        Modifier::LeftShift,
        Modifier::LeftAlt,
        Modifier::LeftGui,
        Modifier::RightCtrl,
        Modifier::RightShift,
        Modifier::RightAlt,
        Modifier::RightGui,
    ];

    /// Get the bitmask for this modifier
    #[inline]
    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }

    /// Display name for history views and tick dumps.
    pub fn label(self) -> &'static str {
        match self {
            Modifier::LeftCtrl => "LCtrl",
            Modifier::LeftShift => "LShift",
            Modifier::LeftAlt => "LAlt",
            Modifier::LeftGui => "LGui",
            Modifier::RightCtrl => "RCtrl",
            Modifier::RightShift => "RShift",
            Modifier::RightAlt => "RAlt",
            Modifier::RightGui => "RGui",
        }
    }
}

/// Gamepad buttons packed into the gamepad tick bitmask.
///
/// Trigger pulls are digitized: travel past the configured threshold sets
/// the trigger bit, anything less clears it.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    DpadUp = 0,
    DpadDown = 1,
    DpadLeft = 2,
    DpadRight = 3,
    South = 4,
    East = 5,
    West = 6,
    North = 7,
    LeftShoulder = 8,
    RightShoulder = 9,
    Start = 10,
    Select = 11,
    LeftTrigger = 12,
    RightTrigger = 13,
}

impl PadButton {
    /// Every defined button, lowest bit first.
    pub const ALL: [PadButton; 14] = [
        PadButton::DpadUp,
        PadButton::DpadDown,
        PadButton::DpadLeft,
        PadButton::DpadRight,
        PadButton::South,
        PadButton::East,
        PadButton::West,
        PadButton::North,
        PadButton::LeftShoulder,
        PadButton::RightShoulder,
        PadButton::Start,
        PadButton::Select,
        PadButton::LeftTrigger,
        PadButton::RightTrigger,
    ];

    /// Mask of every defined button bit (bits 0-13).
    pub const ALL_MASK: u16 = 0x3FFF;

    /// Get the bitmask for this button
    #[inline]
    pub fn mask(self) -> u16 {
        1 << (self as u8)
    }

    /// Display name for history views and tick dumps.
    pub fn label(self) -> &'static str {
        match self {
            PadButton::DpadUp => "dpad_up",
            PadButton::DpadDown => "dpad_down",
            PadButton::DpadLeft => "dpad_left",
            PadButton::DpadRight => "dpad_right",
            PadButton::South => "south",
            PadButton::East => "east",
            PadButton::West => "west",
            PadButton::North => "north",
            PadButton::LeftShoulder => "left_shoulder",
            PadButton::RightShoulder => "right_shoulder",
            PadButton::Start => "start",
            PadButton::Select => "select",
            PadButton::LeftTrigger => "left_trigger",
            PadButton::RightTrigger => "right_trigger",
        }
    }
}

/// One keyboard sample: up to three concurrent keys plus a modifier mask.
///
/// Immutable once built. Slots hold HID usage codes sorted ascending with
/// [`KEY_NONE`] padding, so two ticks describing the same chord compare
/// equal regardless of press order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeystrokeTick {
    modifiers: u8,
    keys: [u8; MAX_KEYS_PER_TICK],
}

impl KeystrokeTick {
    /// Tick with no keys and no modifiers.
    pub const IDLE: KeystrokeTick = KeystrokeTick {
        modifiers: 0,
        keys: [KEY_NONE; MAX_KEYS_PER_TICK],
    };

    /// Build a tick from the currently pressed usage codes.
    ///
    /// Zeros, reserved codes outside the keyboard usage range, and
    /// duplicates in `pressed` are ignored. When more than three distinct
    /// keys are down, the three lowest usage codes are kept; the rest are
    /// dropped for that tick. Every tick built here decodes back intact.
    pub fn from_pressed(pressed: &[u8], modifiers: u8) -> Self {
        let held = collect_held(pressed);
        let mut keys = [KEY_NONE; MAX_KEYS_PER_TICK];
        for (slot, &code) in keys.iter_mut().zip(held.iter()) {
            *slot = code;
        }
        Self { modifiers, keys }
    }

    /// Build a tick, refusing to drop keys.
    ///
    /// Returns [`CaptureError::CapacityExceeded`] when `pressed` names more
    /// than three distinct keys, and [`CaptureError::CorruptRecord`] when a
    /// code falls outside the slot-representable usage range.
    pub fn try_new(pressed: &[u8], modifiers: u8) -> Result<Self, CaptureError> {
        for &code in pressed {
            if code != KEY_NONE && !(KEY_USAGE_MIN..=KEY_USAGE_MAX).contains(&code) {
                return Err(CaptureError::corrupt(format!(
                    "reserved usage 0x{code:02X} cannot occupy a key slot"
                )));
            }
        }
        let held = collect_held(pressed);
        if held.len() > MAX_KEYS_PER_TICK {
            return Err(CaptureError::CapacityExceeded {
                pressed: held.len(),
            });
        }
        let mut keys = [KEY_NONE; MAX_KEYS_PER_TICK];
        for (slot, &code) in keys.iter_mut().zip(held.iter()) {
            *slot = code;
        }
        Ok(Self { modifiers, keys })
    }

    /// HID modifier bitmask.
    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    /// Key slots, [`KEY_NONE`]-padded.
    pub fn keys(&self) -> [u8; MAX_KEYS_PER_TICK] {
        self.keys
    }

    /// True when no key and no modifier is down.
    pub fn is_idle(&self) -> bool {
        self.modifiers == 0 && self.keys.iter().all(|&k| k == KEY_NONE)
    }

    /// Encode to the 4-byte wire layout.
    pub fn encode(&self) -> [u8; KEYSTROKE_TICK_BYTES] {
        [self.modifiers, self.keys[0], self.keys[1], self.keys[2]]
    }

    /// Decode the 4-byte wire layout, validating key slots.
    ///
    /// Slots must be [`KEY_NONE`] or a non-modifier usage code; the HID
    /// error sentinels (1-3) and reserved codes past 0xDD are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureError> {
        if bytes.len() < KEYSTROKE_TICK_BYTES {
            return Err(CaptureError::corrupt(format!(
                "keystroke tick needs {KEYSTROKE_TICK_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        let modifiers = bytes[0];
        let mut keys = [KEY_NONE; MAX_KEYS_PER_TICK];
        keys.copy_from_slice(&bytes[1..KEYSTROKE_TICK_BYTES]);

        for &code in &keys {
            if code != KEY_NONE && !(KEY_USAGE_MIN..=KEY_USAGE_MAX).contains(&code) {
                return Err(CaptureError::corrupt(format!(
                    "key slot holds reserved usage 0x{code:02X}"
                )));
            }
        }

        Ok(Self { modifiers, keys })
    }
}

/// Filter, sort, and dedup pressed usage codes.
///
/// Keeps only codes a slot can represent; zeros and reserved codes drop out.
fn collect_held(pressed: &[u8]) -> SmallVec<[u8; 8]> {
    let mut held: SmallVec<[u8; 8]> = pressed
        .iter()
        .copied()
        .filter(|k| (KEY_USAGE_MIN..=KEY_USAGE_MAX).contains(k))
        .collect();
    held.sort_unstable();
    held.dedup();
    held
}

/// One gamepad sample: left stick axes plus a digital button mask.
///
/// Axes are raw SDL-style stick units (-32768..=32767) with the dead zone
/// already applied by the source, so a centered stick reads exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadTick {
    x: i16,
    y: i16,
    buttons: u16,
}

impl GamepadTick {
    /// Tick with a centered stick and no buttons.
    pub const IDLE: GamepadTick = GamepadTick {
        x: 0,
        y: 0,
        buttons: 0,
    };

    /// Build a tick from sampled axes and a button mask.
    ///
    /// Bits outside the defined button set are discarded, so every
    /// constructed tick decodes back intact.
    pub fn new(x: i16, y: i16, buttons: u16) -> Self {
        Self {
            x,
            y,
            buttons: buttons & PadButton::ALL_MASK,
        }
    }

    /// Left stick X, positive right.
    pub fn x(&self) -> i16 {
        self.x
    }

    /// Left stick Y, positive down (SDL sign convention).
    pub fn y(&self) -> i16 {
        self.y
    }

    /// Button bitmask, see [`PadButton`].
    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    /// True when the stick is centered and no button is down.
    pub fn is_idle(&self) -> bool {
        self.x == 0 && self.y == 0 && self.buttons == 0
    }

    /// Encode to the 6-byte little-endian wire layout.
    pub fn encode(&self) -> [u8; GAMEPAD_TICK_BYTES] {
        let mut bytes = [0u8; GAMEPAD_TICK_BYTES];
        bytes[0..2].copy_from_slice(&self.x.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.y.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.buttons.to_le_bytes());
        bytes
    }

    /// Decode the 6-byte wire layout, validating the button mask.
    pub fn decode(bytes: &[u8]) -> Result<Self, CaptureError> {
        if bytes.len() < GAMEPAD_TICK_BYTES {
            return Err(CaptureError::corrupt(format!(
                "gamepad tick needs {GAMEPAD_TICK_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        let x = i16::from_le_bytes([bytes[0], bytes[1]]);
        let y = i16::from_le_bytes([bytes[2], bytes[3]]);
        let buttons = u16::from_le_bytes([bytes[4], bytes[5]]);

        if buttons & !PadButton::ALL_MASK != 0 {
            return Err(CaptureError::corrupt(format!(
                "gamepad tick carries undefined button bits 0x{:04X}",
                buttons & !PadButton::ALL_MASK
            )));
        }

        Ok(Self { x, y, buttons })
    }
}
