//! Keyboard state tracking

use std::time::Instant;

use hashbrown::HashMap;
use smallvec::SmallVec;
use winit::keyboard::KeyCode;

use super::hid;
use super::KeySnapshot;

/// Tracks held keys from window key events.
///
/// Only keys with a HID mapping are tracked; everything else is dropped
/// at the door. Autorepeat shows up as repeated pressed events and does
/// not move the change clock.
pub struct KeyboardSource {
    state: HashMap<KeyCode, bool>,
    last_change: Option<Instant>,
}

impl KeyboardSource {
    pub fn new() -> Self {
        Self {
            state: HashMap::new(),
            last_change: None,
        }
    }

    /// Record a key transition from the window event stream.
    pub fn key_event(&mut self, key: KeyCode, pressed: bool, now: Instant) {
        if hid::usage_for(key).is_none() && hid::modifier_for(key).is_none() {
            return;
        }
        let previous = self.state.insert(key, pressed).unwrap_or(false);
        if previous != pressed {
            self.last_change = Some(now);
        }
    }

    /// Release everything, for focus loss or minimize.
    ///
    /// Counts as a change only if something was actually held, so an
    /// idle window losing focus does not restart the idle countdown.
    pub fn reset(&mut self, now: Instant) {
        let held = self.state.values().any(|&pressed| pressed);
        self.state.clear();
        if held {
            self.last_change = Some(now);
        }
    }

    /// Current held set as usage codes plus modifier mask.
    pub fn snapshot(&self) -> KeySnapshot {
        let mut keys: SmallVec<[u8; 8]> = SmallVec::new();
        let mut modifiers = 0u8;
        for (&key, &pressed) in &self.state {
            if !pressed {
                continue;
            }
            if let Some(modifier) = hid::modifier_for(key) {
                modifiers |= modifier.mask();
            } else if let Some(usage) = hid::usage_for(key) {
                keys.push(usage);
            }
        }
        keys.sort_unstable();
        KeySnapshot {
            keys,
            modifiers,
            last_change: self.last_change,
        }
    }
}

impl Default for KeyboardSource {
    fn default() -> Self {
        Self::new()
    }
}
