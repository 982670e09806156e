//! Gamepad state tracking via gilrs

use std::time::Instant;

use gilrs::{Axis, Button, GamepadId, Gilrs};

use super::PadSnapshot;
use crate::capture::PadButton;
use crate::config::CaptureConfig;
use crate::error::CaptureError;

/// Full scale of a stick axis in raw units.
const AXIS_SCALE: f32 = 32_767.0;

/// Digital buttons in capture bit order and their gilrs names.
/// Gilrs calls the bumpers `LeftTrigger`/`RightTrigger`; the analog
/// triggers are the `LeftZ`/`RightZ` axes, digitized separately.
const BUTTON_MAP: [(PadButton, Button); 12] = [
    (PadButton::DpadUp, Button::DPadUp),
    (PadButton::DpadDown, Button::DPadDown),
    (PadButton::DpadLeft, Button::DPadLeft),
    (PadButton::DpadRight, Button::DPadRight),
    (PadButton::South, Button::South),
    (PadButton::East, Button::East),
    (PadButton::West, Button::West),
    (PadButton::North, Button::North),
    (PadButton::LeftShoulder, Button::LeftTrigger),
    (PadButton::RightShoulder, Button::RightTrigger),
    (PadButton::Start, Button::Start),
    (PadButton::Select, Button::Select),
];

/// Tracks one gamepad and exposes dead-zone filtered state.
///
/// The first pad to connect feeds the channel; later pads are ignored
/// until it drops. With no pad bound the snapshot reads as a
/// permanently idle, disconnected channel.
pub struct GamepadSource {
    /// Gilrs context (None if initialization failed)
    gilrs: Option<Gilrs>,
    /// Pad currently feeding the capture channel
    active_pad: Option<GamepadId>,
    x: i16,
    y: i16,
    buttons: u16,
    last_change: Option<Instant>,
    stick_deadzone: i16,
    trigger_threshold: i16,
}

impl GamepadSource {
    pub fn new(config: &CaptureConfig) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize gamepad support: {}. Gamepads will not be available.",
                    e
                );
                None
            }
        };

        Self {
            gilrs,
            active_pad: None,
            x: 0,
            y: 0,
            buttons: 0,
            last_change: None,
            stick_deadzone: config.stick_deadzone,
            trigger_threshold: config.trigger_threshold,
        }
    }

    /// Drain pending events and refresh the bound pad's state.
    ///
    /// Called once per sample, before [`snapshot`](Self::snapshot).
    pub fn poll(&mut self, now: Instant) {
        let Some(ref mut gilrs) = self.gilrs else {
            return;
        };

        while let Some(event) = gilrs.next_event() {
            match event.event {
                gilrs::EventType::Connected => {
                    if self.active_pad.is_none() {
                        self.active_pad = Some(event.id);
                        tracing::info!("Gamepad {} connected", event.id);
                    } else {
                        tracing::debug!("Gamepad {} connected, channel already bound", event.id);
                    }
                }
                gilrs::EventType::Disconnected => {
                    if self.active_pad == Some(event.id) {
                        tracing::info!("Gamepad {} disconnected", event.id);
                        self.active_pad = None;
                        // Dropping a deflected pad is itself a state change
                        if self.x != 0 || self.y != 0 || self.buttons != 0 {
                            self.x = 0;
                            self.y = 0;
                            self.buttons = 0;
                            self.last_change = Some(now);
                        }
                    }
                }
                _ => {}
            }
        }

        let Some(id) = self.active_pad else {
            return;
        };
        let pad = gilrs.gamepad(id);

        let x = gate_stick(stick_raw(pad.value(Axis::LeftStickX)), self.stick_deadzone);
        // Gilrs reports up as positive; captures use down-positive
        let y = gate_stick(stick_raw(-pad.value(Axis::LeftStickY)), self.stick_deadzone);

        let mut buttons = 0u16;
        for (bit, button) in BUTTON_MAP {
            if pad.is_pressed(button) {
                buttons |= bit.mask();
            }
        }
        if digitize_trigger(pad.value(Axis::LeftZ), self.trigger_threshold) {
            buttons |= PadButton::LeftTrigger.mask();
        }
        if digitize_trigger(pad.value(Axis::RightZ), self.trigger_threshold) {
            buttons |= PadButton::RightTrigger.mask();
        }

        // Only effective changes move the clock; raw jitter inside the
        // dead zone gates to zero and never registers.
        if (x, y, buttons) != (self.x, self.y, self.buttons) {
            self.last_change = Some(now);
        }
        self.x = x;
        self.y = y;
        self.buttons = buttons;
    }

    /// Current filtered state.
    pub fn snapshot(&self) -> PadSnapshot {
        PadSnapshot {
            x: self.x,
            y: self.y,
            buttons: self.buttons,
            connected: self.active_pad.is_some(),
            last_change: self.last_change,
        }
    }

    /// Name of the bound pad, for display.
    pub fn pad_name(&self) -> Result<String, CaptureError> {
        let gilrs = self
            .gilrs
            .as_ref()
            .ok_or(CaptureError::SourceDisconnected)?;
        let id = self.active_pad.ok_or(CaptureError::SourceDisconnected)?;
        Ok(gilrs.gamepad(id).name().to_string())
    }
}

/// Zero a stick axis inside the dead zone, otherwise keep the raw value.
fn gate_stick(raw: i16, deadzone: i16) -> i16 {
    if i32::from(raw).abs() < i32::from(deadzone) {
        0
    } else {
        raw
    }
}

/// Digitize a trigger axis against the press threshold.
fn digitize_trigger(value: f32, threshold: i16) -> bool {
    // Triggers are typically 0.0 to 1.0, but some report -1.0 to 1.0
    let normalized = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
    normalized * AXIS_SCALE >= f32::from(threshold)
}

/// Scale a normalized axis value to raw units.
fn stick_raw(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * AXIS_SCALE) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_gate_zeroes_inside_zone() {
        assert_eq!(gate_stick(0, 8_000), 0);
        assert_eq!(gate_stick(7_999, 8_000), 0);
        assert_eq!(gate_stick(-7_999, 8_000), 0);
    }

    #[test]
    fn test_stick_gate_keeps_raw_outside_zone() {
        assert_eq!(gate_stick(8_000, 8_000), 8_000);
        assert_eq!(gate_stick(-8_000, 8_000), -8_000);
        assert_eq!(gate_stick(20_000, 8_000), 20_000);
        assert_eq!(gate_stick(i16::MIN, 8_000), i16::MIN);
    }

    #[test]
    fn test_trigger_digitizes_at_threshold() {
        // Rest position in either reported range stays released
        assert!(!digitize_trigger(-1.0, 16_000));
        assert!(!digitize_trigger(-0.1, 16_000));
        // Half pull and beyond registers
        assert!(digitize_trigger(0.0, 16_000));
        assert!(digitize_trigger(1.0, 16_000));
    }

    #[test]
    fn test_stick_raw_scaling() {
        assert_eq!(stick_raw(0.0), 0);
        assert_eq!(stick_raw(1.0), 32_767);
        assert_eq!(stick_raw(-1.0), -32_767);
        // Out-of-range values clamp instead of wrapping
        assert_eq!(stick_raw(2.0), 32_767);
    }

    #[test]
    fn test_button_map_covers_distinct_bits() {
        let mut mask = 0u16;
        for (bit, _) in BUTTON_MAP {
            assert_eq!(mask & bit.mask(), 0);
            mask |= bit.mask();
        }
        mask |= PadButton::LeftTrigger.mask();
        mask |= PadButton::RightTrigger.mask();
        assert_eq!(mask, PadButton::ALL_MASK);
    }
}
