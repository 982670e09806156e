//! HID usage mapping for keyboard capture
//!
//! Converts winit physical key codes to USB HID usage IDs (keyboard page)
//! and back to display labels. Usage IDs are what goes on the wire, so a
//! capture replays the same physical keys regardless of host layout.

use winit::keyboard::KeyCode;

use crate::capture::Modifier;

/// HID usage ID for a physical key, if the key is capturable.
///
/// Modifier keys return `None` here; they travel in the modifier bitmask
/// instead of the key slots. See [`modifier_for`].
pub fn usage_for(key: KeyCode) -> Option<u8> {
    let usage = match key {
        // Letters
        KeyCode::KeyA => 0x04,
        KeyCode::KeyB => 0x05,
        KeyCode::KeyC => 0x06,
        KeyCode::KeyD => 0x07,
        KeyCode::KeyE => 0x08,
        KeyCode::KeyF => 0x09,
        KeyCode::KeyG => 0x0A,
        KeyCode::KeyH => 0x0B,
        KeyCode::KeyI => 0x0C,
        KeyCode::KeyJ => 0x0D,
        KeyCode::KeyK => 0x0E,
        KeyCode::KeyL => 0x0F,
        KeyCode::KeyM => 0x10,
        KeyCode::KeyN => 0x11,
        KeyCode::KeyO => 0x12,
        KeyCode::KeyP => 0x13,
        KeyCode::KeyQ => 0x14,
        KeyCode::KeyR => 0x15,
        KeyCode::KeyS => 0x16,
        KeyCode::KeyT => 0x17,
        KeyCode::KeyU => 0x18,
        KeyCode::KeyV => 0x19,
        KeyCode::KeyW => 0x1A,
        KeyCode::KeyX => 0x1B,
        KeyCode::KeyY => 0x1C,
        KeyCode::KeyZ => 0x1D,

        // Number row
        KeyCode::Digit1 => 0x1E,
        KeyCode::Digit2 => 0x1F,
        KeyCode::Digit3 => 0x20,
        KeyCode::Digit4 => 0x21,
        KeyCode::Digit5 => 0x22,
        KeyCode::Digit6 => 0x23,
        KeyCode::Digit7 => 0x24,
        KeyCode::Digit8 => 0x25,
        KeyCode::Digit9 => 0x26,
        KeyCode::Digit0 => 0x27,

        // Control and whitespace
        KeyCode::Enter => 0x28,
        KeyCode::Escape => 0x29,
        KeyCode::Backspace => 0x2A,
        KeyCode::Tab => 0x2B,
        KeyCode::Space => 0x2C,

        // Punctuation
        KeyCode::Minus => 0x2D,
        KeyCode::Equal => 0x2E,
        KeyCode::BracketLeft => 0x2F,
        KeyCode::BracketRight => 0x30,
        KeyCode::Backslash => 0x31,
        KeyCode::Semicolon => 0x33,
        KeyCode::Quote => 0x34,
        KeyCode::Backquote => 0x35,
        KeyCode::Comma => 0x36,
        KeyCode::Period => 0x37,
        KeyCode::Slash => 0x38,
        KeyCode::CapsLock => 0x39,

        // Function row
        KeyCode::F1 => 0x3A,
        KeyCode::F2 => 0x3B,
        KeyCode::F3 => 0x3C,
        KeyCode::F4 => 0x3D,
        KeyCode::F5 => 0x3E,
        KeyCode::F6 => 0x3F,
        KeyCode::F7 => 0x40,
        KeyCode::F8 => 0x41,
        KeyCode::F9 => 0x42,
        KeyCode::F10 => 0x43,
        KeyCode::F11 => 0x44,
        KeyCode::F12 => 0x45,

        // Navigation cluster
        KeyCode::PrintScreen => 0x46,
        KeyCode::ScrollLock => 0x47,
        KeyCode::Pause => 0x48,
        KeyCode::Insert => 0x49,
        KeyCode::Home => 0x4A,
        KeyCode::PageUp => 0x4B,
        KeyCode::Delete => 0x4C,
        KeyCode::End => 0x4D,
        KeyCode::PageDown => 0x4E,
        KeyCode::ArrowRight => 0x4F,
        KeyCode::ArrowLeft => 0x50,
        KeyCode::ArrowDown => 0x51,
        KeyCode::ArrowUp => 0x52,

        // Numpad
        KeyCode::NumLock => 0x53,
        KeyCode::NumpadDivide => 0x54,
        KeyCode::NumpadMultiply => 0x55,
        KeyCode::NumpadSubtract => 0x56,
        KeyCode::NumpadAdd => 0x57,
        KeyCode::NumpadEnter => 0x58,
        KeyCode::Numpad1 => 0x59,
        KeyCode::Numpad2 => 0x5A,
        KeyCode::Numpad3 => 0x5B,
        KeyCode::Numpad4 => 0x5C,
        KeyCode::Numpad5 => 0x5D,
        KeyCode::Numpad6 => 0x5E,
        KeyCode::Numpad7 => 0x5F,
        KeyCode::Numpad8 => 0x60,
        KeyCode::Numpad9 => 0x61,
        KeyCode::Numpad0 => 0x62,
        KeyCode::NumpadDecimal => 0x63,

        _ => return None,
    };
    Some(usage)
}

/// Modifier slot for a physical key, if it is a modifier.
pub fn modifier_for(key: KeyCode) -> Option<Modifier> {
    let modifier = match key {
        KeyCode::ControlLeft => Modifier::LeftCtrl,
        KeyCode::ShiftLeft => Modifier::LeftShift,
        KeyCode::AltLeft => Modifier::LeftAlt,
        KeyCode::SuperLeft => Modifier::LeftGui,
        KeyCode::ControlRight => Modifier::RightCtrl,
        KeyCode::ShiftRight => Modifier::RightShift,
        KeyCode::AltRight => Modifier::RightAlt,
        KeyCode::SuperRight => Modifier::RightGui,
        _ => return None,
    };
    Some(modifier)
}

/// Display label for a usage ID, for decode output and logs.
pub fn label_for_usage(usage: u8) -> Option<&'static str> {
    let label = match usage {
        0x04 => "A",
        0x05 => "B",
        0x06 => "C",
        0x07 => "D",
        0x08 => "E",
        0x09 => "F",
        0x0A => "G",
        0x0B => "H",
        0x0C => "I",
        0x0D => "J",
        0x0E => "K",
        0x0F => "L",
        0x10 => "M",
        0x11 => "N",
        0x12 => "O",
        0x13 => "P",
        0x14 => "Q",
        0x15 => "R",
        0x16 => "S",
        0x17 => "T",
        0x18 => "U",
        0x19 => "V",
        0x1A => "W",
        0x1B => "X",
        0x1C => "Y",
        0x1D => "Z",
        0x1E => "1",
        0x1F => "2",
        0x20 => "3",
        0x21 => "4",
        0x22 => "5",
        0x23 => "6",
        0x24 => "7",
        0x25 => "8",
        0x26 => "9",
        0x27 => "0",
        0x28 => "Enter",
        0x29 => "Esc",
        0x2A => "Backspace",
        0x2B => "Tab",
        0x2C => "Space",
        0x2D => "-",
        0x2E => "=",
        0x2F => "[",
        0x30 => "]",
        0x31 => "\\",
        0x33 => ";",
        0x34 => "'",
        0x35 => "`",
        0x36 => ",",
        0x37 => ".",
        0x38 => "/",
        0x39 => "CapsLock",
        0x3A => "F1",
        0x3B => "F2",
        0x3C => "F3",
        0x3D => "F4",
        0x3E => "F5",
        0x3F => "F6",
        0x40 => "F7",
        0x41 => "F8",
        0x42 => "F9",
        0x43 => "F10",
        0x44 => "F11",
        0x45 => "F12",
        0x46 => "PrintScreen",
        0x47 => "ScrollLock",
        0x48 => "Pause",
        0x49 => "Insert",
        0x4A => "Home",
        0x4B => "PageUp",
        0x4C => "Delete",
        0x4D => "End",
        0x4E => "PageDown",
        0x4F => "Right",
        0x50 => "Left",
        0x51 => "Down",
        0x52 => "Up",
        0x53 => "NumLock",
        0x54 => "Numpad /",
        0x55 => "Numpad *",
        0x56 => "Numpad -",
        0x57 => "Numpad +",
        0x58 => "Numpad Enter",
        0x59 => "Numpad 1",
        0x5A => "Numpad 2",
        0x5B => "Numpad 3",
        0x5C => "Numpad 4",
        0x5D => "Numpad 5",
        0x5E => "Numpad 6",
        0x5F => "Numpad 7",
        0x60 => "Numpad 8",
        0x61 => "Numpad 9",
        0x62 => "Numpad 0",
        0x63 => "Numpad .",
        _ => return None,
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_usages() {
        assert_eq!(usage_for(KeyCode::KeyA), Some(0x04));
        assert_eq!(usage_for(KeyCode::KeyW), Some(0x1A));
        assert_eq!(usage_for(KeyCode::KeyZ), Some(0x1D));
    }

    #[test]
    fn test_digit_usages() {
        assert_eq!(usage_for(KeyCode::Digit1), Some(0x1E));
        assert_eq!(usage_for(KeyCode::Digit0), Some(0x27));
    }

    #[test]
    fn test_navigation_usages() {
        assert_eq!(usage_for(KeyCode::Space), Some(0x2C));
        assert_eq!(usage_for(KeyCode::ArrowUp), Some(0x52));
        assert_eq!(usage_for(KeyCode::NumpadDecimal), Some(0x63));
    }

    #[test]
    fn test_modifiers_excluded_from_usages() {
        assert_eq!(usage_for(KeyCode::ShiftLeft), None);
        assert_eq!(usage_for(KeyCode::ControlRight), None);
        assert_eq!(modifier_for(KeyCode::ShiftLeft), Some(Modifier::LeftShift));
        assert_eq!(modifier_for(KeyCode::SuperRight), Some(Modifier::RightGui));
        assert_eq!(modifier_for(KeyCode::KeyA), None);
    }

    #[test]
    fn test_labels_cover_mapped_range() {
        assert_eq!(label_for_usage(0x04), Some("A"));
        assert_eq!(label_for_usage(0x2C), Some("Space"));
        assert_eq!(label_for_usage(0x63), Some("Numpad ."));
        // 0x32 (non-US #) is deliberately unmapped
        assert_eq!(label_for_usage(0x32), None);
        assert_eq!(label_for_usage(0x00), None);
        assert_eq!(label_for_usage(0xE0), None);
    }
}
