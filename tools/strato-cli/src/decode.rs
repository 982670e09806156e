//! Decode command - print capture ticks in readable form

use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use stratocast_core::capture::{
    GamepadTick, KEY_NONE, KeystrokeTick, Modifier, PadButton, StreamKind,
};
use stratocast_core::input::hid;
use stratocast_core::RecordingReader;

/// Execute the decode command
pub fn execute(file: PathBuf, limit: Option<usize>) -> Result<()> {
    let handle =
        File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;
    let recording = RecordingReader::new(handle)
        .read_recording()
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let shown = limit
        .unwrap_or(recording.tick_count())
        .min(recording.tick_count());
    println!(
        "{} capture, {} ticks, showing {}",
        recording.kind().label(),
        recording.tick_count(),
        shown
    );

    match recording.kind() {
        StreamKind::Keystroke => {
            for (i, tick) in recording.decode_keystrokes()?.iter().take(shown).enumerate() {
                println!("{:>6}  {}", i, describe_keystroke(tick));
            }
        }
        StreamKind::Gamepad => {
            for (i, tick) in recording.decode_gamepad()?.iter().take(shown).enumerate() {
                println!("{:>6}  {}", i, describe_gamepad(tick));
            }
        }
    }

    Ok(())
}

fn describe_keystroke(tick: &KeystrokeTick) -> String {
    if tick.is_idle() {
        return "-".to_string();
    }

    let mut parts = Vec::new();
    for modifier in Modifier::ALL {
        if tick.modifiers() & modifier.mask() != 0 {
            parts.push(modifier.label().to_string());
        }
    }
    for &key in tick.keys().iter().filter(|&&k| k != KEY_NONE) {
        match hid::label_for_usage(key) {
            Some(label) => parts.push(label.to_string()),
            None => parts.push(format!("0x{key:02X}")),
        }
    }
    parts.join("+")
}

fn describe_gamepad(tick: &GamepadTick) -> String {
    if tick.is_idle() {
        return "-".to_string();
    }

    let mut parts = Vec::new();
    if tick.x() != 0 || tick.y() != 0 {
        parts.push(format!("stick({:+}, {:+})", tick.x(), tick.y()));
    }
    for button in PadButton::ALL {
        if tick.buttons() & button.mask() != 0 {
            parts.push(button.label().to_string());
        }
    }
    parts.join(" ")
}
