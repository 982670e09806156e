//! Inspect command - validate a capture file and report stats

use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use stratocast_core::capture::StreamKind;
use stratocast_core::RecordingReader;

/// Execute the inspect command
pub fn execute(file: PathBuf) -> Result<()> {
    println!("Inspecting capture: {}", file.display());

    let handle =
        File::open(&file).with_context(|| format!("Failed to open {}", file.display()))?;
    let recording = RecordingReader::new(handle)
        .read_recording()
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let idle_ticks = match recording.kind() {
        StreamKind::Keystroke => recording
            .decode_keystrokes()?
            .iter()
            .filter(|t| t.is_idle())
            .count(),
        StreamKind::Gamepad => recording
            .decode_gamepad()?
            .iter()
            .filter(|t| t.is_idle())
            .count(),
    };

    let seconds = recording.duration_ms() / 1_000;
    let millis = recording.duration_ms() % 1_000;

    println!();
    println!("=== Capture Valid ===");
    println!("Channel: {}", recording.kind().label());
    println!("Tick width: {} bytes", recording.kind().tick_width());
    println!("Ticks: {}", recording.tick_count());
    println!("Idle ticks: {}", idle_ticks);
    println!("Duration: {}.{:03} s", seconds, millis);
    println!("Payload: {} bytes", recording.size_in_bytes());

    Ok(())
}
