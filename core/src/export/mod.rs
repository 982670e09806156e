//! Capture file IO
//!
//! Recordings persist as `.scap` files: a fixed 16-byte header followed
//! by the flat tick payload.
//!
//! ```text
//! Offset  Size  Field
//! 0       1     stream kind (1 = keystroke, 2 = gamepad)
//! 1       1     tick width in bytes
//! 2       1     flags (must be zero)
//! 3       5     reserved
//! 8       8     tick count (u64 LE)
//! 16      ..    payload, tick count x tick width bytes
//! ```

mod reader;
mod writer;

pub use reader::RecordingReader;
pub use writer::RecordingWriter;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::capture::Recording;

/// File extension for capture files.
pub const CAPTURE_EXTENSION: &str = "scap";

/// Size of the fixed file header in bytes.
pub const HEADER_BYTES: usize = 16;

/// Get the recordings directory, creating it if needed.
pub fn recordings_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("io.stratocast", "", "Stratocast")
        .context("Failed to get project directories")?
        .data_dir()
        .join("recordings");

    std::fs::create_dir_all(&dir).context("Failed to create recordings directory")?;

    Ok(dir)
}

/// Generate a timestamped filename for a recording.
fn timestamped_filename(recording: &Recording, index: u64) -> String {
    let now = chrono::Local::now();
    format!(
        "{}_{:04}_{}.{}",
        recording.kind().label(),
        index,
        now.format("%Y-%m-%d_%H-%M-%S"),
        CAPTURE_EXTENSION
    )
}

/// Write a recording into `dir` under a timestamped name.
pub fn export_recording(dir: &Path, recording: &Recording, index: u64) -> Result<PathBuf> {
    let path = dir.join(timestamped_filename(recording, index));

    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = RecordingWriter::new(file);
    writer
        .write_recording(recording)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Recording saved: {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{KeystrokeTick, Recording, StreamKind};

    fn sample_recording() -> Recording {
        let ticks = [
            KeystrokeTick::from_pressed(&[0x04], 0),
            KeystrokeTick::from_pressed(&[0x04, 0x1A], 0),
        ];
        let bytes: Vec<u8> = ticks.iter().flat_map(|t| t.encode()).collect();
        Recording::new(StreamKind::Keystroke, 2, bytes)
    }

    #[test]
    fn test_timestamped_filename_shape() {
        let name = timestamped_filename(&sample_recording(), 7);
        assert!(name.starts_with("keystroke_0007_"));
        assert!(name.ends_with(".scap"));
    }

    #[test]
    fn test_export_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let recording = sample_recording();

        let path = export_recording(dir.path(), &recording, 1).unwrap();
        assert!(path.exists());

        let file = File::open(&path).unwrap();
        let parsed = RecordingReader::new(file).read_recording().unwrap();
        assert_eq!(parsed.kind(), StreamKind::Keystroke);
        assert_eq!(parsed.tick_count(), 2);
        assert_eq!(parsed.bytes(), recording.bytes());
    }
}
