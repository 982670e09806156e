//! Session history for finalized recordings
//!
//! Receives recordings from the sampler, logs a summary line for each,
//! and optionally exports them to disk as they land. Export failures
//! degrade to in-memory history, they never stop the capture loop.

use std::path::PathBuf;

use stratocast_core::capture::{Recording, StreamKind};
use stratocast_core::export;

use crate::config::ExportConfig;

/// One finalized recording, kept for the session report.
struct HistoryEntry {
    kind: StreamKind,
    tick_count: usize,
    size_in_bytes: usize,
    duration_ms: u64,
    /// Where the recording was written, if export is on and succeeded.
    path: Option<PathBuf>,
}

pub struct RecordingHistory {
    entries: Vec<HistoryEntry>,
    export_dir: Option<PathBuf>,
    exported: u64,
}

impl RecordingHistory {
    /// Set up history, resolving the export directory up front.
    pub fn new(config: &ExportConfig) -> Self {
        let export_dir = if config.auto_export {
            resolve_export_dir(config.directory.as_deref())
        } else {
            None
        };
        if let Some(dir) = &export_dir {
            tracing::info!("Exporting recordings to {}", dir.display());
        }

        Self {
            entries: Vec::new(),
            export_dir,
            exported: 0,
        }
    }

    /// Log, export, and retain one finalized recording.
    pub fn push(&mut self, recording: Recording) {
        let seconds = recording.duration_ms() / 1_000;
        let millis = recording.duration_ms() % 1_000;
        tracing::info!(
            "Captured {} recording: {}.{:03} s, {} ticks, {} bytes",
            recording.kind().label(),
            seconds,
            millis,
            recording.tick_count(),
            recording.size_in_bytes()
        );

        let path = match &self.export_dir {
            Some(dir) => {
                self.exported += 1;
                match export::export_recording(dir, &recording, self.exported) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!("Failed to export recording: {:#}", e);
                        None
                    }
                }
            }
            None => None,
        };

        self.entries.push(HistoryEntry {
            kind: recording.kind(),
            tick_count: recording.tick_count(),
            size_in_bytes: recording.size_in_bytes(),
            duration_ms: recording.duration_ms(),
            path,
        });
    }

    /// Log the session report, one line per recording.
    pub fn summarize(&self) {
        if self.entries.is_empty() {
            tracing::info!("Session complete: no recordings");
            return;
        }

        let total: usize = self.entries.iter().map(|e| e.size_in_bytes).sum();
        tracing::info!(
            "Session complete: {} recordings, {} bytes total",
            self.entries.len(),
            total
        );
        for (i, entry) in self.entries.iter().enumerate() {
            let location = match &entry.path {
                Some(path) => path.display().to_string(),
                None => "not exported".to_string(),
            };
            tracing::info!(
                "  [{}] {}: {}.{:03} s, {} ticks, {} bytes, {}",
                i + 1,
                entry.kind.label(),
                entry.duration_ms / 1_000,
                entry.duration_ms % 1_000,
                entry.tick_count,
                entry.size_in_bytes,
                location
            );
        }
    }
}

fn resolve_export_dir(configured: Option<&std::path::Path>) -> Option<PathBuf> {
    match configured {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => Some(dir.to_path_buf()),
            Err(e) => {
                tracing::warn!(
                    "Failed to create export directory {}: {}",
                    dir.display(),
                    e
                );
                None
            }
        },
        None => match export::recordings_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!("Export disabled: {:#}", e);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use stratocast_core::{CaptureConfig, KeySnapshot, PadSnapshot, Sampler};

    /// Drive a sampler through a short press and the idle window.
    fn capture_one_recording() -> Recording {
        let mut sampler = Sampler::new(CaptureConfig::default());
        let base = Instant::now();

        let mut held = KeySnapshot::default();
        held.keys.push(0x04);
        held.last_change = Some(base);
        sampler.sample(base, &held, &PadSnapshot::default());

        let mut idle = KeySnapshot::default();
        idle.last_change = Some(base + Duration::from_millis(33));
        let out = sampler.sample(
            base + Duration::from_millis(2_100),
            &idle,
            &PadSnapshot::default(),
        );
        assert_eq!(out.len(), 1);
        out.into_iter().next().unwrap()
    }

    #[test]
    fn test_push_without_export() {
        let config = ExportConfig {
            auto_export: false,
            directory: None,
        };
        let mut history = RecordingHistory::new(&config);
        history.push(capture_one_recording());

        assert_eq!(history.entries.len(), 1);
        let entry = &history.entries[0];
        assert_eq!(entry.kind, StreamKind::Keystroke);
        assert_eq!(entry.tick_count, 1);
        assert_eq!(entry.size_in_bytes, 4);
        assert_eq!(entry.duration_ms, 33);
        assert!(entry.path.is_none());
    }

    #[test]
    fn test_push_exports_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            auto_export: true,
            directory: Some(dir.path().to_path_buf()),
        };
        let mut history = RecordingHistory::new(&config);
        history.push(capture_one_recording());

        let entry = &history.entries[0];
        let path = entry.path.as_ref().unwrap();
        assert!(path.exists());
        assert!(path.extension().is_some_and(|e| e == "scap"));

        let file = std::fs::File::open(path).unwrap();
        let parsed = stratocast_core::RecordingReader::new(file)
            .read_recording()
            .unwrap();
        assert_eq!(parsed.tick_count(), 1);
    }

    #[test]
    fn test_export_filenames_stay_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            auto_export: true,
            directory: Some(dir.path().to_path_buf()),
        };
        let mut history = RecordingHistory::new(&config);
        history.push(capture_one_recording());
        history.push(capture_one_recording());

        let first = history.entries[0].path.as_ref().unwrap();
        let second = history.entries[1].path.as_ref().unwrap();
        assert_ne!(first, second);
        assert!(second.exists());
    }
}
