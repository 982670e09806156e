//! Capture file reader
//!
//! Every field is validated on the way in; a malformed file yields
//! [`CaptureError::CorruptRecord`] rather than a half-decoded recording.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

use super::HEADER_BYTES;
use crate::capture::{Recording, StreamKind};
use crate::error::CaptureError;

/// Upper bound on tick counts accepted from a header.
/// 2^24 ticks is over six days of capture, anything above is garbage.
const MAX_TICKS: u64 = 1 << 24;

/// Reader for the capture file format
pub struct RecordingReader<R: Read> {
    reader: R,
}

impl<R: Read> RecordingReader<R> {
    /// Create a new capture reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and validate a complete recording from the input
    pub fn read_recording(&mut self) -> Result<Recording, CaptureError> {
        let mut header = [0u8; HEADER_BYTES];
        self.reader
            .read_exact(&mut header)
            .map_err(|e| corrupt_on_eof(e, "header"))?;
        let mut fields = &header[..];

        let kind_byte = fields.read_u8()?;
        let kind = StreamKind::from_wire(kind_byte)
            .ok_or_else(|| CaptureError::corrupt(format!("unknown stream kind {kind_byte}")))?;

        let width = usize::from(fields.read_u8()?);
        if width != kind.tick_width() {
            return Err(CaptureError::corrupt(format!(
                "tick width {} does not match {} stream",
                width,
                kind.label()
            )));
        }

        let flags = fields.read_u8()?;
        if flags != 0 {
            return Err(CaptureError::corrupt(format!(
                "unsupported flags {flags:#04x}"
            )));
        }

        let mut reserved = [0u8; 5];
        fields.read_exact(&mut reserved)?;

        let tick_count = fields.read_u64::<LittleEndian>()?;
        if tick_count > MAX_TICKS {
            return Err(CaptureError::corrupt(format!(
                "implausible tick count {tick_count}"
            )));
        }
        let tick_count = tick_count as usize;

        let mut bytes = vec![0u8; tick_count * kind.tick_width()];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| corrupt_on_eof(e, "payload"))?;

        let recording = Recording::new(kind, tick_count, bytes);

        // Every tick must decode; one bad slot poisons the whole record
        match kind {
            StreamKind::Keystroke => {
                recording.decode_keystrokes()?;
            }
            StreamKind::Gamepad => {
                recording.decode_gamepad()?;
            }
        }

        Ok(recording)
    }
}

fn corrupt_on_eof(e: io::Error, what: &str) -> CaptureError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        CaptureError::corrupt(format!("truncated {what}"))
    } else {
        CaptureError::Io(e)
    }
}
