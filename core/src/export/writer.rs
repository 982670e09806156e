//! Capture file writer

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use crate::capture::Recording;

/// Writer for the capture file format
pub struct RecordingWriter<W: Write> {
    writer: W,
}

impl<W: Write> RecordingWriter<W> {
    /// Create a new capture writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete recording to the output
    pub fn write_recording(&mut self, recording: &Recording) -> io::Result<()> {
        self.write_header(recording)?;
        self.writer.write_all(recording.bytes())?;
        Ok(())
    }

    /// Write the 16-byte header
    fn write_header(&mut self, recording: &Recording) -> io::Result<()> {
        self.writer.write_u8(recording.kind().to_wire())?;
        self.writer.write_u8(recording.kind().tick_width() as u8)?;
        self.writer.write_u8(0)?; // flags, reserved for compression
        self.writer.write_all(&[0u8; 5])?; // reserved bytes
        self.writer
            .write_u64::<LittleEndian>(recording.tick_count() as u64)?;
        Ok(())
    }

    /// Consume the writer and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{GamepadTick, KeystrokeTick, StreamKind};

    #[test]
    fn test_write_header_layout() {
        let ticks = [
            KeystrokeTick::from_pressed(&[0x04], 0),
            KeystrokeTick::from_pressed(&[], 0),
            KeystrokeTick::from_pressed(&[0x1A], 0b0000_0001),
        ];
        let bytes: Vec<u8> = ticks.iter().flat_map(|t| t.encode()).collect();
        let recording = Recording::new(StreamKind::Keystroke, 3, bytes);

        let mut buffer = Vec::new();
        RecordingWriter::new(&mut buffer)
            .write_recording(&recording)
            .unwrap();

        // Header is 16 bytes, payload 3 ticks x 4 bytes
        assert_eq!(buffer.len(), 16 + 12);
        assert_eq!(buffer[0], 1); // keystroke kind
        assert_eq!(buffer[1], 4); // tick width
        assert_eq!(buffer[2], 0); // flags
        assert_eq!(&buffer[3..8], &[0, 0, 0, 0, 0]); // reserved
        assert_eq!(u64::from_le_bytes(buffer[8..16].try_into().unwrap()), 3);
    }

    #[test]
    fn test_write_gamepad_header() {
        let tick = GamepadTick::new(-500, 1_000, 0x0003);
        let recording = Recording::new(StreamKind::Gamepad, 1, tick.encode().to_vec());

        let mut buffer = Vec::new();
        RecordingWriter::new(&mut buffer)
            .write_recording(&recording)
            .unwrap();

        assert_eq!(buffer.len(), 16 + 6);
        assert_eq!(buffer[0], 2); // gamepad kind
        assert_eq!(buffer[1], 6); // tick width
        assert_eq!(&buffer[16..22], &tick.encode());
    }

    #[test]
    fn test_write_empty_recording() {
        let recording = Recording::new(StreamKind::Keystroke, 0, Vec::new());

        let mut buffer = Vec::new();
        RecordingWriter::new(&mut buffer)
            .write_recording(&recording)
            .unwrap();

        assert_eq!(buffer.len(), 16);
    }
}
