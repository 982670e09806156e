//! Error types for the capture pipeline

use thiserror::Error;

/// Errors surfaced by tick decoding, capture files, and input sources.
///
/// Encoding, appending, trimming, and clearing never fail; only decoding
/// foreign bytes and talking to devices can.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A fixed-width record or capture header failed validation.
    ///
    /// The affected record is unusable; the rest of the session is not.
    #[error("corrupt record: {reason}")]
    CorruptRecord { reason: String },

    /// More simultaneous keys than a keystroke tick can hold.
    ///
    /// Only the strict constructor reports this; the sampling path keeps
    /// the three lowest usage codes instead.
    #[error("{pressed} keys held, a keystroke tick holds at most 3")]
    CapacityExceeded { pressed: usize },

    /// The gamepad backend lost the device mid-session.
    #[error("input source disconnected")]
    SourceDisconnected,

    /// Underlying IO failure while reading or writing a capture file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Shorthand for a [`CaptureError::CorruptRecord`] with a formatted reason.
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        CaptureError::CorruptRecord {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CaptureError::corrupt("truncated tick");
        assert_eq!(err.to_string(), "corrupt record: truncated tick");

        let err = CaptureError::CapacityExceeded { pressed: 5 };
        assert_eq!(err.to_string(), "5 keys held, a keystroke tick holds at most 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: CaptureError = io.into();
        assert!(matches!(err, CaptureError::Io(_)));
    }
}
