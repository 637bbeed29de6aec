//! Byte-level framing and decoding of UTF-16BE log records.

/// A full record terminator: carriage return then line feed, each with its
/// null high byte. A bare `00 0A` may occur inside chat messages and is not
/// a terminator.
pub(crate) const LINE_TERMINATOR: [u8; 4] = [0x00, 0x0D, 0x00, 0x0A];

/// Null high byte standing in for the code unit half skipped by the
/// end-of-file seek or the byte-order-mark read.
const ALIGNMENT_SENTINEL: u8 = 0x00;

/// Outcome of feeding a byte that completed a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FrameEvent {
    /// A fully decoded log line, terminator stripped.
    Line(String),
    /// The record's bytes were not valid UTF-16BE; the raw buffer is kept
    /// for diagnostics and the record is dropped.
    DecodeError { bytes: Vec<u8> },
}

/// Incremental decoder turning a raw byte stream into completed lines.
///
/// Bytes accumulate in a buffer that always starts with a single sentinel
/// byte; once the buffer ends with [`LINE_TERMINATOR`] the record between
/// sentinel and terminator is decoded and the buffer resets. A malformed
/// record is reported and discarded rather than wedging the stream.
#[derive(Debug)]
pub(crate) struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub(crate) fn new() -> Self {
        Self {
            buf: vec![ALIGNMENT_SENTINEL],
        }
    }

    /// Drops any partial record and returns to the single-sentinel state.
    pub(crate) fn reset(&mut self) {
        self.buf.clear();
        self.buf.push(ALIGNMENT_SENTINEL);
    }

    /// Consumes one byte; returns an event when it completed a record.
    pub(crate) fn feed(&mut self, byte: u8) -> Option<FrameEvent> {
        self.buf.push(byte);
        if !self.buf.ends_with(&LINE_TERMINATOR) {
            return None;
        }

        let body_end = self.buf.len() - LINE_TERMINATOR.len();
        let record = self.buf.get(1..body_end).unwrap_or(&[]);
        let event = match decode_utf16be(record) {
            Some(line) => FrameEvent::Line(line),
            None => FrameEvent::DecodeError {
                bytes: self.buf.clone(),
            },
        };
        self.reset();
        Some(event)
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &[u8] {
        &self.buf
    }
}

fn decode_utf16be(bytes: &[u8]) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
