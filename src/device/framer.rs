const TERMINATOR: &[u8] = b"\r\n";

/// Splits a device byte stream into readings: runs of ASCII digits terminated by `\r\n`.
///
/// Only the most recent reading is kept. Bytes that do not (yet) form a reading stay
/// buffered until a later chunk completes them or a later reading discards them.
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
    value: Option<String>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and consumes every complete reading in order.
    ///
    /// Returns `true` when at least one reading was found.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> bool {
        self.buffer.extend_from_slice(chunk);
        let mut updated = false;
        while let Some(reading) = self.take_reading() {
            self.value = Some(reading);
            updated = true;
        }
        updated
    }

    /// The digits of the last complete reading.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn reading(&self) -> Option<f64> {
        self.value.as_deref().and_then(|v| v.parse().ok())
    }

    /// Bytes received but not consumed by any reading.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Removes the first reading and everything before it from the buffer.
    fn take_reading(&mut self) -> Option<String> {
        let mut search_from = 0;
        loop {
            let end = search_from
                + self.buffer[search_from..]
                    .windows(TERMINATOR.len())
                    .position(|w| w == TERMINATOR)?;
            let start = self.buffer[..end]
                .iter()
                .rposition(|b| !b.is_ascii_digit())
                .map_or(0, |i| i + 1);
            if start < end {
                let digits = String::from_utf8_lossy(&self.buffer[start..end]).into_owned();
                self.buffer.drain(..end + TERMINATOR.len());
                return Some(digits);
            }
            // A terminator with no digits in front of it is not a reading.
            search_from = end + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_line_is_consumed() {
        let mut framer = LineFramer::new();
        assert!(framer.push_chunk(b"12\r\n"));
        assert_eq!(framer.value(), Some("12"));
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn split_line_waits_for_terminator() {
        let mut framer = LineFramer::new();
        assert!(!framer.push_chunk(b"1"));
        assert_eq!(framer.value(), None);
        assert_eq!(framer.pending(), b"1");
        assert!(!framer.push_chunk(b"2\r"));
        assert!(framer.push_chunk(b"\n"));
        assert_eq!(framer.value(), Some("12"));
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn last_reading_in_chunk_wins() {
        let mut framer = LineFramer::new();
        framer.push_chunk(b"12\r\n34\r\n");
        assert_eq!(framer.value(), Some("34"));
        assert_eq!(framer.reading(), Some(34.0));
        assert!(framer.pending().is_empty());
    }

    #[test]
    fn noise_before_reading_is_dropped() {
        let mut framer = LineFramer::new();
        framer.push_chunk(b"ok\r\nv=56\r\n7");
        assert_eq!(framer.value(), Some("56"));
        assert_eq!(framer.pending(), b"7");
    }

    #[test]
    fn malformed_fragment_is_retained() {
        let mut framer = LineFramer::new();
        assert!(!framer.push_chunk(b"abc\r\n"));
        assert_eq!(framer.value(), None);
        assert_eq!(framer.pending(), b"abc\r\n");
    }
}
