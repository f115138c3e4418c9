//! Incremental UTF-8 decoding for the shell's merged output stream.

/// Decodes a byte stream that arrives in arbitrary chunks.
///
/// A multi-byte sequence split across two chunks is held back until the rest of it
/// arrives. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let keep = incomplete_suffix_len(&self.pending);
        let complete_len = self.pending.len() - keep;
        let text = String::from_utf8_lossy(&self.pending[..complete_len]).into_owned();
        self.pending.drain(..complete_len);
        text
    }

    /// Flush whatever is held back, e.g. once the stream has closed.
    pub fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

/// Length of a trailing, not yet complete, UTF-8 sequence in `bytes`.
fn incomplete_suffix_len(bytes: &[u8]) -> usize {
    // A UTF-8 sequence is at most 4 bytes, so only the last 3 can be an unfinished prefix.
    let start = bytes.len().saturating_sub(3);
    for i in (start..bytes.len()).rev() {
        let byte = bytes[i];
        if byte & 0b1100_0000 == 0b1000_0000 {
            // continuation byte, keep looking for the lead byte
            continue;
        }
        let needed = match byte {
            b if b & 0b1110_0000 == 0b1100_0000 => 2,
            b if b & 0b1111_0000 == 0b1110_0000 => 3,
            b if b & 0b1111_1000 == 0b1111_0000 => 4,
            _ => return 0,
        };
        let have = bytes.len() - i;
        return if have < needed { have } else { 0 };
    }
    0
}
