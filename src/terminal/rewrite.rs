//! Alternate screen folding for replay.
//!
//! The replay grid has a single screen. Full-screen programs switch to the
//! alternate screen and back; when they leave, the content they drew would
//! otherwise stay behind. Leaving is rewritten to "clear and home" so the
//! grid matches what a user would have seen.

const EXIT_SEQUENCES: [&[u8]; 3] = [b"\x1b[?1049l", b"\x1b[?1047l", b"\x1b[?47l"];
const CLEAR_AND_HOME: &[u8] = b"\x1b[2J\x1b[H";
const ESC: u8 = 0x1b;

/// Streaming rewriter for alternate screen exits.
///
/// A chunk ending in the middle of an exit sequence keeps that tail back
/// until the next chunk arrives.
#[derive(Debug, Default)]
pub struct AltScreenRewriter {
    carry: Vec<u8>,
}

impl AltScreenRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite one chunk of output.
    pub fn rewrite(&mut self, chunk: &[u8]) -> Vec<u8> {
        let mut input = std::mem::take(&mut self.carry);
        input.extend_from_slice(chunk);

        let mut out = Vec::with_capacity(input.len());
        let mut i = 0;
        while i < input.len() {
            if input[i] == ESC {
                let rest = &input[i..];
                if let Some(seq) = EXIT_SEQUENCES.iter().find(|seq| rest.starts_with(seq)) {
                    out.extend_from_slice(CLEAR_AND_HOME);
                    i += seq.len();
                    continue;
                }
                if EXIT_SEQUENCES.iter().any(|seq| seq.starts_with(rest)) {
                    self.carry = rest.to_vec();
                    break;
                }
            }
            out.push(input[i]);
            i += 1;
        }
        out
    }

    /// Bytes held back waiting for the rest of a sequence.
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }

    /// Release whatever is held back, unchanged.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.carry)
    }
}
