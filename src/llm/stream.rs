//! Newline-delimited JSON decoding for `/api/generate` streams.
//!
//! Each line is one chunk such as `{"response":"Hal","done":false}`. Network
//! reads do not line up with chunk boundaries, so bytes are buffered until a
//! full line is available.

use crate::error::{DigestError, Result};
use serde::Deserialize;

/// One decoded stream chunk
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Collects the `response` fragments of a generation stream
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    buffer: Vec<u8>,
    text: String,
    chunks: usize,
    done: bool,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes from the network and decodes every complete line
    pub fn push(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(bytes);

        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.decode_line(&line)?;
        }

        Ok(())
    }

    /// Decodes any trailing line and returns the concatenated text
    pub fn finish(mut self) -> Result<String> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.decode_line(&rest)?;
        }

        if self.chunks == 0 {
            return Err(DigestError::EmptyResponse);
        }
        if !self.done {
            ::log::debug!("Generation stream ended without a done marker");
        }

        Ok(self.text)
    }

    fn decode_line(&mut self, line: &[u8]) -> Result<()> {
        let line = std::str::from_utf8(line)
            .map_err(|e| DigestError::Model(format!("invalid UTF-8 in stream: {e}")))?
            .trim();
        if line.is_empty() {
            return Ok(());
        }

        let chunk: GenerateChunk = serde_json::from_str(line)?;
        self.chunks += 1;

        if let Some(error) = chunk.error {
            return Err(DigestError::Model(error));
        }
        if let Some(fragment) = chunk.response {
            self.text.push_str(&fragment);
        }
        if chunk.done {
            self.done = true;
        }

        ::log::trace!("Stream chunk {} decoded (done: {})", self.chunks, chunk.done);
        Ok(())
    }
}
