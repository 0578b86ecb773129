//! Fixed-size chunk reads from an input stream.

use std::io::{self, ErrorKind, Read};

/// Fixed read-buffer length. Chunks are at most this many bytes and may
/// end mid-line; the window buffer uses the same value as its per-record
/// payload cap.
pub const CHUNK_LEN: usize = 256;

/// Pulls fixed-size byte chunks from an input stream. No transformation.
pub struct ChunkReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: Read> ChunkReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, CHUNK_LEN)
    }

    /// A reader with a non-default chunk length. Panics if `len` is zero.
    pub fn with_capacity(inner: R, len: usize) -> Self {
        assert!(len > 0, "chunk length must be non-zero");
        Self {
            inner,
            buf: vec![0; len],
        }
    }

    /// Read the next chunk, at most the configured length. Returns
    /// `Ok(None)` at end of stream. Interrupted reads are retried.
    pub fn read_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(&self.buf[..n])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
