//! Error taxonomy for the streaming engine.
//!
//! Open and read failures are per-file and recoverable: the driver records
//! them and moves on to the next input. Write failures are fatal to the
//! whole run.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatError {
    /// An input file could not be opened. The driver skips the file and
    /// continues; the run is marked as failed.
    #[error("{path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A read from an already-open stream failed. Also recovered per-file.
    #[error("{path}: read error: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Writing to the output stream failed. Fatal.
    #[error("write error: {0}")]
    Write(#[from] io::Error),
}

impl CatError {
    /// True for failures the driver recovers from by skipping the file.
    pub fn is_per_file(&self) -> bool {
        matches!(self, CatError::FileOpen { .. } | CatError::Read { .. })
    }
}
