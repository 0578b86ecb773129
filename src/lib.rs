//! # linecat-rs
//!
//! A streaming line engine for `cat`-style utilities: per-line transforms
//! (numbering, end markers, tab and non-printing escapes, blank-line
//! squeezing) applied across fixed-size chunk reads, plus a bounded
//! window buffer that retains only the last N lines for tail-style
//! output.
//!
//! ## Overview
//!
//! Input is pulled in fixed-size chunks, so a single logical line may
//! span several reads. The [`LineTransformer`] reassembles lines on the
//! fly, emitting [`Fragment`]s tagged complete or partial; the
//! [`PipelineDriver`] routes fragments either straight to the output
//! (print-all and head modes) or into a [`WindowBuffer`] that is flushed
//! once all input is exhausted (tail mode).
//!
//! ## Example
//!
//! ```
//! use linecat_rs::{LineTransformer, TransformConfig};
//!
//! let config = TransformConfig {
//!     number_all: true,
//!     ..Default::default()
//! };
//! let mut transformer = LineTransformer::new(config);
//!
//! let fragments = transformer.process(b"alpha\nbeta\n");
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(fragments[0].bytes, b"     1\talpha\n");
//! ```

pub mod chunk;
pub mod config;
pub mod driver;
pub mod error;
pub mod transform;
pub mod window;

pub use chunk::{CHUNK_LEN, ChunkReader};
pub use config::{DEFAULT_WINDOW_LINES, Numbering, OutputMode, TransformConfig};
pub use driver::{Input, PipelineDriver, RunReport, transform_slice};
pub use error::CatError;
pub use transform::{Fragment, LineTransformer, StreamState};
pub use window::{LineRecord, WindowBuffer};
