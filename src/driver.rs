//! Wires the chunk reader, the transformer, and the output target for a
//! whole run.
//!
//! One driver owns the transformer state and (in tail mode) the window
//! buffer for the run's duration, processing inputs strictly in argument
//! order. A failed open or read is recorded and the next input is tried;
//! the head quota spans the entire invocation and halts all reads once
//! satisfied.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::chunk::{CHUNK_LEN, ChunkReader};
use crate::config::{OutputMode, TransformConfig};
use crate::error::CatError;
use crate::transform::{Fragment, LineTransformer};
use crate::window::WindowBuffer;

/// One input stream: a named file, or standard input (the `-` argument).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    Path(PathBuf),
}

impl Input {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Input::Stdin
        } else {
            Input::Path(PathBuf::from(arg))
        }
    }

    /// The name used in error reports.
    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::Path(path) => path.display().to_string(),
        }
    }

    /// Open the stream, reporting failure as a per-file [`CatError`].
    pub fn open(&self) -> Result<Box<dyn Read>, CatError> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin())),
            Input::Path(path) => match File::open(path) {
                Ok(file) => Ok(Box::new(file)),
                Err(source) => Err(CatError::FileOpen {
                    path: self.name(),
                    source,
                }),
            },
        }
    }
}

/// Outcome of a run. Per-file failures did not stop processing, but a
/// non-empty list means the invocation should exit non-zero.
#[derive(Debug, Default)]
pub struct RunReport {
    pub failures: Vec<CatError>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Chunk reader → line transformer → (direct emission | window buffer).
pub struct PipelineDriver<W: Write> {
    mode: OutputMode,
    chunk_len: usize,
    transformer: LineTransformer,
    window: Option<WindowBuffer>,
    /// Lines left to emit in head mode; `Some(0)` halts the whole run.
    remaining: Option<usize>,
    out: W,
}

impl<W: Write> PipelineDriver<W> {
    pub fn new(config: TransformConfig, mode: OutputMode, out: W) -> Self {
        let window = match mode {
            OutputMode::Tail(n) => Some(WindowBuffer::new(n, CHUNK_LEN)),
            _ => None,
        };
        let remaining = match mode {
            OutputMode::Head(n) => Some(n),
            _ => None,
        };
        Self {
            mode,
            chunk_len: CHUNK_LEN,
            transformer: LineTransformer::new(config),
            window,
            remaining,
            out,
        }
    }

    /// Override the read-chunk length (and the window's record cap).
    pub fn with_chunk_len(mut self, len: usize) -> Self {
        self.chunk_len = len;
        if let OutputMode::Tail(n) = self.mode {
            self.window = Some(WindowBuffer::new(n, len));
        }
        self
    }

    /// Process the given inputs in order. Open and read failures are
    /// collected in the report; only write failures abort the run.
    pub fn run(&mut self, inputs: &[Input]) -> Result<RunReport, CatError> {
        let mut report = RunReport::default();
        for input in inputs {
            if self.quota_exhausted() {
                break;
            }
            let reader = match input.open() {
                Ok(reader) => reader,
                Err(e) => {
                    report.failures.push(e);
                    continue;
                }
            };
            match self.feed(&input.name(), reader) {
                Ok(()) => {}
                Err(e @ CatError::Read { .. }) => report.failures.push(e),
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Process one stream. Partial-line and blank-run state reset at this
    /// boundary; line numbering continues.
    pub fn feed(&mut self, name: &str, reader: impl Read) -> Result<(), CatError> {
        if self.quota_exhausted() {
            return Ok(());
        }
        self.transformer.start_stream();
        let mut chunks = ChunkReader::with_capacity(reader, self.chunk_len);
        loop {
            let chunk = match chunks.read_chunk() {
                Ok(Some(chunk)) => chunk,
                Ok(None) => return Ok(()),
                Err(source) => {
                    return Err(CatError::Read {
                        path: name.to_string(),
                        source,
                    });
                }
            };
            for fragment in self.transformer.process(chunk) {
                if self.emit(fragment)? == Flow::Stop {
                    return Ok(());
                }
            }
        }
    }

    /// Drain the tail window (if any), flush the writer, and return it.
    pub fn finish(mut self) -> Result<W, CatError> {
        if let Some(window) = self.window.as_mut() {
            for record in window.flush() {
                self.out.write_all(&record.payload)?;
            }
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn quota_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    fn emit(&mut self, fragment: Fragment) -> Result<Flow, CatError> {
        match self.window.as_mut() {
            Some(window) => window.push(&fragment.bytes, fragment.line_complete),
            None => self.out.write_all(&fragment.bytes)?,
        }
        if fragment.line_complete
            && let Some(remaining) = self.remaining.as_mut()
        {
            *remaining -= 1;
            if *remaining == 0 {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Transform one in-memory stream and return the output bytes.
pub fn transform_slice(
    input: &[u8],
    config: TransformConfig,
    mode: OutputMode,
) -> Result<Vec<u8>, CatError> {
    let mut driver = PipelineDriver::new(config, mode, Vec::new());
    driver.feed("-", input)?;
    driver.finish()
}
