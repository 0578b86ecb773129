//! Run configuration: the transform flag set and the output mode.
//!
//! The CLI layer builds these values and hands them to the
//! [`PipelineDriver`](crate::driver::PipelineDriver); the engine itself
//! never inspects argv.

/// Number of lines retained/printed when head or tail is requested
/// without an explicit count.
pub const DEFAULT_WINDOW_LINES: usize = 10;

/// How much of the (transformed) stream reaches the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Emit every line as it is produced.
    All,
    /// Emit only the first `n` lines, then stop reading entirely.
    Head(usize),
    /// Retain the last `n` lines and emit them once all input is exhausted.
    Tail(usize),
}

/// Which lines receive a line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numbering {
    None,
    /// Every non-suppressed line.
    All,
    /// Only lines whose first byte is not a newline.
    NonBlank,
}

/// The set of enabled per-line transforms, one field per flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformConfig {
    /// Number all output lines.
    pub number_all: bool,
    /// Number nonempty output lines; overrides `number_all`.
    pub number_nonblank: bool,
    /// Append `$` at the end of each line.
    pub show_ends: bool,
    /// Display TAB characters as `^I`.
    pub show_tabs: bool,
    /// Use `^` and `M-` notation, except for LFD and TAB.
    pub show_nonprinting: bool,
    /// Suppress repeated empty output lines.
    pub squeeze_blank: bool,
}

impl TransformConfig {
    /// True when no transform is enabled and output must reproduce the
    /// input byte-for-byte.
    pub fn is_passthrough(&self) -> bool {
        !(self.number_all
            || self.number_nonblank
            || self.show_ends
            || self.show_tabs
            || self.show_nonprinting
            || self.squeeze_blank)
    }

    /// The effective numbering policy; nonblank numbering wins when both
    /// flags are set.
    pub fn numbering(&self) -> Numbering {
        if self.number_nonblank {
            Numbering::NonBlank
        } else if self.number_all {
            Numbering::All
        } else {
            Numbering::None
        }
    }
}
