//! The streaming per-line transform stage.
//!
//! [`LineTransformer`] converts one raw chunk at a time into zero or more
//! [`Fragment`]s, splitting at newlines and applying the enabled
//! transforms. A logical line may span any number of chunks: the first
//! fragment of a line carries its number (when numbering is on), and
//! continuation fragments are never re-numbered or squeeze-checked.
//!
//! Transform order per line: squeeze-blank, numbering, tab display,
//! non-printing display, end marker.

use crate::config::{Numbering, TransformConfig};

/// One ready-to-emit piece of transformed output.
///
/// `bytes` holds the transformed text including the trailing newline when
/// the fragment completes its logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub bytes: Vec<u8>,
    /// True when a newline was seen: this fragment ends the logical line.
    pub line_complete: bool,
}

/// Mutable per-stream state consumed by the transformer.
///
/// The line counter lives for the whole run and keeps counting across
/// input files; the other fields reset at each file boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamState {
    line_counter: u64,
    /// The current logical line started in an earlier chunk, so its
    /// number (if any) was already emitted and it is not a fresh line
    /// for squeeze purposes.
    line_open: bool,
    last_line_was_blank: bool,
}

impl StreamState {
    /// Line numbers handed out so far.
    pub fn lines_numbered(&self) -> u64 {
        self.line_counter
    }

    /// True when the newest fragment left its line unterminated.
    pub fn line_open(&self) -> bool {
        self.line_open
    }

    fn reset_stream_boundary(&mut self) {
        self.line_open = false;
        self.last_line_was_blank = false;
    }
}

/// Stateful chunk-to-fragments stage.
pub struct LineTransformer {
    config: TransformConfig,
    state: StreamState,
}

impl LineTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            state: StreamState::default(),
        }
    }

    /// Begin a new input stream. Partial-line and blank-run state reset;
    /// the line counter carries over.
    pub fn start_stream(&mut self) {
        self.state.reset_stream_boundary();
    }

    pub fn state(&self) -> &StreamState {
        &self.state
    }

    /// Split one raw chunk into transformed fragments, left to right.
    ///
    /// Suppressed blank lines produce no fragment and do not advance the
    /// line counter.
    pub fn process(&mut self, chunk: &[u8]) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        let mut rest = chunk;

        while !rest.is_empty() {
            let (segment, terminated) = match rest.iter().position(|&b| b == b'\n') {
                Some(i) => (&rest[..i], true),
                None => (rest, false),
            };
            rest = if terminated {
                &rest[segment.len() + 1..]
            } else {
                &[]
            };

            let starts_line = !self.state.line_open;
            let is_blank_line = starts_line && terminated && segment.is_empty();

            if self.config.squeeze_blank && starts_line {
                if is_blank_line {
                    if self.state.last_line_was_blank {
                        continue;
                    }
                    self.state.last_line_was_blank = true;
                } else {
                    self.state.last_line_was_blank = false;
                }
            }

            let mut bytes = Vec::with_capacity(segment.len() + 8);
            if starts_line && self.wants_number(is_blank_line) {
                self.state.line_counter += 1;
                bytes.extend_from_slice(format!("{:6}\t", self.state.line_counter).as_bytes());
            }
            for &b in segment {
                self.render_byte(b, &mut bytes);
            }
            if terminated {
                if self.config.show_ends {
                    bytes.push(b'$');
                }
                bytes.push(b'\n');
            }
            self.state.line_open = !terminated;

            fragments.push(Fragment {
                bytes,
                line_complete: terminated,
            });
        }

        fragments
    }

    fn wants_number(&self, is_blank_line: bool) -> bool {
        match self.config.numbering() {
            Numbering::None => false,
            Numbering::All => true,
            Numbering::NonBlank => !is_blank_line,
        }
    }

    /// Render one non-newline byte. Tab is handled by the tab rule and is
    /// exempt from the non-printing mapping.
    fn render_byte(&self, b: u8, out: &mut Vec<u8>) {
        if b == b'\t' {
            if self.config.show_tabs {
                out.extend_from_slice(b"^I");
            } else {
                out.push(b);
            }
            return;
        }
        if !self.config.show_nonprinting {
            out.push(b);
            return;
        }
        match b {
            0x00..=0x1f => {
                out.push(b'^');
                out.push(b + 64);
            }
            0x20..=0x7e => out.push(b),
            0x7f => out.extend_from_slice(b"^?"),
            0x80..=0x9f => {
                out.extend_from_slice(b"M-^");
                out.push(b - 0x60);
            }
            0xa0..=0xfe => {
                out.extend_from_slice(b"M-");
                out.push(b - 0x80);
            }
            0xff => out.extend_from_slice(b"M-^?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run `chunks` through one transformer and concatenate the output.
    fn render(config: TransformConfig, chunks: &[&[u8]]) -> Vec<u8> {
        let mut transformer = LineTransformer::new(config);
        let mut out = Vec::new();
        for chunk in chunks {
            for fragment in transformer.process(chunk) {
                out.extend_from_slice(&fragment.bytes);
            }
        }
        out
    }

    #[test]
    fn test_passthrough_is_byte_identical() {
        let inputs: &[&[u8]] = &[
            b"plain\nlines\n",
            b"no trailing newline",
            b"\n\n\n",
            b"tabs\tand\x00binary\xff\x7fbytes\n",
        ];
        for &input in inputs {
            assert_eq!(render(TransformConfig::default(), &[input]), input);
        }
    }

    #[test]
    fn test_passthrough_chunk_split_does_not_matter() {
        let config = TransformConfig::default();
        let whole = render(config, &[b"alpha\nbeta\ngamma\n"]);
        let split = render(config, &[b"alp", b"ha\nbe", b"ta\ngam", b"ma\n"]);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_number_all_lines() {
        let config = TransformConfig {
            number_all: true,
            ..Default::default()
        };
        let out = render(config, &[b"a\nb\n"]);
        assert_eq!(out, b"     1\ta\n     2\tb\n");
    }

    #[test]
    fn test_number_all_includes_blank_lines() {
        let config = TransformConfig {
            number_all: true,
            ..Default::default()
        };
        let out = render(config, &[b"a\n\nb\n"]);
        assert_eq!(out, b"     1\ta\n     2\t\n     3\tb\n");
    }

    #[test]
    fn test_number_nonblank_skips_blank_lines() {
        let config = TransformConfig {
            number_nonblank: true,
            ..Default::default()
        };
        let out = render(config, &[b"a\n\nb\n"]);
        assert_eq!(out, b"     1\ta\n\n     2\tb\n");
    }

    #[test]
    fn test_both_numbering_flags_behave_like_nonblank() {
        let both = TransformConfig {
            number_all: true,
            number_nonblank: true,
            ..Default::default()
        };
        let nonblank = TransformConfig {
            number_nonblank: true,
            ..Default::default()
        };
        let input: &[u8] = b"a\n\nb\n\n\nc\n";
        assert_eq!(render(both, &[input]), render(nonblank, &[input]));
    }

    #[test]
    fn test_line_spanning_chunks_numbered_once() {
        let config = TransformConfig {
            number_all: true,
            show_ends: true,
            ..Default::default()
        };
        let out = render(config, &[b"aa", b"bb", b"cc\n"]);
        assert_eq!(out, b"     1\taabbcc$\n");
    }

    #[test]
    fn test_continuation_fragments_are_partial_until_newline() {
        let mut transformer = LineTransformer::new(TransformConfig::default());
        let first = transformer.process(b"start");
        assert_eq!(first.len(), 1);
        assert!(!first[0].line_complete);
        assert!(transformer.state().line_open());

        let second = transformer.process(b" end\n");
        assert_eq!(second.len(), 1);
        assert!(second[0].line_complete);
        assert!(!transformer.state().line_open());
    }

    #[test]
    fn test_squeeze_blank_runs() {
        let config = TransformConfig {
            squeeze_blank: true,
            ..Default::default()
        };
        let out = render(config, &[b"a\n\n\n\nb\n"]);
        assert_eq!(out, b"a\n\nb\n");
    }

    #[test]
    fn test_squeeze_state_spans_chunks() {
        let config = TransformConfig {
            squeeze_blank: true,
            ..Default::default()
        };
        let whole = render(config, &[b"a\n\n\n\nb\n"]);
        let split = render(config, &[b"a\n\n", b"\n\nb\n"]);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_squeeze_does_not_touch_continuations() {
        // The newline that closes a line spanning two chunks is not a
        // blank line, even though the chunk holding it starts with '\n'.
        let config = TransformConfig {
            squeeze_blank: true,
            ..Default::default()
        };
        let out = render(config, &[b"\n\nxy", b"\nz\n"]);
        assert_eq!(out, b"\nxy\nz\n");
    }

    #[test]
    fn test_squeezed_lines_do_not_advance_counter() {
        let config = TransformConfig {
            squeeze_blank: true,
            number_all: true,
            ..Default::default()
        };
        let out = render(config, &[b"a\n\n\n\nb\n"]);
        assert_eq!(out, b"     1\ta\n     2\t\n     3\tb\n");
    }

    #[test]
    fn test_show_ends_marks_only_true_line_ends() {
        let config = TransformConfig {
            show_ends: true,
            ..Default::default()
        };
        assert_eq!(render(config, &[b"a\nb"]), b"a$\nb");
        assert_eq!(render(config, &[b"\n"]), b"$\n");
    }

    #[test]
    fn test_show_tabs() {
        let config = TransformConfig {
            show_tabs: true,
            ..Default::default()
        };
        assert_eq!(render(config, &[b"a\tb\t\n"]), b"a^Ib^I\n");
    }

    #[test]
    fn test_nonprinting_boundary_bytes() {
        let config = TransformConfig {
            show_nonprinting: true,
            ..Default::default()
        };
        assert_eq!(render(config, &[&[0x00]]), b"^@");
        assert_eq!(render(config, &[&[0x1f]]), b"^_");
        assert_eq!(render(config, &[&[0x7f]]), b"^?");
        assert_eq!(render(config, &[&[0x80]]), b"M-^ ");
        assert_eq!(render(config, &[&[0xa0]]), b"M- ");
        assert_eq!(render(config, &[&[0xfe]]), b"M-~");
        assert_eq!(render(config, &[&[0xff]]), b"M-^?");
        assert_eq!(render(config, &[b"plain"]), b"plain");
    }

    #[test]
    fn test_nonprinting_leaves_tab_alone() {
        let config = TransformConfig {
            show_nonprinting: true,
            ..Default::default()
        };
        assert_eq!(render(config, &[b"a\tb\n"]), b"a\tb\n");
    }

    #[test]
    fn test_stream_boundary_resets_line_state_not_counter() {
        let config = TransformConfig {
            number_all: true,
            squeeze_blank: true,
            ..Default::default()
        };
        let mut transformer = LineTransformer::new(config);
        let mut out = Vec::new();
        for fragment in transformer.process(b"one\ntwo") {
            out.extend_from_slice(&fragment.bytes);
        }
        transformer.start_stream();
        for fragment in transformer.process(b"three\n") {
            out.extend_from_slice(&fragment.bytes);
        }
        // "two" never got its newline; "three" still starts a fresh,
        // freshly-numbered line in the next stream.
        assert_eq!(out, b"     1\tone\n     2\ttwo     3\tthree\n");
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut transformer = LineTransformer::new(TransformConfig::default());
        let fragments = transformer.process(b"a\nb\nc");
        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].line_complete);
        assert!(fragments[1].line_complete);
        assert!(!fragments[2].line_complete);
    }
}
