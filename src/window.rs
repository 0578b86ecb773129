//! Bounded retention of the most recent N logical lines (tail mode).
//!
//! The buffer is an owned FIFO of [`LineRecord`]s, oldest first. A logical
//! line that needs more bytes than one record holds is stored as a chain
//! of consecutive records sharing a `sequence_id`. Eviction removes every
//! record of the oldest line in one step.

use std::collections::VecDeque;

/// One physical node of the window buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Logical line index; monotonic within the retention horizon. All
    /// records of one logical line share it.
    pub sequence_id: u64,
    /// True once a newline has been observed for this logical line. Only
    /// the last record of a chain can be terminated.
    pub terminated: bool,
    /// Transformed bytes, including the trailing newline when terminated.
    pub payload: Vec<u8>,
}

/// FIFO of the most recent `capacity` logical lines.
pub struct WindowBuffer {
    records: VecDeque<LineRecord>,
    capacity: usize,
    /// Per-record payload cap; oversized pushes split across records.
    record_len: usize,
    next_sequence_id: u64,
    lines_held: usize,
}

impl WindowBuffer {
    /// A window retaining `capacity` logical lines, with payloads capped
    /// at `record_len` bytes per record. Panics if `record_len` is zero.
    pub fn new(capacity: usize, record_len: usize) -> Self {
        assert!(record_len > 0, "record length must be non-zero");
        Self {
            records: VecDeque::new(),
            capacity,
            record_len,
            next_sequence_id: 0,
            lines_held: 0,
        }
    }

    /// Logical lines currently held, counting a trailing partial line.
    pub fn lines_held(&self) -> usize {
        self.lines_held
    }

    /// True once the window holds its full complement of lines.
    pub fn capacity_reached(&self) -> bool {
        self.lines_held >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a fragment. Continues the open line when the newest record
    /// is unterminated; otherwise opens a new logical line, evicting the
    /// oldest one first if the window is full. A zero-capacity window
    /// retains nothing.
    pub fn push(&mut self, bytes: &[u8], line_complete: bool) {
        if self.capacity == 0 {
            return;
        }

        let continues = self.records.back().is_some_and(|r| !r.terminated);
        if !continues {
            if self.capacity_reached() {
                self.evict_oldest();
            }
            let sequence_id = self.next_sequence_id;
            self.next_sequence_id += 1;
            self.lines_held += 1;
            self.records.push_back(LineRecord {
                sequence_id,
                terminated: false,
                payload: Vec::new(),
            });
        }

        // Fill the open record, spilling into fresh records on the same
        // sequence_id when the payload cap is hit.
        let mut rest = bytes;
        while let Some(back) = self.records.back_mut() {
            let room = self.record_len - back.payload.len();
            let take = rest.len().min(room);
            back.payload.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if rest.is_empty() {
                back.terminated = line_complete;
                break;
            }
            let sequence_id = back.sequence_id;
            self.records.push_back(LineRecord {
                sequence_id,
                terminated: false,
                payload: Vec::with_capacity(self.record_len),
            });
        }
    }

    /// Remove every record belonging to the single oldest logical line.
    pub fn evict_oldest(&mut self) {
        let Some(front) = self.records.front() else {
            return;
        };
        let oldest = front.sequence_id;
        while self.records.front().is_some_and(|r| r.sequence_id == oldest) {
            self.records.pop_front();
        }
        self.lines_held = self.lines_held.saturating_sub(1);
    }

    /// Drain the buffer in FIFO order. Called once, after all input is
    /// exhausted.
    pub fn flush(&mut self) -> Vec<LineRecord> {
        self.lines_held = 0;
        self.records.drain(..).collect()
    }
}
