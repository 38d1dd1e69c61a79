//! Command history with linear recall.
//!
//! An append-only list of previously submitted lines with a cursor for
//! backward/forward navigation, independent of the transcript.
//!
//! # Cursor Model
//!
//! The cursor is an index in `[0, len]`. Index `len` is the "fresh line"
//! position: nothing selected, the operator is editing new input. Recall
//! never wraps; past either end the calls are no-ops.

// ============================================================================
// Imports
// ============================================================================

use tracing::trace;

// ============================================================================
// HistoryDirection
// ============================================================================

/// Recall navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// Toward older entries (up key).
    Previous,
    /// Toward newer entries and the fresh line (down key).
    Next,
}

// ============================================================================
// HistoryLog
// ============================================================================

/// Append-only list of submitted lines with a recall cursor.
///
/// Invariant: no two adjacent entries are equal. The entries survive across
/// sessions via [`HistoryStore`](crate::storage::HistoryStore); the cursor
/// is session-local.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    /// Entries in submission order.
    entries: Vec<String>,
    /// Recall cursor in `[0, entries.len()]`.
    cursor: usize,
}

impl HistoryLog {
    /// Creates an empty log.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Creates a log from previously stored entries, cursor on the fresh
    /// line.
    #[inline]
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let cursor = entries.len();
        Self { entries, cursor }
    }

    /// Records a submitted line and resets the cursor to the fresh line.
    ///
    /// A line equal to the current last entry is not re-appended. Returns
    /// `true` if the log changed, so the caller knows to persist.
    pub fn record(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        let appended = self.entries.last() != Some(&line);

        if appended {
            trace!(line = %line, "history entry recorded");
            self.entries.push(line);
        }
        self.cursor = self.entries.len();

        appended
    }

    /// Moves the cursor one entry back and returns the entry there.
    ///
    /// At the oldest entry (or on an empty log) this is a no-op returning
    /// `None`; the input keeps its current content.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Moves the cursor one entry forward and returns the entry there,
    /// where the position past the newest entry is the empty fresh line.
    ///
    /// At the fresh line this is a no-op returning `None`.
    pub fn recall_next(&mut self) -> Option<&str> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries.get(self.cursor).map_or("", String::as_str))
    }

    /// Moves the cursor in `direction`, returning the recalled text.
    #[inline]
    pub fn recall(&mut self, direction: HistoryDirection) -> Option<&str> {
        match direction {
            HistoryDirection::Previous => self.recall_previous(),
            HistoryDirection::Next => self.recall_next(),
        }
    }

    /// Returns the entries in submission order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the log has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the current cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

// ============================================================================
// Tests
// ============================================================================
