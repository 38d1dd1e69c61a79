//! Append-only session transcript.
//!
//! Every observed protocol and status event lands here, in the exact order
//! its triggering event was delivered. Entries are never mutated or removed;
//! the transcript grows unbounded for the session's lifetime, which is
//! acceptable for a debugging tool (a capped/virtualized view belongs to the
//! presentation layer).

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// EntryKind
// ============================================================================

/// Classification of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Outbound wire text, as sent.
    Written,
    /// Inbound wire text, verbatim.
    Read,
    /// Lifecycle notice ("Connected!", "Disconnected!").
    Status,
    /// Recovered failure: parse errors, transport errors.
    Error,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Written => "written",
            Self::Read => "read",
            Self::Status => "status",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

// ============================================================================
// TranscriptEntry
// ============================================================================

/// One transcript line. Ordering is by arrival; there is no timestamp field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Entry classification.
    pub kind: EntryKind,

    /// Entry text.
    pub text: String,
}

impl TranscriptEntry {
    /// Creates an entry of the given kind.
    #[inline]
    #[must_use]
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Creates a `Written` entry.
    #[inline]
    #[must_use]
    pub fn written(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Written, text)
    }

    /// Creates a `Read` entry.
    #[inline]
    #[must_use]
    pub fn read(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Read, text)
    }

    /// Creates a `Status` entry.
    #[inline]
    #[must_use]
    pub fn status(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Status, text)
    }

    /// Creates an `Error` entry.
    #[inline]
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Error, text)
    }
}

// ============================================================================
// Transcript
// ============================================================================

/// Ordered, append-only log of all observed events.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Entries in arrival order.
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    #[inline]
    pub fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries in arrival order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries have been appended.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(TranscriptEntry::written("w").kind, EntryKind::Written);
        assert_eq!(TranscriptEntry::read("r").kind, EntryKind::Read);
        assert_eq!(TranscriptEntry::status("s").kind, EntryKind::Status);
        assert_eq!(TranscriptEntry::error("e").kind, EntryKind::Error);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::status("Connected!"));
        transcript.append(TranscriptEntry::read("pong"));

        let texts: Vec<_> = transcript.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["Connected!", "pong"]);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EntryKind::Written.to_string(), "written");
        assert_eq!(EntryKind::Error.to_string(), "error");
    }

    #[test]
    fn test_entry_serializes_with_lowercase_kind() {
        let entry = TranscriptEntry::status("Connected!");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"kind":"status","text":"Connected!"}"#);
    }
}
