//! multiscan: multi-pattern substring search over an Aho-Corasick automaton
//!
//! A dictionary of byte patterns is compiled into a trie augmented with
//! failure links. A single pass over any input text then reports every
//! occurrence of every pattern, in time proportional to the text length plus
//! the number of hits.
//!
//! Matching operates on **bytes**: pattern text and scanned text are byte
//! sequences and one transition consumes one byte. Callers working in a
//! different code-unit domain must encode patterns and text the same way
//! before handing them in.
//!
//! ```
//! use multiscan::{Automaton, Pattern};
//!
//! let mut automaton = Automaton::new();
//! automaton.add(Pattern::new("greeting", "hello")).unwrap();
//! automaton.add(Pattern::new("quantity", "lot")).unwrap();
//! automaton.finalize();
//!
//! // Reported positions are one past the last matched byte.
//! let mut ends = Vec::new();
//! automaton
//!     .scan_from(
//!         b"a lot of hello",
//!         0,
//!         |hit, _text, ends: &mut Vec<usize>| {
//!             ends.push(hit.position);
//!             false // keep scanning
//!         },
//!         &mut ends,
//!     )
//!     .unwrap();
//! assert_eq!(ends, vec![5, 14]);
//! ```
//!
//! For chunked input use the stateful [`Automaton::scan`], which carries its
//! cursor across calls; for concurrent use see [`SharedAutomaton`].

mod automaton;

pub use automaton::{Automaton, Match, SharedAutomaton, PATTERN_MAX_LEN};

use std::fmt;

/// Errors reported while building or scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultiscanError {
    /// `add` was called after `finalize`.
    Closed,
    /// The pattern text was empty.
    ZeroLength,
    /// The pattern text exceeded [`PATTERN_MAX_LEN`]; carries the offending
    /// length.
    TooLong(usize),
    /// A pattern with identical text was added before.
    Duplicate,
    /// A scan was attempted before `finalize`.
    NotFinalized,
}

impl fmt::Display for MultiscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiscanError::Closed => write!(f, "automaton is closed to further patterns"),
            MultiscanError::ZeroLength => write!(f, "empty pattern text"),
            MultiscanError::TooLong(len) => {
                write!(f, "pattern of {} bytes exceeds the {}-byte maximum", len, PATTERN_MAX_LEN)
            }
            MultiscanError::Duplicate => write!(f, "pattern text was already added"),
            MultiscanError::NotFinalized => write!(f, "automaton has not been finalized"),
        }
    }
}

impl std::error::Error for MultiscanError {}

/// A search term paired with its caller-assigned identifier.
///
/// The identifier is opaque to the engine and is handed back on every match
/// of `text`. Two patterns are considered the same term when their `text` is
/// equal, regardless of identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern<X = String> {
    /// Identifier reported back alongside each occurrence of `text`.
    pub id: X,
    /// The exact byte sequence to look for.
    pub text: Vec<u8>,
}

impl<X> Pattern<X> {
    /// Build a pattern from an identifier and the bytes to match.
    pub fn new(id: X, text: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}
