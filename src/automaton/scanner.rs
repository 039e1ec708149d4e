//! The scanning state machine shared by both scan entry points.
//!
//! One transition loop drives everything: consume a byte over an edge when
//! one exists, otherwise fall back along failure links without consuming,
//! otherwise (at the root) skip the byte. Hits are reported only on alphabet
//! transitions; the failure-chain merge done at finalize guarantees a node's
//! `matched` list already carries every suffix hit, so reporting on failure
//! steps would duplicate them.

use std::sync::Arc;

use super::node::NodeId;
use super::trie::Automaton;
use crate::{MultiscanError, Pattern};

/// A hit delivered to the scan callback.
#[derive(Debug)]
pub struct Match<'a, X = String> {
    /// One past the last matched byte (a 1-indexed end offset), plus the
    /// chunk base when the stateful scanner is partway through a stream.
    pub position: usize,
    /// Every pattern ending at this offset. Overlapping hits that finish on
    /// the same byte arrive together in one callback invocation.
    pub patterns: &'a [Arc<Pattern<X>>],
}

/// Scanner state: the node the last transition landed on, and the offset of
/// the current chunk within the logical input stream.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor {
    pub(crate) node: NodeId,
    pub(crate) base: usize,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self {
            node: NodeId::ROOT,
            base: 0,
        }
    }
}

impl<X> Automaton<X> {
    /// Resumable scan.
    ///
    /// With `keep_searching` false the cursor is reset first; with it true the
    /// scan continues from wherever the previous call left off, so matches
    /// straddling chunk boundaries are found and reported positions stay
    /// relative to the whole stream.
    ///
    /// The callback receives each [`Match`], the chunk being scanned, and
    /// `param`; returning `true` stops the scan. `Ok(true)` means the callback
    /// stopped the scan, `Ok(false)` that the chunk was exhausted. A stopped
    /// scan does not advance the persisted cursor, so the caller can rescan
    /// the chunk deterministically.
    pub fn scan<P, F>(
        &mut self,
        text: &[u8],
        keep_searching: bool,
        mut callback: F,
        param: &mut P,
    ) -> Result<bool, MultiscanError>
    where
        F: FnMut(&Match<'_, X>, &[u8], &mut P) -> bool,
    {
        if self.open {
            return Err(MultiscanError::NotFinalized);
        }
        if !keep_searching {
            self.cursor = Cursor::new();
        }
        let mut cursor = self.cursor;
        let stopped = self.run(&mut cursor, text, 0, &mut callback, param);
        if !stopped {
            self.cursor = cursor;
        }
        Ok(stopped)
    }

    /// Re-entrant scan starting at `start_position` within `text`.
    ///
    /// Always begins at the root with a zero base, touching no automaton
    /// state, so any number of threads may call it concurrently on the same
    /// closed automaton. Reported positions are relative to `text`; a caller
    /// chunking externally adds its own offsets.
    pub fn scan_from<P, F>(
        &self,
        text: &[u8],
        start_position: usize,
        mut callback: F,
        param: &mut P,
    ) -> Result<bool, MultiscanError>
    where
        F: FnMut(&Match<'_, X>, &[u8], &mut P) -> bool,
    {
        if self.open {
            return Err(MultiscanError::NotFinalized);
        }
        let mut cursor = Cursor::new();
        Ok(self.run(&mut cursor, text, start_position, &mut callback, param))
    }

    /// True if any pattern occurs in `text`; stops at the first hit.
    pub fn has_match(&self, text: &[u8]) -> Result<bool, MultiscanError> {
        self.scan_from(text, 0, |_, _, _: &mut ()| true, &mut ())
    }

    /// The transition loop. Returns true if the callback stopped the scan;
    /// otherwise persists the end node and advances the base into `cursor`.
    pub(crate) fn run<P, F>(
        &self,
        cursor: &mut Cursor,
        text: &[u8],
        start: usize,
        callback: &mut F,
        param: &mut P,
    ) -> bool
    where
        F: FnMut(&Match<'_, X>, &[u8], &mut P) -> bool,
    {
        let mut node = cursor.node;
        let mut p = start;

        while p < text.len() {
            let alpha = text[p];
            let next = self.arena[node].find_next_sorted(alpha);
            let via_edge = !next.is_none();
            if via_edge {
                node = next;
                p += 1;
            } else if node != self.root {
                // Fall back without consuming; depth strictly decreases, so
                // this reaches the root after finitely many steps.
                node = self.arena[node].failure;
            } else {
                p += 1;
            }

            if via_edge && self.arena[node].is_final {
                let hit = Match {
                    position: p + cursor.base,
                    patterns: &self.arena[node].matched,
                };
                if callback(&hit, text, param) {
                    return true;
                }
            }
        }

        cursor.node = node;
        cursor.base += p - start;
        false
    }
}
