//! Thread-safe facade over the automaton.
//!
//! Construction is serialized by a mutex; `finalize` freezes the automaton
//! into an atomically-swappable snapshot that stateless scans load without
//! locking. The resumable cursor sits behind its own mutex, which is exactly
//! the external serialization the stateful scanner requires.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;

use super::scanner::{Cursor, Match};
use super::trie::Automaton;
use crate::{MultiscanError, Pattern};

/// A `Send + Sync` automaton for concurrent use.
///
/// While open, [`add`](SharedAutomaton::add) goes through a build lock. After
/// [`finalize`](SharedAutomaton::finalize) the frozen automaton is published
/// once and never swapped again, so [`scan_from`](SharedAutomaton::scan_from)
/// runs lock-free from any number of threads. The resumable
/// [`scan`](SharedAutomaton::scan) serializes on a cursor mutex held for the
/// duration of the call, callback included.
pub struct SharedAutomaton<X = String> {
    /// The open automaton; taken and frozen at finalize.
    building: Mutex<Option<Automaton<X>>>,
    /// The closed automaton; stored exactly once, loaded without locking.
    frozen: ArcSwapOption<Automaton<X>>,
    /// Resumable-scan state. Node ids stay valid because `frozen` is never
    /// replaced after the one store.
    cursor: Mutex<Cursor>,
}

impl<X> SharedAutomaton<X> {
    /// Open a fresh, empty automaton behind the build lock.
    pub fn new() -> Self {
        Self {
            building: Mutex::new(Some(Automaton::new())),
            frozen: ArcSwapOption::empty(),
            cursor: Mutex::new(Cursor::new()),
        }
    }

    /// Add one pattern; fails with [`MultiscanError::Closed`] after finalize.
    pub fn add(&self, pattern: Pattern<X>) -> Result<(), MultiscanError> {
        match self.building.lock().as_mut() {
            Some(automaton) => automaton.add(pattern),
            None => Err(MultiscanError::Closed),
        }
    }

    /// Finalize and publish the frozen automaton; a second call is a no-op.
    pub fn finalize(&self) {
        let mut building = self.building.lock();
        if let Some(mut automaton) = building.take() {
            automaton.finalize();
            self.frozen.store(Some(Arc::new(automaton)));
            *self.cursor.lock() = Cursor::new();
        }
    }

    /// Resumable scan; see [`Automaton::scan`]. Concurrent callers are
    /// serialized on the shared cursor.
    pub fn scan<P, F>(
        &self,
        text: &[u8],
        keep_searching: bool,
        mut callback: F,
        param: &mut P,
    ) -> Result<bool, MultiscanError>
    where
        F: FnMut(&Match<'_, X>, &[u8], &mut P) -> bool,
    {
        let snapshot = self.snapshot()?;
        let mut cursor = self.cursor.lock();
        if !keep_searching {
            *cursor = Cursor::new();
        }
        let mut local = *cursor;
        let stopped = snapshot.run(&mut local, text, 0, &mut callback, param);
        if !stopped {
            *cursor = local;
        }
        Ok(stopped)
    }

    /// Stateless scan; see [`Automaton::scan_from`]. Lock-free.
    pub fn scan_from<P, F>(
        &self,
        text: &[u8],
        start_position: usize,
        callback: F,
        param: &mut P,
    ) -> Result<bool, MultiscanError>
    where
        F: FnMut(&Match<'_, X>, &[u8], &mut P) -> bool,
    {
        self.snapshot()?.scan_from(text, start_position, callback, param)
    }

    /// True if any pattern occurs in `text`; stops at the first hit.
    pub fn has_match(&self, text: &[u8]) -> Result<bool, MultiscanError> {
        self.snapshot()?.has_match(text)
    }

    /// Total number of nodes, root included, in whichever phase holds them.
    pub fn number_of_nodes(&self) -> usize {
        if let Some(automaton) = self.frozen.load_full() {
            return automaton.number_of_nodes();
        }
        self.building
            .lock()
            .as_ref()
            .map_or(0, |automaton| automaton.number_of_nodes())
    }

    /// Number of patterns accepted so far.
    pub fn pattern_count(&self) -> usize {
        if let Some(automaton) = self.frozen.load_full() {
            return automaton.pattern_count();
        }
        self.building
            .lock()
            .as_ref()
            .map_or(0, |automaton| automaton.pattern_count())
    }

    /// Whether `finalize` has published the frozen automaton.
    pub fn is_finalized(&self) -> bool {
        self.frozen.load().is_some()
    }

    fn snapshot(&self) -> Result<Arc<Automaton<X>>, MultiscanError> {
        self.frozen.load_full().ok_or(MultiscanError::NotFinalized)
    }
}

impl<X> Default for SharedAutomaton<X> {
    fn default() -> Self {
        Self::new()
    }
}
