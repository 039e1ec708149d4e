//! The automaton: trie growth while open, finalization into searchable form.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::arena::NodeArena;
use super::node::NodeId;
use super::scanner::Cursor;
use crate::{MultiscanError, Pattern};

/// Longest pattern text accepted by [`Automaton::add`], in bytes.
pub const PATTERN_MAX_LEN: usize = 5000;

/// A multi-pattern search automaton.
///
/// Starts out *open*: [`add`](Automaton::add) grows the trie one pattern at a
/// time. [`finalize`](Automaton::finalize) computes failure links, merges
/// match sets down the failure chains, sorts edges, and closes the automaton;
/// only a closed automaton can scan. `X` is the caller's pattern-identifier
/// type and is never inspected.
///
/// Cloning is a flat copy of the node arena: a clone of a closed automaton is
/// an independent searchable snapshot with its own scan cursor.
#[derive(Clone)]
pub struct Automaton<X = String> {
    pub(crate) arena: NodeArena<X>,
    pub(crate) root: NodeId,
    /// Open means still accepting patterns; scanning requires closed.
    pub(crate) open: bool,
    pub(crate) total_patterns: usize,
    /// State of the resumable scanner, root/0 between logical streams.
    pub(crate) cursor: Cursor,
}

impl<X> Automaton<X> {
    /// Open a fresh, empty automaton holding only the root node.
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(0);
        Self {
            arena,
            root,
            open: true,
            total_patterns: 0,
            cursor: Cursor::new(),
        }
    }

    /// Add one pattern to the open automaton.
    ///
    /// Walks the trie from the root, consuming the pattern text byte by byte
    /// and allocating nodes for the untraveled tail. The terminal node becomes
    /// final and records the pattern. A pattern whose text was added before is
    /// rejected as [`MultiscanError::Duplicate`]; a pattern that is merely a
    /// prefix of an earlier one is not a duplicate.
    pub fn add(&mut self, pattern: Pattern<X>) -> Result<(), MultiscanError> {
        if !self.open {
            return Err(MultiscanError::Closed);
        }
        if pattern.text.is_empty() {
            return Err(MultiscanError::ZeroLength);
        }
        if pattern.text.len() > PATTERN_MAX_LEN {
            return Err(MultiscanError::TooLong(pattern.text.len()));
        }

        let mut node = self.root;
        for &alpha in &pattern.text {
            let next = self.arena[node].find_next(alpha);
            node = if next.is_none() {
                self.arena.create_next(node, alpha)
            } else {
                next
            };
        }

        // The full path already ending on a final node means this exact text
        // was added before.
        if self.arena[node].is_final {
            return Err(MultiscanError::Duplicate);
        }
        self.arena[node].is_final = true;
        self.arena[node].register_pattern(Arc::new(pattern));
        self.total_patterns += 1;
        Ok(())
    }

    /// Close the automaton and make it searchable.
    ///
    /// Two passes: a breadth-first failure-link pass, then a per-node pass
    /// that merges each failure chain's patterns into the node, propagates
    /// finality down the chain, and sorts the node's edges for binary search.
    /// Calling `finalize` on an already-closed automaton is a no-op.
    pub fn finalize(&mut self) {
        if !self.open {
            return;
        }
        self.link_failures();
        for index in 0..self.arena.len() {
            let id = NodeId::new(index);
            self.close_over_failures(id);
            self.arena[id].sort_edges();
        }
        self.cursor = Cursor::new();
        self.open = false;
    }

    /// Breadth-first failure-link computation.
    ///
    /// Parents are dequeued before their children, so a node's own failure
    /// link is settled by the time its children need it: the child's link is
    /// found by walking the parent's failure chain until some node carries an
    /// edge on the same alpha.
    fn link_failures(&mut self) {
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        for edge in self.arena[self.root].edges.clone() {
            self.arena[edge.target].failure = self.root;
            queue.push_back(edge.target);
        }

        while let Some(current) = queue.pop_front() {
            for edge in self.arena[current].edges.clone() {
                let mut fallback = self.arena[current].failure;
                loop {
                    let next = self.arena[fallback].find_next(edge.alpha);
                    if !next.is_none() {
                        self.arena[edge.target].failure = next;
                        break;
                    }
                    if fallback == self.root {
                        self.arena[edge.target].failure = self.root;
                        break;
                    }
                    fallback = self.arena[fallback].failure;
                }
                queue.push_back(edge.target);
            }
        }
    }

    /// Merge everything reachable over the failure chain into one node.
    ///
    /// Afterwards `matched` is the union of the node's own patterns and those
    /// of every failure ancestor, and the node is final if any ancestor is.
    /// The scanner relies on this closure to report all suffix matches from a
    /// single node without re-walking the chain.
    fn close_over_failures(&mut self, id: NodeId) {
        let mut chain = self.arena[id].failure;
        while !chain.is_none() {
            for pattern in self.arena[chain].matched.clone() {
                self.arena[id].register_pattern(pattern);
            }
            if self.arena[chain].is_final {
                self.arena[id].is_final = true;
            }
            chain = self.arena[chain].failure;
        }
    }

    /// Total number of nodes, root included.
    pub fn number_of_nodes(&self) -> usize {
        self.arena.len()
    }

    /// Number of patterns accepted so far.
    pub fn pattern_count(&self) -> usize {
        self.total_patterns
    }

    /// Whether `finalize` has run.
    pub fn is_finalized(&self) -> bool {
        !self.open
    }
}

impl<X> Default for Automaton<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X> fmt::Debug for Automaton<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("nodes", &self.arena.len())
            .field("patterns", &self.total_patterns)
            .field("finalized", &!self.open)
            .finish()
    }
}
