//! Trie node and edge types.
//!
//! Nodes never own each other: both outgoing edges and failure links are
//! `NodeId` arena indices, so the failure back-edges can form the cycles a
//! pointer-owning tree could not express.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::Pattern;

/// A node identifier - an index into the owning automaton's arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node": an absent edge or an unset failure link.
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    /// The root occupies the first arena slot of every automaton.
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An outgoing transition: consuming `alpha` moves the cursor to `target`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Edge {
    pub(crate) alpha: u8,
    pub(crate) target: NodeId,
}

/// A trie node.
///
/// `matched` holds only the patterns ending exactly here until finalize, when
/// every pattern reachable over the failure chain is merged in as well.
#[derive(Clone)]
pub(crate) struct Node<X> {
    /// Distance in edges from the root.
    pub(crate) depth: usize,
    /// Entering this node by an alphabet transition completes >= 1 pattern.
    pub(crate) is_final: bool,
    /// Deepest proper-suffix node; `NONE` until finalize (always, for the root).
    pub(crate) failure: NodeId,
    /// Outgoing edges; append-order while open, sorted by alpha once closed.
    pub(crate) edges: SmallVec<[Edge; 4]>,
    /// Patterns reported when this node is entered by an alphabet transition.
    pub(crate) matched: SmallVec<[Arc<Pattern<X>>; 1]>,
}

impl<X> Node<X> {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            depth,
            is_final: false,
            failure: NodeId::NONE,
            edges: SmallVec::new(),
            matched: SmallVec::new(),
        }
    }

    /// Linear edge lookup; correct whether or not the edges have been sorted.
    pub(crate) fn find_next(&self, alpha: u8) -> NodeId {
        self.edges
            .iter()
            .find(|e| e.alpha == alpha)
            .map_or(NodeId::NONE, |e| e.target)
    }

    /// Binary-search edge lookup; requires `sort_edges` to have run.
    #[inline]
    pub(crate) fn find_next_sorted(&self, alpha: u8) -> NodeId {
        match self.edges.binary_search_by_key(&alpha, |e| e.alpha) {
            Ok(pos) => self.edges[pos].target,
            Err(_) => NodeId::NONE,
        }
    }

    /// Pattern equality is on text alone; identifiers do not participate.
    pub(crate) fn has_pattern(&self, pattern: &Pattern<X>) -> bool {
        self.matched.iter().any(|p| p.text == pattern.text)
    }

    /// Idempotent: a pattern whose text is already present is not added again.
    pub(crate) fn register_pattern(&mut self, pattern: Arc<Pattern<X>>) {
        if !self.has_pattern(&pattern) {
            self.matched.push(pattern);
        }
    }

    /// Order edges by alpha so the scanner can binary-search them.
    pub(crate) fn sort_edges(&mut self) {
        self.edges.sort_unstable_by_key(|e| e.alpha);
    }
}
