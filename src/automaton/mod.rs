//! Aho-Corasick automaton: trie construction, finalization, scanning.
//!
//! The automaton goes through two phases. While *open* it is a plain trie:
//! `add` walks each pattern from the root, allocating arena nodes as needed.
//! `finalize` computes failure links breadth-first, merges matched-pattern
//! sets down each failure chain, sorts every node's edges for binary search,
//! and closes the automaton. A closed automaton is immutable and searchable.
//!
//! # Module Organization
//!
//! - `node`: trie node and edge types, per-node transition lookup
//! - `arena`: append-only node storage addressed by `NodeId`
//! - `trie`: the `Automaton` itself - `add` and `finalize`
//! - `scanner`: the transition loop, stateful and stateless entry points
//! - `thread_safe`: `SharedAutomaton`, a Send + Sync facade

mod arena;
mod node;
mod scanner;
mod thread_safe;
mod trie;

pub use scanner::Match;
pub use thread_safe::SharedAutomaton;
pub use trie::{Automaton, PATTERN_MAX_LEN};
