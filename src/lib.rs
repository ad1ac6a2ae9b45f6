//! A deterministic finite automaton (DFA) used as an associative container mapping
//! strings over a fixed character range to arbitrary values.
//!
//! The automaton stores its states and transitions in two flat, parallel tables instead
//! of a tree of nodes. Each state is identified by its index into the tables, and for
//! each state the transition table holds one successor per symbol of the configured
//! range. Keys that share a prefix share the states along that prefix, and a lookup is a
//! deterministic walk of one table access per character, with no hashing and no
//! backtracking.
//! Two states are reserved: the *drop* state, an absorbing failure sink all missing
//! transitions point to, and the *init* state, the root every traversal starts from.
//!
//! Insertion is incremental: it follows existing transitions for as long as the new key
//! matches an already-stored prefix and sprouts fresh states only for the remaining
//! suffix. States are appended and never removed or renumbered, so ids stay stable for
//! the lifetime of the machine. The structure deliberately trades minimal state count
//! for guaranteed-deterministic incremental growth; no minimization is performed.
//!
//! The central type is [`machine::StateMachine`], constructed over a
//! [`alphabet::CharRange`]. Operations that can fail do so with a
//! [`error::MachineError`]; a failing operation never leaves the tables partially
//! mutated.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automaton_map::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::CharRange,
        error::MachineError,
        machine::{StateId, StateMachine, DROP_STATE, INIT_STATE},
    };
}

/// Defines the contiguous character range the machine transitions on.
pub mod alphabet;

/// Defines the error taxonomy for machine operations.
pub mod error;

/// Defines the automaton map itself: state table, transition table, insertion and
/// traversal.
pub mod machine;
