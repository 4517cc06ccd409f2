//! Minimization of deterministic finite automata in Rust.
//!
//! An [`Automaton`] consists of a dense range of states `0..size`, a designated initial state, a set of
//! accepting states and a list of transitions, each of which is labelled with a [`Symbol`]. The transition
//! relation may be partial, a word for which some transition is missing is simply rejected. It must however be
//! deterministic, meaning every state has at most one outgoing transition for each symbol.
//!
//! The central operation is [`Automaton::minimize`], which computes the unique (up to renaming of states) automaton
//! with the fewest states that accepts the same language. This is done in the following phases
//! - states that are not reachable from the initial state are removed,
//! - states from which no accepting state can be reached are removed,
//! - accepting states are separated from rejecting ones, and finally
//! - the states and the transitions are refined simultaneously until no two states in the same block can be
//!   distinguished anymore.
//!
//! The refinement works on two instances of the general purpose [`Partition`] structure, one over the states
//! (its sets are called *blocks*) and one over the transitions (its sets are called *cords*). The two
//! communicate only through an [`AdjacencyIndex`], which maps each state to the transitions that are incident
//! to it. The overall running time is in $\mathcal{O}((n + m) \log n)$ for $n$ states and $m$ transitions.
//!
//! ```
//! use automata_minimize::prelude::*;
//!
//! // states 1 and 2 both accept on '1' and swap on '0', so they are merged
//! let dfa = Automaton::builder()
//!     .with_accepting([3])
//!     .with_transitions([
//!         (0, '0', 1),
//!         (0, '1', 2),
//!         (1, '1', 3),
//!         (2, '1', 3),
//!         (1, '0', 2),
//!         (2, '0', 1),
//!     ])
//!     .into_automaton(0)
//!     .unwrap();
//!
//! let minimal = dfa.minimize().unwrap();
//! assert_eq!(minimal.size(), 3);
//! assert!(minimal.equivalent(&dfa));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::{fmt::Debug, hash::Hash};

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_minimize::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        adjacency::{AdjacencyIndex, Endpoint},
        automaton::{Automaton, AutomatonBuilder, Transition},
        error::Error,
        math,
        partition::Partition,
        Symbol,
    };

    #[cfg(feature = "random")]
    pub use super::random::{generate_random_dfa, generate_random_words};
}

/// Contains the error type that is shared by all fallible operations of the crate.
pub mod error;
pub use error::Error;

/// This module contains some type aliases for mathematical objects which are used throughout the crate.
pub mod math;

/// Defines the [`Automaton`] type, which represents a deterministic finite automaton with a possibly
/// partial transition function.
pub mod automaton;
pub use automaton::{Automaton, Transition};

/// Implements a refinable partition over a finite universe of integers.
pub mod partition;
pub use partition::Partition;

/// Indexes the transitions of an automaton by one of their endpoints.
pub mod adjacency;
pub use adjacency::{AdjacencyIndex, Endpoint};

/// Contains the minimization algorithm.
pub mod minimization;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

/// A symbol is a label that can be used on transitions. There are no restrictions on the alphabet of an
/// automaton, symbols merely need to be comparable and hashable so that transitions can be grouped by them.
pub trait Symbol: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Symbol for T {}
