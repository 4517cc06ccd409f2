use thiserror::Error;

/// Errors that can occur when building, querying or minimizing an [`Automaton`](crate::Automaton)
/// or when operating on a [`Partition`](crate::Partition).
///
/// All errors are raised before anything is modified, so a failed call leaves its receiver untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A state was given that does not exist.
    #[error("state {state} does not exist in an automaton with {size} states")]
    StateOutOfRange {
        /// The offending state.
        state: usize,
        /// The number of states of the automaton.
        size: usize,
    },
    /// The initial state of a new automaton does not exist.
    #[error("initial state {initial} does not exist in an automaton with {size} states")]
    InitialOutOfRange {
        /// The requested initial state.
        initial: usize,
        /// The number of states of the automaton.
        size: usize,
    },
    /// Some state has more than one outgoing transition on the same symbol.
    #[error("state {state} has more than one outgoing transition on symbol {symbol}")]
    NonDeterministic {
        /// The state with the conflicting transitions.
        state: usize,
        /// Debug representation of the symbol on which the transitions overlap.
        symbol: String,
    },
    /// An element was given that is not part of the universe of a partition.
    #[error("element {element} is not part of a universe with {size} elements")]
    ElementOutOfRange {
        /// The offending element.
        element: usize,
        /// The size of the universe.
        size: usize,
    },
    /// The element has previously been discarded from the partition.
    #[error("element {0} has been discarded from the partition")]
    Discarded(usize),
    /// Grouping by key is only possible on a partition that has not been modified yet.
    #[error("partition has already been refined")]
    AlreadyRefined,
}
