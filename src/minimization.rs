pub(crate) mod partition_refinement;

use crate::{Automaton, Error, Symbol};

impl<S: Symbol> Automaton<S> {
    /// Returns the minimal automaton that accepts the same language as `self`. Its states are the equivalence
    /// classes of the states of `self` that are reachable from the initial state and from which an accepting state
    /// can be reached. This is done by partition refinement in the style of Valmari and Lehtinen, which refines
    /// the states and the transitions simultaneously and runs in time $\mathcal{O}((n + m) \log n)$.
    ///
    /// The numbering of the states in the result is unspecified, but any two results are isomorphic. If
    /// `self` accepts no word at all, the result consists of a single rejecting state without transitions.
    ///
    /// Fails with [`Error::NonDeterministic`] if some state has two outgoing transitions on the same symbol,
    /// in which case nothing is computed.
    ///
    /// ```
    /// use automata_minimize::prelude::*;
    ///
    /// // accepts words over 'a' of even length, but with a redundant copy of each state
    /// let dfa = Automaton::builder()
    ///     .with_accepting([0, 2])
    ///     .with_transitions([(0, 'a', 1), (1, 'a', 2), (2, 'a', 3), (3, 'a', 0)])
    ///     .into_automaton(0)
    ///     .unwrap();
    /// let minimal = dfa.minimize().unwrap();
    /// assert_eq!(minimal.size(), 2);
    /// assert!(minimal.accepts("aaaa".chars()));
    /// assert!(!minimal.accepts("aaa".chars()));
    /// ```
    pub fn minimize(&self) -> Result<Automaton<S>, Error> {
        partition_refinement::minimize(self)
    }
}
