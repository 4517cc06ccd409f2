use std::{borrow::Borrow, fmt::Display, ops::Range};

use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    adjacency::{AdjacencyIndex, Endpoint},
    math::{Map, Set},
    Error, Symbol,
};

mod builder;
pub use builder::AutomatonBuilder;

mod equivalence;

/// A transition from `source` to `target` which is labelled with `symbol`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition<S = char> {
    source: usize,
    symbol: S,
    target: usize,
}

impl<S> Transition<S> {
    /// Creates a new transition.
    pub fn new(source: usize, symbol: S, target: usize) -> Self {
        Self {
            source,
            symbol,
            target,
        }
    }

    /// The state in which the transition originates.
    pub fn source(&self) -> usize {
        self.source
    }

    /// The symbol that the transition is labelled with.
    pub fn symbol(&self) -> &S {
        &self.symbol
    }

    /// The state that the transition leads to.
    pub fn target(&self) -> usize {
        self.target
    }
}

impl<S> From<(usize, S, usize)> for Transition<S> {
    fn from((source, symbol, target): (usize, S, usize)) -> Self {
        Self::new(source, symbol, target)
    }
}

/// A deterministic finite automaton whose states are the dense range `0..size`. The transition function
/// may be partial, if a run gets stuck because a transition is missing, the word is rejected.
///
/// Transitions and accepting states are added incrementally after creation, the number of states and the
/// initial state are fixed. Every operation that takes a state checks that it exists and returns
/// [`Error::StateOutOfRange`] otherwise.
///
/// Determinism, i.e. the absence of two transitions with the same source and symbol, is not checked when
/// transitions are added. It is checked by [`Automaton::minimize`], and can be checked explicitly through
/// [`Automaton::check_deterministic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<S = char> {
    size: usize,
    initial: usize,
    accepting: BitSet,
    transitions: Vec<Transition<S>>,
}

impl<S: Symbol> Automaton<S> {
    /// Creates an automaton with `size` states and no transitions, in which no state is accepting.
    /// Fails if `initial` is not one of the states, unless the automaton has no states at all.
    pub fn new(size: usize, initial: usize) -> Result<Self, Error> {
        if size > 0 && initial >= size {
            return Err(Error::InitialOutOfRange { initial, size });
        }
        Ok(Self {
            size,
            initial,
            accepting: BitSet::with_capacity(size),
            transitions: vec![],
        })
    }

    /// Returns a builder, which can be used to conveniently construct an automaton from a
    /// list of transitions and accepting states.
    pub fn builder() -> AutomatonBuilder<S> {
        AutomatonBuilder::default()
    }

    /// The automaton with a single rejecting state and no transitions, which accepts the empty language.
    pub fn empty_language() -> Self {
        Self {
            size: 1,
            initial: 0,
            accepting: BitSet::with_capacity(1),
            transitions: vec![],
        }
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the initial state.
    pub fn initial(&self) -> usize {
        self.initial
    }

    /// Returns an iterator over all states, which is simply `0..self.size()`.
    pub fn states(&self) -> Range<usize> {
        0..self.size
    }

    /// Gives the transitions in the order in which they were added.
    pub fn transitions(&self) -> &[Transition<S>] {
        &self.transitions
    }

    /// Adds a transition from `source` on `symbol` to `target`.
    pub fn add_transition(&mut self, source: usize, symbol: S, target: usize) -> Result<(), Error> {
        self.check_state(source)?;
        self.check_state(target)?;
        self.transitions.push(Transition::new(source, symbol, target));
        Ok(())
    }

    /// Sets whether `state` is accepting.
    pub fn set_final(&mut self, state: usize, is_final: bool) -> Result<(), Error> {
        self.check_state(state)?;
        if is_final {
            self.accepting.insert(state);
        } else {
            self.accepting.remove(state);
        }
        Ok(())
    }

    /// Returns true if and only if `state` is accepting.
    pub fn is_final(&self, state: usize) -> Result<bool, Error> {
        self.check_state(state)?;
        Ok(self.accepting.contains(state))
    }

    /// Returns an iterator over the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.accepting.iter()
    }

    /// Returns the symbols that occur on some transition, sorted and without duplicates.
    pub fn alphabet(&self) -> Vec<S> {
        self.transitions
            .iter()
            .map(|t| t.symbol.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Returns an iterator over all transitions that originate in `state`.
    pub fn edges_from(&self, state: usize) -> Result<impl Iterator<Item = &Transition<S>>, Error> {
        self.check_state(state)?;
        Ok(self.transitions.iter().filter(move |t| t.source == state))
    }

    /// Returns the state that is reached from `state` on `symbol`, or `None` if no such transition exists.
    pub fn successor(&self, state: usize, symbol: &S) -> Result<Option<usize>, Error> {
        Ok(self
            .edges_from(state)?
            .find(|t| &t.symbol == symbol)
            .map(|t| t.target))
    }

    /// Runs `word` from the initial state and returns the state that is reached. If the run gets stuck because
    /// some transition is missing, `None` is returned.
    pub fn run<W, B>(&self, word: W) -> Option<usize>
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        if self.size == 0 {
            return None;
        }
        let successors = self.successor_map();
        word.into_iter().try_fold(self.initial, |state, symbol| {
            successors.get(&(state, symbol.borrow())).copied()
        })
    }

    /// Returns true if and only if the run on `word` from the initial state ends in an accepting state.
    ///
    /// ```
    /// use automata_minimize::prelude::*;
    ///
    /// let even = Automaton::builder()
    ///     .with_accepting([0])
    ///     .with_transitions([(0, 'a', 1), (1, 'a', 0)])
    ///     .into_automaton(0)
    ///     .unwrap();
    /// assert!(even.accepts("aa".chars()));
    /// assert!(!even.accepts("aaa".chars()));
    /// assert!(!even.accepts("b".chars()));
    /// ```
    pub fn accepts<W, B>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        self.run(word)
            .map(|state| self.accepting.contains(state))
            .unwrap_or(false)
    }

    /// Returns true if no state has two outgoing transitions on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        self.check_deterministic().is_ok()
    }

    /// Verifies that no state has two outgoing transitions on the same symbol. If there is such a state,
    /// [`Error::NonDeterministic`] is returned for the first conflict that is found.
    pub fn check_deterministic(&self) -> Result<(), Error> {
        let mut seen: Set<(usize, &S)> = Set::default();
        for transition in &self.transitions {
            if !seen.insert((transition.source, &transition.symbol)) {
                return Err(Error::NonDeterministic {
                    state: transition.source,
                    symbol: format!("{:?}", transition.symbol),
                });
            }
        }
        Ok(())
    }

    /// Returns a copy of `self` in which `state` is the initial state.
    pub fn with_initial(&self, state: usize) -> Result<Self, Error> {
        self.check_state(state)?;
        Ok(Self {
            initial: state,
            ..self.clone()
        })
    }

    /// Computes the set of states that can be reached from the initial state.
    pub fn reachable_states(&self) -> BitSet {
        if self.size == 0 {
            return BitSet::new();
        }
        self.closure([self.initial], Endpoint::Source)
    }

    /// Computes the set of states from which some accepting state can be reached.
    pub fn coreachable_states(&self) -> BitSet {
        self.closure(self.accepting.iter(), Endpoint::Target)
    }

    /// Returns true if every state is reachable from the initial state and can reach an accepting state.
    pub fn is_trim(&self) -> bool {
        self.reachable_states().len() == self.size && self.coreachable_states().len() == self.size
    }

    /// Builds a transition table, in which each row corresponds to a state and each column to a symbol of
    /// the alphabet. The initial state is marked with an arrow and accepting states with an asterisk.
    pub fn transition_table(&self) -> String {
        let alphabet = self.alphabet();
        let successors = self.successor_map();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(alphabet.iter().map(|s| format!("{:?}", s))),
        );
        for state in self.states() {
            let mut row = vec![format!(
                "{}{}{}",
                if state == self.initial { "→" } else { "" },
                state,
                if self.accepting.contains(state) { "*" } else { "" }
            )];
            for symbol in &alphabet {
                row.push(match successors.get(&(state, symbol)) {
                    Some(target) => target.to_string(),
                    None => "-".to_string(),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Collects the transition function into a map from state and symbol to target. For a nondeterministic
    /// automaton, the transition that was added first wins.
    pub(crate) fn successor_map(&self) -> Map<(usize, &S), usize> {
        let mut successors = Map::default();
        for t in &self.transitions {
            successors.entry((t.source, &t.symbol)).or_insert(t.target);
        }
        successors
    }

    /// Returns all states that can be reached from `seeds` by following transitions from the `from` endpoint
    /// to the opposite one.
    fn closure<I: IntoIterator<Item = usize>>(&self, seeds: I, from: Endpoint) -> BitSet {
        let adjacency = AdjacencyIndex::build(self.size, &self.transitions, from);
        let to = from.opposite();

        let mut seen = BitSet::with_capacity(self.size);
        let mut queue: Vec<usize> = seeds.into_iter().filter(|&q| seen.insert(q)).collect();
        while let Some(state) = queue.pop() {
            for &t in &adjacency[state] {
                let next = to.of(&self.transitions[t]);
                if seen.insert(next) {
                    queue.push(next);
                }
            }
        }
        seen
    }

    fn check_state(&self, state: usize) -> Result<(), Error> {
        if state < self.size {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                state,
                size: self.size,
            })
        }
    }
}

impl<S: Symbol> Display for Automaton<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.transition_table())
    }
}
