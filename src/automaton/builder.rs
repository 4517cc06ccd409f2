use crate::{Automaton, Error, Symbol, Transition};

/// Helper struct for the construction of automata. It stores a list of transitions and accepting states,
/// the number of states is either given explicitly or inferred from the largest state that is mentioned.
///
/// # Example
///
/// We want to create an automaton with two states 0 and 1 over the alphabet `['a', 'b']`, in which state 0 is
/// initial and accepting. Reading `'a'` keeps the current state, while `'b'` switches between them.
/// ```
/// use automata_minimize::prelude::*;
///
/// let dfa = Automaton::builder()
///     .with_accepting([0])
///     .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .into_automaton(0) // 0 is the initial state
///     .unwrap();
/// assert_eq!(dfa.size(), 2);
/// assert!(dfa.accepts("abab".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<S = char> {
    size: Option<usize>,
    accepting: Vec<usize>,
    transitions: Vec<Transition<S>>,
}

impl<S> Default for AutomatonBuilder<S> {
    fn default() -> Self {
        Self {
            size: None,
            accepting: vec![],
            transitions: vec![],
        }
    }
}

impl<S: Symbol> AutomatonBuilder<S> {
    /// Fixes the number of states. Without this, the automaton has as many states as are necessary
    /// to contain all states that are mentioned.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = usize>>(mut self, states: I) -> Self {
        self.accepting.extend(states);
        self
    }

    /// Adds a list of transitions, each given as a triple `(source, symbol, target)`.
    pub fn with_transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (usize, S, usize)>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Transition::from));
        self
    }

    /// Builds the automaton with the given `initial` state. Fails if some state that was mentioned does not
    /// fit into an explicitly given size.
    pub fn into_automaton(self, initial: usize) -> Result<Automaton<S>, Error> {
        let size = self.size.unwrap_or_else(|| {
            self.transitions
                .iter()
                .flat_map(|t| [t.source(), t.target()])
                .chain(self.accepting.iter().copied())
                .chain(std::iter::once(initial))
                .max()
                .map_or(0, |max| max + 1)
        });

        let mut automaton = Automaton::new(size, initial)?;
        for state in self.accepting {
            automaton.set_final(state, true)?;
        }
        for transition in self.transitions {
            let Transition {
                source,
                symbol,
                target,
            } = transition;
            automaton.add_transition(source, symbol, target)?;
        }
        Ok(automaton)
    }
}
