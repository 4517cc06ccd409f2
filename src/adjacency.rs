use std::ops::Index;

use crate::Transition;

/// Selects one of the two endpoints of a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The state in which a transition originates.
    Source,
    /// The state that a transition leads to.
    Target,
}

impl Endpoint {
    /// Returns the selected endpoint of `transition`.
    pub fn of<S>(self, transition: &Transition<S>) -> usize {
        match self {
            Endpoint::Source => transition.source(),
            Endpoint::Target => transition.target(),
        }
    }

    /// Returns the other endpoint.
    pub fn opposite(self) -> Self {
        match self {
            Endpoint::Source => Endpoint::Target,
            Endpoint::Target => Endpoint::Source,
        }
    }
}

/// Maps every state to the transitions whose selected [`Endpoint`] is that state. Transitions are
/// identified by their position in the slice that the index was built from.
///
/// Construction counts the number of incident transitions for each state and then fills one flat array,
/// so building takes time linear in the number of states plus the number of transitions.
///
/// ```
/// use automata_minimize::prelude::*;
///
/// let transitions = [Transition::new(0, 'a', 1), Transition::new(1, 'b', 1), Transition::new(0, 'b', 0)];
/// let outgoing = AdjacencyIndex::build(2, &transitions, Endpoint::Source);
/// assert_eq!(&outgoing[0], &[0, 2]);
/// let incoming = AdjacencyIndex::build(2, &transitions, Endpoint::Target);
/// assert_eq!(&incoming[1], &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    offsets: Vec<usize>,
    transitions: Vec<usize>,
}

impl AdjacencyIndex {
    /// Builds the index over the states `0..states` for the given `transitions`, keyed by `endpoint`.
    ///
    /// # Panics
    /// If some transition has its selected endpoint outside of `0..states`.
    pub fn build<S>(states: usize, transitions: &[Transition<S>], endpoint: Endpoint) -> Self {
        let mut offsets = vec![0; states + 1];
        for transition in transitions {
            offsets[endpoint.of(transition) + 1] += 1;
        }
        for state in 0..states {
            offsets[state + 1] += offsets[state];
        }

        let mut cursor = offsets[..states].to_vec();
        let mut ids = vec![0; transitions.len()];
        for (id, transition) in transitions.iter().enumerate() {
            let state = endpoint.of(transition);
            ids[cursor[state]] = id;
            cursor[state] += 1;
        }

        Self {
            offsets,
            transitions: ids,
        }
    }

    /// Returns the identifiers of all transitions incident to `state`, in ascending order.
    pub fn incident(&self, state: usize) -> &[usize] {
        &self.transitions[self.offsets[state]..self.offsets[state + 1]]
    }

    /// The number of states that the index covers.
    pub fn states(&self) -> usize {
        self.offsets.len() - 1
    }
}

impl Index<usize> for AdjacencyIndex {
    type Output = [usize];

    fn index(&self, state: usize) -> &Self::Output {
        self.incident(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_by_endpoint() {
        let transitions = vec![
            Transition::new(2, 'a', 0),
            Transition::new(0, 'a', 1),
            Transition::new(2, 'b', 2),
            Transition::new(0, 'b', 2),
        ];

        let outgoing = AdjacencyIndex::build(4, &transitions, Endpoint::Source);
        assert_eq!(outgoing.states(), 4);
        assert_eq!(outgoing.incident(0), &[1, 3]);
        assert!(outgoing.incident(1).is_empty());
        assert_eq!(outgoing.incident(2), &[0, 2]);
        assert!(outgoing[3].is_empty());

        let incoming = AdjacencyIndex::build(4, &transitions, Endpoint::Target);
        assert_eq!(&incoming[0], &[0]);
        assert_eq!(&incoming[1], &[1]);
        assert_eq!(&incoming[2], &[2, 3]);
    }

    #[test]
    fn endpoints() {
        let transition = Transition::new(3, 'x', 7);
        assert_eq!(Endpoint::Source.of(&transition), 3);
        assert_eq!(Endpoint::Target.of(&transition), 7);
        assert_eq!(Endpoint::Source.opposite(), Endpoint::Target);
    }

    #[test]
    fn no_states() {
        let index = AdjacencyIndex::build::<char>(0, &[], Endpoint::Source);
        assert_eq!(index.states(), 0);
    }
}
