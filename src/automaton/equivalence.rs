use std::collections::VecDeque;

use itertools::Itertools;

use crate::{
    math::{Bijection, Set},
    Automaton, Error, Symbol,
};

/// A pair of states in the product of two automata, where `None` stands for the implicit rejecting sink that
/// a run enters once a transition is missing.
type ProductState = (Option<usize>, Option<usize>);

impl<S: Symbol> Automaton<S> {
    /// Tries to find a word that is accepted by exactly one of `self` and `other`. The product of both automata
    /// is explored in breadth-first order, so the returned word is of minimal length. Returns `None` if and only
    /// if the two automata accept the same language.
    pub fn distinguishing_word(&self, other: &Automaton<S>) -> Option<Vec<S>> {
        let left = self.successor_map();
        let right = other.successor_map();
        let left_symbols = self.symbols_by_state();
        let right_symbols = other.symbols_by_state();

        let start: ProductState = (self.initial_state(), other.initial_state());
        let mut seen: Set<ProductState> = Set::from_iter([start]);
        let mut queue: VecDeque<(Vec<S>, ProductState)> = [(vec![], start)].into_iter().collect();

        while let Some((word, (l, r))) = queue.pop_front() {
            if self.accepts_in(l) != other.accepts_in(r) {
                return Some(word);
            }

            let symbols = l
                .into_iter()
                .flat_map(|q| left_symbols[q].iter())
                .chain(r.into_iter().flat_map(|q| right_symbols[q].iter()))
                .sorted()
                .dedup();
            for symbol in symbols {
                let next = (
                    l.and_then(|q| left.get(&(q, *symbol)).copied()),
                    r.and_then(|q| right.get(&(q, *symbol)).copied()),
                );
                if seen.insert(next) {
                    let mut extended = word.clone();
                    extended.push(S::clone(symbol));
                    queue.push_back((extended, next));
                }
            }
        }
        None
    }

    /// Checks whether `self` and `other` accept the same language.
    pub fn equivalent(&self, other: &Automaton<S>) -> bool {
        self.distinguishing_word(other).is_none()
    }

    /// Attempts to separate the state `left` from the state `right` by finding a word that is accepted from
    /// exactly one of them. Returns `Ok(None)` if the two states are equivalent.
    pub fn separate(&self, left: usize, right: usize) -> Result<Option<Vec<S>>, Error> {
        Ok(self
            .with_initial(left)?
            .distinguishing_word(&self.with_initial(right)?))
    }

    /// Tries to find an isomorphism between `self` and `other`, that is a bijection between their states which
    /// maps the initial state to the initial state, preserves whether a state is accepting and maps transitions
    /// to transitions. Both automata are expected to be deterministic and to have all of their states reachable,
    /// otherwise `None` is returned.
    pub fn isomorphism(&self, other: &Automaton<S>) -> Option<Bijection<usize, usize>> {
        if self.size != other.size {
            return None;
        }
        let mut bijection = Bijection::new();
        if self.size == 0 {
            return Some(bijection);
        }

        let left = self.sorted_edges();
        let right = other.sorted_edges();

        bijection.insert(self.initial, other.initial);
        let mut queue = vec![(self.initial, other.initial)];
        while let Some((p, q)) = queue.pop() {
            if self.accepting.contains(p) != other.accepting.contains(q)
                || left[p].len() != right[q].len()
            {
                return None;
            }
            for ((a, p_next), (b, q_next)) in left[p].iter().zip(right[q].iter()) {
                if a != b {
                    return None;
                }
                match (
                    bijection.get_by_left(p_next),
                    bijection.get_by_right(q_next),
                ) {
                    (None, None) => {
                        bijection.insert(*p_next, *q_next);
                        queue.push((*p_next, *q_next));
                    }
                    (Some(x), Some(y)) if x == q_next && y == p_next => {}
                    _ => return None,
                }
            }
        }

        (bijection.len() == self.size).then_some(bijection)
    }

    fn initial_state(&self) -> Option<usize> {
        (self.size > 0).then_some(self.initial)
    }

    fn accepts_in(&self, state: Option<usize>) -> bool {
        state.map_or(false, |q| self.accepting.contains(q))
    }

    fn symbols_by_state(&self) -> Vec<Vec<&S>> {
        let mut symbols = vec![vec![]; self.size];
        for t in &self.transitions {
            symbols[t.source].push(&t.symbol);
        }
        symbols
    }

    fn sorted_edges(&self) -> Vec<Vec<(&S, usize)>> {
        let mut edges = vec![vec![]; self.size];
        for t in &self.transitions {
            edges[t.source].push((&t.symbol, t.target));
        }
        for outgoing in edges.iter_mut() {
            outgoing.sort();
        }
        edges
    }
}
