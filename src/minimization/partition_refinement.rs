use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{
    adjacency::{AdjacencyIndex, Endpoint},
    Automaton, Error, Partition, Symbol, Transition,
};

/// Computes the minimal automaton for `dfa`. The states of `dfa` are partitioned into blocks and its
/// transitions into cords. First, all states that are unreachable or from which no accepting state is
/// reachable are discarded. Then accepting and rejecting states are separated, after which blocks and
/// cords are refined against each other until both are stable.
pub(crate) fn minimize<S: Symbol>(dfa: &Automaton<S>) -> Result<Automaton<S>, Error> {
    dfa.check_deterministic()?;
    if dfa.size() == 0 {
        debug!("automaton has no states, minimal automaton accepts the empty language");
        return Ok(Automaton::empty_language());
    }
    let accepting: BitSet = dfa.accepting_states().collect();

    let mut blocks = Partition::new(dfa.size());
    blocks.mark(dfa.initial())?;
    let transitions =
        discard_unreachable(&mut blocks, dfa.transitions().to_vec(), Endpoint::Source)?;
    debug!(
        "{} of {} states are reachable, {} transitions remain",
        blocks.len(),
        dfa.size(),
        transitions.len()
    );

    mark_accepting(&mut blocks, &accepting)?;
    let transitions = discard_unreachable(&mut blocks, transitions, Endpoint::Target)?;
    if blocks.set_of(dfa.initial()).is_none() {
        debug!("no accepting state is reachable, minimal automaton accepts the empty language");
        return Ok(Automaton::empty_language());
    }
    debug!(
        "trimmed automaton has {} states and {} transitions",
        blocks.len(),
        transitions.len()
    );

    mark_accepting(&mut blocks, &accepting)?;
    blocks.split_sets();

    let cords = refine(&mut blocks, &transitions)?;
    debug!(
        "refinement stabilized with {} blocks and {} cords",
        blocks.set_count(),
        cords.set_count()
    );

    emit(dfa.initial(), &accepting, &blocks, &cords, &transitions)
}

/// Marks every accepting state that has not been discarded yet.
fn mark_accepting(blocks: &mut Partition, accepting: &BitSet) -> Result<(), Error> {
    let live: Vec<usize> = accepting
        .iter()
        .filter(|&state| blocks.set_of(state).is_some())
        .collect();
    for state in live {
        blocks.mark(state)?;
    }
    Ok(())
}

/// Starting from the states that are currently marked, follows transitions from their `from` endpoint to
/// the opposite one and marks everything that is encountered. Afterwards all unmarked states are discarded,
/// and only the transitions between remaining states are returned.
fn discard_unreachable<S: Symbol>(
    blocks: &mut Partition,
    mut transitions: Vec<Transition<S>>,
    from: Endpoint,
) -> Result<Vec<Transition<S>>, Error> {
    let adjacency = AdjacencyIndex::build(blocks.universe_size(), &transitions, from);
    let to = from.opposite();

    // everything is still in a single set, newly marked states are appended to its marked part
    let mut cursor = 0;
    while cursor < blocks.marked(0).len() {
        let state = blocks.marked(0)[cursor];
        cursor += 1;
        for &t in &adjacency[state] {
            blocks.mark(to.of(&transitions[t]))?;
        }
    }
    blocks.discard_unmarked();

    transitions.retain(|t| {
        blocks.set_of(t.source()).is_some() && blocks.set_of(t.target()).is_some()
    });
    Ok(transitions)
}

/// Refines `blocks` and the cords over `transitions` until they are stable. Cords start out as the groups of
/// transitions with the same symbol. Each cord splits the blocks into the states that have a transition in it
/// and those that do not, and each block splits the cords into the transitions that lead into it and those
/// that do not. Block `0` is never used for splitting, as its effect is implied by all other blocks.
fn refine<S: Symbol>(
    blocks: &mut Partition,
    transitions: &[Transition<S>],
) -> Result<Partition, Error> {
    let mut cords = Partition::new(transitions.len());
    cords.partition_by(|t| transitions[t].symbol())?;
    let incoming = AdjacencyIndex::build(blocks.universe_size(), transitions, Endpoint::Target);

    let mut block = 1;
    let mut cord = 0;
    while cord < cords.set_count() {
        for &t in cords.set(cord) {
            blocks.mark(transitions[t].source())?;
        }
        blocks.split_sets();
        trace!("cord {cord} leaves {} blocks", blocks.set_count());

        while block < blocks.set_count() {
            for &state in blocks.set(block) {
                for &t in &incoming[state] {
                    cords.mark(t)?;
                }
            }
            cords.split_sets();
            block += 1;
        }
        cord += 1;
    }
    Ok(cords)
}

/// Builds the quotient automaton, with one state per block. All transitions in a cord carry the same symbol
/// and lead into the same block, but their sources may lie in different blocks. Therefore one transition is
/// emitted for each block in which some transition of a cord originates.
fn emit<S: Symbol>(
    initial: usize,
    accepting: &BitSet,
    blocks: &Partition,
    cords: &Partition,
    transitions: &[Transition<S>],
) -> Result<Automaton<S>, Error> {
    let mut minimal = Automaton::new(blocks.set_count(), block_of(blocks, initial)?)?;
    for block in 0..blocks.set_count() {
        // blocks never mix accepting and rejecting states
        if accepting.contains(blocks.some_element_of(block)) {
            minimal.set_final(block, true)?;
        }
    }

    let mut last_cord = vec![usize::MAX; blocks.set_count()];
    for cord in 0..cords.set_count() {
        for &t in cords.set(cord) {
            let transition = &transitions[t];
            let source = block_of(blocks, transition.source())?;
            if last_cord[source] == cord {
                continue;
            }
            last_cord[source] = cord;
            minimal.add_transition(
                source,
                transition.symbol().clone(),
                block_of(blocks, transition.target())?,
            )?;
        }
    }
    Ok(minimal)
}

fn block_of(blocks: &Partition, state: usize) -> Result<usize, Error> {
    blocks.set_of(state).ok_or(Error::Discarded(state))
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn distinct_states_remain_distinct() {
        // 1 accepts on '1' while 2 accepts on '0', so no two states are equivalent
        let dfa = Automaton::builder()
            .with_accepting([3])
            .with_transitions([
                (0, '0', 1),
                (0, '1', 2),
                (1, '1', 3),
                (2, '0', 3),
                (1, '0', 2),
                (2, '1', 1),
            ])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 4);
        assert!(minimal.isomorphism(&dfa).is_some());
    }

    #[test_log::test]
    fn equivalent_states_are_merged() {
        let dfa = Automaton::builder()
            .with_accepting([3])
            .with_transitions([
                (0, '0', 1),
                (0, '1', 2),
                (1, '1', 3),
                (2, '1', 3),
                (1, '0', 2),
                (2, '0', 1),
            ])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        tracing::debug!("minimized\n{minimal}");

        assert_eq!(minimal.size(), 3);
        assert_eq!(minimal.transitions().len(), 4);
        assert!(minimal.is_deterministic());
        assert!(minimal.equivalent(&dfa));
        assert!(minimal.accepts("01".chars()));
        assert!(minimal.accepts("11".chars()));
        assert!(minimal.accepts("000001".chars()));
        assert!(!minimal.accepts("0".chars()));
        assert!(!minimal.accepts("1".chars()));
        assert!(!minimal.accepts("011".chars()));
    }

    #[test]
    fn unreachable_states_are_removed() {
        let dfa = Automaton::builder()
            .with_accepting([1, 2])
            .with_transitions([(0, 'a', 1), (1, 'a', 1), (2, 'b', 1)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 2);
        assert_eq!(minimal.alphabet(), vec!['a']);
        assert!(minimal.equivalent(&dfa));
        assert!(!minimal.accepts("b".chars()));
        assert!(minimal.accepts("aaa".chars()));
    }

    #[test]
    fn dead_states_are_removed() {
        let dfa = Automaton::builder()
            .with_accepting([1])
            .with_transitions([(0, 'a', 1), (0, 'b', 2), (1, 'a', 1), (2, 'a', 2), (2, 'b', 2)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 2);
        assert_eq!(minimal.transitions().len(), 2);
        assert!(minimal.is_trim());
        assert!(minimal.equivalent(&dfa));
    }

    #[test]
    fn minimal_automaton_is_preserved() {
        // words over {0, 1} of even length
        let dfa = Automaton::builder()
            .with_accepting([0])
            .with_transitions([(0, 0, 1), (0, 1, 1), (1, 0, 0), (1, 1, 0)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 2);
        assert!(minimal.isomorphism(&dfa).is_some());
        assert!(minimal.accepts([0, 1, 1, 0]));
        assert!(!minimal.accepts([1]));
    }

    #[test]
    fn sources_in_one_cord_may_differ() {
        // both 'b'-transitions lead into the accepting state, but 0 and 1 are not equivalent
        let dfa = Automaton::builder()
            .with_accepting([2])
            .with_transitions([(0, 'a', 1), (0, 'b', 2), (1, 'b', 2)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 3);
        assert_eq!(minimal.transitions().len(), 3);
        assert!(minimal.accepts("b".chars()));
        assert!(minimal.accepts("ab".chars()));
        assert!(!minimal.accepts("a".chars()));
    }

    #[test]
    fn empty_language() {
        let dfa = Automaton::builder()
            .with_size(3)
            .with_transitions([(0, 'a', 1), (1, 'a', 0)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal, Automaton::empty_language());
        assert!(minimal.equivalent(&dfa));

        let no_states = Automaton::<char>::new(0, 0).unwrap();
        assert_eq!(no_states.minimize().unwrap().size(), 1);
    }

    #[test]
    fn only_initial_state_accepting() {
        let dfa = Automaton::builder()
            .with_accepting([0])
            .with_transitions([(1, 'a', 0)])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 1);
        assert!(minimal.transitions().is_empty());
        assert_eq!(minimal.is_final(minimal.initial()), Ok(true));
    }

    #[test]
    fn arbitrary_symbols() {
        let dfa = Automaton::builder()
            .with_accepting([2, 3])
            .with_transitions([
                (0, "if".to_string(), 1),
                (1, "then".to_string(), 2),
                (1, "else".to_string(), 3),
                (2, "end".to_string(), 2),
                (3, "end".to_string(), 3),
            ])
            .into_automaton(0)
            .unwrap();
        let minimal = dfa.minimize().unwrap();
        assert_eq!(minimal.size(), 3);
        assert!(minimal.accepts(["if", "else", "end"].map(String::from)));
        assert!(!minimal.accepts(["if"].map(String::from)));
    }

    #[test]
    fn nondeterminism_is_rejected() {
        let dfa = Automaton::builder()
            .with_accepting([1])
            .with_transitions([(0, 'a', 1), (0, 'a', 0)])
            .into_automaton(0)
            .unwrap();
        assert_eq!(
            dfa.minimize(),
            Err(Error::NonDeterministic {
                state: 0,
                symbol: "'a'".to_string()
            })
        );
    }

    #[cfg(feature = "random")]
    mod random {
        use itertools::Itertools;

        use crate::prelude::*;

        fn check(dfa: &Automaton) {
            let minimal = dfa.minimize().unwrap();

            assert!(minimal.equivalent(dfa), "{dfa}\n{minimal}");
            let alphabet = dfa.alphabet();
            if !alphabet.is_empty() {
                for word in generate_random_words(&alphabet, 0, 12, 50) {
                    assert_eq!(dfa.accepts(&word), minimal.accepts(&word));
                }
            }

            assert!(minimal.is_deterministic());
            if minimal.accepting_states().next().is_some() {
                assert!(minimal.is_trim());
            } else {
                assert_eq!(minimal, Automaton::empty_language());
            }
            assert!(minimal.size() <= dfa.size().max(1));

            for (p, q) in minimal.states().tuple_combinations() {
                assert!(minimal.separate(p, q).unwrap().is_some());
            }

            let again = minimal.minimize().unwrap();
            assert!(again.isomorphism(&minimal).is_some());
        }

        #[test_log::test]
        fn random_complete_automata() {
            fastrand::seed(7);
            for size in 1..=12 {
                for _ in 0..10 {
                    check(&generate_random_dfa(2, size, 1.0));
                }
            }
        }

        #[test_log::test]
        fn random_partial_automata() {
            fastrand::seed(42);
            for size in 1..=12 {
                for _ in 0..10 {
                    check(&generate_random_dfa(3, size, 0.6));
                }
            }
        }
    }
}
