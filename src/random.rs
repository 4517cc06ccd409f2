use tracing::trace;

use crate::{Automaton, Symbol};

/// Generates a random automaton with `size` states over the first `symbols` lowercase letters, in which
/// state `0` is initial. For every state and symbol, a transition to a uniformly drawn target is inserted
/// with probability `density`, so with a `density` of `1.0` the transition function is total. Each state is
/// accepting with probability one half.
///
/// Depending on the drawn transitions, some states may be unreachable or unable to reach an accepting state.
///
/// # Panics
/// If `symbols` exceeds 26 or `size` is zero.
pub fn generate_random_dfa(symbols: usize, size: usize, density: f64) -> Automaton {
    assert!(symbols <= 26, "at most 26 symbols are supported");
    assert!(size > 0, "random automata need at least one state");

    let alphabet: Vec<char> = ('a'..='z').take(symbols).collect();
    let mut builder = Automaton::builder()
        .with_size(size)
        .with_accepting((0..size).filter(|_| fastrand::bool()));

    for state in 0..size {
        for &symbol in &alphabet {
            if fastrand::f64() < density {
                builder = builder.with_transitions([(state, symbol, fastrand::usize(..size))]);
            }
        }
    }

    let dfa = builder
        .into_automaton(0)
        .expect("all drawn states lie within the given size");
    trace!("generated random automaton\n{dfa}");
    dfa
}

/// Generates `count` random words over `alphabet`, each of which has a length in `min_len..=max_len`.
///
/// # Panics
/// If `alphabet` is empty or `min_len > max_len`.
pub fn generate_random_words<S: Symbol>(
    alphabet: &[S],
    min_len: usize,
    max_len: usize,
    count: usize,
) -> Vec<Vec<S>> {
    assert!(!alphabet.is_empty(), "cannot draw words over an empty alphabet");
    (0..count)
        .map(|_| {
            let len = fastrand::usize(min_len..=max_len);
            (0..len)
                .map(|_| alphabet[fastrand::usize(..alphabet.len())].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{generate_random_dfa, generate_random_words};

    #[test]
    fn random_dfa_sized() {
        let dfa = generate_random_dfa(2, 10, 1.0);
        assert_eq!(dfa.size(), 10);
        assert_eq!(dfa.transitions().len(), 20);
        assert!(dfa.is_deterministic());

        let sparse = generate_random_dfa(3, 10, 0.0);
        assert!(sparse.transitions().is_empty());
    }

    #[test]
    fn random_words() {
        let words = generate_random_words(&['a', 'b'], 1, 10, 20);
        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|w| (1..=10).contains(&w.len())));
        assert!(words.iter().flatten().all(|c| ['a', 'b'].contains(c)));
    }
}
