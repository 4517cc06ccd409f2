use std::hash::Hash;

use crate::{math::Map, Error};

const DISCARDED: usize = usize::MAX;

/// A refinable partition of the universe `0..n`. Every element belongs to exactly one set, and
/// sets are numbered `0..set_count()` in the order in which they were created.
///
/// The partition is only ever refined. Elements can be marked, which moves them into the *marked*
/// part of their set, and a call to [`Partition::split_sets`] then separates the marked part of each
/// set from its unmarked part. Alternatively, [`Partition::discard_unmarked`] permanently removes every
/// element that is not marked.
///
/// Internally the elements are stored in one array in which every set occupies a contiguous range. The
/// marked elements of a set are kept at the front of its range, so marking an element amounts to swapping
/// it to the boundary between the marked and unmarked part. This makes [`Partition::mark`] constant time
/// and [`Partition::split_sets`] linear in the number of sets that have been touched.
///
/// ```
/// use automata_minimize::Partition;
///
/// let mut partition = Partition::new(4);
/// partition.mark(1).unwrap();
/// partition.mark(3).unwrap();
/// partition.split_sets();
///
/// assert_eq!(partition.set_count(), 2);
/// assert_eq!(partition.set_of(1), partition.set_of(3));
/// assert_ne!(partition.set_of(0), partition.set_of(1));
/// ```
#[derive(Debug, Clone)]
pub struct Partition {
    /// Permutation of the elements that have not been discarded.
    elements: Vec<usize>,
    /// Position of each element in `elements`.
    location: Vec<usize>,
    /// The set that each element belongs to.
    set_of: Vec<usize>,
    first: Vec<usize>,
    /// Marked elements of set `s` are stored in `first[s]..mid[s]`.
    mid: Vec<usize>,
    end: Vec<usize>,
    /// Sets with at least one marked element.
    touched: Vec<usize>,
}

impl Partition {
    /// Creates a new partition of the universe `0..size` which consists of a single set containing all elements.
    /// If `size` is zero, the partition has no sets at all.
    pub fn new(size: usize) -> Self {
        let (first, mid, end) = if size == 0 {
            (vec![], vec![], vec![])
        } else {
            (vec![0], vec![0], vec![size])
        };
        Self {
            elements: (0..size).collect(),
            location: (0..size).collect(),
            set_of: vec![0; size],
            first,
            mid,
            end,
            touched: vec![],
        }
    }

    /// Replaces the initial set by one set for each distinct value of `key`, where each element is placed into
    /// the set of its key. Sets are numbered in the order in which their key first occurs among the elements
    /// `0, 1, ...`.
    ///
    /// This is only possible as the very first operation on a partition, otherwise [`Error::AlreadyRefined`] is
    /// returned.
    pub fn partition_by<K, F>(&mut self, key: F) -> Result<(), Error>
    where
        K: Hash + Eq,
        F: Fn(usize) -> K,
    {
        if self.set_count() > 1 || !self.touched.is_empty() || self.len() != self.universe_size() {
            return Err(Error::AlreadyRefined);
        }

        let mut ids: Map<K, usize> = Map::default();
        let assigned: Vec<usize> = (0..self.universe_size())
            .map(|element| {
                let next = ids.len();
                *ids.entry(key(element)).or_insert(next)
            })
            .collect();

        let mut first = vec![0; ids.len()];
        for &set in &assigned {
            first[set] += 1;
        }
        let mut offset = 0;
        for start in first.iter_mut() {
            let size = *start;
            *start = offset;
            offset += size;
        }

        let mut end = first.clone();
        for (element, &set) in assigned.iter().enumerate() {
            let position = end[set];
            self.elements[position] = element;
            self.location[element] = position;
            self.set_of[element] = set;
            end[set] += 1;
        }

        self.mid = first.clone();
        self.first = first;
        self.end = end;
        Ok(())
    }

    /// Marks `element`, which places it into the marked part of its current set. Marking an element twice has
    /// no further effect.
    pub fn mark(&mut self, element: usize) -> Result<(), Error> {
        let set = self.live_set_of(element)?;
        let position = self.location[element];
        let boundary = self.mid[set];
        if position < boundary {
            return Ok(());
        }
        if boundary == self.first[set] {
            self.touched.push(set);
        }
        self.swap(position, boundary);
        self.mid[set] += 1;
        Ok(())
    }

    /// Splits every set which has some, but not all of its elements marked into two sets. One half keeps the index
    /// of the original set, while the other (the smaller one) is appended as a new set. Afterwards, no element is
    /// marked anymore.
    pub fn split_sets(&mut self) {
        for set in std::mem::take(&mut self.touched) {
            let (first, mid, end) = (self.first[set], self.mid[set], self.end[set]);
            if mid == end {
                self.mid[set] = first;
                continue;
            }

            let new = self.first.len();
            if mid - first <= end - mid {
                self.first.push(first);
                self.end.push(mid);
                self.first[set] = mid;
            } else {
                self.first.push(mid);
                self.end.push(end);
                self.end[set] = mid;
            }
            self.mid.push(self.first[new]);
            self.mid[set] = self.first[set];

            for &element in &self.elements[self.first[new]..self.end[new]] {
                self.set_of[element] = new;
            }
        }
    }

    /// Permanently removes all elements that are not marked, regardless of the set they belong to. Sets that
    /// become empty disappear and the remaining sets are renumbered densely, preserving their relative order.
    /// Afterwards, no element is marked anymore.
    pub fn discard_unmarked(&mut self) {
        let mut elements = Vec::with_capacity(self.elements.len());
        let mut first = Vec::with_capacity(self.set_count());
        let mut end = Vec::with_capacity(self.set_count());

        for set in 0..self.set_count() {
            for &element in &self.elements[self.mid[set]..self.end[set]] {
                self.set_of[element] = DISCARDED;
                self.location[element] = DISCARDED;
            }
            if self.first[set] == self.mid[set] {
                continue;
            }

            let new = first.len();
            first.push(elements.len());
            for &element in &self.elements[self.first[set]..self.mid[set]] {
                self.set_of[element] = new;
                self.location[element] = elements.len();
                elements.push(element);
            }
            end.push(elements.len());
        }

        self.elements = elements;
        self.mid = first.clone();
        self.first = first;
        self.end = end;
        self.touched.clear();
    }

    /// Returns the index of the set that `element` currently belongs to, or `None` if the element has been discarded
    /// or does not exist.
    pub fn set_of(&self, element: usize) -> Option<usize> {
        self.set_of
            .get(element)
            .copied()
            .filter(|&set| set != DISCARDED)
    }

    /// Returns the number of sets.
    pub fn set_count(&self) -> usize {
        self.first.len()
    }

    /// Returns the elements of the set with index `set`, marked ones first.
    ///
    /// # Panics
    /// If `set` is not a valid set index.
    pub fn set(&self, set: usize) -> &[usize] {
        &self.elements[self.first[set]..self.end[set]]
    }

    /// Returns the elements of `set` which are currently marked, in the order in which they were marked.
    ///
    /// # Panics
    /// If `set` is not a valid set index.
    pub fn marked(&self, set: usize) -> &[usize] {
        &self.elements[self.first[set]..self.mid[set]]
    }

    /// Returns an arbitrary element of the set with index `set`. Sets are never empty.
    ///
    /// # Panics
    /// If `set` is not a valid set index.
    pub fn some_element_of(&self, set: usize) -> usize {
        self.elements[self.first[set]]
    }

    /// The number of elements of the universe, including the discarded ones.
    pub fn universe_size(&self) -> usize {
        self.set_of.len()
    }

    /// The number of elements that have not been discarded.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if and only if every element has been discarded (or the universe is empty).
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn live_set_of(&self, element: usize) -> Result<usize, Error> {
        match self.set_of.get(element) {
            None => Err(Error::ElementOutOfRange {
                element,
                size: self.universe_size(),
            }),
            Some(&DISCARDED) => Err(Error::Discarded(element)),
            Some(&set) => Ok(set),
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.elements.swap(i, j);
        self.location[self.elements[i]] = i;
        self.location[self.elements[j]] = j;
    }
}
