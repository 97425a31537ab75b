//! An ordered multiset backed by a skip list.
//!
//! A skip list keeps its elements in several stacked forward-linked chains:
//! level 0 holds every element in comparator order, and each level above it
//! holds a random subset of the level below, so a search can skip long runs
//! of the bottom chain. Each inserted node draws its height by counting
//! consecutive successes of a fair coin flip, which gives expected
//! `O(log n)` insertion, lookup and removal without any rebalancing.
//!
//! Duplicates are allowed (multiset semantics): equal values sit next to each
//! other at level 0, new duplicates landing after the existing ones.
//!
//! The comparator must define a consistent total order; a misbehaving
//! comparator degrades lookup accuracy and ordering but can never corrupt
//! memory, since nodes live in an arena of `Vec` slots linked by index.
//!
//! Not thread-safe: the list assumes a single owner and has no internal
//! locking.
//!
//! ```
//! use sequitur_skiplist::SkipList;
//!
//! let mut list = SkipList::new();
//! list.extend([3, 1, 2]);
//! assert_eq!(list.to_vec(), vec![1, 2, 3]);
//! assert!(list.contains(&2));
//! assert!(list.remove(&2));
//! assert_eq!(list.len(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;

use rand::Rng;
use sequitur_order::default_compare;

/// Hard ceiling on the number of levels a node can draw.
const LEVEL_CAP: usize = 33;

struct Node<T> {
    value: T,
    /// Forward links, one per level from 0 up to the node's drawn level.
    forward: Vec<Option<usize>>,
}

/// An ordered multiset with expected-logarithmic insert, lookup and removal.
///
/// Nodes are stored in an arena (`Vec` of slots, links as indices); removed
/// slots are recycled through a free list, so long-lived lists do not grow
/// without bound under churn.
pub struct SkipList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    /// Forward links out of the head sentinel, one per level in use.
    head: Vec<Option<usize>>,
    /// Number of levels currently in use; grows lazily, at most one per
    /// insertion.
    levels: usize,
    len: usize,
    cmp: Box<dyn Fn(&T, &T) -> Ordering>,
}

impl<T: PartialOrd + 'static> SkipList<T> {
    /// Creates an empty skip list ordered by the default comparator.
    pub fn new() -> Self {
        Self::with_comparator(default_compare::<T>)
    }
}

impl<T: PartialOrd + 'static> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SkipList<T> {
    /// Creates an empty skip list ordered by `cmp`.
    pub fn with_comparator(cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        SkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: vec![None],
            levels: 1,
            len: 0,
            cmp: Box::new(cmp),
        }
    }

    /// The number of elements in the list, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value`, keeping comparator order. Duplicates are inserted
    /// after all existing equal values.
    pub fn insert(&mut self, value: T) {
        let level = self.draw_level();

        // Find the rightmost predecessor at every level (None = sentinel).
        let mut updates: Vec<Option<usize>> = vec![None; self.levels];
        let mut curr: Option<usize> = None;
        for i in (0..self.levels).rev() {
            while let Some(n) = self.next_of(curr, i) {
                if (self.cmp)(&self.node(n).value, &value) == Ordering::Greater {
                    break;
                }
                curr = Some(n);
            }
            updates[i] = curr;
        }

        let idx = self.alloc(value, level);
        for i in 0..=level {
            let next = self.next_of(updates[i], i);
            self.node_mut(idx).forward[i] = next;
            self.set_next(updates[i], i, Some(idx));
        }
        self.len += 1;
    }

    /// Returns true if some element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        let mut curr: Option<usize> = None;
        for i in (0..self.levels).rev() {
            while let Some(n) = self.next_of(curr, i) {
                match (self.cmp)(&self.node(n).value, value) {
                    Ordering::Less => curr = Some(n),
                    Ordering::Equal => return true,
                    Ordering::Greater => break,
                }
            }
        }
        false
    }

    /// Removes the first occurrence of `value` encountered on a single
    /// top-to-bottom descent, returning whether one was found.
    ///
    /// The first node that compares equal fixes the removal target; lower
    /// levels unlink that same node wherever it holds a link, leaving any
    /// other duplicates untouched.
    pub fn remove(&mut self, value: &T) -> bool {
        let mut curr: Option<usize> = None;
        let mut target: Option<usize> = None;
        for i in (0..self.levels).rev() {
            loop {
                let Some(n) = self.next_of(curr, i) else { break };
                if let Some(t) = target {
                    if n == t {
                        let after = self.node(n).forward[i];
                        self.set_next(curr, i, after);
                        break;
                    }
                    // A duplicate that sits ahead of the target at this
                    // level; step over it.
                    curr = Some(n);
                } else {
                    match (self.cmp)(&self.node(n).value, value) {
                        Ordering::Less => curr = Some(n),
                        Ordering::Equal => {
                            target = Some(n);
                            let after = self.node(n).forward[i];
                            self.set_next(curr, i, after);
                            break;
                        }
                        Ordering::Greater => break,
                    }
                }
            }
        }
        match target {
            Some(t) => {
                self.nodes[t] = None;
                self.free.push(t);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Iterates the elements in ascending comparator order by walking the
    /// level-0 chain.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            curr: self.head[0],
        }
    }

    /// Number of levels currently in use. Exposed for diagnostics and tests.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Draws a node level by counting consecutive coin-flip successes, capped
    /// at [`LEVEL_CAP`], and grows the list's level count by at most one when
    /// the draw exceeds it.
    fn draw_level(&mut self) -> usize {
        let mut rng = rand::rng();
        let mut drawn = 0;
        while drawn < LEVEL_CAP && rng.random::<bool>() {
            drawn += 1;
        }
        if drawn < self.levels {
            drawn
        } else {
            self.levels += 1;
            self.head.push(None);
            self.levels - 1
        }
    }

    fn alloc(&mut self, value: T, level: usize) -> usize {
        let node = Node {
            value,
            forward: vec![None; level + 1],
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match self.nodes[idx].as_ref() {
            Some(node) => node,
            None => unreachable!("skip list link points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match self.nodes[idx].as_mut() {
            Some(node) => node,
            None => unreachable!("skip list link points at a vacant slot"),
        }
    }

    /// The successor of `at` (None = head sentinel) at `level`, if any.
    fn next_of(&self, at: Option<usize>, level: usize) -> Option<usize> {
        match at {
            None => self.head[level],
            Some(i) => self.node(i).forward.get(level).copied().flatten(),
        }
    }

    fn set_next(&mut self, at: Option<usize>, level: usize, to: Option<usize>) {
        match at {
            None => self.head[level] = to,
            Some(i) => self.node_mut(i).forward[level] = to,
        }
    }
}

impl<T: Clone> SkipList<T> {
    /// Clones the elements into a `Vec` in ascending comparator order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: PartialOrd + 'static> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// In-order borrowing iterator over a [`SkipList`], following level 0.
pub struct Iter<'a, T> {
    list: &'a SkipList<T>,
    curr: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.curr?;
        let node = self.list.node(idx);
        self.curr = node.forward[0];
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequitur_order::descending;

    #[test]
    fn inserting_out_of_order_yields_sorted_traversal() {
        let list: SkipList<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn duplicates_are_kept() {
        let list: SkipList<i32> = [2, 1, 2, 3, 2].into_iter().collect();
        assert_eq!(list.to_vec(), vec![1, 2, 2, 2, 3]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn contains_finds_only_present_values() {
        let list: SkipList<i32> = (0..100).map(|i| i * 2).collect();
        assert!(list.contains(&42));
        assert!(!list.contains(&43));
        assert!(!SkipList::<i32>::new().contains(&0));
    }

    #[test]
    fn remove_takes_exactly_one_occurrence() {
        let mut list: SkipList<i32> = [5, 3, 5, 5, 1].into_iter().collect();
        assert!(list.remove(&5));
        assert_eq!(list.to_vec(), vec![1, 3, 5, 5]);
        assert_eq!(list.len(), 4);
        assert!(list.remove(&5));
        assert!(list.remove(&5));
        assert!(!list.remove(&5));
        assert_eq!(list.to_vec(), vec![1, 3]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_of_absent_value_changes_nothing() {
        let mut list: SkipList<i32> = [1, 2, 3].into_iter().collect();
        assert!(!list.remove(&9));
        assert_eq!(list.len(), 3);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn len_tracks_inserts_minus_successful_removals() {
        let mut list = SkipList::new();
        for i in 0..200 {
            list.insert(i % 10);
        }
        assert_eq!(list.len(), 200);
        let mut removed = 0;
        for i in 0..30 {
            if list.remove(&(i % 10)) {
                removed += 1;
            }
        }
        assert_eq!(list.len(), 200 - removed);
        assert_eq!(list.iter().count(), list.len());
    }

    #[test]
    fn removed_slots_are_recycled() {
        let mut list = SkipList::new();
        for i in 0..50 {
            list.insert(i);
        }
        for i in 0..50 {
            assert!(list.remove(&i));
        }
        assert!(list.is_empty());
        assert_eq!(list.to_vec(), Vec::<i32>::new());
        for i in 0..50 {
            list.insert(i);
        }
        assert_eq!(list.len(), 50);
        assert_eq!(list.to_vec(), (0..50).collect::<Vec<i32>>());
    }

    #[test]
    fn custom_comparator_reverses_the_order() {
        let mut list = SkipList::with_comparator(descending(default_compare::<i32>));
        list.extend([1, 3, 2]);
        assert_eq!(list.to_vec(), vec![3, 2, 1]);
        assert!(list.contains(&2));
        assert!(list.remove(&3));
        assert_eq!(list.to_vec(), vec![2, 1]);
    }

    #[test]
    fn levels_grow_lazily() {
        let mut list = SkipList::new();
        assert_eq!(list.levels(), 1);
        for i in 0..1000 {
            list.insert(i);
        }
        // With 1000 fair coin-flip draws some node almost surely exceeded
        // level 0, and growth is bounded by one level per insert.
        assert!(list.levels() > 1);
        assert!(list.levels() <= LEVEL_CAP + 1);
    }

    #[test]
    fn traversal_is_monotonic_under_churn() {
        let mut list = SkipList::new();
        for i in 0..300 {
            list.insert((i * 31) % 50);
        }
        for i in 0..100 {
            list.remove(&((i * 7) % 50));
        }
        let out = list.to_vec();
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(out.len(), list.len());
    }

    #[test]
    fn debug_renders_the_ordered_contents() {
        let list: SkipList<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }
}
