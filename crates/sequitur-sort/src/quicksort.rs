//! Lazily evaluated, stable, 3-way quicksort.

use std::cmp::Ordering;
use std::vec;

use crate::pivot::PivotPolicy;

/// Partitions below this size are insertion-sorted and yielded directly.
/// This is the recursion base case: it bounds the depth of the pending-frame
/// stack and beats partitioning on small runs.
const INSERTION_CUTOFF: usize = 32;

/// A lazy, stable quicksort over an owned buffer.
///
/// The sort maintains an explicit stack of frames instead of recursing: a
/// frame is either a still-unsorted partition or a sorted run ready to yield.
/// Each partition step splits the topmost unsorted frame three ways around a
/// pivot chosen by the [`PivotPolicy`] — elements comparing `Less`, `Equal`
/// and `Greater` — keeping input order within every bucket, which is what
/// makes the sort stable.
///
/// Only the frames needed to produce the elements actually consumed are ever
/// partitioned: the `Greater` side of a split stays untouched until the
/// consumer reaches it, so taking a prefix of the output costs strictly fewer
/// comparisons than draining it.
pub struct QuickSort<T, C> {
    stack: Vec<Frame<T>>,
    cmp: C,
    policy: PivotPolicy,
    remaining: usize,
}

enum Frame<T> {
    /// A partition that has not been sorted yet.
    Pending(Vec<T>),
    /// A sorted run being drained.
    Ready(vec::IntoIter<T>),
}

impl<T, C> QuickSort<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates a lazy sorted iterator over `items`.
    pub fn new(items: Vec<T>, cmp: C, policy: PivotPolicy) -> Self {
        let remaining = items.len();
        QuickSort {
            stack: vec![Frame::Pending(items)],
            cmp,
            policy,
            remaining,
        }
    }
}

impl<T, C> Iterator for QuickSort<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.stack.pop()? {
                Frame::Ready(mut run) => {
                    if let Some(x) = run.next() {
                        self.stack.push(Frame::Ready(run));
                        self.remaining -= 1;
                        return Some(x);
                    }
                }
                Frame::Pending(mut xs) => {
                    if xs.len() < INSERTION_CUTOFF {
                        insertion_sort(&mut xs, &self.cmp);
                        self.stack.push(Frame::Ready(xs.into_iter()));
                        continue;
                    }
                    let Some(pivot) = self.policy.select(&xs, &self.cmp) else {
                        continue;
                    };
                    let mut less = Vec::new();
                    let mut equal = Vec::new();
                    let mut greater = Vec::new();
                    for x in xs {
                        match (self.cmp)(&x, &pivot) {
                            Ordering::Less => less.push(x),
                            Ordering::Equal => equal.push(x),
                            Ordering::Greater => greater.push(x),
                        }
                    }
                    // Pushed in reverse yield order; `greater` stays pending
                    // until the consumer gets there.
                    self.stack.push(Frame::Pending(greater));
                    self.stack.push(Frame::Ready(equal.into_iter()));
                    self.stack.push(Frame::Pending(less));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for QuickSort<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
}

/// Stable in-place insertion sort, used below [`INSERTION_CUTOFF`].
fn insertion_sort<T, C>(xs: &mut [T], cmp: &C)
where
    C: Fn(&T, &T) -> Ordering,
{
    for i in 1..xs.len() {
        let mut j = i;
        while j > 0 && cmp(&xs[j - 1], &xs[j]) == Ordering::Greater {
            xs.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use sequitur_order::{by_key, default_compare, descending};

    fn quick_sorted(items: Vec<i32>) -> Vec<i32> {
        QuickSort::new(items, default_compare, PivotPolicy::MedianOfThree).collect()
    }

    #[test]
    fn sorts_small_inputs_through_the_insertion_path() {
        assert_eq!(quick_sorted(vec![2, 1, 3]), vec![1, 2, 3]);
        assert_eq!(quick_sorted(vec![]), Vec::<i32>::new());
        assert_eq!(quick_sorted(vec![1]), vec![1]);
    }

    #[test]
    fn sorts_inputs_above_the_cutoff() {
        let items: Vec<i32> = (0..500).map(|i| (i * 37) % 500).collect();
        let mut expected = items.clone();
        expected.sort();
        assert_eq!(quick_sorted(items), expected);
    }

    #[test]
    fn sorts_descending_with_a_reversed_comparator() {
        let out: Vec<i32> = QuickSort::new(
            vec![2, 1, 3],
            descending(default_compare),
            PivotPolicy::MedianOfThree,
        )
        .collect();
        assert_eq!(out, vec![3, 2, 1]);
    }

    #[test]
    fn every_policy_produces_sorted_output() {
        let items: Vec<i32> = (0..300).map(|i| (i * 53) % 97).collect();
        let mut expected = items.clone();
        expected.sort();
        for policy in [
            PivotPolicy::First,
            PivotPolicy::MedianOfThree,
            PivotPolicy::Random,
        ] {
            let out: Vec<i32> =
                QuickSort::new(items.clone(), default_compare, policy).collect();
            assert_eq!(out, expected, "policy {policy:?}");
        }
    }

    #[test]
    fn equal_elements_keep_their_input_order() {
        // (key, original index); comparing by key only.
        let items: Vec<(i32, usize)> = (0..200).map(|i| ((i as i32 * 7) % 5, i)).collect();
        let out: Vec<(i32, usize)> = QuickSort::new(
            items,
            by_key(|x: &(i32, usize)| x.0, default_compare),
            PivotPolicy::MedianOfThree,
        )
        .collect();
        for window in out.windows(2) {
            assert!(window[0].0 <= window[1].0);
            if window[0].0 == window[1].0 {
                assert!(window[0].1 < window[1].1, "stability violated: {window:?}");
            }
        }
    }

    #[test]
    fn consuming_a_prefix_costs_fewer_comparisons_than_a_full_drain() {
        let items: Vec<i32> = (0..1000).map(|i| (i * 379) % 1000).collect();
        let calls = Rc::new(Cell::new(0usize));

        let counter = Rc::clone(&calls);
        let mut prefix = QuickSort::new(
            items.clone(),
            move |a: &i32, b: &i32| {
                counter.set(counter.get() + 1);
                default_compare(a, b)
            },
            PivotPolicy::MedianOfThree,
        );
        assert_eq!(prefix.next(), Some(0));
        let prefix_calls = calls.get();

        calls.set(0);
        let counter = Rc::clone(&calls);
        let full: Vec<i32> = QuickSort::new(
            items,
            move |a: &i32, b: &i32| {
                counter.set(counter.get() + 1);
                default_compare(a, b)
            },
            PivotPolicy::MedianOfThree,
        )
        .collect();
        assert_eq!(full.len(), 1000);
        assert!(
            prefix_calls < calls.get(),
            "prefix took {prefix_calls} comparisons, full drain {}",
            calls.get()
        );
    }

    #[test]
    fn size_hint_tracks_remaining_elements() {
        let mut it = QuickSort::new(
            (0..100).collect::<Vec<i32>>(),
            default_compare,
            PivotPolicy::MedianOfThree,
        );
        assert_eq!(it.len(), 100);
        it.next();
        assert_eq!(it.len(), 99);
    }
}
