//! Pivot selection policies for [`QuickSort`](crate::QuickSort).
//!
//! A policy picks one pivot *value* (never an index) from the current
//! partition, fresh at every partition step. `None` is returned only for an
//! empty candidate set.

use std::cmp::Ordering;

use rand::Rng;

/// How [`QuickSort`](crate::QuickSort) picks the pivot at each partition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PivotPolicy {
    /// The first candidate. O(1), but degrades the sort to quadratic time on
    /// already-sorted or adversarial input. Suitable when the input is known
    /// not to be presorted.
    First,
    /// The median of the first, middle and last candidates. Avoids the
    /// quadratic worst case on sorted and reverse-sorted input. Good
    /// all-round choice and the default.
    #[default]
    MedianOfThree,
    /// A uniformly random candidate. Expected log-linear partition balance,
    /// behaving much like median-of-three.
    Random,
}

impl PivotPolicy {
    /// Selects a pivot value from `candidates` under `cmp`.
    ///
    /// Returns `None` only when `candidates` is empty.
    pub fn select<T, C>(self, candidates: &[T], cmp: &C) -> Option<T>
    where
        T: Clone,
        C: Fn(&T, &T) -> Ordering,
    {
        match self {
            PivotPolicy::First => candidates.first().cloned(),
            PivotPolicy::MedianOfThree => median_of_three(candidates, cmp),
            PivotPolicy::Random => random(candidates),
        }
    }
}

fn median_of_three<T, C>(xs: &[T], cmp: &C) -> Option<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    if xs.is_empty() {
        return None;
    }
    if xs.len() < 3 {
        return Some(xs[0].clone());
    }
    let first = &xs[0];
    let mid = &xs[xs.len() / 2];
    let last = &xs[xs.len() - 1];
    let fm = cmp(first, mid);
    let fl = cmp(first, last);
    let ml = cmp(mid, last);
    let median = if fm == Ordering::Greater && fl == Ordering::Greater {
        if ml == Ordering::Greater {
            mid
        } else {
            last
        }
    } else if fm == Ordering::Less && ml == Ordering::Greater {
        if fl == Ordering::Greater {
            first
        } else {
            last
        }
    } else if fm == Ordering::Greater {
        first
    } else {
        mid
    };
    Some(median.clone())
}

fn random<T: Clone>(xs: &[T]) -> Option<T> {
    if xs.is_empty() {
        return None;
    }
    let i = rand::rng().random_range(0..xs.len());
    Some(xs[i].clone())
}
