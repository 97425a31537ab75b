//! Property-based tests for the sorting engines.

use proptest::prelude::*;
use sequitur_order::{by_key, default_compare};
use sequitur_sort::{HeapSort, PivotPolicy, QuickSort};

fn quick_sorted(items: Vec<i32>, policy: PivotPolicy) -> Vec<i32> {
    QuickSort::new(items, default_compare, policy).collect()
}

fn heap_sorted(items: Vec<i32>) -> Vec<i32> {
    HeapSort::new(items, default_compare).collect()
}

proptest! {
    /// Quicksort output is a non-decreasing permutation of its input.
    #[test]
    fn quicksort_sorts(items in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(quick_sorted(items, PivotPolicy::MedianOfThree), expected);
    }

    /// All pivot policies agree on the sorted result.
    #[test]
    fn policies_agree(items in prop::collection::vec(any::<i32>(), 0..200)) {
        let median = quick_sorted(items.clone(), PivotPolicy::MedianOfThree);
        prop_assert_eq!(quick_sorted(items.clone(), PivotPolicy::First), median.clone());
        prop_assert_eq!(quick_sorted(items, PivotPolicy::Random), median);
    }

    /// Sorting already-sorted output changes nothing (idempotence).
    #[test]
    fn quicksort_is_idempotent(items in prop::collection::vec(any::<i32>(), 0..200)) {
        let once = quick_sorted(items, PivotPolicy::MedianOfThree);
        let twice = quick_sorted(once.clone(), PivotPolicy::MedianOfThree);
        prop_assert_eq!(once, twice);
    }

    /// Quicksort never reorders elements that compare equal.
    #[test]
    fn quicksort_is_stable(keys in prop::collection::vec(0i32..8, 0..200)) {
        let items: Vec<(i32, usize)> =
            keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        let out: Vec<(i32, usize)> = QuickSort::new(
            items,
            by_key(|x: &(i32, usize)| x.0, default_compare),
            PivotPolicy::MedianOfThree,
        )
        .collect();
        for w in out.windows(2) {
            prop_assert!(w[0].0 <= w[1].0);
            if w[0].0 == w[1].0 {
                prop_assert!(w[0].1 < w[1].1);
            }
        }
    }

    /// Heapsort output is a non-decreasing permutation of its input.
    #[test]
    fn heapsort_sorts(items in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(heap_sorted(items), expected);
    }

    /// Heapsort of sorted input is the identity (idempotence).
    #[test]
    fn heapsort_is_idempotent(items in prop::collection::vec(any::<i32>(), 0..200)) {
        let once = heap_sorted(items);
        let twice = heap_sorted(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// A consumed prefix of quicksort output matches the sorted prefix.
    #[test]
    fn quicksort_prefix_matches(
        items in prop::collection::vec(any::<i32>(), 0..200),
        n in 0usize..50,
    ) {
        let mut expected = items.clone();
        expected.sort();
        expected.truncate(n);
        let prefix: Vec<i32> =
            QuickSort::new(items, default_compare, PivotPolicy::MedianOfThree)
                .take(n)
                .collect();
        prop_assert_eq!(prefix, expected);
    }
}
