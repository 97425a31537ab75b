//! The comparator contract shared by every ordering-sensitive sequitur crate.
//!
//! A comparator is any `Fn(&T, &T) -> Ordering` defining a total order over
//! `T`. The sort engines, the skip list, and the sequence pipeline all consume
//! comparators of this shape, so a comparator built here works everywhere.
//!
//! A comparator **must** be well behaved: consistent across calls,
//! anti-symmetric, and transitive. The consumers make no attempt to detect a
//! misbehaving comparator; at worst it produces misordered output or (for the
//! skip list) degraded search performance, never memory unsafety.
//!
//! # Default ordering
//!
//! [`default_compare`] is the fallback rule used whenever a caller does not
//! supply a comparator: equal is `Equal`, less is `Less`, everything else is
//! `Greater`. The "everything else" arm means incomparable pairs (for floats,
//! anything involving NaN) land on `Greater` rather than failing.
//!
//! # Example
//!
//! ```
//! use std::cmp::Ordering;
//! use sequitur_order::{by_key, default_compare, descending};
//!
//! assert_eq!(default_compare(&1, &2), Ordering::Less);
//!
//! let desc = descending(default_compare::<i32>);
//! assert_eq!(desc(&1, &2), Ordering::Greater);
//!
//! let by_len = by_key(|s: &&str| s.len(), default_compare);
//! assert_eq!(by_len(&"ab", &"c"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// Compares two values using the default fallback rule.
///
/// Equal values compare `Equal`, smaller values `Less`, and everything else —
/// including incomparable pairs such as NaN against a number — `Greater`.
pub fn default_compare<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    if a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Reverses the sense of a comparator by swapping its arguments.
pub fn descending<T, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    C: Fn(&T, &T) -> Ordering,
{
    move |a, b| cmp(b, a)
}

/// Compares elements by a key extracted from each, using `cmp` on the keys.
pub fn by_key<T, K, S, C>(selector: S, cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    S: Fn(&T) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    move |a, b| cmp(&selector(a), &selector(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_compare_orders_integers() {
        assert_eq!(default_compare(&1, &2), Ordering::Less);
        assert_eq!(default_compare(&2, &1), Ordering::Greater);
        assert_eq!(default_compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn default_compare_sends_incomparable_pairs_to_greater() {
        assert_eq!(default_compare(&f64::NAN, &1.0), Ordering::Greater);
        assert_eq!(default_compare(&1.0, &f64::NAN), Ordering::Greater);
        assert_eq!(default_compare(&f64::NAN, &f64::NAN), Ordering::Greater);
    }

    #[test]
    fn descending_swaps_arguments() {
        let desc = descending(default_compare::<i32>);
        assert_eq!(desc(&1, &2), Ordering::Greater);
        assert_eq!(desc(&2, &1), Ordering::Less);
        assert_eq!(desc(&2, &2), Ordering::Equal);
    }

    #[test]
    fn by_key_compares_extracted_keys() {
        let by_second = by_key(|p: &(i32, i32)| p.1, default_compare);
        assert_eq!(by_second(&(9, 1), &(0, 2)), Ordering::Less);
        assert_eq!(by_second(&(0, 2), &(9, 1)), Ordering::Greater);
        assert_eq!(by_second(&(0, 1), &(9, 1)), Ordering::Equal);
    }

    #[test]
    fn adapters_compose() {
        let cmp = descending(by_key(|s: &&str| s.len(), default_compare));
        assert_eq!(cmp(&"abc", &"z"), Ordering::Less);
    }
}
