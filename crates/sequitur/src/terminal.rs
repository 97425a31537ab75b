//! Terminal operations.
//!
//! Terminals open a cursor and drain it (fully or until a short-circuit),
//! producing a concrete value. Terminals that need at least one element
//! return [`Result`]; their `_or` variants take a fallback instead.
//!
//! Ties in `min`/`max` and their key variants resolve toward the **later**
//! element.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Write};
use std::hash::Hash;

use bigdecimal::BigDecimal;
use sequitur_order::default_compare;
use sequitur_skiplist::SkipList;

use crate::decimal::{decimal_to_f64, ToDecimal};
use crate::error::{Result, SequenceError};
use crate::sequence::Sequence;

impl<T: 'static> Sequence<T> {
    // ===== Collectors =====

    /// Drains into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Drains into a `HashSet`, deduplicating.
    pub fn to_set(&self) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        self.iter().collect()
    }

    /// Counts occurrences per distinct element.
    pub fn to_counter(&self) -> HashMap<T, usize>
    where
        T: Eq + Hash,
    {
        let mut counts = HashMap::new();
        for x in self.iter() {
            *counts.entry(x).or_insert(0) += 1;
        }
        counts
    }

    /// Indexes elements by an extracted key. A later element with the same
    /// key displaces the earlier one.
    pub fn to_map<K: Eq + Hash>(&self, mut key: impl FnMut(&T) -> K) -> HashMap<K, T> {
        let mut map = HashMap::new();
        for x in self.iter() {
            map.insert(key(&x), x);
        }
        map
    }

    /// Like [`to_map`](Sequence::to_map), with a separate value selector.
    pub fn to_map_values<K: Eq + Hash, V>(
        &self,
        mut key: impl FnMut(&T) -> K,
        mut value: impl FnMut(&T) -> V,
    ) -> HashMap<K, V> {
        let mut map = HashMap::new();
        for x in self.iter() {
            map.insert(key(&x), value(&x));
        }
        map
    }

    /// Drains into a skip list ordered by the natural order.
    pub fn to_skip_list(&self) -> SkipList<T>
    where
        T: PartialOrd,
    {
        self.iter().collect()
    }

    /// Drains into a skip list ordered by `cmp`.
    pub fn to_skip_list_with(
        &self,
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> SkipList<T> {
        let mut list = SkipList::with_comparator(cmp);
        list.extend(self.iter());
        list
    }

    // ===== Folds and numeric aggregation =====

    /// Folds the elements pairwise, seeding with the first element.
    pub fn reduce(&self, mut f: impl FnMut(T, T) -> T) -> Result<T> {
        let mut cursor = self.iter();
        let mut acc = cursor
            .next()
            .ok_or(SequenceError::Empty { operation: "reduce" })?;
        for x in cursor {
            acc = f(acc, x);
        }
        Ok(acc)
    }

    /// Folds the elements into `seed`.
    pub fn fold<A>(&self, seed: A, mut f: impl FnMut(A, T) -> A) -> A {
        let mut acc = seed;
        for x in self.iter() {
            acc = f(acc, x);
        }
        acc
    }

    /// Sums the elements, accumulating exactly and collapsing to `f64` at
    /// the end. An empty sequence sums to zero.
    pub fn sum(&self) -> Result<f64>
    where
        T: ToDecimal,
    {
        Ok(decimal_to_f64(&self.sum_exact()?))
    }

    /// Sums the elements as an exact decimal.
    pub fn sum_exact(&self) -> Result<BigDecimal>
    where
        T: ToDecimal,
    {
        let mut total = BigDecimal::from(0);
        for (position, x) in self.iter().enumerate() {
            match x.to_decimal() {
                Some(d) => total += d,
                None => return Err(SequenceError::NotDecimal { position }),
            }
        }
        Ok(total)
    }

    /// Sums a numeric projection of the elements.
    pub fn sum_by<K: ToDecimal>(&self, mut value: impl FnMut(&T) -> K) -> Result<f64> {
        let mut total = BigDecimal::from(0);
        for (position, x) in self.iter().enumerate() {
            match value(&x).to_decimal() {
                Some(d) => total += d,
                None => return Err(SequenceError::NotDecimal { position }),
            }
        }
        Ok(decimal_to_f64(&total))
    }

    /// The arithmetic mean, exact until the final `f64` conversion:
    /// `[0.1, 0.2]` averages to exactly `0.15`.
    pub fn average(&self) -> Result<f64>
    where
        T: ToDecimal,
    {
        Ok(decimal_to_f64(&self.average_exact()?))
    }

    /// The arithmetic mean as an exact decimal.
    pub fn average_exact(&self) -> Result<BigDecimal>
    where
        T: ToDecimal,
    {
        let mut total = BigDecimal::from(0);
        let mut n: u64 = 0;
        for (position, x) in self.iter().enumerate() {
            match x.to_decimal() {
                Some(d) => total += d,
                None => return Err(SequenceError::NotDecimal { position }),
            }
            n += 1;
        }
        if n == 0 {
            return Err(SequenceError::Empty {
                operation: "average",
            });
        }
        Ok(total / BigDecimal::from(n))
    }

    /// The arithmetic mean of a numeric projection.
    pub fn average_by<K: ToDecimal>(&self, mut value: impl FnMut(&T) -> K) -> Result<f64> {
        let mut total = BigDecimal::from(0);
        let mut n: u64 = 0;
        for (position, x) in self.iter().enumerate() {
            match value(&x).to_decimal() {
                Some(d) => total += d,
                None => return Err(SequenceError::NotDecimal { position }),
            }
            n += 1;
        }
        if n == 0 {
            return Err(SequenceError::Empty {
                operation: "average",
            });
        }
        Ok(decimal_to_f64(&(total / BigDecimal::from(n))))
    }

    // ===== Counting and membership =====

    /// The number of elements. O(1) when the backing storage knows its size;
    /// otherwise drains the sequence, so it never returns on an infinite one.
    pub fn count(&self) -> usize {
        match self.source().exact_size() {
            Some(n) => n,
            None => self.iter().count(),
        }
    }

    /// How many elements equal `item`.
    pub fn count_item(&self, item: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|x| x == item).count()
    }

    /// How many elements satisfy `predicate`.
    pub fn count_where(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.iter().filter(|x| predicate(x)).count()
    }

    /// Whether any element equals `item`. Short-circuits.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|x| &x == item)
    }

    /// Position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of_from(item, 0)
    }

    /// Position of the first match at or after position `from`. The returned
    /// index counts from the start of the sequence.
    pub fn index_of_from(&self, item: &T, from: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter()
            .enumerate()
            .skip(from)
            .find(|(_, x)| x == item)
            .map(|(i, _)| i)
    }

    /// Position of the first element satisfying `predicate`.
    pub fn index_of_where(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.index_of_where_from(predicate, 0)
    }

    /// Position of the first predicate match at or after position `from`.
    pub fn index_of_where_from(
        &self,
        mut predicate: impl FnMut(&T) -> bool,
        from: usize,
    ) -> Option<usize> {
        self.iter()
            .enumerate()
            .skip(from)
            .find(|(_, x)| predicate(x))
            .map(|(i, _)| i)
    }

    /// The element at `index`. O(1) for vec-backed sequences; fails with
    /// [`SequenceError::OutOfRange`] past the end.
    pub fn element_at(&self, index: usize) -> Result<T> {
        if let Some(n) = self.source().exact_size() {
            if index >= n {
                return Err(SequenceError::OutOfRange { index });
            }
        }
        if let Some(x) = self.source().get(index) {
            return Ok(x);
        }
        self.iter()
            .nth(index)
            .ok_or(SequenceError::OutOfRange { index })
    }

    // ===== First / last =====

    /// The first element.
    pub fn first(&self) -> Result<T> {
        self.iter()
            .next()
            .ok_or(SequenceError::Empty { operation: "first" })
    }

    /// The first element, or `default` when empty.
    pub fn first_or(&self, default: T) -> T {
        self.iter().next().unwrap_or(default)
    }

    /// The first element satisfying `predicate`.
    pub fn first_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<T> {
        self.iter().find(|x| predicate(x)).ok_or(SequenceError::NoMatch {
            operation: "first_where",
        })
    }

    /// The first match, or `default` when none.
    pub fn first_where_or(&self, mut predicate: impl FnMut(&T) -> bool, default: T) -> T {
        self.iter().find(|x| predicate(x)).unwrap_or(default)
    }

    /// The last element. Drains the sequence.
    pub fn last(&self) -> Result<T> {
        self.iter()
            .last()
            .ok_or(SequenceError::Empty { operation: "last" })
    }

    /// The last element, or `default` when empty.
    pub fn last_or(&self, default: T) -> T {
        self.iter().last().unwrap_or(default)
    }

    /// The last element satisfying `predicate`.
    pub fn last_where(&self, mut predicate: impl FnMut(&T) -> bool) -> Result<T> {
        self.iter()
            .filter(|x| predicate(x))
            .last()
            .ok_or(SequenceError::NoMatch {
                operation: "last_where",
            })
    }

    /// The last match, or `default` when none.
    pub fn last_where_or(&self, mut predicate: impl FnMut(&T) -> bool, default: T) -> T {
        self.iter().filter(|x| predicate(x)).last().unwrap_or(default)
    }

    // ===== Extremes =====

    /// The smallest element by the natural order.
    pub fn min(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.min_with(default_compare)
    }

    /// The largest element by the natural order.
    pub fn max(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.max_with(default_compare)
    }

    /// The smallest element by `cmp`.
    pub fn min_with(&self, cmp: impl Fn(&T, &T) -> Ordering) -> Result<T> {
        let mut cursor = self.iter();
        let mut best = cursor
            .next()
            .ok_or(SequenceError::Empty { operation: "min" })?;
        for x in cursor {
            if cmp(&best, &x) != Ordering::Less {
                best = x;
            }
        }
        Ok(best)
    }

    /// The largest element by `cmp`.
    pub fn max_with(&self, cmp: impl Fn(&T, &T) -> Ordering) -> Result<T> {
        let mut cursor = self.iter();
        let mut best = cursor
            .next()
            .ok_or(SequenceError::Empty { operation: "max" })?;
        for x in cursor {
            if cmp(&best, &x) != Ordering::Greater {
                best = x;
            }
        }
        Ok(best)
    }

    /// The smallest extracted key value (not the element carrying it).
    pub fn min_of<K: PartialOrd>(&self, mut selector: impl FnMut(&T) -> K) -> Result<K> {
        let mut cursor = self.iter();
        let first = cursor
            .next()
            .ok_or(SequenceError::Empty { operation: "min_of" })?;
        let mut best = selector(&first);
        for x in cursor {
            let k = selector(&x);
            if default_compare(&best, &k) != Ordering::Less {
                best = k;
            }
        }
        Ok(best)
    }

    /// The largest extracted key value.
    pub fn max_of<K: PartialOrd>(&self, mut selector: impl FnMut(&T) -> K) -> Result<K> {
        let mut cursor = self.iter();
        let first = cursor
            .next()
            .ok_or(SequenceError::Empty { operation: "max_of" })?;
        let mut best = selector(&first);
        for x in cursor {
            let k = selector(&x);
            if default_compare(&best, &k) != Ordering::Greater {
                best = k;
            }
        }
        Ok(best)
    }

    /// The element with the smallest extracted key.
    pub fn min_by_key<K: PartialOrd>(&self, selector: impl FnMut(&T) -> K) -> Result<T> {
        self.min_by_key_with(selector, default_compare)
    }

    /// The element with the largest extracted key.
    pub fn max_by_key<K: PartialOrd>(&self, selector: impl FnMut(&T) -> K) -> Result<T> {
        self.max_by_key_with(selector, default_compare)
    }

    /// The element whose key is smallest by `cmp`.
    pub fn min_by_key_with<K>(
        &self,
        mut selector: impl FnMut(&T) -> K,
        cmp: impl Fn(&K, &K) -> Ordering,
    ) -> Result<T> {
        let mut cursor = self.iter();
        let mut best = cursor.next().ok_or(SequenceError::Empty {
            operation: "min_by_key",
        })?;
        let mut best_key = selector(&best);
        for x in cursor {
            let k = selector(&x);
            if cmp(&best_key, &k) != Ordering::Less {
                best = x;
                best_key = k;
            }
        }
        Ok(best)
    }

    /// The element whose key is largest by `cmp`.
    pub fn max_by_key_with<K>(
        &self,
        mut selector: impl FnMut(&T) -> K,
        cmp: impl Fn(&K, &K) -> Ordering,
    ) -> Result<T> {
        let mut cursor = self.iter();
        let mut best = cursor.next().ok_or(SequenceError::Empty {
            operation: "max_by_key",
        })?;
        let mut best_key = selector(&best);
        for x in cursor {
            let k = selector(&x);
            if cmp(&best_key, &k) != Ordering::Greater {
                best = x;
                best_key = k;
            }
        }
        Ok(best)
    }

    // ===== Predicates =====

    /// Whether any element satisfies `predicate`. Short-circuits.
    pub fn any(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.iter().any(|x| predicate(&x))
    }

    /// Whether every element satisfies `predicate`. Short-circuits on the
    /// first failure; vacuously true when empty.
    pub fn all(&self, mut predicate: impl FnMut(&T) -> bool) -> bool {
        self.iter().all(|x| predicate(&x))
    }

    /// Whether the sequence has no elements. O(1) for sized sources.
    pub fn is_empty(&self) -> bool {
        match self.source().exact_size() {
            Some(n) => n == 0,
            None => self.iter().next().is_none(),
        }
    }

    /// Whether this sequence and `other` share at least one element.
    pub fn overlaps(&self, other: &Sequence<T>) -> bool
    where
        T: Eq + Hash,
    {
        let pool: HashSet<T> = other.iter().collect();
        if pool.is_empty() {
            return false;
        }
        self.iter().any(|x| pool.contains(&x))
    }

    /// Element-wise comparison against any iterable, including length.
    pub fn eq_iter<I>(&self, other: I) -> bool
    where
        T: PartialEq,
        I: IntoIterator<Item = T>,
    {
        let mut a = self.iter();
        let mut b = other.into_iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }

    // ===== Rendering and side effects =====

    /// Renders the elements separated by `separator`.
    pub fn join(&self, separator: &str) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            let _ = write!(out, "{x}");
        }
        out
    }

    /// Runs `f` on every element.
    pub fn for_each(&self, mut f: impl FnMut(T)) {
        for x in self.iter() {
            f(x);
        }
    }
}
