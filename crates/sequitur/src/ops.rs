//! Lazy operators.
//!
//! Every method here returns a new [`Sequence`] in O(1) without touching an
//! element. The returned sequence captures its upstream by cheap clone; work
//! happens when a cursor is opened and elements are pulled through the chain.
//!
//! Some operators cannot produce their first element without seeing the whole
//! input (`reverse`, `group_by`, `distinct_by_key`, the sort family). They are
//! still O(1) to construct; the buffering happens per cursor, at iteration
//! time.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;

use sequitur_order::default_compare;
use sequitur_sort::{HeapSort, PivotPolicy, QuickSort};

use crate::sequence::Sequence;
use crate::source::{ConcatSource, Cursor};

impl<T: 'static> Sequence<T> {
    /// Transforms each element through `f`.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Sequence<U> {
        let upstream = self.clone();
        let f = Rc::new(f);
        Sequence::lazy(move || {
            let f = Rc::clone(&f);
            Box::new(upstream.iter().map(move |x| f(x)))
        })
    }

    /// Keeps the elements satisfying `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        let upstream = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::lazy(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(upstream.iter().filter(move |x| predicate(x)))
        })
    }

    /// The first `n` elements. Safe on infinite sequences.
    pub fn take(&self, n: usize) -> Sequence<T> {
        let upstream = self.clone();
        Sequence::lazy(move || Box::new(upstream.iter().take(n)))
    }

    /// The longest prefix whose elements satisfy `predicate`.
    pub fn take_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        let upstream = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::lazy(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(upstream.iter().take_while(move |x| predicate(x)))
        })
    }

    /// Everything after the first `n` elements.
    pub fn skip(&self, n: usize) -> Sequence<T> {
        let upstream = self.clone();
        Sequence::lazy(move || Box::new(upstream.iter().skip(n)))
    }

    /// Drops the longest prefix satisfying `predicate`, keeps the rest.
    pub fn skip_while(&self, predicate: impl Fn(&T) -> bool + 'static) -> Sequence<T> {
        let upstream = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::lazy(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(upstream.iter().skip_while(move |x| predicate(x)))
        })
    }

    /// The elements at positions `start..end`. An `end` at or before `start`
    /// yields an empty sequence.
    pub fn slice(&self, start: usize, end: usize) -> Sequence<T> {
        let upstream = self.clone();
        Sequence::lazy(move || {
            Box::new(upstream.iter().skip(start).take(end.saturating_sub(start)))
        })
    }

    /// The elements from position `start` to the end.
    pub fn slice_from(&self, start: usize) -> Sequence<T> {
        self.skip(start)
    }

    /// Pairs each element with its zero-based position.
    pub fn enumerate(&self) -> Sequence<(usize, T)> {
        self.enumerate_from(0)
    }

    /// Pairs each element with its position, counting from `start`.
    pub fn enumerate_from(&self, start: usize) -> Sequence<(usize, T)> {
        let upstream = self.clone();
        Sequence::lazy(move || {
            Box::new(
                upstream
                    .iter()
                    .enumerate()
                    .map(move |(i, x)| (start + i, x)),
            )
        })
    }

    /// Pairs elements positionally with `other`, stopping at the shorter of
    /// the two.
    pub fn zip<U: 'static>(&self, other: &Sequence<U>) -> Sequence<(T, U)> {
        let left = self.clone();
        let right = other.clone();
        Sequence::lazy(move || Box::new(left.iter().zip(right.iter())))
    }

    /// Combines elements positionally with `other` through `f`.
    pub fn zip_with<U: 'static, V: 'static>(
        &self,
        other: &Sequence<U>,
        f: impl Fn(T, U) -> V + 'static,
    ) -> Sequence<V> {
        let left = self.clone();
        let right = other.clone();
        let f = Rc::new(f);
        Sequence::lazy(move || {
            let f = Rc::clone(&f);
            Box::new(left.iter().zip(right.iter()).map(move |(a, b)| f(a, b)))
        })
    }

    // ===== Concatenation =====
    //
    // Concatenations keep one flat part list. Chaining a thousand appends
    // yields a single node over a thousand-and-one parts, not a chain a
    // thousand delegations deep.

    fn concat_parts(&self) -> Vec<Sequence<T>> {
        match self.source().parts() {
            Some(parts) => parts.to_vec(),
            None => vec![self.clone()],
        }
    }

    fn from_parts(parts: Vec<Sequence<T>>) -> Sequence<T> {
        Sequence::from_source(Rc::new(ConcatSource::new(parts)))
    }

    /// This sequence followed by each of `others` in order.
    pub fn concat(&self, others: &[Sequence<T>]) -> Sequence<T> {
        let mut parts = self.concat_parts();
        for other in others {
            parts.extend(other.concat_parts());
        }
        Sequence::from_parts(parts)
    }

    /// This sequence followed by `items`.
    pub fn append(&self, items: Vec<T>) -> Sequence<T>
    where
        T: Clone,
    {
        self.concat(&[Sequence::from(items)])
    }

    /// This sequence followed by a single element.
    pub fn append_one(&self, item: T) -> Sequence<T>
    where
        T: Clone,
    {
        self.append(vec![item])
    }

    /// `items` followed by this sequence.
    pub fn prepend(&self, items: Vec<T>) -> Sequence<T>
    where
        T: Clone,
    {
        Sequence::from(items).concat(&[self.clone()])
    }

    /// A single element followed by this sequence.
    pub fn prepend_one(&self, item: T) -> Sequence<T>
    where
        T: Clone,
    {
        self.prepend(vec![item])
    }

    // ===== Set-flavored operators =====

    /// Keeps the first occurrence of each element, in encounter order. Lazy;
    /// the seen-set grows as elements are pulled.
    pub fn distinct(&self) -> Sequence<T>
    where
        T: Clone + Eq + Hash,
    {
        let upstream = self.clone();
        Sequence::lazy(move || {
            let mut seen = HashSet::new();
            Box::new(upstream.iter().filter(move |x| seen.insert(x.clone())))
        })
    }

    /// One element per key. Keys appear in first-occurrence order, but each
    /// key keeps its **last** occurrence's element.
    ///
    /// Buffers the whole input per cursor; the key order cannot be known
    /// until every element has been seen.
    pub fn distinct_by_key<K: Eq + Hash + 'static>(
        &self,
        key: impl Fn(&T) -> K + 'static,
    ) -> Sequence<T> {
        let upstream = self.clone();
        let key = Rc::new(key);
        Sequence::lazy(move || {
            let mut index: HashMap<K, usize> = HashMap::new();
            let mut slots: Vec<T> = Vec::new();
            for x in upstream.iter() {
                match index.entry(key(&x)) {
                    Entry::Occupied(slot) => slots[*slot.get()] = x,
                    Entry::Vacant(slot) => {
                        slot.insert(slots.len());
                        slots.push(x);
                    }
                }
            }
            Box::new(slots.into_iter())
        })
    }

    /// Removes every occurrence of `item`.
    pub fn except(&self, item: T) -> Sequence<T>
    where
        T: PartialEq + Clone,
    {
        let upstream = self.clone();
        Sequence::lazy(move || {
            let item = item.clone();
            Box::new(upstream.iter().filter(move |x| *x != item))
        })
    }

    /// Removes every element that occurs in `other`. The membership set is
    /// built from `other` when a cursor opens.
    pub fn except_all(&self, other: &Sequence<T>) -> Sequence<T>
    where
        T: Eq + Hash,
    {
        let upstream = self.clone();
        let other = other.clone();
        Sequence::lazy(move || {
            let excluded: HashSet<T> = other.iter().collect();
            Box::new(upstream.iter().filter(move |x| !excluded.contains(x)))
        })
    }

    /// Keeps the elements that also occur in `other`, preserving this
    /// sequence's order and duplicates.
    pub fn intersect(&self, other: &Sequence<T>) -> Sequence<T>
    where
        T: Eq + Hash,
    {
        let upstream = self.clone();
        let other = other.clone();
        Sequence::lazy(move || {
            let kept: HashSet<T> = other.iter().collect();
            Box::new(upstream.iter().filter(move |x| kept.contains(x)))
        })
    }

    /// Groups consecutive and non-consecutive elements by key. Groups appear
    /// in first-occurrence key order; elements within a group keep their
    /// encounter order. Buffers the whole input per cursor.
    pub fn group_by<K: Eq + Hash + Clone + 'static>(
        &self,
        key: impl Fn(&T) -> K + 'static,
    ) -> Sequence<(K, Sequence<T>)>
    where
        T: Clone,
    {
        let upstream = self.clone();
        let key = Rc::new(key);
        Sequence::lazy(move || {
            let mut order: Vec<K> = Vec::new();
            let mut buckets: HashMap<K, Vec<T>> = HashMap::new();
            for x in upstream.iter() {
                let k = key(&x);
                if !buckets.contains_key(&k) {
                    order.push(k.clone());
                }
                buckets.entry(k).or_default().push(x);
            }
            let groups: Vec<(K, Sequence<T>)> = order
                .into_iter()
                .map(|k| {
                    let items = buckets.remove(&k).unwrap_or_default();
                    (k, Sequence::from(items))
                })
                .collect();
            Box::new(groups.into_iter())
        })
    }

    // ===== Reshaping =====

    /// Maps each element to an iterable and splices the results.
    pub fn flat_map<U, I>(&self, f: impl Fn(T) -> I + 'static) -> Sequence<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
    {
        let upstream = self.clone();
        let f = Rc::new(f);
        Sequence::lazy(move || {
            let f = Rc::clone(&f);
            Box::new(upstream.iter().flat_map(move |x| f(x)))
        })
    }

    /// Yields the elements in reverse order. Buffers the whole input per
    /// cursor; never call on an infinite sequence.
    pub fn reverse(&self) -> Sequence<T> {
        let upstream = self.clone();
        Sequence::lazy(move || {
            let items: Vec<T> = upstream.iter().collect();
            Box::new(items.into_iter().rev())
        })
    }

    /// Repeats the sequence forever. Infinite unless the upstream is empty
    /// (an empty upstream yields an empty sequence); pair with `take` or a
    /// short-circuiting terminal.
    pub fn cycle(&self) -> Sequence<T> {
        let upstream = self.clone();
        Sequence::lazy(move || {
            Box::new(CycleCursor {
                current: upstream.iter(),
                upstream: upstream.clone(),
                yielded: false,
            })
        })
    }

    /// Substitutes `replacement` for every occurrence of `target`.
    pub fn replace(&self, target: T, replacement: T) -> Sequence<T>
    where
        T: PartialEq + Clone,
    {
        let upstream = self.clone();
        Sequence::lazy(move || {
            let target = target.clone();
            let replacement = replacement.clone();
            Box::new(upstream.iter().map(move |x| {
                if x == target {
                    replacement.clone()
                } else {
                    x
                }
            }))
        })
    }

    /// Drops the first occurrence of `item`; later occurrences pass through.
    pub fn remove(&self, item: T) -> Sequence<T>
    where
        T: PartialEq + Clone,
    {
        let upstream = self.clone();
        Sequence::lazy(move || {
            let item = item.clone();
            let mut removed = false;
            Box::new(upstream.iter().filter(move |x| {
                if !removed && *x == item {
                    removed = true;
                    false
                } else {
                    true
                }
            }))
        })
    }

    // ===== Sorting =====
    //
    // `quick_sort*` is stable and partially lazy: consuming a prefix of the
    // output only forces the partitions that prefix lives in. `sort*` is
    // heapsort, unstable, with no pathological input but no laziness win
    // either. Both buffer the whole input per cursor.

    /// Ascending stable sort by the natural order.
    pub fn quick_sort(&self) -> Sequence<T>
    where
        T: Clone + PartialOrd,
    {
        self.quick_sort_with(default_compare)
    }

    /// Descending stable sort by the natural order.
    pub fn quick_sort_desc(&self) -> Sequence<T>
    where
        T: Clone + PartialOrd,
    {
        self.quick_sort_with(|a, b| default_compare(b, a))
    }

    /// Stable sort by `cmp`, using the default pivot policy.
    pub fn quick_sort_with(&self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Sequence<T>
    where
        T: Clone,
    {
        self.quick_sort_with_policy(cmp, PivotPolicy::default())
    }

    /// Stable ascending sort by an extracted key.
    pub fn quick_sort_by_key<K: PartialOrd + 'static>(
        &self,
        selector: impl Fn(&T) -> K + 'static,
    ) -> Sequence<T>
    where
        T: Clone,
    {
        self.quick_sort_with(move |a, b| default_compare(&selector(a), &selector(b)))
    }

    /// Stable descending sort by an extracted key.
    pub fn quick_sort_by_key_desc<K: PartialOrd + 'static>(
        &self,
        selector: impl Fn(&T) -> K + 'static,
    ) -> Sequence<T>
    where
        T: Clone,
    {
        self.quick_sort_with(move |a, b| default_compare(&selector(b), &selector(a)))
    }

    /// Stable sort by `cmp` with an explicit pivot policy.
    pub fn quick_sort_with_policy(
        &self,
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
        policy: PivotPolicy,
    ) -> Sequence<T>
    where
        T: Clone,
    {
        let upstream = self.clone();
        let cmp = Rc::new(cmp);
        Sequence::lazy(move || {
            let cmp = Rc::clone(&cmp);
            let items: Vec<T> = upstream.iter().collect();
            Box::new(QuickSort::new(items, move |a: &T, b: &T| cmp(a, b), policy))
        })
    }

    /// Ascending heapsort by the natural order. Unstable.
    pub fn sort(&self) -> Sequence<T>
    where
        T: PartialOrd,
    {
        self.sort_with(default_compare)
    }

    /// Descending heapsort by the natural order. Unstable.
    pub fn sort_desc(&self) -> Sequence<T>
    where
        T: PartialOrd,
    {
        self.sort_with(|a, b| default_compare(b, a))
    }

    /// Heapsort by `cmp`. Unstable.
    pub fn sort_with(&self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Sequence<T> {
        let upstream = self.clone();
        let cmp = Rc::new(cmp);
        Sequence::lazy(move || {
            let cmp = Rc::clone(&cmp);
            let items: Vec<T> = upstream.iter().collect();
            Box::new(HeapSort::new(items, move |a: &T, b: &T| cmp(a, b)))
        })
    }

    /// Ascending heapsort by an extracted key. Unstable.
    pub fn sort_by_key<K: PartialOrd + 'static>(
        &self,
        selector: impl Fn(&T) -> K + 'static,
    ) -> Sequence<T> {
        self.sort_with(move |a, b| default_compare(&selector(a), &selector(b)))
    }
}

impl<U: 'static> Sequence<Sequence<U>> {
    /// Splices one level of nesting. Deeper nesting flattens by composing
    /// `flatten` calls.
    pub fn flatten(&self) -> Sequence<U> {
        let upstream = self.clone();
        Sequence::lazy(move || Box::new(upstream.iter().flat_map(|inner| inner.iter())))
    }
}

struct CycleCursor<T: 'static> {
    upstream: Sequence<T>,
    current: Cursor<T>,
    yielded: bool,
}

impl<T: 'static> Iterator for CycleCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(x) = self.current.next() {
                self.yielded = true;
                return Some(x);
            }
            // a pass with no elements means the upstream is (now) empty
            if !self.yielded {
                return None;
            }
            self.current = self.upstream.iter();
            self.yielded = false;
        }
    }
}
