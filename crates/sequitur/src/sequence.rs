//! The core lazy sequence type.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use sequitur_skiplist::SkipList;

use crate::source::{Cursor, FnSource, OnceSource, SkipListSource, Source, VecSource};

/// A logical, possibly infinite stream of elements, evaluated on demand.
///
/// A sequence never stores elements itself; it holds a source capable of
/// producing a one-shot [`Cursor`] over them. Constructing an operator
/// (`map`, `filter`, `take`, …) is O(1) and touches no element — only
/// iterating the resulting sequence pulls elements, one at a time, right to
/// left through the operator chain.
///
/// Re-iterating a sequence backed by a repeatable source (a `Vec`, a skip
/// list) restarts from the beginning. Re-iterating a sequence built with
/// [`Sequence::from_cursor`] finds the cursor spent and yields nothing.
///
/// Cloning a sequence is cheap: clones share the same source.
///
/// ```
/// use sequitur::Sequence;
///
/// let evens = Sequence::from(vec![1, 2, 3, 4, 5, 6])
///     .filter(|x| x % 2 == 0)
///     .map(|x| x * 10);
/// assert_eq!(evens.to_vec(), vec![20, 40, 60]);
/// // repeatable: a second pass sees the same elements
/// assert_eq!(evens.to_vec(), vec![20, 40, 60]);
/// ```
pub struct Sequence<T: 'static> {
    source: Rc<dyn Source<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Sequence {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T: 'static> Sequence<T> {
    pub(crate) fn from_source(source: Rc<dyn Source<T>>) -> Self {
        Sequence { source }
    }

    /// Builds an operator node from a cursor-producing closure.
    pub(crate) fn lazy(make: impl Fn() -> Cursor<T> + 'static) -> Self {
        Sequence::from_source(Rc::new(FnSource::new(make)))
    }

    pub(crate) fn source(&self) -> &dyn Source<T> {
        self.source.as_ref()
    }

    /// An empty sequence.
    pub fn empty() -> Self {
        Sequence::lazy(|| Box::new(std::iter::empty()))
    }

    /// Wraps a one-shot cursor. The first iteration consumes it; later
    /// iterations yield nothing.
    pub fn from_cursor(cursor: impl Iterator<Item = T> + 'static) -> Self {
        Sequence::from_source(Rc::new(OnceSource::new(Box::new(cursor))))
    }

    /// Opens a cursor over the elements.
    ///
    /// This is the single point where evaluation happens; every terminal
    /// goes through it.
    pub fn iter(&self) -> Cursor<T> {
        self.source.cursor()
    }
}

impl<T: 'static> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::empty()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::from_source(Rc::new(VecSource::new(items)))
    }
}

impl<T: Clone + 'static> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        Sequence::from(items.to_vec())
    }
}

impl<T: Clone + 'static, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(items: [T; N]) -> Self {
        Sequence::from(items.to_vec())
    }
}

impl<T: Clone + Eq + std::hash::Hash + 'static> From<HashSet<T>> for Sequence<T> {
    fn from(items: HashSet<T>) -> Self {
        Sequence::from(items.into_iter().collect::<Vec<T>>())
    }
}

/// Materializes the skip list's ordered contents as a repeatable sequence
/// with a known size.
impl<T: Clone + 'static> From<SkipList<T>> for Sequence<T> {
    fn from(list: SkipList<T>) -> Self {
        Sequence::from_source(Rc::new(SkipListSource::new(list)))
    }
}

/// Collects into a repeatable vector-backed sequence.
impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: 'static> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Deep, short-circuiting structural equality.
///
/// Sequences of different length are unequal; element comparison is
/// element-wise `==`, so sequences whose elements are themselves sequences
/// compare recursively through this impl.
impl<T: PartialEq + 'static> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }
}

impl<T: 'static> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rendering elements would evaluate the chain (and hang on infinite
        // sources), so stay opaque.
        f.debug_struct("Sequence").finish_non_exhaustive()
    }
}
