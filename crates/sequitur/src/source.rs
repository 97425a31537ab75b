//! Element sources backing [`Sequence`](crate::Sequence).
//!
//! A source produces one-shot cursors over its elements. Repeatable sources
//! (a backing `Vec`, a skip list) hand out a fresh cursor per request;
//! one-shot sources hand out their cursor once and an exhausted cursor ever
//! after. Operator nodes are closure sources delegating to their upstream
//! sequence.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use sequitur_skiplist::SkipList;

use crate::sequence::Sequence;

/// A one-shot pull cursor over elements of `T`.
///
/// Dropping a cursor releases everything it holds, on every exit path —
/// normal exhaustion, an early `break`, or an unwinding panic — so a
/// short-circuiting consumer never leaks upstream state.
pub type Cursor<T> = Box<dyn Iterator<Item = T>>;

/// Something able to produce cursors over `T`.
pub(crate) trait Source<T> {
    /// Opens a fresh cursor. For one-shot sources, subsequent calls return
    /// an exhausted cursor.
    fn cursor(&self) -> Cursor<T>;

    /// The exact element count, when the backing storage knows it without
    /// iterating.
    fn exact_size(&self) -> Option<usize> {
        None
    }

    /// Random access, when the backing storage supports it.
    fn get(&self, _index: usize) -> Option<T> {
        None
    }

    /// The flattened part list, when this source is a concatenation. Lets
    /// concatenation-style operators extend an existing part list instead of
    /// nesting delegation layers.
    fn parts(&self) -> Option<&[Sequence<T>]> {
        None
    }
}

/// Repeatable source over a shared backing vector.
pub(crate) struct VecSource<T> {
    items: Rc<Vec<T>>,
}

impl<T> VecSource<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        VecSource {
            items: Rc::new(items),
        }
    }
}

impl<T: Clone + 'static> Source<T> for VecSource<T> {
    fn cursor(&self) -> Cursor<T> {
        let items = Rc::clone(&self.items);
        Box::new((0..items.len()).map(move |i| items[i].clone()))
    }

    fn exact_size(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }
}

/// One-shot source wrapping a caller-supplied cursor.
pub(crate) struct OnceSource<T> {
    cursor: RefCell<Option<Cursor<T>>>,
}

impl<T> OnceSource<T> {
    pub(crate) fn new(cursor: Cursor<T>) -> Self {
        OnceSource {
            cursor: RefCell::new(Some(cursor)),
        }
    }
}

impl<T: 'static> Source<T> for OnceSource<T> {
    fn cursor(&self) -> Cursor<T> {
        match self.cursor.borrow_mut().take() {
            Some(cursor) => cursor,
            None => Box::new(std::iter::empty()),
        }
    }
}

/// Operator-node source: a closure building a cursor over the upstream chain.
pub(crate) struct FnSource<F> {
    make: F,
}

impl<F> FnSource<F> {
    pub(crate) fn new(make: F) -> Self {
        FnSource { make }
    }
}

impl<T, F: Fn() -> Cursor<T>> Source<T> for FnSource<F> {
    fn cursor(&self) -> Cursor<T> {
        (self.make)()
    }
}

/// Concatenation source holding a flat list of parts.
///
/// Chained `append`/`prepend`/`concat` calls extend this list rather than
/// wrapping another delegation layer, so pulling an element costs one part
/// lookup regardless of how many concatenations built the sequence.
pub(crate) struct ConcatSource<T: 'static> {
    parts: Vec<Sequence<T>>,
}

impl<T: 'static> ConcatSource<T> {
    pub(crate) fn new(parts: Vec<Sequence<T>>) -> Self {
        ConcatSource { parts }
    }
}

impl<T: 'static> Source<T> for ConcatSource<T> {
    fn cursor(&self) -> Cursor<T> {
        Box::new(ConcatCursor {
            queue: self.parts.iter().cloned().collect(),
            current: None,
        })
    }

    fn exact_size(&self) -> Option<usize> {
        self.parts
            .iter()
            .map(|part| part.source().exact_size())
            .sum()
    }

    fn parts(&self) -> Option<&[Sequence<T>]> {
        Some(&self.parts)
    }
}

struct ConcatCursor<T: 'static> {
    queue: VecDeque<Sequence<T>>,
    current: Option<Cursor<T>>,
}

impl<T: 'static> Iterator for ConcatCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(cursor) = self.current.as_mut() {
                if let Some(x) = cursor.next() {
                    return Some(x);
                }
                self.current = None;
            }
            match self.queue.pop_front() {
                Some(part) => self.current = Some(part.iter()),
                None => return None,
            }
        }
    }
}

/// Repeatable source over a shared skip list, yielding ascending order.
pub(crate) struct SkipListSource<T> {
    list: Rc<SkipList<T>>,
}

impl<T> SkipListSource<T> {
    pub(crate) fn new(list: SkipList<T>) -> Self {
        SkipListSource {
            list: Rc::new(list),
        }
    }
}

impl<T: Clone + 'static> Source<T> for SkipListSource<T> {
    fn cursor(&self) -> Cursor<T> {
        Box::new(self.list.to_vec().into_iter())
    }

    fn exact_size(&self) -> Option<usize> {
        Some(self.list.len())
    }
}
