//! Incremental heapsort with a leaf-search sift-down.

use std::cmp::Ordering;

/// An unstable heapsort that yields ascending elements one at a time.
///
/// Construction materializes the input and builds an implicit binary min-heap
/// bottom-up (inputs shorter than two elements skip heap construction
/// entirely). Extraction is incremental: each `next()` yields the root, moves
/// the last element of the active region into its place, shrinks the region,
/// and sifts the new root down.
///
/// Sift-down descends to a leaf first — choosing at every level the child
/// that strictly precedes its sibling, ties favoring the left — without
/// moving data, then walks back up that path to the first position the sifted
/// value does not precede and shifts the sub-path down one slot. Compared to
/// one-level-at-a-time sifting this roughly halves the comparison count,
/// since most sifted values sink close to the leaves anyway.
///
/// Elements comparing equal may be reordered; use the quicksort engine when
/// stability matters.
pub struct HeapSort<T, C> {
    heap: Vec<T>,
    cmp: C,
}

impl<T, C> HeapSort<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an incremental sorted iterator over `items`.
    pub fn new(items: Vec<T>, cmp: C) -> Self {
        let mut sorter = HeapSort { heap: items, cmp };
        if sorter.heap.len() >= 2 {
            sorter.heapify();
        }
        sorter
    }

    fn heapify(&mut self) {
        let last = self.heap.len() - 1;
        for i in (0..=parent(last)).rev() {
            self.sift_down(i);
        }
    }

    fn sift_down(&mut self, i: usize) {
        let mut j = self.leaf_search(i);
        while j > i && (self.cmp)(&self.heap[i], &self.heap[j]) == Ordering::Less {
            j = parent(j);
        }
        // Drop the sifted value into slot j; everything on the path between
        // moves up one position.
        while j > i {
            self.heap.swap(i, j);
            j = parent(j);
        }
    }

    /// Follows the smaller-child path from `i` down to a leaf without moving
    /// any data, returning the leaf position.
    fn leaf_search(&self, i: usize) -> usize {
        let end = self.heap.len() - 1;
        let mut j = i;
        loop {
            let left = 2 * j + 1;
            let right = left + 1;
            if right <= end {
                j = if (self.cmp)(&self.heap[right], &self.heap[left]) == Ordering::Less {
                    right
                } else {
                    left
                };
            } else if left <= end {
                return left;
            } else {
                return j;
            }
        }
    }
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

impl<T, C> Iterator for HeapSort<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self.heap.len() {
            0 => None,
            1 => self.heap.pop(),
            n => {
                self.heap.swap(0, n - 1);
                let root = self.heap.pop();
                if self.heap.len() > 1 {
                    self.sift_down(0);
                }
                root
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T, C> ExactSizeIterator for HeapSort<T, C> where C: Fn(&T, &T) -> Ordering {}
