//! Sorting engines that yield their output lazily.
//!
//! Two engines with complementary trade-offs:
//!
//! - [`QuickSort`] — stable, 3-way partitioning, pluggable pivot selection via
//!   [`PivotPolicy`]. Partially lazy: consuming only a prefix of the output
//!   sorts only the partitions needed to produce that prefix.
//! - [`HeapSort`] — unstable, eager heap construction, but incremental
//!   extraction: each `next()` performs one sift-down and yields one element.
//!
//! Both are plain `Iterator`s over an owned buffer, so they compose with
//! anything that speaks iterators and drop their remaining buffer if the
//! consumer stops early.
//!
//! ```
//! use sequitur_order::default_compare;
//! use sequitur_sort::{PivotPolicy, QuickSort};
//!
//! let sorted: Vec<i32> = QuickSort::new(
//!     vec![2, 1, 3],
//!     default_compare,
//!     PivotPolicy::MedianOfThree,
//! )
//! .collect();
//! assert_eq!(sorted, vec![1, 2, 3]);
//! ```

mod heapsort;
mod pivot;
mod quicksort;

pub use heapsort::HeapSort;
pub use pivot::PivotPolicy;
pub use quicksort::QuickSort;
