//! Composable, lazily-evaluated sequence operations.
//!
//! A [`Sequence`] is a logical stream of elements. Operators (`map`,
//! `filter`, `take`, sorting, grouping, zipping, …) compose in O(1) without
//! touching an element; terminals (`to_vec`, `reduce`, `min`, `count`, …)
//! open a cursor and drain it, short-circuiting where they can. Sequences
//! over repeatable sources can be iterated any number of times.
//!
//! ```
//! use sequitur::Sequence;
//!
//! let names = Sequence::from(vec!["ada", "grace", "alan", "edsger"]);
//! let shortlist = names
//!     .filter(|n| n.len() > 3)
//!     .quick_sort_by_key(|n| n.len());
//! assert_eq!(shortlist.to_vec(), vec!["alan", "grace", "edsger"]);
//! ```
//!
//! Infinite sequences are first-class: build them with the factories and
//! window them before draining.
//!
//! ```
//! use sequitur::Sequence;
//!
//! let squares = Sequence::counting().map(|n| n * n);
//! assert_eq!(squares.take(5).to_vec(), vec![0, 1, 4, 9, 16]);
//! ```
//!
//! Sorting comes in two flavors: the `quick_sort` family is stable and
//! partially lazy (consuming a prefix only sorts the partitions the prefix
//! lives in), the `sort` family is heapsort with no pathological input.
//! Numeric aggregation (`sum`, `average`) accumulates through exact decimals,
//! so `[0.1, 0.2]` averages to exactly `0.15`.

mod decimal;
mod error;
mod factory;
mod ops;
mod sequence;
mod source;
mod terminal;

pub use decimal::ToDecimal;
pub use error::{Result, SequenceError};
pub use sequence::Sequence;
pub use source::Cursor;

pub use bigdecimal::BigDecimal;
pub use sequitur_order::{by_key, default_compare, descending};
pub use sequitur_skiplist::SkipList;
pub use sequitur_sort::{HeapSort, PivotPolicy, QuickSort};
