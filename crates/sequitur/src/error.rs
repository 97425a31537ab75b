//! Error types for the sequence pipeline.
//!
//! Failures fall into three groups:
//!
//! - configuration failures, detectable without touching any element and
//!   raised synchronously at call time ([`SequenceError::ZeroStep`],
//!   [`SequenceError::StepDirection`]);
//! - empty-source and no-match failures from terminals that need at least one
//!   element ([`SequenceError::Empty`], [`SequenceError::NoMatch`]);
//! - deferred failures that only surface while elements are being pulled
//!   ([`SequenceError::NotDecimal`], [`SequenceError::OutOfRange`]).
//!
//! There is no retry or recovery anywhere; every failure propagates to the
//! immediate caller.

use thiserror::Error;

/// Errors raised by sequence construction and terminal operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A terminal that needs at least one element ran on an empty sequence.
    #[error("{operation} requires a nonempty sequence")]
    Empty {
        /// The terminal operation that failed.
        operation: &'static str,
    },

    /// A predicate-driven terminal found no matching element.
    #[error("{operation} found no element matching the predicate")]
    NoMatch {
        /// The terminal operation that failed.
        operation: &'static str,
    },

    /// Indexed access past the end of the sequence.
    #[error("index {index} is out of range")]
    OutOfRange {
        /// The requested index.
        index: usize,
    },

    /// A range with distinct endpoints was given a zero step.
    #[error("step cannot be zero for the range {start}..{stop}")]
    ZeroStep {
        /// Range start (inclusive).
        start: i64,
        /// Range stop (exclusive).
        stop: i64,
    },

    /// A range step pointing away from the stop endpoint.
    #[error("step {step} moves away from stop in the range {start}..{stop}")]
    StepDirection {
        /// Range start (inclusive).
        start: i64,
        /// The offending step.
        step: i64,
        /// Range stop (exclusive).
        stop: i64,
    },

    /// A non-finite float reached exact-decimal aggregation.
    #[error("element at position {position} has no exact decimal representation")]
    NotDecimal {
        /// Zero-based position of the offending element.
        position: usize,
    },
}

/// Result type for sequence operations.
pub type Result<T> = std::result::Result<T, SequenceError>;
