//! Sequence factories: repetition, unfolding, and numeric ranges.
//!
//! Range configuration errors surface at call time, before any element is
//! produced; everything else here is infallible. The infinite factories
//! (`repeat`, `counting*`, `generate*`) are safe to build and to window with
//! `take`/`take_while`, and hazardous to drain.

use std::iter::successors;
use std::rc::Rc;

use crate::error::{Result, SequenceError};
use crate::sequence::Sequence;

impl<T: Clone + 'static> Sequence<T> {
    /// The same element forever.
    pub fn repeat(item: T) -> Sequence<T> {
        Sequence::lazy(move || Box::new(std::iter::repeat(item.clone())))
    }

    /// The same element `n` times.
    pub fn repeat_n(item: T, n: usize) -> Sequence<T> {
        Sequence::lazy(move || Box::new(std::iter::repeat(item.clone()).take(n)))
    }

    /// Unfolds an infinite sequence: `seed`, `f(&seed)`, `f(&f(&seed))`, …
    pub fn generate(seed: T, f: impl Fn(&T) -> T + 'static) -> Sequence<T> {
        let f = Rc::new(f);
        Sequence::lazy(move || {
            let f = Rc::clone(&f);
            Box::new(successors(Some(seed.clone()), move |prev| Some(f(prev))))
        })
    }

    /// Unfolds with the position of the element being produced: the element
    /// after `seed` is `f(&seed, 1)`, then `f(.., 2)`, and so on.
    pub fn generate_indexed(seed: T, f: impl Fn(&T, usize) -> T + 'static) -> Sequence<T> {
        let f = Rc::new(f);
        Sequence::lazy(move || {
            let f = Rc::clone(&f);
            Box::new(
                successors(Some((seed.clone(), 1usize)), move |(prev, i)| {
                    Some((f(prev, *i), i + 1))
                })
                .map(|(x, _)| x),
            )
        })
    }
}

impl Sequence<i64> {
    /// 0, 1, 2, … without end.
    pub fn counting() -> Sequence<i64> {
        Sequence::counting_by(0, 1)
    }

    /// `start`, `start + 1`, … without end.
    pub fn counting_from(start: i64) -> Sequence<i64> {
        Sequence::counting_by(start, 1)
    }

    /// `start`, `start + step`, … stopping only where `i64` would overflow.
    pub fn counting_by(start: i64, step: i64) -> Sequence<i64> {
        Sequence::lazy(move || Box::new(successors(Some(start), move |k| k.checked_add(step))))
    }

    /// 0 up to (excluding) `stop`; counts down when `stop` is negative.
    pub fn range(stop: i64) -> Sequence<i64> {
        Sequence::range_from(0, stop)
    }

    /// `start` toward (excluding) `stop`, stepping by one in the implied
    /// direction. `start == stop` is empty.
    pub fn range_from(start: i64, stop: i64) -> Sequence<i64> {
        let direction = stop.saturating_sub(start).signum();
        Sequence::range_unchecked(start, direction, stop)
    }

    /// `start` toward (excluding) `stop` with an explicit step.
    ///
    /// When the endpoints differ, a zero step fails with
    /// [`SequenceError::ZeroStep`] and a step pointing away from `stop`
    /// fails with [`SequenceError::StepDirection`], both at call time.
    pub fn range_step(start: i64, step: i64, stop: i64) -> Result<Sequence<i64>> {
        let direction = stop.saturating_sub(start).signum();
        if direction != 0 {
            if step == 0 {
                return Err(SequenceError::ZeroStep { start, stop });
            }
            if step.signum() != direction {
                return Err(SequenceError::StepDirection { start, step, stop });
            }
        }
        Ok(Sequence::range_unchecked(start, step, stop))
    }

    fn range_unchecked(start: i64, step: i64, stop: i64) -> Sequence<i64> {
        let ascending = step > 0;
        Sequence::lazy(move || {
            Box::new(
                successors(Some(start), move |k| k.checked_add(step))
                    .take_while(move |k| if ascending { *k < stop } else { *k > stop }),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_and_repeat_n() {
        assert_eq!(Sequence::repeat(7).take(3).to_vec(), vec![7, 7, 7]);
        assert_eq!(Sequence::repeat_n("x", 2).to_vec(), vec!["x", "x"]);
        assert_eq!(Sequence::repeat_n(1, 0).to_vec(), Vec::<i32>::new());
    }

    #[test]
    fn counting_families() {
        assert_eq!(Sequence::counting().take(4).to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(Sequence::counting_from(5).take(3).to_vec(), vec![5, 6, 7]);
        assert_eq!(
            Sequence::counting_by(10, -3).take(4).to_vec(),
            vec![10, 7, 4, 1]
        );
    }

    #[test]
    fn ranges_follow_the_implied_direction() {
        assert_eq!(Sequence::range(4).to_vec(), vec![0, 1, 2, 3]);
        assert_eq!(Sequence::range(-3).to_vec(), vec![0, -1, -2]);
        assert_eq!(Sequence::range_from(2, 5).to_vec(), vec![2, 3, 4]);
        assert_eq!(Sequence::range_from(5, 2).to_vec(), vec![5, 4, 3]);
        assert_eq!(Sequence::range_from(3, 3).to_vec(), Vec::<i64>::new());
        assert_eq!(Sequence::range(0).to_vec(), Vec::<i64>::new());
    }

    #[test]
    fn stepped_ranges() {
        assert_eq!(
            Sequence::range_step(1, 2, 6).map(|s| s.to_vec()),
            Ok(vec![1, 3, 5])
        );
        assert_eq!(
            Sequence::range_step(1, -2, -6).map(|s| s.to_vec()),
            Ok(vec![1, -1, -3, -5])
        );
        // equal endpoints accept any step
        assert_eq!(
            Sequence::range_step(3, 0, 3).map(|s| s.to_vec()),
            Ok(Vec::new())
        );
    }

    #[test]
    fn range_configuration_errors_surface_at_call_time() {
        assert_eq!(
            Sequence::range_step(1, 0, 6).err(),
            Some(SequenceError::ZeroStep { start: 1, stop: 6 })
        );
        assert_eq!(
            Sequence::range_step(1, -2, 6).err(),
            Some(SequenceError::StepDirection {
                start: 1,
                step: -2,
                stop: 6
            })
        );
        assert_eq!(
            Sequence::range_step(6, 2, 1).err(),
            Some(SequenceError::StepDirection {
                start: 6,
                step: 2,
                stop: 1
            })
        );
    }

    #[test]
    fn generate_unfolds_from_the_seed() {
        let powers = Sequence::generate(1i64, |x| x * 2);
        assert_eq!(powers.take(5).to_vec(), vec![1, 2, 4, 8, 16]);

        let factorials = Sequence::generate_indexed(1u64, |x, i| x * i as u64);
        assert_eq!(factorials.take(5).to_vec(), vec![1, 1, 2, 6, 24]);
    }
}
