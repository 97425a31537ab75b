//! Exact-decimal conversion for numeric aggregation.
//!
//! `sum` and `average` accumulate through [`BigDecimal`] and convert to `f64`
//! only at the boundary, so repeated additions never compound binary
//! floating-point rounding error: `[0.1, 0.2]` averages to exactly `0.15`.
//!
//! Floats convert through their shortest round-tripping decimal rendering,
//! which is the decimal a programmer wrote down, not the exact binary
//! expansion of the stored double. Non-finite floats have no decimal
//! representation and convert to `None`.

use bigdecimal::{BigDecimal, ToPrimitive};

/// Conversion into an exact decimal, used by the numeric terminals.
///
/// Implemented for the primitive integers, `f32`/`f64`, and [`BigDecimal`]
/// itself. Returns `None` only for values with no exact decimal form
/// (non-finite floats).
pub trait ToDecimal {
    /// The exact decimal value, or `None` if there is none.
    fn to_decimal(&self) -> Option<BigDecimal>;
}

impl ToDecimal for f64 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        if self.is_finite() {
            self.to_string().parse().ok()
        } else {
            None
        }
    }
}

impl ToDecimal for f32 {
    fn to_decimal(&self) -> Option<BigDecimal> {
        if self.is_finite() {
            self.to_string().parse().ok()
        } else {
            None
        }
    }
}

impl ToDecimal for BigDecimal {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(self.clone())
    }
}

macro_rules! impl_to_decimal_for_signed {
    ($($t:ty),*) => {$(
        impl ToDecimal for $t {
            fn to_decimal(&self) -> Option<BigDecimal> {
                Some(BigDecimal::from(i128::from(*self)))
            }
        }
    )*};
}

macro_rules! impl_to_decimal_for_unsigned {
    ($($t:ty),*) => {$(
        impl ToDecimal for $t {
            fn to_decimal(&self) -> Option<BigDecimal> {
                Some(BigDecimal::from(u128::from(*self)))
            }
        }
    )*};
}

impl_to_decimal_for_signed!(i8, i16, i32, i64, i128);
impl_to_decimal_for_unsigned!(u8, u16, u32, u64, u128);

impl ToDecimal for isize {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self as i64))
    }
}

impl ToDecimal for usize {
    fn to_decimal(&self) -> Option<BigDecimal> {
        Some(BigDecimal::from(*self as u64))
    }
}

/// Collapses an exact decimal into the nearest `f64` at the API boundary.
pub(crate) fn decimal_to_f64(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
