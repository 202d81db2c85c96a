use std::fmt::Display;
use std::ops::Neg;

use nalgebra::{ClosedAddAssign, ClosedDivAssign, ClosedMulAssign, ClosedSubAssign, Scalar};
use num_traits::{One, Zero};

/// Scalar type the predicates are generic over.
///
/// Implemented by the primitive floats and by the arbitrary precision float
/// of the `precision` module. Values are not required to be `Copy`, generic
/// code clones where it needs to reuse a value.
pub trait Real:
    Scalar
    + Display
    + PartialOrd
    + Zero
    + One
    + ClosedAddAssign
    + ClosedSubAssign
    + ClosedMulAssign
    + ClosedDivAssign
    + Neg<Output = Self>
{
    /// Exact conversion from single precision.
    fn from_f32(value: f32) -> Self;

    /// Conversion to single precision, rounding to nearest.
    fn to_f32(&self) -> f32;

    fn sqrt(&self) -> Self;

    fn is_finite(&self) -> bool;
}

impl Real for f32 {
    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline(always)]
    fn to_f32(&self) -> f32 {
        *self
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        f32::sqrt(*self)
    }

    #[inline(always)]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Real for f64 {
    #[inline(always)]
    fn from_f32(value: f32) -> Self {
        value.into()
    }

    #[inline(always)]
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    #[inline(always)]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    #[inline(always)]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

/// Minimum as a plain compare and select.
/// If the comparison fails (either value is NaN), `b` is returned.
#[inline(always)]
pub fn fast_min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

/// Maximum as a plain compare and select.
/// If the comparison fails (either value is NaN), `b` is returned.
#[inline(always)]
pub fn fast_max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}
