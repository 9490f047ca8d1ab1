//! Numbers and numerics.

use gmath_fixed::Fixed;
use num_traits as nt;
use std::{
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Gathers the operations the value types need from their components.
///
/// Implemented for `f32`, `f64` and the Q16.16 [`Fixed`] type, so every vector,
/// matrix, quaternion and plane exists in all three precisions from a single
/// definition.
pub trait Scalar:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + nt::Zero
    + nt::One
    + nt::NumCast
    + approx::AbsDiffEq<Epsilon = Self>
    + approx::RelativeEq
    + bytemuck::Pod
{
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const TWO: Self;
    const ONE_HALF: Self;
    const PI: Self;
    const FRAC_PI_2: Self;

    /// The difference between one and the next larger representable value.
    const EPSILON: Self;

    /// The smallest positive representable value. A determinant whose
    /// magnitude is below this is treated as exactly zero.
    const SMALLEST_POSITIVE: Self;

    /// Converts the given `f64`, rounding and saturating as the type does.
    fn from_f64_lossy(value: f64) -> Self;

    fn sqrt(self) -> Self;

    fn abs(self) -> Self;

    fn sin_cos(self) -> (Self, Self);

    fn tan(self) -> Self;

    fn acos(self) -> Self;

    /// Four-quadrant arctangent of `self / other`.
    fn atan2(self, other: Self) -> Self;

    /// Whether the value is NaN. Always `false` for types without NaN.
    fn is_nan(self) -> bool;

    #[inline]
    fn sin(self) -> Self {
        self.sin_cos().0
    }

    #[inline]
    fn cos(self) -> Self {
        self.sin_cos().1
    }

    #[inline]
    fn recip(self) -> Self {
        Self::ONE / self
    }

    /// The smaller of the two values. If either is NaN, `other` is returned.
    #[inline]
    fn min(self, other: Self) -> Self {
        if self < other { self } else { other }
    }

    /// The larger of the two values. If either is NaN, `other` is returned.
    #[inline]
    fn max(self, other: Self) -> Self {
        if self > other { self } else { other }
    }
}

macro_rules! impl_float_scalar {
    ($f:tt) => {
        impl Scalar for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const ONE_HALF: Self = 0.5;
            const PI: Self = std::$f::consts::PI;
            const FRAC_PI_2: Self = std::$f::consts::FRAC_PI_2;
            const EPSILON: Self = $f::EPSILON;
            const SMALLEST_POSITIVE: Self = $f::from_bits(1);

            #[inline]
            fn from_f64_lossy(value: f64) -> Self {
                value as $f
            }

            #[inline]
            fn sqrt(self) -> Self {
                $f::sqrt(self)
            }

            #[inline]
            fn abs(self) -> Self {
                $f::abs(self)
            }

            #[inline]
            fn sin_cos(self) -> (Self, Self) {
                $f::sin_cos(self)
            }

            #[inline]
            fn tan(self) -> Self {
                $f::tan(self)
            }

            #[inline]
            fn acos(self) -> Self {
                $f::acos(self)
            }

            #[inline]
            fn atan2(self, other: Self) -> Self {
                $f::atan2(self, other)
            }

            #[inline]
            fn is_nan(self) -> bool {
                $f::is_nan(self)
            }

            #[inline]
            fn recip(self) -> Self {
                $f::recip(self)
            }
        }
    };
}

impl_float_scalar!(f32);
impl_float_scalar!(f64);

impl Scalar for Fixed {
    const ZERO: Self = Fixed::ZERO;
    const ONE: Self = Fixed::ONE;
    const NEG_ONE: Self = Fixed::NEG_ONE;
    const TWO: Self = Fixed::TWO;
    const ONE_HALF: Self = Fixed::ONE_HALF;
    const PI: Self = Fixed::PI;
    const FRAC_PI_2: Self = Fixed::FRAC_PI_2;
    const EPSILON: Self = Fixed::EPSILON;
    const SMALLEST_POSITIVE: Self = Fixed::EPSILON;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        Fixed::from_f64(value)
    }

    #[inline]
    fn sqrt(self) -> Self {
        Fixed::sqrt(self)
    }

    #[inline]
    fn abs(self) -> Self {
        Fixed::abs(self)
    }

    #[inline]
    fn sin_cos(self) -> (Self, Self) {
        Fixed::sin_cos(self)
    }

    #[inline]
    fn tan(self) -> Self {
        Fixed::tan(self)
    }

    #[inline]
    fn acos(self) -> Self {
        Fixed::acos(self)
    }

    #[inline]
    fn atan2(self, other: Self) -> Self {
        Fixed::atan2(self, other)
    }

    #[inline]
    fn is_nan(self) -> bool {
        false
    }
}

/// Converts a value between scalar types, going through `f64`. Values that do
/// not fit the target type saturate for [`Fixed`] and become infinite for
/// floats.
#[inline]
pub fn cast<T: Scalar, U: Scalar>(value: T) -> U {
    match nt::ToPrimitive::to_f64(&value) {
        Some(value) => U::from_f64_lossy(value),
        None => U::ZERO,
    }
}
