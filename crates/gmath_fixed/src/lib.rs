//! Q16.16 fixed-point numbers.

mod cordic;

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};
use num_traits as nt;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A signed fixed-point number with 16 integer bits and 16 fractional bits.
///
/// The represented value is `raw / 65536`, giving a range of about
/// `[-32768, 32768)` with a resolution of `1 / 65536`.
///
/// Arithmetic never panics and never wraps. Results outside the range saturate
/// at [`Fixed::MIN`] or [`Fixed::MAX`], and division by zero saturates by the
/// sign of the dividend (with `0 / 0 = 0`). Trigonometric functions use an
/// integer-only CORDIC kernel, so every operation gives bit-identical results
/// on all platforms.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroable, Pod)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 16;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1 << Self::FRAC_BITS);
    pub const NEG_ONE: Self = Self(-(1 << Self::FRAC_BITS));
    pub const TWO: Self = Self(2 << Self::FRAC_BITS);
    pub const ONE_HALF: Self = Self(1 << (Self::FRAC_BITS - 1));
    pub const PI: Self = Self(205_887);
    pub const FRAC_PI_2: Self = Self(102_944);
    pub const TWO_PI: Self = Self(411_775);

    /// The smallest representable value.
    pub const MIN: Self = Self(i32::MIN);

    /// The largest representable value.
    pub const MAX: Self = Self(i32::MAX);

    /// The smallest positive value, `1 / 65536`.
    pub const EPSILON: Self = Self(1);

    /// Creates a value directly from its raw representation.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw representation, `value * 65536`.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Creates the value of the given integer, saturating if it is out of
    /// range.
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        Self::saturate((value as i64) << Self::FRAC_BITS)
    }

    /// Converts the given float, rounding to the nearest representable value
    /// and saturating if it is out of range. NaN becomes zero.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let scaled = (value * f64::from(1_u32 << Self::FRAC_BITS)).round();
        // Float-to-int `as` casts saturate.
        Self(scaled as i32)
    }

    /// Converts the given float, rounding to the nearest representable value
    /// and saturating if it is out of range. NaN becomes zero.
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    /// Converts the value to an `f64`. This is exact.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(1_u32 << Self::FRAC_BITS)
    }

    /// Converts the value to the nearest `f32`.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Whether the value is below zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Computes `1 / self`.
    #[inline]
    pub fn recip(self) -> Self {
        Self::ONE / self
    }

    /// Computes the square root, rounded down to the nearest representable
    /// value. Negative values give zero.
    #[inline]
    pub fn sqrt(self) -> Self {
        if self.0 <= 0 {
            return Self::ZERO;
        }
        let widened = (self.0 as u64) << Self::FRAC_BITS;
        // The root of a value below 2^47 fits comfortably in an i32.
        Self(widened.isqrt() as i32)
    }

    /// Computes the sine and cosine of the value in radians.
    #[inline]
    pub fn sin_cos(self) -> (Self, Self) {
        let (sin, cos) = cordic::sin_cos(Self::to_internal(self.0.into()));
        (Self::from_internal(sin), Self::from_internal(cos))
    }

    #[inline]
    pub fn sin(self) -> Self {
        self.sin_cos().0
    }

    #[inline]
    pub fn cos(self) -> Self {
        self.sin_cos().1
    }

    #[inline]
    pub fn tan(self) -> Self {
        let (sin, cos) = self.sin_cos();
        sin / cos
    }

    /// Computes the four-quadrant arctangent of `self / other`, in
    /// `[-pi, pi]`.
    #[inline]
    pub fn atan2(self, other: Self) -> Self {
        let y = Self::to_internal(self.0.into());
        let x = Self::to_internal(other.0.into());
        Self::from_internal(cordic::atan2(y, x))
    }

    #[inline]
    pub fn atan(self) -> Self {
        self.atan2(Self::ONE)
    }

    /// Computes the arccosine, in `[0, pi]`. The input is clamped to
    /// `[-1, 1]`.
    #[inline]
    pub fn acos(self) -> Self {
        let x = self.clamp(Self::NEG_ONE, Self::ONE);
        let opposite = (Self::ONE - x * x).sqrt();
        opposite.atan2(x)
    }

    /// Computes the arcsine, in `[-pi/2, pi/2]`. The input is clamped to
    /// `[-1, 1]`.
    #[inline]
    pub fn asin(self) -> Self {
        let y = self.clamp(Self::NEG_ONE, Self::ONE);
        let adjacent = (Self::ONE - y * y).sqrt();
        y.atan2(adjacent)
    }

    #[inline]
    const fn saturate(value: i64) -> Self {
        if value > i32::MAX as i64 {
            Self::MAX
        } else if value < i32::MIN as i64 {
            Self::MIN
        } else {
            Self(value as i32)
        }
    }

    #[inline]
    const fn to_internal(raw: i64) -> i64 {
        raw << (cordic::FRAC_BITS - Self::FRAC_BITS)
    }

    #[inline]
    const fn from_internal(value: i64) -> Self {
        let shift = cordic::FRAC_BITS - Self::FRAC_BITS;
        Self::saturate((value + (1 << (shift - 1))) >> shift)
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul for Fixed {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::saturate((i64::from(self.0) * i64::from(rhs.0)) >> Self::FRAC_BITS)
    }
}

impl Div for Fixed {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        if rhs.0 == 0 {
            return match self.0.cmp(&0) {
                Ordering::Greater => Self::MAX,
                Ordering::Less => Self::MIN,
                Ordering::Equal => Self::ZERO,
            };
        }
        Self::saturate((i64::from(self.0) << Self::FRAC_BITS) / i64::from(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fixed {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Fixed {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl From<i16> for Fixed {
    #[inline]
    fn from(value: i16) -> Self {
        Self::from_int(value.into())
    }
}

impl From<Fixed> for f64 {
    #[inline]
    fn from(value: Fixed) -> Self {
        value.to_f64()
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", self.to_f64())
    }
}

impl nt::Zero for Fixed {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl nt::One for Fixed {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }
}

impl nt::Bounded for Fixed {
    #[inline]
    fn min_value() -> Self {
        Self::MIN
    }

    #[inline]
    fn max_value() -> Self {
        Self::MAX
    }
}

impl nt::ToPrimitive for Fixed {
    /// Truncates toward zero.
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        Some(i64::from(self.0 / (1 << Self::FRAC_BITS)))
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.to_i64().and_then(|value| u64::try_from(value).ok())
    }

    #[inline]
    fn to_f32(&self) -> Option<f32> {
        Some(Fixed::to_f32(*self))
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(Fixed::to_f64(*self))
    }
}

impl nt::FromPrimitive for Fixed {
    #[inline]
    fn from_i64(value: i64) -> Option<Self> {
        i32::try_from(value)
            .ok()
            .filter(|value| (i32::from(i16::MIN)..=i32::from(i16::MAX)).contains(value))
            .map(Self::from_int)
    }

    #[inline]
    fn from_u64(value: u64) -> Option<Self> {
        i64::try_from(value).ok().and_then(Self::from_i64)
    }

    #[inline]
    fn from_f32(value: f32) -> Option<Self> {
        <Self as nt::FromPrimitive>::from_f64(f64::from(value))
    }

    #[inline]
    fn from_f64(value: f64) -> Option<Self> {
        let in_range = value >= Self::MIN.to_f64() && value <= Self::MAX.to_f64();
        in_range.then(|| Fixed::from_f64(value))
    }
}

impl nt::NumCast for Fixed {
    #[inline]
    fn from<T: nt::ToPrimitive>(value: T) -> Option<Self> {
        value
            .to_f64()
            .and_then(<Self as nt::FromPrimitive>::from_f64)
    }
}

impl AbsDiffEq for Fixed {
    type Epsilon = Self;

    fn default_epsilon() -> Self::Epsilon {
        Self::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (i64::from(self.0) - i64::from(other.0)).abs() <= i64::from(epsilon.0)
    }
}

impl RelativeEq for Fixed {
    fn default_max_relative() -> Self::Epsilon {
        Self::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        if self.abs_diff_eq(other, epsilon) {
            return true;
        }
        let diff = (i64::from(self.0) - i64::from(other.0)).abs();
        let largest = i64::from(self.0)
            .abs()
            .max(i64::from(other.0).abs());
        diff <= (largest * i64::from(max_relative.0)) >> Self::FRAC_BITS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nt::{FromPrimitive, ToPrimitive};
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-4;

    fn fx(value: f64) -> Fixed {
        Fixed::from_f64(value)
    }

    #[test]
    fn one_has_raw_value_65536() {
        assert_eq!(Fixed::ONE.raw(), 65536);
        assert_eq!(Fixed::from_int(1), Fixed::ONE);
        assert_eq!(Fixed::from(-1_i16), Fixed::NEG_ONE);
    }

    #[test]
    fn float_conversion_rounds_to_nearest() {
        assert_eq!(fx(0.5).raw(), 32768);
        assert_eq!(fx(1.0 / 65536.0).raw(), 1);
        assert_eq!(fx(0.4 / 65536.0).raw(), 0);
        assert_eq!(fx(-2.25).to_f64(), -2.25);
        assert_eq!(Fixed::from_f64(f64::NAN), Fixed::ZERO);
    }

    #[test]
    fn float_conversion_saturates() {
        assert_eq!(fx(1e9), Fixed::MAX);
        assert_eq!(fx(-1e9), Fixed::MIN);
        assert_eq!(Fixed::from_int(40000), Fixed::MAX);
    }

    #[test]
    fn arithmetic_works() {
        assert_eq!(fx(1.5) + fx(2.25), fx(3.75));
        assert_eq!(fx(1.5) - fx(2.25), fx(-0.75));
        assert_eq!(fx(1.5) * fx(-2.0), fx(-3.0));
        assert_eq!(fx(3.0) / fx(-2.0), fx(-1.5));
        assert_eq!(-fx(3.0), fx(-3.0));
    }

    #[test]
    fn assign_operators_work() {
        let mut value = fx(2.0);
        value += fx(1.0);
        value *= fx(4.0);
        value -= fx(2.0);
        value /= fx(5.0);
        assert_eq!(value, fx(2.0));
    }

    #[test]
    fn overflowing_arithmetic_saturates() {
        assert_eq!(Fixed::MAX + Fixed::ONE, Fixed::MAX);
        assert_eq!(Fixed::MIN - Fixed::ONE, Fixed::MIN);
        assert_eq!(fx(30000.0) * fx(30000.0), Fixed::MAX);
        assert_eq!(fx(-30000.0) * fx(30000.0), Fixed::MIN);
        assert_eq!(-Fixed::MIN, Fixed::MAX);
    }

    #[test]
    fn division_by_zero_saturates_by_sign() {
        assert_eq!(Fixed::ONE / Fixed::ZERO, Fixed::MAX);
        assert_eq!(Fixed::NEG_ONE / Fixed::ZERO, Fixed::MIN);
        assert_eq!(Fixed::ZERO / Fixed::ZERO, Fixed::ZERO);
    }

    #[test]
    fn sqrt_works() {
        assert_eq!(fx(4.0).sqrt(), fx(2.0));
        assert_eq!(fx(0.25).sqrt(), fx(0.5));
        assert_abs_diff_eq!(fx(2.0).sqrt().to_f64(), 2.0_f64.sqrt(), epsilon = TOLERANCE);
        assert_eq!(fx(-4.0).sqrt(), Fixed::ZERO);
        assert_eq!(Fixed::ZERO.sqrt(), Fixed::ZERO);
    }

    #[test]
    fn trigonometry_matches_float() {
        for step in -30..=30 {
            let angle = f64::from(step) * 0.25;
            let (sin, cos) = fx(angle).sin_cos();
            assert_abs_diff_eq!(sin.to_f64(), angle.sin(), epsilon = TOLERANCE);
            assert_abs_diff_eq!(cos.to_f64(), angle.cos(), epsilon = TOLERANCE);
        }
        assert_abs_diff_eq!(fx(0.5).tan().to_f64(), 0.5_f64.tan(), epsilon = TOLERANCE);
    }

    #[test]
    fn inverse_trigonometry_matches_float() {
        for step in -10..=10 {
            let value = f64::from(step) * 0.1;
            assert_abs_diff_eq!(fx(value).acos().to_f64(), value.acos(), epsilon = 1e-3);
            assert_abs_diff_eq!(fx(value).asin().to_f64(), value.asin(), epsilon = 1e-3);
            assert_abs_diff_eq!(fx(value).atan().to_f64(), value.atan(), epsilon = TOLERANCE);
        }
        assert_abs_diff_eq!(fx(-1.0).atan2(fx(-1.0)).to_f64(), (-1.0_f64).atan2(-1.0), epsilon = TOLERANCE);
    }

    #[test]
    fn acos_clamps_out_of_range_input() {
        assert_eq!(fx(1.5).acos(), fx(1.0).acos());
        assert_abs_diff_eq!(fx(-3.0).acos().to_f64(), std::f64::consts::PI, epsilon = TOLERANCE);
    }

    #[test]
    fn display_prints_decimal_value() {
        assert_eq!(fx(-1.5).to_string(), "-1.5");
        assert_eq!(format!("{:.2}", fx(0.25)), "0.25");
        assert_eq!(format!("{:?}", fx(2.0)), "Fixed(2)");
    }

    #[test]
    fn primitive_conversions_work() {
        assert_eq!(fx(-2.75).to_i64(), Some(-2));
        assert_eq!(fx(-2.75).to_u64(), None);
        assert_eq!(Fixed::from_i64(12), Some(fx(12.0)));
        assert_eq!(Fixed::from_i64(100_000), None);
        assert_eq!(<Fixed as FromPrimitive>::from_f64(0.5), Some(fx(0.5)));
        assert_eq!(<Fixed as FromPrimitive>::from_f64(f64::INFINITY), None);
        assert_eq!(<Fixed as nt::NumCast>::from(3_u8), Some(fx(3.0)));
    }

    #[test]
    fn approximate_equality_works() {
        assert!(fx(1.0).abs_diff_eq(&Fixed::from_raw(65537), Fixed::EPSILON));
        assert!(!fx(1.0).abs_diff_eq(&Fixed::from_raw(65538), Fixed::EPSILON));
        assert!(fx(1000.0).relative_eq(&fx(1000.01), Fixed::EPSILON, fx(0.001)));
        assert!(!fx(1.0).relative_eq(&fx(1.01), Fixed::EPSILON, fx(0.001)));
    }

    proptest! {
        #[test]
        fn multiplication_matches_float_within_one_unit(a in -100.0..100.0_f64, b in -100.0..100.0_f64) {
            let product = (fx(a) * fx(b)).to_f64();
            let expected = fx(a).to_f64() * fx(b).to_f64();
            prop_assert!((product - expected).abs() <= 1.0 / 65536.0);
        }
    }

    proptest! {
        #[test]
        fn sqrt_squared_recovers_value(value in 0.01..10000.0_f64) {
            let root = fx(value).sqrt();
            prop_assert!(((root * root).to_f64() - fx(value).to_f64()).abs() <= 2.0 * root.to_f64() / 65536.0 + 1e-4);
        }
    }
}
