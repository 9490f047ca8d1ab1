//! Quaternions.

use crate::{
    matrix::{Matrix3x3, Matrix4x4},
    num::{self, Scalar},
    vector::{Vector3, Vector4},
};
use std::fmt;

/// Dot product between two unit quaternions above which they are treated as
/// parallel, and [`Quaternion::slerp`] falls back to linear interpolation.
pub const SLERP_PARALLEL_THRESHOLD: f64 = 1.0 - 1e-6;

/// Magnitude of the sine of the pitch above which
/// [`Quaternion::to_yaw_pitch_roll`] treats the rotation as gimbal locked.
pub const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-6;

/// A quaternion `x*i + y*j + z*k + w`.
///
/// Rotations are represented by unit quaternions, but the unit length is not
/// enforced. Call [`Quaternion::normalize`] where it matters.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Quaternion<T> {
    pub(crate) x: T,
    pub(crate) y: T,
    pub(crate) z: T,
    pub(crate) w: T,
}

define_precision_aliases!(Quaternion => QuaternionF, QuaternionD, QuaternionX);

impl<T: Scalar> Quaternion<T> {
    /// Creates a new quaternion with the given imaginary (`x`, `y`, `z`) and
    /// real (`w`) components.
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from its imaginary vector part and real part.
    #[inline]
    pub const fn from_parts(imag: &Vector3<T>, real: T) -> Self {
        Self::new(imag.x, imag.y, imag.z, real)
    }

    /// Creates a quaternion from the components of the given vector.
    #[inline]
    pub const fn from_vector4(vector: &Vector4<T>) -> Self {
        Self::new(vector.x, vector.y, vector.z, vector.w)
    }

    /// The identity rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    #[inline]
    pub const fn x(&self) -> T {
        self.x
    }

    #[inline]
    pub const fn y(&self) -> T {
        self.y
    }

    #[inline]
    pub const fn z(&self) -> T {
        self.z
    }

    #[inline]
    pub const fn w(&self) -> T {
        self.w
    }

    /// The imaginary vector part.
    #[inline]
    pub const fn imag(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// The real part.
    #[inline]
    pub const fn real(&self) -> T {
        self.w
    }

    #[inline]
    pub const fn with_x(&self, x: T) -> Self {
        Self::new(x, self.y, self.z, self.w)
    }

    #[inline]
    pub const fn with_y(&self, y: T) -> Self {
        Self::new(self.x, y, self.z, self.w)
    }

    #[inline]
    pub const fn with_z(&self, z: T) -> Self {
        Self::new(self.x, self.y, z, self.w)
    }

    #[inline]
    pub const fn with_w(&self, w: T) -> Self {
        Self::new(self.x, self.y, self.z, w)
    }

    /// The components as a 4D vector.
    #[inline]
    pub const fn to_vector4(&self) -> Vector4<T> {
        Vector4::new(self.x, self.y, self.z, self.w)
    }

    /// Whether this is exactly the identity quaternion.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Computes the four-dimensional dot product with another quaternion.
    #[inline]
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Computes the quaternion scaled to unit length. A zero quaternion gives
    /// NaN components for floats and saturates for fixed-point values.
    #[inline]
    pub fn normalize(&self) -> Self {
        self * self.length().recip()
    }

    /// Negates the imaginary part. For a unit quaternion this is the inverse
    /// rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the multiplicative inverse, which is the conjugate divided by
    /// the squared length. A zero quaternion gives infinite or NaN components
    /// for floats and saturates for fixed-point values.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() * self.length_squared().recip()
    }

    /// Combines two rotations so that `first` is applied before `second`,
    /// which is the product `second * first`.
    #[inline]
    pub fn concatenate(first: &Self, second: &Self) -> Self {
        second * first
    }

    /// Creates a quaternion rotating by the given angle in radians about the
    /// given unit axis.
    #[inline]
    pub fn from_axis_angle(axis: &Vector3<T>, radians: T) -> Self {
        let (s, c) = (radians * T::ONE_HALF).sin_cos();
        Self::from_parts(&(axis * s), c)
    }

    /// Creates a quaternion from yaw (about y), pitch (about x) and roll
    /// (about z) angles in radians. Roll is applied first, then pitch, then
    /// yaw.
    pub fn from_yaw_pitch_roll(yaw: T, pitch: T, roll: T) -> Self {
        let (sr, cr) = (roll * T::ONE_HALF).sin_cos();
        let (sp, cp) = (pitch * T::ONE_HALF).sin_cos();
        let (sy, cy) = (yaw * T::ONE_HALF).sin_cos();

        Self::new(
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            cy * cp * cr + sy * sp * sr,
        )
    }

    /// Extracts the rotation from the upper-left 3x3 block of the given
    /// matrix, which must be a pure rotation.
    #[inline]
    pub fn from_rotation_matrix(matrix: &Matrix4x4<T>) -> Self {
        Self::from_matrix3x3(&Matrix3x3::from_matrix4x4(matrix))
    }

    /// Extracts the rotation from the given rotation matrix.
    ///
    /// When the trace is positive the real part is computed first. Otherwise
    /// the component belonging to the largest diagonal element is computed
    /// first, which keeps the square root argument away from zero.
    pub fn from_matrix3x3(m: &Matrix3x3<T>) -> Self {
        let half = T::ONE_HALF;
        let trace = m.m11 + m.m22 + m.m33;

        if trace > T::ZERO {
            let s = (trace + T::ONE).sqrt();
            let inv_s = half / s;
            Self::new(
                (m.m23 - m.m32) * inv_s,
                (m.m31 - m.m13) * inv_s,
                (m.m12 - m.m21) * inv_s,
                s * half,
            )
        } else if m.m11 >= m.m22 && m.m11 >= m.m33 {
            let s = (T::ONE + m.m11 - m.m22 - m.m33).sqrt();
            let inv_s = half / s;
            Self::new(
                half * s,
                (m.m12 + m.m21) * inv_s,
                (m.m13 + m.m31) * inv_s,
                (m.m23 - m.m32) * inv_s,
            )
        } else if m.m22 > m.m33 {
            let s = (T::ONE + m.m22 - m.m11 - m.m33).sqrt();
            let inv_s = half / s;
            Self::new(
                (m.m21 + m.m12) * inv_s,
                half * s,
                (m.m32 + m.m23) * inv_s,
                (m.m31 - m.m13) * inv_s,
            )
        } else {
            let s = (T::ONE + m.m33 - m.m11 - m.m22).sqrt();
            let inv_s = half / s;
            Self::new(
                (m.m31 + m.m13) * inv_s,
                (m.m32 + m.m23) * inv_s,
                half * s,
                (m.m12 - m.m21) * inv_s,
            )
        }
    }

    /// Extracts the rotation axis and the angle in radians, in the range
    /// `[0, 2pi]`.
    ///
    /// The quaternion does not need to have unit length. A rotation without
    /// an imaginary part has no defined axis, and the x-axis is returned.
    pub fn to_axis_angle(&self) -> (Vector3<T>, T) {
        let imag = self.imag();
        let sin_half_angle = imag.length();
        let angle = T::TWO * sin_half_angle.atan2(self.w);
        if sin_half_angle <= T::ZERO {
            return (Vector3::unit_x(), angle);
        }
        (imag * sin_half_angle.recip(), angle)
    }

    /// Extracts the yaw (about y), pitch (about x) and roll (about z) angles
    /// in radians, such that [`Quaternion::from_yaw_pitch_roll`] gives the
    /// same rotation back. The quaternion should have unit length.
    ///
    /// Pitch lies in `[-pi/2, pi/2]`, yaw and roll in `[-pi, pi]`. When the
    /// pitch is within [`GIMBAL_LOCK_THRESHOLD`] of a pole, only the sum or
    /// difference of yaw and roll is determined. The pitch is then clamped to
    /// the pole and the whole rotation about the vertical axis goes into the
    /// yaw, with zero roll.
    pub fn to_yaw_pitch_roll(&self) -> (T, T, T) {
        let Self { x, y, z, w } = *self;

        let sin_pitch = T::TWO * (w * x - y * z);

        if sin_pitch.abs() > gimbal_lock_threshold::<T>() {
            let sign = if sin_pitch > T::ZERO { T::ONE } else { T::NEG_ONE };
            let sin_yaw = sign * T::TWO * (x * y - w * z);
            let cos_yaw = T::ONE - T::TWO * (y * y + z * z);
            return (sin_yaw.atan2(cos_yaw), sign * T::FRAC_PI_2, T::ZERO);
        }

        let cos_pitch_sin_yaw = T::TWO * (x * z + w * y);
        let cos_pitch_cos_yaw = T::ONE - T::TWO * (x * x + y * y);
        let cos_pitch_sin_roll = T::TWO * (x * y + w * z);
        let cos_pitch_cos_roll = T::ONE - T::TWO * (x * x + z * z);

        let cos_pitch = (cos_pitch_sin_yaw * cos_pitch_sin_yaw
            + cos_pitch_cos_yaw * cos_pitch_cos_yaw)
            .sqrt();

        (
            cos_pitch_sin_yaw.atan2(cos_pitch_cos_yaw),
            sin_pitch.atan2(cos_pitch),
            cos_pitch_sin_roll.atan2(cos_pitch_cos_roll),
        )
    }

    /// Linearly interpolates towards `other` along the shorter arc and
    /// normalizes the result.
    pub fn lerp(&self, other: &Self, amount: T) -> Self {
        let other = if self.dot(other) >= T::ZERO {
            *other
        } else {
            -other
        };
        (self * (T::ONE - amount) + other * amount).normalize()
    }

    /// Spherically interpolates between two unit quaternions along the
    /// shorter arc.
    ///
    /// If the quaternions are nearly parallel (see
    /// [`SLERP_PARALLEL_THRESHOLD`]), the result is computed by linear
    /// interpolation followed by normalization instead.
    pub fn slerp(&self, other: &Self, amount: T) -> Self {
        let mut cos_omega = self.dot(other);
        let flip = cos_omega < T::ZERO;
        if flip {
            cos_omega = -cos_omega;
        }

        if cos_omega > slerp_parallel_threshold::<T>() {
            let s2 = if flip { -amount } else { amount };
            return (self * (T::ONE - amount) + other * s2).normalize();
        }

        let omega = cos_omega.acos();
        let inv_sin_omega = omega.sin().recip();

        let s1 = ((T::ONE - amount) * omega).sin() * inv_sin_omega;
        let s2 = (amount * omega).sin() * inv_sin_omega;
        let s2 = if flip { -s2 } else { s2 };

        self * s1 + other * s2
    }

    /// Converts the quaternion to another scalar precision.
    #[inline]
    pub fn cast<U: Scalar>(&self) -> Quaternion<U> {
        Quaternion::new(
            num::cast(self.x),
            num::cast(self.y),
            num::cast(self.z),
            num::cast(self.w),
        )
    }

    /// Whether every component differs from the corresponding one in
    /// `other` by at most `delta`.
    #[inline]
    pub fn equals_within(&self, other: &Self, delta: T) -> bool {
        self.to_vector4()
            .equals_within(&other.to_vector4(), delta)
    }

    /// Whether any component is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.to_vector4().has_nan()
    }
}

/// The gimbal lock threshold in the precision of `T`. For fixed-point values
/// the margin below one is widened to 16 raw units, since the rounding of
/// the quaternion components already moves the pitch sine by a few units.
fn gimbal_lock_threshold<T: Scalar>() -> T {
    let margin = T::from_f64_lossy(1.0 - GIMBAL_LOCK_THRESHOLD)
        .max(T::EPSILON * T::from_f64_lossy(16.0));
    T::ONE - margin
}

/// The parallel threshold in the precision of `T`, kept at least one unit
/// below one so that it can be exceeded in fixed point.
fn slerp_parallel_threshold<T: Scalar>() -> T {
    let margin = T::from_f64_lossy(1.0 - SLERP_PARALLEL_THRESHOLD).max(T::EPSILON);
    T::ONE - margin
}

impl_binop!(<T> Add, add, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    Quaternion::new(a.x + b.x, a.y + b.y, a.z + b.z, a.w + b.w)
});

impl_binop!(<T> Sub, sub, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    Quaternion::new(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
});

// Hamilton product: `a * b` applies `b` first, then `a`.
impl_binop!(<T> Mul, mul, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    let cx = a.y * b.z - a.z * b.y;
    let cy = a.z * b.x - a.x * b.z;
    let cz = a.x * b.y - a.y * b.x;
    let dot = a.x * b.x + a.y * b.y + a.z * b.z;

    Quaternion::new(
        a.x * b.w + b.x * a.w + cx,
        a.y * b.w + b.y * a.w + cy,
        a.z * b.w + b.z * a.w + cz,
        a.w * b.w - dot,
    )
});

impl_binop!(<T> Div, div, Quaternion<T>, Quaternion<T>, Quaternion<T>, |a, b| {
    a * b.inverse()
});

impl_binop!(<T> Mul, mul, Quaternion<T>, T, Quaternion<T>, |a, b| {
    Quaternion::new(a.x * *b, a.y * *b, a.z * *b, a.w * *b)
});

impl_scalar_lhs_mul!(Quaternion);

impl_binop_assign!(<T> AddAssign, add_assign, Quaternion<T>, Quaternion<T>, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(<T> SubAssign, sub_assign, Quaternion<T>, Quaternion<T>, |a, b| {
    *a = &*a - b;
});

impl_binop_assign!(<T> MulAssign, mul_assign, Quaternion<T>, Quaternion<T>, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(<T> MulAssign, mul_assign, Quaternion<T>, T, |a, b| {
    *a = &*a * b;
});

impl_unary_op!(<T> Neg, neg, Quaternion<T>, Quaternion<T>, |val| {
    Quaternion::new(-val.x, -val.y, -val.z, -val.w)
});

impl<T: Scalar> From<[T; 4]> for Quaternion<T> {
    #[inline]
    fn from([x, y, z, w]: [T; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl<T: Scalar> From<Quaternion<T>> for [T; 4] {
    #[inline]
    fn from(quaternion: Quaternion<T>) -> Self {
        [quaternion.x, quaternion.y, quaternion.z, quaternion.w]
    }
}

impl_abs_diff_eq!(Quaternion, |a, b, epsilon| {
    a.x.abs_diff_eq(&b.x, epsilon)
        && a.y.abs_diff_eq(&b.y, epsilon)
        && a.z.abs_diff_eq(&b.z, epsilon)
        && a.w.abs_diff_eq(&b.w, epsilon)
});

impl_relative_eq!(Quaternion, |a, b, epsilon, max_relative| {
    a.x.relative_eq(&b.x, epsilon, max_relative)
        && a.y.relative_eq(&b.y, epsilon, max_relative)
        && a.z.relative_eq(&b.z, epsilon, max_relative)
        && a.w.relative_eq(&b.w, epsilon, max_relative)
});

impl_pod!(Quaternion);

impl<T: Scalar> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{X:{} Y:{} Z:{} W:{}}}",
            self.x, self.y, self.z, self.w
        )
    }
}
