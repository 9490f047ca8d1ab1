//! Vectors.

use crate::{
    matrix::{Matrix3x3, Matrix4x4},
    num::{self, Scalar},
    quaternion::Quaternion,
};
use std::{fmt, ops::Index};

/// A 2-dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2<T> {
    pub(crate) x: T,
    pub(crate) y: T,
}

/// A 3-dimensional vector.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    pub(crate) x: T,
    pub(crate) y: T,
    pub(crate) z: T,
}

/// A 4-dimensional vector.
///
/// Also used as the homogeneous form of a 3D point (`w = 1`) or direction
/// (`w = 0`) when transforming with a [`Matrix4x4`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector4<T> {
    pub(crate) x: T,
    pub(crate) y: T,
    pub(crate) z: T,
    pub(crate) w: T,
}

define_precision_aliases!(Vector2 => Vector2F, Vector2D, Vector2X);
define_precision_aliases!(Vector3 => Vector3F, Vector3D, Vector3X);
define_precision_aliases!(Vector4 => Vector4F, Vector4D, Vector4X);

/// Implements everything the vector types have in common, component by
/// component.
macro_rules! impl_vector {
    ($name:ident, $n:literal, [$($field:ident),+]) => {
        impl<T: Scalar> $name<T> {
            /// Creates a new vector with the same value for all components.
            #[inline]
            pub const fn splat(value: T) -> Self {
                Self { $($field: value),+ }
            }

            /// Creates a new vector with all zeros.
            #[inline]
            pub const fn zero() -> Self {
                Self::splat(T::ZERO)
            }

            /// Creates a new vector with all ones.
            #[inline]
            pub const fn one() -> Self {
                Self::splat(T::ONE)
            }

            /// Computes the dot product of this vector with another.
            #[inline]
            pub fn dot(&self, other: &Self) -> T {
                let mut sum = T::ZERO;
                $(sum += self.$field * other.$field;)+
                sum
            }

            /// Computes the square of the length of the vector.
            #[inline]
            pub fn length_squared(&self) -> T {
                self.dot(self)
            }

            /// Computes the length of the vector.
            #[inline]
            pub fn length(&self) -> T {
                self.length_squared().sqrt()
            }

            /// Computes the square of the Euclidean distance to another vector.
            #[inline]
            pub fn distance_squared(&self, other: &Self) -> T {
                (self - other).length_squared()
            }

            /// Computes the Euclidean distance to another vector.
            #[inline]
            pub fn distance(&self, other: &Self) -> T {
                self.distance_squared(other).sqrt()
            }

            /// Computes the vector scaled to unit length.
            ///
            /// The zero vector has no direction: for float components the
            /// result is all NaN, for fixed-point components the division
            /// saturates.
            #[inline]
            pub fn normalize(&self) -> Self {
                self / self.length()
            }

            /// Reflects the vector off a surface with the given unit normal.
            #[inline]
            pub fn reflect(&self, normal: &Self) -> Self {
                let dot = self.dot(normal);
                self - normal * (T::TWO * dot)
            }

            /// Linearly interpolates from this vector towards `other`.
            #[inline]
            pub fn lerp(&self, other: &Self, amount: T) -> Self {
                self + (other - self) * amount
            }

            /// Restricts each component to the range given by the
            /// corresponding components of `min` and `max`.
            #[inline]
            pub fn clamp(&self, min: &Self, max: &Self) -> Self {
                self.max(min).min(max)
            }

            /// Returns a vector where each component is the minimum of the
            /// corresponding component in this and another vector.
            #[inline]
            pub fn min(&self, other: &Self) -> Self {
                Self { $($field: self.$field.min(other.$field)),+ }
            }

            /// Returns a vector where each component is the maximum of the
            /// corresponding component in this and another vector.
            #[inline]
            pub fn max(&self, other: &Self) -> Self {
                Self { $($field: self.$field.max(other.$field)),+ }
            }

            /// Returns a vector with the absolute value of each component.
            #[inline]
            pub fn abs(&self) -> Self {
                self.mapped(Scalar::abs)
            }

            /// Returns a vector with the square root of each component.
            #[inline]
            pub fn sqrt(&self) -> Self {
                self.mapped(Scalar::sqrt)
            }

            /// Returns a vector with the given closure applied to each
            /// component.
            #[inline]
            pub fn mapped(&self, mut f: impl FnMut(T) -> T) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            /// Converts the vector to another scalar precision.
            #[inline]
            pub fn cast<U: Scalar>(&self) -> $name<U> {
                $name { $($field: num::cast(self.$field)),+ }
            }

            /// Whether every component differs from the corresponding one in
            /// `other` by at most `delta`.
            #[inline]
            pub fn equals_within(&self, other: &Self, delta: T) -> bool {
                $((self.$field - other.$field).abs() <= delta)&&+
            }

            /// Whether any component is NaN.
            #[inline]
            pub fn has_nan(&self) -> bool {
                $(self.$field.is_nan())||+
            }
        }

        impl_binop!(<T> Add, add, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field + b.$field),+ }
        });

        impl_binop!(<T> Sub, sub, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field - b.$field),+ }
        });

        impl_binop!(<T> Mul, mul, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field * b.$field),+ }
        });

        impl_binop!(<T> Div, div, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field / b.$field),+ }
        });

        impl_binop!(<T> Mul, mul, $name<T>, T, $name<T>, |a, b| {
            $name { $($field: a.$field * *b),+ }
        });

        impl_binop!(<T> Div, div, $name<T>, T, $name<T>, |a, b| {
            $name { $($field: a.$field / *b),+ }
        });

        impl_scalar_lhs_mul!($name);

        impl_binop_assign!(<T> AddAssign, add_assign, $name<T>, $name<T>, |a, b| {
            $(a.$field += b.$field;)+
        });

        impl_binop_assign!(<T> SubAssign, sub_assign, $name<T>, $name<T>, |a, b| {
            $(a.$field -= b.$field;)+
        });

        impl_binop_assign!(<T> MulAssign, mul_assign, $name<T>, T, |a, b| {
            $(a.$field *= *b;)+
        });

        impl_binop_assign!(<T> DivAssign, div_assign, $name<T>, T, |a, b| {
            $(a.$field /= *b;)+
        });

        impl_unary_op!(<T> Neg, neg, $name<T>, $name<T>, |val| {
            $name { $($field: -val.$field),+ }
        });

        impl<T: Scalar> Index<usize> for $name<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: usize) -> &Self::Output {
                let components: &[T; $n] = bytemuck::cast_ref(self);
                &components[index]
            }
        }

        impl<T: Scalar> From<[T; $n]> for $name<T> {
            #[inline]
            fn from([$($field),+]: [T; $n]) -> Self {
                Self { $($field),+ }
            }
        }

        impl<T: Scalar> From<$name<T>> for [T; $n] {
            #[inline]
            fn from(vector: $name<T>) -> Self {
                [$(vector.$field),+]
            }
        }

        impl_abs_diff_eq!($name, |a, b, epsilon| {
            $(a.$field.abs_diff_eq(&b.$field, epsilon))&&+
        });

        impl_relative_eq!($name, |a, b, epsilon, max_relative| {
            $(a.$field.relative_eq(&b.$field, epsilon, max_relative))&&+
        });

        impl_pod!($name);
    };
}

impl_vector!(Vector2, 2, [x, y]);
impl_vector!(Vector3, 3, [x, y, z]);
impl_vector!(Vector4, 4, [x, y, z, w]);

impl<T: Scalar> Vector2<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> T {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> T {
        self.y
    }

    /// Returns a copy with the x-component replaced.
    #[inline]
    pub const fn with_x(&self, x: T) -> Self {
        Self::new(x, self.y)
    }

    /// Returns a copy with the y-component replaced.
    #[inline]
    pub const fn with_y(&self, y: T) -> Self {
        Self::new(self.x, y)
    }

    /// Converts the vector to 3D by appending the given z-component.
    #[inline]
    pub const fn extended(&self, z: T) -> Vector3<T> {
        Vector3::new(self.x, self.y, z)
    }

    /// Transforms the vector as a point (`z = 0`, `w = 1`) with the given
    /// matrix, ignoring the projective row.
    #[inline]
    pub fn transform(&self, matrix: &Matrix4x4<T>) -> Self {
        Self::new(
            self.x * matrix.m11 + self.y * matrix.m21 + matrix.m41,
            self.x * matrix.m12 + self.y * matrix.m22 + matrix.m42,
        )
    }

    /// Transforms the vector as a direction (`z = 0`, `w = 0`) with the given
    /// matrix, so translation does not apply.
    #[inline]
    pub fn transform_normal(&self, matrix: &Matrix4x4<T>) -> Self {
        Self::new(
            self.x * matrix.m11 + self.y * matrix.m21,
            self.x * matrix.m12 + self.y * matrix.m22,
        )
    }

    /// Rotates the vector (as lying in the xy-plane) with the given unit
    /// quaternion.
    #[inline]
    pub fn transform_by_quaternion(&self, rotation: &Quaternion<T>) -> Self {
        let rotated = self.extended(T::ZERO) * Matrix3x3::from_quaternion(rotation);
        Self::new(rotated.x, rotated.y)
    }
}

impl<T: Scalar> Vector3<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE)
    }

    /// Creates a 3D vector from a 2D vector and a z-component.
    #[inline]
    pub const fn from_vector2(xy: Vector2<T>, z: T) -> Self {
        xy.extended(z)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> T {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> T {
        self.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> T {
        self.z
    }

    /// Returns a copy with the x-component replaced.
    #[inline]
    pub const fn with_x(&self, x: T) -> Self {
        Self::new(x, self.y, self.z)
    }

    /// Returns a copy with the y-component replaced.
    #[inline]
    pub const fn with_y(&self, y: T) -> Self {
        Self::new(self.x, y, self.z)
    }

    /// Returns a copy with the z-component replaced.
    #[inline]
    pub const fn with_z(&self, z: T) -> Self {
        Self::new(self.x, self.y, z)
    }

    /// The x- and y-components as a 2D vector.
    #[inline]
    pub const fn xy(&self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }

    /// Converts the vector to 4D by appending the given w-component.
    #[inline]
    pub const fn extended(&self, w: T) -> Vector4<T> {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Computes the cross product of this vector with another.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Transforms the vector as a point (`w = 1`) with the given matrix,
    /// ignoring the projective column.
    #[inline]
    pub fn transform(&self, matrix: &Matrix4x4<T>) -> Self {
        self.transform_normal(matrix) + matrix.translation_part()
    }

    /// Transforms the vector as a direction (`w = 0`) with the given matrix,
    /// so translation does not apply.
    #[inline]
    pub fn transform_normal(&self, matrix: &Matrix4x4<T>) -> Self {
        Self::new(
            self.x * matrix.m11 + self.y * matrix.m21 + self.z * matrix.m31,
            self.x * matrix.m12 + self.y * matrix.m22 + self.z * matrix.m32,
            self.x * matrix.m13 + self.y * matrix.m23 + self.z * matrix.m33,
        )
    }

    /// Transforms the vector as a homogeneous point (`w = 1`) with the given
    /// matrix, keeping the resulting w-component.
    #[inline]
    pub fn transform_homogeneous(&self, matrix: &Matrix4x4<T>) -> Vector4<T> {
        self.extended(T::ONE) * matrix
    }

    /// Rotates the vector with the given unit quaternion.
    #[inline]
    pub fn transform_by_quaternion(&self, rotation: &Quaternion<T>) -> Self {
        self * Matrix3x3::from_quaternion(rotation)
    }
}

impl<T: Scalar> Vector4<T> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ZERO)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(T::ZERO, T::ONE, T::ZERO, T::ZERO)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ONE, T::ZERO)
    }

    #[inline]
    pub const fn unit_w() -> Self {
        Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    /// Creates a 4D vector from a 2D vector and z- and w-components.
    #[inline]
    pub const fn from_vector2(xy: Vector2<T>, z: T, w: T) -> Self {
        Self::new(xy.x, xy.y, z, w)
    }

    /// Creates a 4D vector from a 3D vector and a w-component.
    #[inline]
    pub const fn from_vector3(xyz: Vector3<T>, w: T) -> Self {
        xyz.extended(w)
    }

    /// The x-component.
    #[inline]
    pub const fn x(&self) -> T {
        self.x
    }

    /// The y-component.
    #[inline]
    pub const fn y(&self) -> T {
        self.y
    }

    /// The z-component.
    #[inline]
    pub const fn z(&self) -> T {
        self.z
    }

    /// The w-component.
    #[inline]
    pub const fn w(&self) -> T {
        self.w
    }

    /// Returns a copy with the x-component replaced.
    #[inline]
    pub const fn with_x(&self, x: T) -> Self {
        Self::new(x, self.y, self.z, self.w)
    }

    /// Returns a copy with the y-component replaced.
    #[inline]
    pub const fn with_y(&self, y: T) -> Self {
        Self::new(self.x, y, self.z, self.w)
    }

    /// Returns a copy with the z-component replaced.
    #[inline]
    pub const fn with_z(&self, z: T) -> Self {
        Self::new(self.x, self.y, z, self.w)
    }

    /// Returns a copy with the w-component replaced.
    #[inline]
    pub const fn with_w(&self, w: T) -> Self {
        Self::new(self.x, self.y, self.z, w)
    }

    /// The x-, y- and z-components as a 3D vector.
    #[inline]
    pub const fn xyz(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Transforms the vector with the given matrix (as a row vector on the
    /// left).
    #[inline]
    pub fn transform(&self, matrix: &Matrix4x4<T>) -> Self {
        self * matrix
    }

    /// Rotates the xyz-part of the vector with the given unit quaternion,
    /// leaving w unchanged.
    #[inline]
    pub fn transform_by_quaternion(&self, rotation: &Quaternion<T>) -> Self {
        self.xyz().transform_by_quaternion(rotation).extended(self.w)
    }
}

impl<T: Scalar> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl<T: Scalar> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

impl<T: Scalar> fmt::Display for Vector4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}, {}>", self.x, self.y, self.z, self.w)
    }
}
