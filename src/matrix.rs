//! Matrices.

pub mod decompose;
mod factory;
mod inverse;
pub mod projection;

use crate::{
    num::{self, Scalar},
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};
use std::{fmt, ops::Index};

/// A 3x3 matrix stored in row-major order.
///
/// Vectors are treated as rows and multiplied on the left, so
/// `v * a * b` applies `a` first and then `b`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Matrix3x3<T> {
    pub(crate) m11: T,
    pub(crate) m12: T,
    pub(crate) m13: T,
    pub(crate) m21: T,
    pub(crate) m22: T,
    pub(crate) m23: T,
    pub(crate) m31: T,
    pub(crate) m32: T,
    pub(crate) m33: T,
}

/// A 4x4 matrix stored in row-major order.
///
/// Vectors are treated as rows and multiplied on the left, so the translation
/// of an affine transform lives in the fourth row (`m41`, `m42`, `m43`) and
/// `v * a * b` applies `a` first and then `b`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Matrix4x4<T> {
    pub(crate) m11: T,
    pub(crate) m12: T,
    pub(crate) m13: T,
    pub(crate) m14: T,
    pub(crate) m21: T,
    pub(crate) m22: T,
    pub(crate) m23: T,
    pub(crate) m24: T,
    pub(crate) m31: T,
    pub(crate) m32: T,
    pub(crate) m33: T,
    pub(crate) m34: T,
    pub(crate) m41: T,
    pub(crate) m42: T,
    pub(crate) m43: T,
    pub(crate) m44: T,
}

define_precision_aliases!(Matrix3x3 => Matrix3x3F, Matrix3x3D, Matrix3x3X);
define_precision_aliases!(Matrix4x4 => Matrix4x4F, Matrix4x4D, Matrix4x4X);

/// Implements the element-wise parts of the matrix types.
macro_rules! impl_matrix {
    ($name:ident, $dim:literal, $n:literal, [$($field:ident),+]) => {
        impl<T: Scalar> $name<T> {
            /// Creates a matrix with all zeros.
            #[inline]
            pub const fn zero() -> Self {
                Self { $($field: T::ZERO),+ }
            }

            /// Whether this is exactly the identity matrix. No tolerance is
            /// applied.
            #[inline]
            pub fn is_identity(&self) -> bool {
                *self == Self::identity()
            }

            $(
                #[inline]
                pub const fn $field(&self) -> T {
                    self.$field
                }
            )+

            /// Returns the element at row `row` and column `col` (both
            /// zero-based).
            ///
            /// # Panics
            /// If the indices are outside the matrix.
            #[inline]
            pub fn element(&self, row: usize, col: usize) -> T {
                self[(row, col)]
            }

            /// Returns a copy with the element at row `row` and column `col`
            /// (both zero-based) replaced.
            ///
            /// # Panics
            /// If the indices are outside the matrix.
            #[inline]
            pub fn with_element(&self, row: usize, col: usize, value: T) -> Self {
                let mut matrix = *self;
                let elements: &mut [T; $n] = bytemuck::cast_mut(&mut matrix);
                elements[Self::flat_index(row, col)] = value;
                matrix
            }

            /// Returns a matrix with the given closure applied to each element.
            #[inline]
            pub fn mapped(&self, mut f: impl FnMut(T) -> T) -> Self {
                Self { $($field: f(self.$field)),+ }
            }

            /// Linearly interpolates each element from this matrix towards
            /// `other`.
            #[inline]
            pub fn lerp(&self, other: &Self, amount: T) -> Self {
                Self { $($field: self.$field + (other.$field - self.$field) * amount),+ }
            }

            /// Converts the matrix to another scalar precision.
            #[inline]
            pub fn cast<U: Scalar>(&self) -> $name<U> {
                $name { $($field: num::cast(self.$field)),+ }
            }

            /// Whether every element differs from the corresponding one in
            /// `other` by at most `delta`.
            #[inline]
            pub fn equals_within(&self, other: &Self, delta: T) -> bool {
                $((self.$field - other.$field).abs() <= delta)&&+
            }

            /// Whether any element is NaN.
            #[inline]
            pub fn has_nan(&self) -> bool {
                $(self.$field.is_nan())||+
            }

            fn flat_index(row: usize, col: usize) -> usize {
                assert!(row < $dim && col < $dim, "matrix index out of bounds");
                row * $dim + col
            }
        }

        impl_binop!(<T> Add, add, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field + b.$field),+ }
        });

        impl_binop!(<T> Sub, sub, $name<T>, $name<T>, $name<T>, |a, b| {
            $name { $($field: a.$field - b.$field),+ }
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

        impl<T: Scalar> Index<(usize, usize)> for $name<T> {
            type Output = T;

            #[inline]
            fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
                let elements: &[T; $n] = bytemuck::cast_ref(self);
                &elements[Self::flat_index(row, col)]
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
            fn from(matrix: $name<T>) -> Self {
                [$(matrix.$field),+]
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

impl_matrix!(Matrix3x3, 3, 9, [m11, m12, m13, m21, m22, m23, m31, m32, m33]);
impl_matrix!(
    Matrix4x4,
    4,
    16,
    [m11, m12, m13, m14, m21, m22, m23, m24, m31, m32, m33, m34, m41, m42, m43, m44]
);

impl<T: Scalar> Matrix3x3<T> {
    /// Creates a new matrix with the given elements, listed row by row.
    #[inline]
    pub const fn new(
        m11: T,
        m12: T,
        m13: T,
        m21: T,
        m22: T,
        m23: T,
        m31: T,
        m32: T,
        m33: T,
    ) -> Self {
        Self {
            m11,
            m12,
            m13,
            m21,
            m22,
            m23,
            m31,
            m32,
            m33,
        }
    }

    /// Creates an identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_diagonal(&Vector3::new(T::ONE, T::ONE, T::ONE))
    }

    /// Creates a diagonal matrix with the given diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector3<T>) -> Self {
        Self::new(
            diagonal.x,
            T::ZERO,
            T::ZERO,
            T::ZERO,
            diagonal.y,
            T::ZERO,
            T::ZERO,
            T::ZERO,
            diagonal.z,
        )
    }

    /// Creates a matrix with the given rows.
    #[inline]
    pub const fn from_rows(row_1: &Vector3<T>, row_2: &Vector3<T>, row_3: &Vector3<T>) -> Self {
        Self::new(
            row_1.x, row_1.y, row_1.z, row_2.x, row_2.y, row_2.z, row_3.x, row_3.y, row_3.z,
        )
    }

    /// Takes the upper-left 3x3 block of the given 4x4 matrix.
    #[inline]
    pub const fn from_matrix4x4(matrix: &Matrix4x4<T>) -> Self {
        Self::new(
            matrix.m11, matrix.m12, matrix.m13, matrix.m21, matrix.m22, matrix.m23, matrix.m31,
            matrix.m32, matrix.m33,
        )
    }

    /// Embeds the matrix as the upper-left block of an otherwise identity
    /// 4x4 matrix.
    #[inline]
    pub const fn to_matrix4x4(&self) -> Matrix4x4<T> {
        Matrix4x4::new(
            self.m11,
            self.m12,
            self.m13,
            T::ZERO,
            self.m21,
            self.m22,
            self.m23,
            T::ZERO,
            self.m31,
            self.m32,
            self.m33,
            T::ZERO,
            T::ZERO,
            T::ZERO,
            T::ZERO,
            T::ONE,
        )
    }

    #[inline]
    pub const fn row_1(&self) -> Vector3<T> {
        Vector3::new(self.m11, self.m12, self.m13)
    }

    #[inline]
    pub const fn row_2(&self) -> Vector3<T> {
        Vector3::new(self.m21, self.m22, self.m23)
    }

    #[inline]
    pub const fn row_3(&self) -> Vector3<T> {
        Vector3::new(self.m31, self.m32, self.m33)
    }

    /// Returns the row with the given zero-based index.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn row(&self, index: usize) -> Vector3<T> {
        match index {
            0 => self.row_1(),
            1 => self.row_2(),
            2 => self.row_3(),
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns a copy with the row at the given zero-based index replaced.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn with_row(&self, index: usize, row: &Vector3<T>) -> Self {
        let mut rows = [self.row_1(), self.row_2(), self.row_3()];
        rows[index] = *row;
        Self::from_rows(&rows[0], &rows[1], &rows[2])
    }

    /// Creates a matrix scaling by the given factor along each axis.
    #[inline]
    pub const fn scale(scales: &Vector3<T>) -> Self {
        Self::from_diagonal(scales)
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// x-axis.
    #[inline]
    pub fn rotation_x(radians: T) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ZERO, c, s, T::ZERO, -s, c)
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// y-axis.
    #[inline]
    pub fn rotation_y(radians: T) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, T::ZERO, -s, T::ZERO, T::ONE, T::ZERO, s, T::ZERO, c)
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// z-axis.
    #[inline]
    pub fn rotation_z(radians: T) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, T::ZERO, -s, c, T::ZERO, T::ZERO, T::ZERO, T::ONE)
    }

    /// Creates the rotation matrix corresponding to the given unit
    /// quaternion.
    pub fn from_quaternion(rotation: &Quaternion<T>) -> Self {
        let Quaternion { x, y, z, w } = *rotation;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;

        let xy = x * y;
        let wz = z * w;
        let xz = z * x;
        let wy = y * w;
        let yz = y * z;
        let wx = x * w;

        Self::new(
            T::ONE - T::TWO * (yy + zz),
            T::TWO * (xy + wz),
            T::TWO * (xz - wy),
            T::TWO * (xy - wz),
            T::ONE - T::TWO * (zz + xx),
            T::TWO * (yz + wx),
            T::TWO * (xz + wy),
            T::TWO * (yz - wx),
            T::ONE - T::TWO * (yy + xx),
        )
    }

    /// Computes the determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> T {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m21 * self.m33 - self.m23 * self.m31)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::new(
            self.m11, self.m21, self.m31, self.m12, self.m22, self.m32, self.m13, self.m23,
            self.m33,
        )
    }
}

impl<T: Scalar> Matrix4x4<T> {
    /// Creates a new matrix with the given elements, listed row by row.
    #[inline]
    pub const fn new(
        m11: T,
        m12: T,
        m13: T,
        m14: T,
        m21: T,
        m22: T,
        m23: T,
        m24: T,
        m31: T,
        m32: T,
        m33: T,
        m34: T,
        m41: T,
        m42: T,
        m43: T,
        m44: T,
    ) -> Self {
        Self {
            m11,
            m12,
            m13,
            m14,
            m21,
            m22,
            m23,
            m24,
            m31,
            m32,
            m33,
            m34,
            m41,
            m42,
            m43,
            m44,
        }
    }

    /// Creates an identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_diagonal(&Vector4::new(T::ONE, T::ONE, T::ONE, T::ONE))
    }

    /// Creates a diagonal matrix with the given diagonal.
    #[inline]
    pub const fn from_diagonal(diagonal: &Vector4<T>) -> Self {
        let o = T::ZERO;
        Self::new(
            diagonal.x, o, o, o, o, diagonal.y, o, o, o, o, diagonal.z, o, o, o, o, diagonal.w,
        )
    }

    /// Creates a matrix with the given rows.
    #[inline]
    pub const fn from_rows(
        row_1: &Vector4<T>,
        row_2: &Vector4<T>,
        row_3: &Vector4<T>,
        row_4: &Vector4<T>,
    ) -> Self {
        Self::new(
            row_1.x, row_1.y, row_1.z, row_1.w, row_2.x, row_2.y, row_2.z, row_2.w, row_3.x,
            row_3.y, row_3.z, row_3.w, row_4.x, row_4.y, row_4.z, row_4.w,
        )
    }

    #[inline]
    pub const fn row_1(&self) -> Vector4<T> {
        Vector4::new(self.m11, self.m12, self.m13, self.m14)
    }

    #[inline]
    pub const fn row_2(&self) -> Vector4<T> {
        Vector4::new(self.m21, self.m22, self.m23, self.m24)
    }

    #[inline]
    pub const fn row_3(&self) -> Vector4<T> {
        Vector4::new(self.m31, self.m32, self.m33, self.m34)
    }

    #[inline]
    pub const fn row_4(&self) -> Vector4<T> {
        Vector4::new(self.m41, self.m42, self.m43, self.m44)
    }

    /// Returns the row with the given zero-based index.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn row(&self, index: usize) -> Vector4<T> {
        match index {
            0 => self.row_1(),
            1 => self.row_2(),
            2 => self.row_3(),
            3 => self.row_4(),
            _ => panic!("index out of bounds"),
        }
    }

    /// Returns a copy with the row at the given zero-based index replaced.
    ///
    /// # Panics
    /// If the index is outside the matrix.
    #[inline]
    pub fn with_row(&self, index: usize, row: &Vector4<T>) -> Self {
        let mut rows = [self.row_1(), self.row_2(), self.row_3(), self.row_4()];
        rows[index] = *row;
        Self::from_rows(&rows[0], &rows[1], &rows[2], &rows[3])
    }

    /// The translation part of the matrix (the first three elements of the
    /// fourth row).
    #[inline]
    pub const fn translation_part(&self) -> Vector3<T> {
        Vector3::new(self.m41, self.m42, self.m43)
    }

    /// Returns a copy with the translation part replaced.
    #[inline]
    pub const fn with_translation(&self, translation: &Vector3<T>) -> Self {
        let mut matrix = *self;
        matrix.m41 = translation.x;
        matrix.m42 = translation.y;
        matrix.m43 = translation.z;
        matrix
    }

    /// Computes the determinant of the matrix by cofactor expansion along the
    /// first row.
    pub fn determinant(&self) -> T {
        let (a, b, c, d) = (self.m11, self.m12, self.m13, self.m14);
        let (e, f, g, h) = (self.m21, self.m22, self.m23, self.m24);
        let (i, j, k, l) = (self.m31, self.m32, self.m33, self.m34);
        let (m, n, o, p) = (self.m41, self.m42, self.m43, self.m44);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn) - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::new(
            self.m11, self.m21, self.m31, self.m41, self.m12, self.m22, self.m32, self.m42,
            self.m13, self.m23, self.m33, self.m43, self.m14, self.m24, self.m34, self.m44,
        )
    }

    /// Applies the given rotation after this matrix, equivalent to
    /// `self * Matrix4x4::from_quaternion(rotation)`.
    #[inline]
    pub fn transform_by_quaternion(&self, rotation: &Quaternion<T>) -> Self {
        self * Self::from_quaternion(rotation)
    }
}

impl_binop!(<T> Mul, mul, Matrix3x3<T>, Matrix3x3<T>, Matrix3x3<T>, |a, b| {
    Matrix3x3::new(
        a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31,
        a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32,
        a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33,
        a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31,
        a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32,
        a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33,
        a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31,
        a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32,
        a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33,
    )
});

impl_binop!(<T> Mul, mul, Matrix4x4<T>, Matrix4x4<T>, Matrix4x4<T>, |a, b| {
    Matrix4x4::from_rows(
        &(a.row_1() * b),
        &(a.row_2() * b),
        &(a.row_3() * b),
        &(a.row_4() * b),
    )
});

impl_binop!(<T> Mul, mul, Vector3<T>, Matrix3x3<T>, Vector3<T>, |v, m| {
    Vector3::new(
        v.x * m.m11 + v.y * m.m21 + v.z * m.m31,
        v.x * m.m12 + v.y * m.m22 + v.z * m.m32,
        v.x * m.m13 + v.y * m.m23 + v.z * m.m33,
    )
});

impl_binop!(<T> Mul, mul, Vector4<T>, Matrix4x4<T>, Vector4<T>, |v, m| {
    Vector4::new(
        v.x * m.m11 + v.y * m.m21 + v.z * m.m31 + v.w * m.m41,
        v.x * m.m12 + v.y * m.m22 + v.z * m.m32 + v.w * m.m42,
        v.x * m.m13 + v.y * m.m23 + v.z * m.m33 + v.w * m.m43,
        v.x * m.m14 + v.y * m.m24 + v.z * m.m34 + v.w * m.m44,
    )
});

// Column vector on the right, as used for transforming planes by the
// inverse transpose.
impl_binop!(<T> Mul, mul, Matrix4x4<T>, Vector4<T>, Vector4<T>, |m, v| {
    Vector4::new(
        m.m11 * v.x + m.m12 * v.y + m.m13 * v.z + m.m14 * v.w,
        m.m21 * v.x + m.m22 * v.y + m.m23 * v.z + m.m24 * v.w,
        m.m31 * v.x + m.m32 * v.y + m.m33 * v.z + m.m34 * v.w,
        m.m41 * v.x + m.m42 * v.y + m.m43 * v.z + m.m44 * v.w,
    )
});

impl_binop_assign!(<T> MulAssign, mul_assign, Matrix3x3<T>, Matrix3x3<T>, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(<T> MulAssign, mul_assign, Matrix4x4<T>, Matrix4x4<T>, |a, b| {
    *a = &*a * b;
});

impl<T: Scalar> fmt::Display for Matrix3x3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ {{M11:{} M12:{} M13:{}}} {{M21:{} M22:{} M23:{}}} {{M31:{} M32:{} M33:{}}} }}",
            self.m11, self.m12, self.m13, self.m21, self.m22, self.m23, self.m31, self.m32, self.m33,
        )
    }
}

impl<T: Scalar> fmt::Display for Matrix4x4<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for row in 0..4 {
            write!(f, "{{")?;
            for col in 0..4 {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "M{}{}:{}", row + 1, col + 1, self[(row, col)])?;
            }
            write!(f, "}} ")?;
        }
        write!(f, "}}")
    }
}
