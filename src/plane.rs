//! Planes.

use crate::{
    matrix::{Matrix3x3, Matrix4x4},
    num::{self, Scalar},
    quaternion::Quaternion,
    vector::{Vector3, Vector4},
};
use std::fmt;

/// The plane of points `p` satisfying `normal · p + d = 0`.
///
/// Most operations expect the normal to have unit length, but this is not
/// enforced. Call [`Plane::normalize`] where it matters.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Plane<T> {
    pub(crate) normal: Vector3<T>,
    pub(crate) d: T,
}

define_precision_aliases!(Plane => PlaneF, PlaneD, PlaneX);

impl<T: Scalar> Plane<T> {
    /// Creates a plane with the given normal and distance term.
    #[inline]
    pub const fn new(normal: Vector3<T>, d: T) -> Self {
        Self { normal, d }
    }

    /// Creates a plane whose normal is the xyz-part of the given vector and
    /// whose distance term is its w-component.
    #[inline]
    pub const fn from_vector4(vector: &Vector4<T>) -> Self {
        Self::new(Vector3::new(vector.x, vector.y, vector.z), vector.w)
    }

    /// Creates the plane through the three given points, with the normal
    /// pointing to the side from which the points appear counterclockwise.
    pub fn from_vertices(
        point_1: &Vector3<T>,
        point_2: &Vector3<T>,
        point_3: &Vector3<T>,
    ) -> Self {
        let edge_1 = point_2 - point_1;
        let edge_2 = point_3 - point_1;
        let normal = edge_1.cross(&edge_2).normalize();
        let d = -normal.dot(point_1);
        Self::new(normal, d)
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<T> {
        self.normal
    }

    #[inline]
    pub const fn d(&self) -> T {
        self.d
    }

    #[inline]
    pub const fn with_normal(&self, normal: Vector3<T>) -> Self {
        Self::new(normal, self.d)
    }

    #[inline]
    pub const fn with_d(&self, d: T) -> Self {
        Self::new(self.normal, d)
    }

    /// The plane as a 4D vector `(normal, d)`.
    #[inline]
    pub const fn to_vector4(&self) -> Vector4<T> {
        self.normal.extended(self.d)
    }

    /// Computes the dot product of the plane with a homogeneous 4D vector.
    #[inline]
    pub fn dot(&self, vector: &Vector4<T>) -> T {
        self.to_vector4().dot(vector)
    }

    /// Computes the signed distance to the given point, scaled by the length
    /// of the normal.
    #[inline]
    pub fn dot_coordinate(&self, point: &Vector3<T>) -> T {
        self.normal.dot(point) + self.d
    }

    /// Computes the dot product of the normal with the given vector.
    #[inline]
    pub fn dot_normal(&self, vector: &Vector3<T>) -> T {
        self.normal.dot(vector)
    }

    /// Scales the plane so that its normal has unit length. Planes whose
    /// squared normal length is already within machine epsilon of one are
    /// returned unchanged.
    pub fn normalize(&self) -> Self {
        let length_squared = self.normal.length_squared();
        if (length_squared - T::ONE).abs() < T::EPSILON {
            return *self;
        }
        let inv_length = length_squared.sqrt().recip();
        Self::new(self.normal * inv_length, self.d * inv_length)
    }

    /// Transforms the plane by the given matrix, by multiplying with the
    /// transpose of the inverse matrix. The plane should be normalized.
    ///
    /// Returns [`None`] if the matrix is singular.
    pub fn transform(&self, matrix: &Matrix4x4<T>) -> Option<Self> {
        let inverse = matrix.invert()?;
        let v = inverse * self.to_vector4();
        Some(Self::from_vector4(&v))
    }

    /// Rotates the plane with the given unit quaternion. The plane should be
    /// normalized.
    #[inline]
    pub fn transform_by_quaternion(&self, rotation: &Quaternion<T>) -> Self {
        Self::new(self.normal * Matrix3x3::from_quaternion(rotation), self.d)
    }

    /// Converts the plane to another scalar precision.
    #[inline]
    pub fn cast<U: Scalar>(&self) -> Plane<U> {
        Plane::new(self.normal.cast(), num::cast(self.d))
    }

    /// Whether the normal and distance term each differ from those of `other`
    /// by at most `delta` per component.
    #[inline]
    pub fn equals_within(&self, other: &Self, delta: T) -> bool {
        self.to_vector4().equals_within(&other.to_vector4(), delta)
    }

    /// Whether any component is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.to_vector4().has_nan()
    }
}

impl<T: Scalar> From<[T; 4]> for Plane<T> {
    #[inline]
    fn from([a, b, c, d]: [T; 4]) -> Self {
        Self::new(Vector3::new(a, b, c), d)
    }
}

impl<T: Scalar> From<Plane<T>> for [T; 4] {
    #[inline]
    fn from(plane: Plane<T>) -> Self {
        plane.to_vector4().into()
    }
}

impl_abs_diff_eq!(Plane, |a, b, epsilon| {
    approx::AbsDiffEq::abs_diff_eq(&a.normal, &b.normal, epsilon)
        && a.d.abs_diff_eq(&b.d, epsilon)
});

impl_relative_eq!(Plane, |a, b, epsilon, max_relative| {
    approx::RelativeEq::relative_eq(&a.normal, &b.normal, epsilon, max_relative)
        && a.d.relative_eq(&b.d, epsilon, max_relative)
});

// SAFETY: The type is `repr(C)` with a `Vector3<T>` (itself three `T` fields)
// followed by a `T`, so it has no padding and every bit pattern is valid.
unsafe impl<T: Scalar> bytemuck::Zeroable for Plane<T> {}
// SAFETY: See above.
unsafe impl<T: Scalar> bytemuck::Pod for Plane<T> {}

impl<T: Scalar> fmt::Display for Plane<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Normal:{} D:{}}}", self.normal, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fixed, Matrix4x4F, PlaneD, QuaternionF, Vector3D, Vector3F, Vector4F};
    use approx::{assert_abs_diff_eq, assert_relative_eq, assert_relative_ne};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn approximate_comparison_checks_normal_and_distance() {
        let plane = PlaneF::new(Vector3F::new(0.0, 0.6, 0.8), 1000.0);
        let nudged = PlaneF::new(Vector3F::new(0.0, 0.6, 0.8), 1000.01);
        assert_relative_eq!(plane, nudged, max_relative = 1e-4);
        assert_relative_ne!(plane, nudged, max_relative = 1e-6);
        assert_relative_ne!(
            plane,
            PlaneF::new(Vector3F::new(0.0, 0.8, 0.6), 1000.0),
            max_relative = 1e-4
        );
        assert_abs_diff_eq!(plane, nudged, epsilon = 0.02);
    }

    #[test]
    fn creating_plane_from_vertices_works() {
        let plane = PlaneF::from_vertices(
            &Vector3F::new(0.0, 1.0, 0.0),
            &Vector3F::new(1.0, 1.0, 0.0),
            &Vector3F::new(0.0, 1.0, -1.0),
        );
        assert_abs_diff_eq!(plane.normal(), Vector3F::unit_y(), epsilon = EPSILON);
        assert_abs_diff_eq!(plane.d(), -1.0, epsilon = EPSILON);
    }

    #[test]
    fn dot_variants_work() {
        let plane = PlaneF::new(Vector3F::unit_y(), -2.0);
        assert_eq!(plane.dot_coordinate(&Vector3F::new(5.0, 3.0, 1.0)), 1.0);
        assert_eq!(plane.dot_normal(&Vector3F::new(5.0, 3.0, 1.0)), 3.0);
        assert_eq!(plane.dot(&Vector4F::new(5.0, 3.0, 1.0, 0.0)), 3.0);
        assert_eq!(plane.dot(&Vector4F::new(5.0, 3.0, 1.0, 1.0)), 1.0);
    }

    #[test]
    fn normalize_scales_normal_and_distance() {
        let plane = PlaneD::new(Vector3D::new(0.0, 3.0, 4.0), 10.0).normalize();
        assert_abs_diff_eq!(plane.normal(), Vector3D::new(0.0, 0.6, 0.8), epsilon = 1e-12);
        assert_abs_diff_eq!(plane.d(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn normalizing_unit_plane_leaves_it_unchanged() {
        let plane = PlaneF::new(Vector3F::new(0.0, 0.0, -1.0), 7.0);
        assert_eq!(plane.normalize(), plane);
    }

    #[test]
    fn transforming_by_translation_shifts_distance() {
        let plane = PlaneF::new(Vector3F::unit_y(), -1.0);
        let moved = plane
            .transform(&Matrix4x4F::translation(&Vector3F::new(0.0, 2.0, 0.0)))
            .unwrap();
        assert_abs_diff_eq!(moved, PlaneF::new(Vector3F::unit_y(), -3.0), epsilon = EPSILON);
    }

    #[test]
    fn transformed_plane_contains_transformed_points() {
        let points = [
            Vector3F::new(1.0, 0.0, 0.0),
            Vector3F::new(0.0, 1.0, 0.0),
            Vector3F::new(0.0, 0.0, 1.0),
        ];
        let plane = PlaneF::from_vertices(&points[0], &points[1], &points[2]);
        let matrix = Matrix4x4F::rotation_y(0.9)
            * Matrix4x4F::translation(&Vector3F::new(3.0, -1.0, 2.0));
        let transformed = plane.transform(&matrix).unwrap();
        for point in &points {
            assert_abs_diff_eq!(
                transformed.dot_coordinate(&point.transform(&matrix)),
                0.0,
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn transforming_by_singular_matrix_fails() {
        let plane = PlaneF::new(Vector3F::unit_x(), 0.0);
        assert_eq!(plane.transform(&Matrix4x4F::zero()), None);
    }

    #[test]
    fn transforming_by_quaternion_rotates_normal() {
        let plane = PlaneF::new(Vector3F::unit_x(), 4.0);
        let rotated = plane.transform_by_quaternion(&QuaternionF::from_axis_angle(
            &Vector3F::unit_z(),
            FRAC_PI_2,
        ));
        assert_abs_diff_eq!(rotated, PlaneF::new(Vector3F::unit_y(), 4.0), epsilon = EPSILON);
    }

    #[test]
    fn quaternion_and_matrix_plane_transforms_agree() {
        let plane = PlaneF::new(Vector3F::new(0.0, 0.6, 0.8), -1.5);
        let rotation = QuaternionF::from_yaw_pitch_roll(0.5, 1.0, -0.3);
        assert_abs_diff_eq!(
            plane.transform_by_quaternion(&rotation),
            plane
                .transform(&Matrix4x4F::from_quaternion(&rotation))
                .unwrap(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn conversions_use_normal_then_distance() {
        let plane = PlaneF::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(plane, PlaneF::from_vector4(&Vector4F::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(<[f32; 4]>::from(plane), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn fixed_point_plane_operations_work() {
        let plane = PlaneX::new(
            Vector3::new(Fixed::ZERO, Fixed::from_int(2), Fixed::ZERO),
            Fixed::from_int(-4),
        )
        .normalize();
        assert_eq!(plane.normal(), Vector3::unit_y());
        assert_eq!(plane.d(), Fixed::from_int(-2));
        assert_eq!(
            plane.dot_coordinate(&Vector3::new(Fixed::ONE, Fixed::from_int(5), Fixed::ONE)),
            Fixed::from_int(3)
        );
    }

    #[test]
    fn display_shows_normal_and_distance() {
        assert_eq!(
            PlaneF::new(Vector3F::new(0.0, 1.0, 0.0), -2.5).to_string(),
            "{Normal:<0, 1, 0> D:-2.5}"
        );
    }
}
