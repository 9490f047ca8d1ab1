//! Constructors for common transformation matrices.

use super::{Matrix3x3, Matrix4x4};
use crate::{num::Scalar, plane::Plane, quaternion::Quaternion, vector::Vector3};

/// Squared distance below which a billboard's object is considered to
/// coincide with the camera.
pub const BILLBOARD_EPSILON: f64 = 1e-4;

impl<T: Scalar> Matrix4x4<T> {
    /// Creates a matrix translating by the given displacement.
    #[inline]
    pub const fn translation(translation: &Vector3<T>) -> Self {
        Self::identity().with_translation(translation)
    }

    /// Creates a matrix scaling by the given factor along each axis.
    #[inline]
    pub const fn scale(scales: &Vector3<T>) -> Self {
        Matrix3x3::scale(scales).to_matrix4x4()
    }

    /// Creates a matrix scaling uniformly by the given factor.
    #[inline]
    pub const fn uniform_scale(scale: T) -> Self {
        Self::scale(&Vector3::new(scale, scale, scale))
    }

    /// Creates a matrix scaling by the given factor along each axis, keeping
    /// the given center point fixed.
    #[inline]
    pub fn scale_about(scales: &Vector3<T>, center: &Vector3<T>) -> Self {
        let translation = center * (Vector3::one() - scales);
        Self::scale(scales).with_translation(&translation)
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// x-axis.
    #[inline]
    pub fn rotation_x(radians: T) -> Self {
        Matrix3x3::rotation_x(radians).to_matrix4x4()
    }

    /// Creates a matrix rotating by the given angle in radians about an axis
    /// parallel to the x-axis through the given center point.
    pub fn rotation_x_about(radians: T, center: &Vector3<T>) -> Self {
        let (s, c) = radians.sin_cos();
        let y = center.y * (T::ONE - c) + center.z * s;
        let z = center.z * (T::ONE - c) - center.y * s;
        Self::rotation_x(radians).with_translation(&Vector3::new(T::ZERO, y, z))
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// y-axis.
    #[inline]
    pub fn rotation_y(radians: T) -> Self {
        Matrix3x3::rotation_y(radians).to_matrix4x4()
    }

    /// Creates a matrix rotating by the given angle in radians about an axis
    /// parallel to the y-axis through the given center point.
    pub fn rotation_y_about(radians: T, center: &Vector3<T>) -> Self {
        let (s, c) = radians.sin_cos();
        let x = center.x * (T::ONE - c) - center.z * s;
        let z = center.z * (T::ONE - c) + center.x * s;
        Self::rotation_y(radians).with_translation(&Vector3::new(x, T::ZERO, z))
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// z-axis.
    #[inline]
    pub fn rotation_z(radians: T) -> Self {
        Matrix3x3::rotation_z(radians).to_matrix4x4()
    }

    /// Creates a matrix rotating by the given angle in radians about an axis
    /// parallel to the z-axis through the given center point.
    pub fn rotation_z_about(radians: T, center: &Vector3<T>) -> Self {
        let (s, c) = radians.sin_cos();
        let x = center.x * (T::ONE - c) + center.y * s;
        let y = center.y * (T::ONE - c) - center.x * s;
        Self::rotation_z(radians).with_translation(&Vector3::new(x, y, T::ZERO))
    }

    /// Creates a matrix rotating by the given angle in radians about the
    /// given unit axis.
    pub fn from_axis_angle(axis: &Vector3<T>, radians: T) -> Self {
        let Vector3 { x, y, z } = *axis;
        let (sa, ca) = radians.sin_cos();

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;

        Matrix3x3::new(
            xx + ca * (T::ONE - xx),
            xy - ca * xy + sa * z,
            xz - ca * xz - sa * y,
            xy - ca * xy - sa * z,
            yy + ca * (T::ONE - yy),
            yz - ca * yz + sa * x,
            xz - ca * xz + sa * y,
            yz - ca * yz - sa * x,
            zz + ca * (T::ONE - zz),
        )
        .to_matrix4x4()
    }

    /// Creates the rotation matrix corresponding to the given unit
    /// quaternion.
    #[inline]
    pub fn from_quaternion(rotation: &Quaternion<T>) -> Self {
        Matrix3x3::from_quaternion(rotation).to_matrix4x4()
    }

    /// Creates a rotation matrix from yaw (about y), pitch (about x) and roll
    /// (about z) angles in radians, applied in the order roll, pitch, yaw.
    #[inline]
    pub fn from_yaw_pitch_roll(yaw: T, pitch: T, roll: T) -> Self {
        Self::from_quaternion(&Quaternion::from_yaw_pitch_roll(yaw, pitch, roll))
    }

    /// Creates a right-handed view matrix for a camera at `camera_position`
    /// looking at `target`.
    pub fn look_at(camera_position: &Vector3<T>, target: &Vector3<T>, up: &Vector3<T>) -> Self {
        let z_axis = (camera_position - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Self::new(
            x_axis.x,
            y_axis.x,
            z_axis.x,
            T::ZERO,
            x_axis.y,
            y_axis.y,
            z_axis.y,
            T::ZERO,
            x_axis.z,
            y_axis.z,
            z_axis.z,
            T::ZERO,
            -x_axis.dot(camera_position),
            -y_axis.dot(camera_position),
            -z_axis.dot(camera_position),
            T::ONE,
        )
    }

    /// Creates a world matrix placing an object at `position`, facing along
    /// `forward` with the given up direction.
    pub fn world(position: &Vector3<T>, forward: &Vector3<T>, up: &Vector3<T>) -> Self {
        let z_axis = (-forward).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Self::from_rows(
            &x_axis.extended(T::ZERO),
            &y_axis.extended(T::ZERO),
            &z_axis.extended(T::ZERO),
            &position.extended(T::ONE),
        )
    }

    /// Creates a spherical billboard matrix that rotates an object at
    /// `object_position` to face the camera.
    ///
    /// When the object and camera (nearly) coincide, the object faces
    /// against `camera_forward` instead.
    pub fn billboard(
        object_position: &Vector3<T>,
        camera_position: &Vector3<T>,
        camera_up: &Vector3<T>,
        camera_forward: &Vector3<T>,
    ) -> Self {
        let offset = object_position - camera_position;
        let distance_squared = offset.length_squared();

        let z_axis = if distance_squared < T::from_f64_lossy(BILLBOARD_EPSILON) {
            -camera_forward
        } else {
            offset * distance_squared.sqrt().recip()
        };
        let x_axis = camera_up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Self::from_rows(
            &x_axis.extended(T::ZERO),
            &y_axis.extended(T::ZERO),
            &z_axis.extended(T::ZERO),
            &object_position.extended(T::ONE),
        )
    }

    /// Creates a matrix that flattens geometry onto the given plane as a
    /// shadow cast by light travelling along `light_direction`.
    ///
    /// A directional light has `w = 0` implied; the plane does not need to
    /// be normalized.
    pub fn shadow(light_direction: &Vector3<T>, plane: &Plane<T>) -> Self {
        let plane = plane.normalize();
        let l = light_direction;
        let dot = plane.normal.dot(l);

        let a = -plane.normal.x;
        let b = -plane.normal.y;
        let c = -plane.normal.z;
        let d = -plane.d;

        Self::new(
            a * l.x + dot,
            a * l.y,
            a * l.z,
            T::ZERO,
            b * l.x,
            b * l.y + dot,
            b * l.z,
            T::ZERO,
            c * l.x,
            c * l.y,
            c * l.z + dot,
            T::ZERO,
            d * l.x,
            d * l.y,
            d * l.z,
            dot,
        )
    }

    /// Creates a matrix that reflects geometry about the given plane. The
    /// plane does not need to be normalized.
    pub fn reflection(plane: &Plane<T>) -> Self {
        let plane = plane.normalize();
        let Vector3 { x: a, y: b, z: c } = plane.normal;

        let fa = -T::TWO * a;
        let fb = -T::TWO * b;
        let fc = -T::TWO * c;

        Self::new(
            fa * a + T::ONE,
            fb * a,
            fc * a,
            T::ZERO,
            fa * b,
            fb * b + T::ONE,
            fc * b,
            T::ZERO,
            fa * c,
            fb * c,
            fc * c + T::ONE,
            T::ZERO,
            fa * plane.d,
            fb * plane.d,
            fc * plane.d,
            T::ONE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix4x4D, Matrix4x4F, PlaneF, QuaternionF, Vector3D, Vector3F, Vector4F};
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn translation_moves_points_but_not_directions() {
        let matrix = Matrix4x4F::translation(&Vector3F::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3F::zero().transform(&matrix), Vector3F::new(1.0, 2.0, 3.0));
        assert_eq!(Vector3F::unit_x().transform_normal(&matrix), Vector3F::unit_x());
    }

    #[test]
    fn scale_matrices_work() {
        let point = Vector3F::new(1.0, 1.0, 1.0);
        assert_eq!(
            point.transform(&Matrix4x4F::scale(&Vector3F::new(2.0, 3.0, 4.0))),
            Vector3F::new(2.0, 3.0, 4.0)
        );
        assert_eq!(
            point.transform(&Matrix4x4F::uniform_scale(5.0)),
            Vector3F::splat(5.0)
        );
    }

    #[test]
    fn scaling_about_center_keeps_center_fixed() {
        let center = Vector3F::new(1.0, 2.0, 3.0);
        let matrix = Matrix4x4F::scale_about(&Vector3F::new(2.0, 3.0, 4.0), &center);
        assert_eq!(center.transform(&matrix), center);
        assert_eq!(
            Vector3F::new(2.0, 2.0, 3.0).transform(&matrix),
            Vector3F::new(3.0, 2.0, 3.0)
        );
    }

    #[test]
    fn axis_rotations_follow_right_hand_rule() {
        let x = Vector3F::unit_x();
        let y = Vector3F::unit_y();
        let z = Vector3F::unit_z();
        assert_abs_diff_eq!(y.transform(&Matrix4x4F::rotation_x(FRAC_PI_2)), z, epsilon = EPSILON);
        assert_abs_diff_eq!(z.transform(&Matrix4x4F::rotation_y(FRAC_PI_2)), x, epsilon = EPSILON);
        assert_abs_diff_eq!(x.transform(&Matrix4x4F::rotation_z(FRAC_PI_2)), y, epsilon = EPSILON);
    }

    #[test]
    fn rotating_about_center_keeps_center_fixed() {
        let center = Vector3F::new(1.0, -2.0, 3.0);
        for matrix in [
            Matrix4x4F::rotation_x_about(0.7, &center),
            Matrix4x4F::rotation_y_about(0.7, &center),
            Matrix4x4F::rotation_z_about(0.7, &center),
        ] {
            assert_abs_diff_eq!(center.transform(&matrix), center, epsilon = 1e-5);
        }

        let rotated = Vector3F::new(2.0, -2.0, 3.0)
            .transform(&Matrix4x4F::rotation_z_about(FRAC_PI_2, &center));
        assert_abs_diff_eq!(rotated, Vector3F::new(1.0, -1.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn axis_angle_about_coordinate_axes_matches_axis_rotations() {
        assert_abs_diff_eq!(
            Matrix4x4F::from_axis_angle(&Vector3F::unit_x(), 0.4),
            Matrix4x4F::rotation_x(0.4),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            Matrix4x4F::from_axis_angle(&Vector3F::unit_y(), -1.1),
            Matrix4x4F::rotation_y(-1.1),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(
            Matrix4x4F::from_axis_angle(&Vector3F::unit_z(), 2.5),
            Matrix4x4F::rotation_z(2.5),
            epsilon = EPSILON
        );
    }

    #[test]
    fn axis_angle_matches_nalgebra_rotation() {
        let axis = Vector3D::new(1.0, 2.0, -2.0).normalize();
        let angle = 0.9;
        let matrix = Matrix4x4D::from_axis_angle(&axis, angle);

        let na_rotation = nalgebra::Rotation3::from_axis_angle(
            &nalgebra::Unit::new_normalize(nalgebra::Vector3::new(1.0, 2.0, -2.0)),
            angle,
        );
        let point = nalgebra::Vector3::new(0.3, -1.2, 2.0);
        let na_rotated = na_rotation * point;

        let rotated = Vector3D::new(0.3, -1.2, 2.0).transform(&matrix);
        assert_abs_diff_eq!(rotated.x(), na_rotated.x, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.y(), na_rotated.y, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.z(), na_rotated.z, epsilon = 1e-12);
    }

    #[test]
    fn yaw_pitch_roll_with_only_yaw_rotates_about_y() {
        assert_abs_diff_eq!(
            Matrix4x4F::from_yaw_pitch_roll(0.6, 0.0, 0.0),
            Matrix4x4F::rotation_y(0.6),
            epsilon = EPSILON
        );
    }

    #[test]
    fn yaw_pitch_roll_applies_roll_then_pitch_then_yaw() {
        let (yaw, pitch, roll) = (0.3, -0.5, 1.2);
        assert_abs_diff_eq!(
            Matrix4x4F::from_yaw_pitch_roll(yaw, pitch, roll),
            Matrix4x4F::rotation_z(roll) * Matrix4x4F::rotation_x(pitch) * Matrix4x4F::rotation_y(yaw),
            epsilon = 1e-5
        );
    }

    #[test]
    fn look_at_puts_target_on_negative_z_axis() {
        let camera = Vector3F::new(0.0, 0.0, 5.0);
        let view = Matrix4x4F::look_at(&camera, &Vector3F::zero(), &Vector3F::unit_y());
        assert_abs_diff_eq!(camera.transform(&view), Vector3F::zero(), epsilon = EPSILON);
        assert_abs_diff_eq!(
            Vector3F::zero().transform(&view),
            Vector3F::new(0.0, 0.0, -5.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn world_matrix_inverts_look_at() {
        let position = Vector3F::new(1.0, 2.0, 3.0);
        let forward = Vector3F::new(0.0, 0.0, -1.0);
        let up = Vector3F::unit_y();
        let world = Matrix4x4F::world(&position, &forward, &up);
        let view = Matrix4x4F::look_at(&position, &(position + forward), &up);
        assert_abs_diff_eq!(world * view, Matrix4x4F::identity(), epsilon = EPSILON);
    }

    #[test]
    fn billboard_faces_camera() {
        let object = Vector3F::new(0.0, 0.0, -5.0);
        let camera = Vector3F::zero();
        let matrix = Matrix4x4F::billboard(
            &object,
            &camera,
            &Vector3F::unit_y(),
            &Vector3F::new(0.0, 0.0, -1.0),
        );
        assert_abs_diff_eq!(matrix.row_3().xyz(), Vector3F::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_eq!(matrix.translation_part(), object);
    }

    #[test]
    fn billboard_at_camera_position_uses_camera_forward() {
        let position = Vector3F::new(1.0, 1.0, 1.0);
        let forward = Vector3F::new(0.0, 0.0, -1.0);
        let matrix = Matrix4x4F::billboard(&position, &position, &Vector3F::unit_y(), &forward);
        assert!(!matrix.has_nan());
        assert_eq!(matrix.row_3().xyz(), -forward);
    }

    #[test]
    fn shadow_projects_points_onto_plane() {
        let ground = PlaneF::new(Vector3F::unit_y(), 0.0);
        let light = Vector3F::new(1.0, 1.0, 0.0);
        let matrix = Matrix4x4F::shadow(&light, &ground);

        let projected = Vector3F::new(0.0, 2.0, 0.0).extended(1.0) * matrix;
        let projected = projected.xyz() / projected.w();
        assert_abs_diff_eq!(projected, Vector3F::new(-2.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn reflection_mirrors_about_plane() {
        let plane = PlaneF::new(Vector3F::unit_y(), -1.0);
        let matrix = Matrix4x4F::reflection(&plane);
        assert_abs_diff_eq!(
            Vector3F::new(3.0, 4.0, 5.0).transform(&matrix),
            Vector3F::new(3.0, -2.0, 5.0),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(matrix * matrix, Matrix4x4F::identity(), epsilon = EPSILON);
    }

    #[test]
    fn reflection_normalizes_plane_first() {
        let plane = PlaneF::new(Vector3F::new(0.0, 2.0, 0.0), -2.0);
        assert_abs_diff_eq!(
            Matrix4x4F::reflection(&plane),
            Matrix4x4F::reflection(&PlaneF::new(Vector3F::unit_y(), -1.0)),
            epsilon = EPSILON
        );
    }

    #[test]
    fn rotation_matrices_match_quaternion_rotation() {
        let rotation = QuaternionF::from_axis_angle(&Vector3F::unit_z(), PI / 3.0);
        let point = Vector4F::new(1.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(
            point * Matrix4x4F::from_quaternion(&rotation),
            point * Matrix4x4F::rotation_z(PI / 3.0),
            epsilon = EPSILON
        );
    }
}
