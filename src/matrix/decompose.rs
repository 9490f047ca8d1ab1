//! Decomposition of affine matrices into scale, rotation and translation.

use super::{Matrix3x3, Matrix4x4};
use crate::{num::Scalar, quaternion::Quaternion, vector::Vector3};

/// Scale below which a basis row is treated as degenerate and rebuilt from the
/// other rows. Also the tolerance on the determinant of the orthonormalized
/// basis.
pub const DECOMPOSE_EPSILON: f64 = 1e-4;

/// The parts of an affine matrix `M = scale * rotation * translation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition<T> {
    pub scale: Vector3<T>,
    pub rotation: Quaternion<T>,
    pub translation: Vector3<T>,
}

impl<T: Scalar> Matrix4x4<T> {
    /// Splits the matrix into a scale, a rotation and a translation, such that
    /// `scale(s) * from_quaternion(r) * translation(t)` reproduces it.
    ///
    /// The rows of the upper-left 3x3 block are orthonormalized, starting from
    /// the row with the largest scale. A row whose scale is below
    /// [`DECOMPOSE_EPSILON`] is rebuilt from the rows already processed, so
    /// matrices that flatten an axis still decompose. A reflection is folded
    /// into the sign of the largest scale.
    ///
    /// Returns [`None`] if the block is not a scaled rotation (for example
    /// if it contains shear), detected by the determinant of the
    /// orthonormalized basis differing from one.
    pub fn decompose(&self) -> Option<Decomposition<T>> {
        let epsilon = decompose_epsilon::<T>();

        let translation = self.translation_part();

        let mut basis = [
            Vector3::new(self.m11, self.m12, self.m13),
            Vector3::new(self.m21, self.m22, self.m23),
            Vector3::new(self.m31, self.m32, self.m33),
        ];
        let canonical_basis = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];

        let mut scales = [basis[0].length(), basis[1].length(), basis[2].length()];

        let [a, b, c] = rank_descending(&scales);

        if scales[a] < epsilon {
            basis[a] = canonical_basis[a];
        }
        basis[a] = basis[a].normalize();

        if scales[b] < epsilon {
            let cc = least_aligned_axis(&basis[a]);
            basis[b] = basis[a].cross(&canonical_basis[cc]);
        }
        basis[b] = basis[b].normalize();

        if scales[c] < epsilon {
            basis[c] = basis[a].cross(&basis[b]);
        }
        basis[c] = basis[c].normalize();

        let mut rotation_matrix = Matrix3x3::from_rows(&basis[0], &basis[1], &basis[2]);
        let mut det = rotation_matrix.determinant();

        if det < T::ZERO {
            scales[a] = -scales[a];
            basis[a] = -basis[a];
            rotation_matrix = Matrix3x3::from_rows(&basis[0], &basis[1], &basis[2]);
            det = -det;
        }

        if (det - T::ONE).abs() > epsilon {
            log::trace!(
                "Matrix {self} is not a scaled rotation (basis determinant {det} after orthonormalization)"
            );
            return None;
        }

        Some(Decomposition {
            scale: Vector3::from(scales),
            rotation: Quaternion::from_matrix3x3(&rotation_matrix),
            translation,
        })
    }
}

/// The decomposition tolerance in the precision of `T`. For fixed-point values
/// it is widened to 16 raw units, since normalizing each basis row already
/// rounds by up to one unit per component.
fn decompose_epsilon<T: Scalar>() -> T {
    T::from_f64_lossy(DECOMPOSE_EPSILON).max(T::EPSILON * T::from_f64_lossy(16.0))
}

/// Orders the indices of the three values from largest to smallest.
fn rank_descending<T: Scalar>(values: &[T; 3]) -> [usize; 3] {
    let [x, y, z] = *values;
    if x < y {
        if y < z {
            [2, 1, 0]
        } else if x < z {
            [1, 2, 0]
        } else {
            [1, 0, 2]
        }
    } else if x < z {
        [2, 0, 1]
    } else if y < z {
        [0, 2, 1]
    } else {
        [0, 1, 2]
    }
}

/// Picks the coordinate axis to cross the given unit vector with when
/// rebuilding a degenerate row.
fn least_aligned_axis<T: Scalar>(v: &Vector3<T>) -> usize {
    let abs = v.abs();
    if abs.x < abs.y {
        if abs.y < abs.z || abs.x < abs.z {
            0
        } else {
            2
        }
    } else if abs.x < abs.z || abs.y < abs.z {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fixed, Matrix4x4D, Matrix4x4F, Matrix4x4X, QuaternionF, Vector3F, Vector3X};
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    fn compose(scale: Vector3F, rotation: QuaternionF, translation: Vector3F) -> Matrix4x4F {
        Matrix4x4F::scale(&scale)
            * Matrix4x4F::from_quaternion(&rotation)
            * Matrix4x4F::translation(&translation)
    }

    fn assert_same_rotation(a: &QuaternionF, b: &QuaternionF) {
        assert!(
            a.dot(b).abs() > 1.0 - 1e-5,
            "rotations differ: {a} and {b}"
        );
    }

    #[test]
    fn decomposing_scaled_translation_works() {
        let matrix = Matrix4x4F::uniform_scale(2.0)
            * Matrix4x4F::translation(&Vector3F::new(1.0, 2.0, 3.0));
        let Decomposition {
            scale,
            rotation,
            translation,
        } = matrix.decompose().unwrap();
        assert_abs_diff_eq!(scale, Vector3F::splat(2.0), epsilon = EPSILON);
        assert_abs_diff_eq!(rotation, QuaternionF::identity(), epsilon = EPSILON);
        assert_abs_diff_eq!(translation, Vector3F::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn decomposing_identity_gives_unit_scale_and_identity_rotation() {
        let parts = Matrix4x4D::identity().decompose().unwrap();
        assert_eq!(parts.scale, Vector3::one());
        assert_eq!(parts.rotation, Quaternion::identity());
        assert_eq!(parts.translation, Vector3::zero());
    }

    #[test]
    fn decomposing_composed_transform_recovers_parts() {
        let scale = Vector3F::new(1.5, 0.5, 3.0);
        let rotation = QuaternionF::from_yaw_pitch_roll(0.4, -1.1, 2.0);
        let translation = Vector3F::new(-4.0, 0.25, 7.0);

        let parts = compose(scale, rotation, translation).decompose().unwrap();
        assert_abs_diff_eq!(parts.scale, scale, epsilon = 1e-4);
        assert_same_rotation(&parts.rotation, &rotation);
        assert_abs_diff_eq!(parts.translation, translation, epsilon = 1e-4);
    }

    #[test]
    fn decomposing_with_zero_scale_axis_substitutes_orthogonal_row() {
        let rotation = QuaternionF::from_axis_angle(&Vector3F::unit_z(), 0.5);
        let matrix = compose(Vector3F::new(2.0, 0.0, 1.0), rotation, Vector3F::zero());

        let parts = matrix.decompose().unwrap();
        assert!(!parts.scale.has_nan());
        assert!(!parts.rotation.has_nan());
        assert_abs_diff_eq!(parts.rotation.length(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(parts.scale.abs(), Vector3F::new(2.0, 0.0, 1.0), epsilon = EPSILON);

        let recomposed = compose(parts.scale, parts.rotation, parts.translation);
        assert_abs_diff_eq!(recomposed, matrix, epsilon = EPSILON);
    }

    #[test]
    fn decomposing_with_two_zero_scale_axes_works() {
        let matrix = Matrix4x4F::scale(&Vector3F::new(0.0, 0.0, 5.0));
        let parts = matrix.decompose().unwrap();
        assert!(!parts.rotation.has_nan());
        assert_abs_diff_eq!(parts.scale, Vector3F::new(0.0, 0.0, 5.0), epsilon = EPSILON);
        assert_abs_diff_eq!(parts.rotation.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn decomposing_with_scale_near_tolerance_gives_recomposable_parts() {
        let rotation = QuaternionF::from_yaw_pitch_roll(0.4, -1.1, 2.0);
        // Below the tolerance the row is rebuilt, above it the row is kept.
        for small_scale in [5e-5, 2e-4] {
            let scale = Vector3F::new(2.0, small_scale, 1.0);
            let matrix = compose(scale, rotation, Vector3F::zero());

            let parts = matrix.decompose().unwrap();
            assert!(!parts.scale.has_nan());
            assert!(!parts.rotation.has_nan());
            assert_abs_diff_eq!(parts.rotation.length(), 1.0, epsilon = EPSILON);
            assert_abs_diff_eq!(parts.scale.abs(), scale, epsilon = EPSILON);

            let recomposed = compose(parts.scale, parts.rotation, parts.translation);
            assert_abs_diff_eq!(recomposed, matrix, epsilon = EPSILON);
        }
    }

    #[test]
    fn decomposing_zero_matrix_falls_back_to_coordinate_axes() {
        let parts = Matrix4x4F::zero().decompose().unwrap();
        assert_eq!(parts.scale, Vector3F::zero());
        assert_abs_diff_eq!(
            parts.rotation,
            QuaternionF::new(1.0, 0.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn decomposing_reflection_negates_largest_scale() {
        let matrix = Matrix4x4F::scale(&Vector3F::new(-1.0, 1.0, 1.0));
        let parts = matrix.decompose().unwrap();
        assert_abs_diff_eq!(parts.rotation.length(), 1.0, epsilon = EPSILON);

        let recomposed = compose(parts.scale, parts.rotation, parts.translation);
        assert_abs_diff_eq!(recomposed, matrix, epsilon = EPSILON);
        assert_eq!(parts.scale.x() * parts.scale.y() * parts.scale.z(), -1.0);
    }

    #[test]
    fn decomposing_reflected_rotation_recomposes_original() {
        let rotation = QuaternionF::from_axis_angle(&Vector3F::new(0.0, 0.6, 0.8), 1.3);
        let matrix = compose(Vector3F::new(1.0, -3.0, 2.0), rotation, Vector3F::unit_x());
        let parts = matrix.decompose().unwrap();
        assert!(parts.scale.x() * parts.scale.y() * parts.scale.z() < 0.0);

        let recomposed = compose(parts.scale, parts.rotation, parts.translation);
        assert_abs_diff_eq!(recomposed, matrix, epsilon = 1e-4);
    }

    #[test]
    fn decomposing_sheared_matrix_fails() {
        let shear = Matrix4x4F::identity().with_element(1, 0, 1.0);
        assert_eq!(shear.decompose(), None);
    }

    #[test]
    fn decomposing_fixed_point_scaled_translation_works() {
        let matrix = Matrix4x4X::uniform_scale(Fixed::TWO)
            * Matrix4x4X::translation(&Vector3X::new(
                Fixed::ONE,
                Fixed::from_int(2),
                Fixed::from_int(3),
            ));
        let parts = matrix.decompose().unwrap();
        assert_eq!(parts.scale, Vector3X::splat(Fixed::TWO));
        assert_eq!(parts.rotation, Quaternion::identity());
        assert_eq!(parts.translation.cast::<f32>(), Vector3F::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn ranking_orders_from_largest_to_smallest() {
        assert_eq!(rank_descending(&[1.0, 2.0, 3.0]), [2, 1, 0]);
        assert_eq!(rank_descending(&[1.0, 3.0, 2.0]), [1, 2, 0]);
        assert_eq!(rank_descending(&[2.0, 3.0, 1.0]), [1, 0, 2]);
        assert_eq!(rank_descending(&[2.0, 1.0, 3.0]), [2, 0, 1]);
        assert_eq!(rank_descending(&[3.0, 1.0, 2.0]), [0, 2, 1]);
        assert_eq!(rank_descending(&[3.0, 2.0, 1.0]), [0, 1, 2]);
        assert_eq!(rank_descending(&[1.0, 1.0, 1.0]), [0, 1, 2]);
    }

    #[test]
    fn least_aligned_axis_is_smallest_component() {
        assert_eq!(least_aligned_axis(&Vector3F::new(0.1, 0.5, 0.9)), 0);
        assert_eq!(least_aligned_axis(&Vector3F::new(0.5, 0.1, 0.9)), 1);
        assert_eq!(least_aligned_axis(&Vector3F::new(0.9, 0.5, 0.1)), 2);
        assert_eq!(least_aligned_axis(&Vector3F::new(0.0, 0.0, 1.0)), 1);
        assert_eq!(least_aligned_axis(&Vector3F::new(1.0, 0.0, 0.0)), 2);
    }
}
