//! Projection matrices.
//!
//! All projections are right-handed and map view-space depth from `-near` to
//! `-far` onto the range `[0, 1]`.

use super::Matrix4x4;
use crate::num::{self, Scalar};
use thiserror::Error;

/// Invalid arguments to a projection matrix constructor.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ProjectionError {
    #[error("field of view must lie strictly between 0 and pi, got {field_of_view}")]
    FieldOfViewOutOfRange { field_of_view: f64 },
    #[error("near and far plane distances must be positive, got near = {near} and far = {far}")]
    NonPositivePlaneDistance { near: f64, far: f64 },
    #[error("near plane distance {near} is not smaller than far plane distance {far}")]
    NearNotBeforeFar { near: f64, far: f64 },
    #[error("view volume has zero extent along the {axis}-axis")]
    EmptyViewVolume { axis: char },
}

impl<T: Scalar> Matrix4x4<T> {
    /// Creates a perspective projection from the width and height of the
    /// view volume at the near plane.
    ///
    /// The far distance may be infinite for float scalars.
    ///
    /// # Errors
    /// See [`ProjectionError`].
    pub fn perspective(width: T, height: T, near: T, far: T) -> Result<Self, ProjectionError> {
        validate_perspective_depth(near, far)?;
        validate_extent(width, 'x')?;
        validate_extent(height, 'y')?;

        let far_range = perspective_far_range(near, far);

        let mut matrix = Self::zero();
        matrix.m11 = T::TWO * near / width;
        matrix.m22 = T::TWO * near / height;
        matrix.m33 = far_range;
        matrix.m34 = T::NEG_ONE;
        matrix.m43 = near * far_range;
        Ok(matrix)
    }

    /// Creates a perspective projection from a vertical field of view in
    /// radians and the aspect ratio (width over height) of the view.
    ///
    /// The far distance may be infinite for float scalars.
    ///
    /// # Errors
    /// See [`ProjectionError`].
    pub fn perspective_field_of_view(
        field_of_view: T,
        aspect_ratio: T,
        near: T,
        far: T,
    ) -> Result<Self, ProjectionError> {
        if !(field_of_view > T::ZERO && field_of_view < T::PI) {
            return Err(ProjectionError::FieldOfViewOutOfRange {
                field_of_view: num::cast(field_of_view),
            });
        }
        validate_perspective_depth(near, far)?;
        validate_extent(aspect_ratio, 'x')?;

        let y_scale = (field_of_view * T::ONE_HALF).tan().recip();
        let x_scale = y_scale / aspect_ratio;
        let far_range = perspective_far_range(near, far);

        let mut matrix = Self::zero();
        matrix.m11 = x_scale;
        matrix.m22 = y_scale;
        matrix.m33 = far_range;
        matrix.m34 = T::NEG_ONE;
        matrix.m43 = near * far_range;
        Ok(matrix)
    }

    /// Creates a perspective projection for an asymmetric view volume given
    /// by its bounds at the near plane.
    ///
    /// The far distance may be infinite for float scalars.
    ///
    /// # Errors
    /// See [`ProjectionError`].
    pub fn perspective_off_center(
        left: T,
        right: T,
        bottom: T,
        top: T,
        near: T,
        far: T,
    ) -> Result<Self, ProjectionError> {
        validate_perspective_depth(near, far)?;
        validate_extent(right - left, 'x')?;
        validate_extent(top - bottom, 'y')?;

        let far_range = perspective_far_range(near, far);

        let mut matrix = Self::zero();
        matrix.m11 = T::TWO * near / (right - left);
        matrix.m22 = T::TWO * near / (top - bottom);
        matrix.m31 = (left + right) / (right - left);
        matrix.m32 = (top + bottom) / (top - bottom);
        matrix.m33 = far_range;
        matrix.m34 = T::NEG_ONE;
        matrix.m43 = near * far_range;
        Ok(matrix)
    }

    /// Creates an orthographic projection for a view volume of the given
    /// width and height centered on the view axis.
    ///
    /// # Errors
    /// See [`ProjectionError`]. Plane distances may be zero or negative, but
    /// `near` must be smaller than `far`.
    pub fn orthographic(width: T, height: T, near: T, far: T) -> Result<Self, ProjectionError> {
        validate_orthographic_depth(near, far)?;
        validate_extent(width, 'x')?;
        validate_extent(height, 'y')?;

        let range = (near - far).recip();

        let mut matrix = Self::identity();
        matrix.m11 = T::TWO / width;
        matrix.m22 = T::TWO / height;
        matrix.m33 = range;
        matrix.m43 = near * range;
        Ok(matrix)
    }

    /// Creates an orthographic projection for an asymmetric view volume.
    ///
    /// # Errors
    /// See [`ProjectionError`]. Plane distances may be zero or negative, but
    /// `near` must be smaller than `far`.
    pub fn orthographic_off_center(
        left: T,
        right: T,
        bottom: T,
        top: T,
        near: T,
        far: T,
    ) -> Result<Self, ProjectionError> {
        validate_orthographic_depth(near, far)?;
        validate_extent(right - left, 'x')?;
        validate_extent(top - bottom, 'y')?;

        let mut matrix = Self::identity();
        matrix.m11 = T::TWO / (right - left);
        matrix.m22 = T::TWO / (top - bottom);
        matrix.m33 = (near - far).recip();
        matrix.m41 = (left + right) / (left - right);
        matrix.m42 = (top + bottom) / (bottom - top);
        matrix.m43 = near / (near - far);
        Ok(matrix)
    }
}

fn validate_perspective_depth<T: Scalar>(near: T, far: T) -> Result<(), ProjectionError> {
    if !(near > T::ZERO && far > T::ZERO) {
        return Err(ProjectionError::NonPositivePlaneDistance {
            near: num::cast(near),
            far: num::cast(far),
        });
    }
    validate_orthographic_depth(near, far)
}

fn validate_orthographic_depth<T: Scalar>(near: T, far: T) -> Result<(), ProjectionError> {
    if !(near < far) {
        return Err(ProjectionError::NearNotBeforeFar {
            near: num::cast(near),
            far: num::cast(far),
        });
    }
    Ok(())
}

fn validate_extent<T: Scalar>(extent: T, axis: char) -> Result<(), ProjectionError> {
    if extent == T::ZERO || extent.is_nan() {
        return Err(ProjectionError::EmptyViewVolume { axis });
    }
    Ok(())
}

/// The depth scale `far / (near - far)`, which tends to -1 as the far plane
/// goes to infinity.
fn perspective_far_range<T: Scalar>(near: T, far: T) -> T {
    if num::cast::<T, f64>(far).is_infinite() {
        T::NEG_ONE
    } else {
        far / (near - far)
    }
}
