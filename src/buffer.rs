//! Marshaling between value types and flat scalar buffers.

use crate::{
    matrix::{Matrix3x3, Matrix4x4},
    num::Scalar,
    plane::Plane,
    quaternion::Quaternion,
    vector::{Vector2, Vector3, Vector4},
};
use bytemuck::Pod;
use std::slice;
use thiserror::Error;

/// Errors from copying values into or out of flat scalar buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is out of range for a buffer of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error(
        "buffer of length {len} has room for {available} components after offset {offset}, \
         but {required} are needed"
    )]
    InsufficientSpace {
        offset: usize,
        len: usize,
        available: usize,
        required: usize,
    },
    #[error("slice of length {len} is too short, {required} components are needed")]
    TooShort { len: usize, required: usize },
}

/// A value type laid out as a fixed number of scalar components.
///
/// Vectors and quaternions are laid out in X, Y, Z, W order, matrices in
/// row-major order and planes as the normal followed by the distance.
pub trait Components: Pod {
    type Scalar: Scalar;

    /// Number of scalar components in the value.
    const COUNT: usize;

    /// Reads a value from the first [`COUNT`](Self::COUNT) scalars of the
    /// slice. Any further scalars are ignored.
    ///
    /// # Errors
    /// Returns [`BufferError::TooShort`] if the slice holds fewer than
    /// [`COUNT`](Self::COUNT) scalars.
    fn from_slice(slice: &[Self::Scalar]) -> Result<Self, BufferError> {
        let components = slice.get(..Self::COUNT).ok_or(BufferError::TooShort {
            len: slice.len(),
            required: Self::COUNT,
        })?;
        Ok(bytemuck::cast_slice::<_, Self>(components)[0])
    }

    /// The components of the value as a slice.
    fn components(&self) -> &[Self::Scalar] {
        bytemuck::cast_slice(slice::from_ref(self))
    }

    /// Writes the components of the value into the buffer, starting at the
    /// given offset.
    ///
    /// # Errors
    /// Returns [`BufferError::OffsetOutOfRange`] if the offset does not lie
    /// inside the buffer, and [`BufferError::InsufficientSpace`] if the
    /// buffer has fewer than [`COUNT`](Self::COUNT) scalars from the offset
    /// onward. The buffer is left untouched on error.
    fn copy_to(&self, buffer: &mut [Self::Scalar], offset: usize) -> Result<(), BufferError> {
        let len = buffer.len();
        if offset >= len {
            return Err(BufferError::OffsetOutOfRange { offset, len });
        }
        let available = len - offset;
        if available < Self::COUNT {
            return Err(BufferError::InsufficientSpace {
                offset,
                len,
                available,
                required: Self::COUNT,
            });
        }
        buffer[offset..offset + Self::COUNT].copy_from_slice(self.components());
        Ok(())
    }
}

macro_rules! impl_components {
    ($($t:ident => $count:literal),+ $(,)?) => {
        $(
            impl<T: Scalar> Components for $t<T> {
                type Scalar = T;
                const COUNT: usize = $count;
            }
        )+
    };
}

impl_components!(
    Vector2 => 2,
    Vector3 => 3,
    Vector4 => 4,
    Quaternion => 4,
    Plane => 4,
    Matrix3x3 => 9,
    Matrix4x4 => 16,
);

/// Reinterprets a slice of values as the flat slice of their components.
#[inline]
pub fn as_flat_slice<V: Components>(values: &[V]) -> &[V::Scalar] {
    bytemuck::cast_slice(values)
}

/// Reinterprets a mutable slice of values as the flat slice of their
/// components.
#[inline]
pub fn as_flat_slice_mut<V: Components>(values: &mut [V]) -> &mut [V::Scalar] {
    bytemuck::cast_slice_mut(values)
}
