//! Vectors, matrices, quaternions and planes over `f32`, `f64` and Q16.16
//! fixed-point scalars.

#[macro_use]
mod macros;

pub mod buffer;
pub mod matrix;
pub mod num;
pub mod plane;
pub mod quaternion;
pub mod vector;

pub use buffer::{BufferError, Components, as_flat_slice, as_flat_slice_mut};
pub use gmath_fixed::Fixed;
pub use matrix::{
    Matrix3x3, Matrix3x3D, Matrix3x3F, Matrix3x3X, Matrix4x4, Matrix4x4D, Matrix4x4F, Matrix4x4X,
    decompose::Decomposition, projection::ProjectionError,
};
pub use num::Scalar;
pub use plane::{Plane, PlaneD, PlaneF, PlaneX};
pub use quaternion::{Quaternion, QuaternionD, QuaternionF, QuaternionX};
pub use vector::{
    Vector2, Vector2D, Vector2F, Vector2X, Vector3, Vector3D, Vector3F, Vector3X, Vector4,
    Vector4D, Vector4F, Vector4X,
};
