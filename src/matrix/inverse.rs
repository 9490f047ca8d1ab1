//! Matrix inversion.

use super::{Matrix3x3, Matrix4x4};
use crate::num::Scalar;

impl<T: Scalar> Matrix3x3<T> {
    /// Computes the inverse of the matrix from its adjugate.
    ///
    /// Returns [`None`] if the determinant is zero (or too small to be
    /// represented).
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < T::SMALLEST_POSITIVE {
            log::trace!("Tried to invert singular 3x3 matrix {self}");
            return None;
        }
        let inv_det = det.recip();

        Some(Self::new(
            (self.m22 * self.m33 - self.m23 * self.m32) * inv_det,
            (self.m13 * self.m32 - self.m12 * self.m33) * inv_det,
            (self.m12 * self.m23 - self.m13 * self.m22) * inv_det,
            (self.m23 * self.m31 - self.m21 * self.m33) * inv_det,
            (self.m11 * self.m33 - self.m13 * self.m31) * inv_det,
            (self.m13 * self.m21 - self.m11 * self.m23) * inv_det,
            (self.m21 * self.m32 - self.m22 * self.m31) * inv_det,
            (self.m12 * self.m31 - self.m11 * self.m32) * inv_det,
            (self.m11 * self.m22 - self.m12 * self.m21) * inv_det,
        ))
    }
}

impl<T: Scalar> Matrix4x4<T> {
    /// Computes the inverse of the matrix by cofactor expansion.
    ///
    /// The first-row cofactors give the determinant, and if that is nonzero
    /// the transposed cofactor matrix scaled by its reciprocal gives the
    /// inverse.
    ///
    /// Returns [`None`] if the determinant is zero (or too small to be
    /// represented), in which case no further cofactors are computed.
    pub fn invert(&self) -> Option<Self> {
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

        let a11 = f * kp_lo - g * jp_ln + h * jo_kn;
        let a12 = -(e * kp_lo - g * ip_lm + h * io_km);
        let a13 = e * jp_ln - f * ip_lm + h * in_jm;
        let a14 = -(e * jo_kn - f * io_km + g * in_jm);

        let det = a * a11 + b * a12 + c * a13 + d * a14;

        if det.abs() < T::SMALLEST_POSITIVE {
            log::trace!("Tried to invert singular 4x4 matrix {self}");
            return None;
        }

        let inv_det = det.recip();

        let gp_ho = g * p - h * o;
        let fp_hn = f * p - h * n;
        let fo_gn = f * o - g * n;
        let ep_hm = e * p - h * m;
        let eo_gm = e * o - g * m;
        let en_fm = e * n - f * m;

        let gl_hk = g * l - h * k;
        let fl_hj = f * l - h * j;
        let fk_gj = f * k - g * j;
        let el_hi = e * l - h * i;
        let ek_gi = e * k - g * i;
        let ej_fi = e * j - f * i;

        Some(Self::new(
            a11 * inv_det,
            -(b * kp_lo - c * jp_ln + d * jo_kn) * inv_det,
            (b * gp_ho - c * fp_hn + d * fo_gn) * inv_det,
            -(b * gl_hk - c * fl_hj + d * fk_gj) * inv_det,
            a12 * inv_det,
            (a * kp_lo - c * ip_lm + d * io_km) * inv_det,
            -(a * gp_ho - c * ep_hm + d * eo_gm) * inv_det,
            (a * gl_hk - c * el_hi + d * ek_gi) * inv_det,
            a13 * inv_det,
            -(a * jp_ln - b * ip_lm + d * in_jm) * inv_det,
            (a * fp_hn - b * ep_hm + d * en_fm) * inv_det,
            -(a * fl_hj - b * el_hi + d * ej_fi) * inv_det,
            a14 * inv_det,
            (a * jo_kn - b * io_km + c * in_jm) * inv_det,
            -(a * fo_gn - b * eo_gm + c * en_fm) * inv_det,
            (a * fk_gj - b * ek_gi + c * ej_fi) * inv_det,
        ))
    }
}
