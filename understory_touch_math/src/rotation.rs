// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotations about an arbitrary pivot, expressed as homogeneous 3×3 matrices.
//!
//! Rotating about a pivot `p` is `T(p) · R(θ) · T(-p)`: move the pivot to the
//! origin, rotate, move back. Rotation matrices are orthonormal, so their
//! inverse is their transpose; the inverse of the composed pivot rotation is
//! obtained from the transpose-of-product rule `(AB)ᵗ = BᵗAᵗ` instead of a
//! general inversion.
//!
//! ## Y axis convention
//!
//! Screen Y grows downwards while the rotation matrices assume Y grows
//! upwards. [`vector_before_rotation`] and [`vector_after_rotation`] negate
//! the incoming `y` and the pivot `y` to bridge the two. They return the raw
//! product, so the `y` component of the result is still in the upward
//! convention and callers negate it back.

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{Matrix, matrix};

/// Converts an angle in degrees to radians.
#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    (degrees / 180.0) * PI
}

/// Converts an angle in radians to degrees.
#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    (radians * 180.0) / PI
}

/// 2D rotation by `degrees`, embedded in a homogeneous 3×3 matrix.
#[must_use]
pub fn rotation_matrix(degrees: f64) -> Matrix {
    let radians = to_radians(degrees);
    let (sin, cos) = (radians.sin(), radians.cos());
    matrix![[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

/// Transpose (and therefore inverse) of [`rotation_matrix`].
#[must_use]
pub fn rotation_matrix_transpose(degrees: f64) -> Matrix {
    let radians = to_radians(degrees);
    let (sin, cos) = (radians.sin(), radians.cos());
    matrix![[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]]
}

/// Homogeneous translation by `(dx, dy)` for column vectors.
#[must_use]
pub fn translation_matrix(dx: f64, dy: f64) -> Matrix {
    matrix![[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]]
}

/// Homogeneous translation by `(dx, dy)` for row vectors.
#[must_use]
pub fn translation_matrix_transpose(dx: f64, dy: f64) -> Matrix {
    matrix![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [dx, dy, 1.0]]
}

/// Rotation by `degrees` about `(pivot_x, pivot_y)`, for column vectors.
///
/// Computes `T(p) · R(θ) · T(-p)`.
#[must_use]
pub fn rotation_with_translation_matrix(degrees: f64, pivot_x: f64, pivot_y: f64) -> Matrix {
    &(&translation_matrix(pivot_x, pivot_y) * &rotation_matrix(degrees))
        * &translation_matrix(-pivot_x, -pivot_y)
}

/// Transpose of [`rotation_with_translation_matrix`], for row vectors.
///
/// Computes `T(-p)ᵗ · R(θ)ᵗ · T(p)ᵗ`, so `v · M` undoes a rotation of
/// `degrees` about the pivot.
#[must_use]
pub fn rotation_with_translation_matrix_transpose(
    degrees: f64,
    pivot_x: f64,
    pivot_y: f64,
) -> Matrix {
    &(&translation_matrix_transpose(-pivot_x, -pivot_y) * &rotation_matrix_transpose(degrees))
        * &translation_matrix_transpose(pivot_x, pivot_y)
}

/// Maps a point seen in a frame rotated by `degrees` about the pivot back to
/// the unrotated frame.
///
/// Returns the `1×3` row vector `[x', -y', 1]`; negate element `(0, 1)` to
/// get screen coordinates.
#[must_use]
pub fn vector_before_rotation(x: f64, y: f64, pivot_x: f64, pivot_y: f64, degrees: f64) -> Matrix {
    &Matrix::row_vector(&[x, -y, 1.0])
        * &rotation_with_translation_matrix_transpose(degrees, pivot_x, -pivot_y)
}

/// Maps a point in the unrotated frame to where it lands once the frame is
/// rotated by `degrees` about the pivot.
///
/// Returns the `3×1` column vector `[x', -y', 1]ᵗ`; negate element `(1, 0)`
/// to get screen coordinates.
#[must_use]
pub fn vector_after_rotation(x: f64, y: f64, pivot_x: f64, pivot_y: f64, degrees: f64) -> Matrix {
    &rotation_with_translation_matrix(-degrees, pivot_x, -pivot_y)
        * &Matrix::column_vector(&[x, -y, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_transpose_matches_transpose() {
        assert_eq!(
            translation_matrix(3.0, -4.0).transpose(),
            translation_matrix_transpose(3.0, -4.0)
        );
    }

    #[test]
    fn pivot_rotation_keeps_pivot_fixed() {
        let m = rotation_with_translation_matrix(72.0, 10.0, 20.0);
        let p = &m * &Matrix::column_vector(&[10.0, 20.0, 1.0]);
        assert!(p.approx_eq(&Matrix::column_vector(&[10.0, 20.0, 1.0]), 1e-9));
    }

    #[test]
    fn pivot_rotation_transpose_is_transpose() {
        let m = rotation_with_translation_matrix(-17.5, 4.0, -9.0);
        let t = rotation_with_translation_matrix_transpose(-17.5, 4.0, -9.0);
        assert!(m.transpose().approx_eq(&t, 1e-12));
    }

    #[test]
    fn quarter_turn_about_origin() {
        // Column vectors use the usual counter-clockwise rotation.
        let p = &rotation_matrix(90.0) * &Matrix::column_vector(&[1.0, 0.0, 1.0]);
        assert!(p.approx_eq(&Matrix::column_vector(&[0.0, 1.0, 1.0]), 1e-12));
    }

    #[test]
    fn zero_degrees_is_identity_on_points() {
        let before = vector_before_rotation(12.0, 34.0, 100.0, 200.0, 0.0);
        assert!(before.approx_eq(&Matrix::row_vector(&[12.0, -34.0, 1.0]), 1e-12));
        let after = vector_after_rotation(12.0, 34.0, 100.0, 200.0, 0.0);
        assert!(after.approx_eq(&Matrix::column_vector(&[12.0, -34.0, 1.0]), 1e-12));
    }
}
