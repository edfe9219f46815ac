// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch_math --heading-base-level=0

//! Understory Touch Math: the geometry kernel behind multi-touch transforms.
//!
//! This crate provides the small amount of linear algebra needed to pan, zoom
//! and rotate a content surface and to map touch points between the
//! transformed, on-screen frame and the content's original frame:
//! - [`Matrix`]: a dense row-major matrix with runtime dimensions, used
//!   homogeneously (`[x, y, 1]`) for 2D affine math.
//! - Rotation matrices and their analytic inverses (transposes), including
//!   rotation about an arbitrary pivot.
//! - [`vector_before_rotation`] / [`vector_after_rotation`]: undo or apply a
//!   pivot rotation to a screen point.
//! - [`fit_rect_centered`]: the uniform "fit rect to rect, centered" mapping
//!   used to relate a zoomed content rectangle to its original rectangle.
//!
//! ## Matrix products
//!
//! ```rust
//! use understory_touch_math::{Matrix, matrix};
//!
//! let v = Matrix::row_vector(&[1.0, 2.0, 3.0]);
//! let w = Matrix::column_vector(&[4.0, 5.0, 6.0]);
//! assert_eq!(&v * &w, matrix![[32.0]]);
//! ```
//!
//! ## Undoing a rotation
//!
//! A surface rotated by 90° about `(100, 100)`: the point that now appears at
//! `(100, 50)` was at `(50, 100)` before the rotation.
//!
//! ```rust
//! use understory_touch_math::vector_before_rotation;
//!
//! let v = vector_before_rotation(100.0, 50.0, 100.0, 100.0, 90.0);
//! // The y component comes back in the upward convention.
//! let (x, y) = (v[(0, 0)], -v[(0, 1)]);
//! assert!((x - 50.0).abs() < 1e-9);
//! assert!((y - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Shape mismatches are caller bugs and panic; nothing here returns
//!   `Result`.
//! - Rotations are inverted through transposes rather than general matrix
//!   inversion.
//! - The Y-axis flip between screen and math conventions is part of the
//!   contract of the two vector functions and is documented on each.
//!
//! This crate is `no_std`.

#![no_std]

mod fit;
mod matrix;
mod rotation;

pub use fit::{fit_rect_centered, map_point_between, scale_rect_about_center};
pub use matrix::Matrix;
pub use rotation::{
    rotation_matrix, rotation_matrix_transpose, rotation_with_translation_matrix,
    rotation_with_translation_matrix_transpose, to_degrees, to_radians, translation_matrix,
    translation_matrix_transpose, vector_after_rotation, vector_before_rotation,
};
