// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen ↔ content coordinate mapping for a single surface.
//!
//! These are recomputed from the surface's current state on every call; the
//! content rectangle changes continuously during gestures.

use kurbo::{Point, Size};
use understory_touch_math::{fit_rect_centered, vector_after_rotation, vector_before_rotation};

use crate::Surface;

/// Maps a container-space point to the surface's untransformed space.
///
/// Rotation is not taken into account; un-rotate first with
/// [`point_before_rotation`] when the surface is rotated.
#[must_use]
pub fn map_point(surface: &Surface, container: Size, touch: Point) -> Point {
    let content = surface.content_size();
    let ratio_x = container.width / content.width;
    let ratio_y = container.height / content.height;

    let local = Point::new(touch.x / ratio_x, touch.y / ratio_y);
    let fit = fit_rect_centered(surface.content().content_rect, surface.original_rect());
    let mapped = fit * local;

    Point::new(mapped.x * ratio_x, mapped.y * ratio_y)
}

/// Where a point seen on the rotated surface was before the rotation.
#[must_use]
pub fn point_before_rotation(surface: &Surface, point: Point, rotation_degrees: f64) -> Point {
    let pivot = surface.pivot();
    let v = vector_before_rotation(point.x, point.y, pivot.x, pivot.y, rotation_degrees);
    Point::new(v[(0, 0)], -v[(0, 1)])
}

/// Where an unrotated point lands once the surface is rotated.
#[must_use]
pub fn point_after_rotation(surface: &Surface, point: Point, rotation_degrees: f64) -> Point {
    let pivot = surface.pivot();
    let v = vector_after_rotation(point.x, point.y, pivot.x, pivot.y, rotation_degrees);
    Point::new(v[(0, 0)], -v[(1, 0)])
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::*;

    const SQUARE: Size = Size::new(200.0, 200.0);

    fn near(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn identity_when_untransformed() {
        let s = Surface::new(SQUARE);
        let p = Point::new(37.0, 150.0);
        assert!(near(map_point(&s, SQUARE, p), p));
    }

    #[test]
    fn undoes_a_centered_zoom() {
        let mut s = Surface::new(SQUARE);
        s.scale_by(2.0, 1.0, 4.0);
        // The surface center does not move.
        assert!(near(
            map_point(&s, SQUARE, Point::new(100.0, 100.0)),
            Point::new(100.0, 100.0)
        ));
        // The top-left corner of the screen shows the content at a quarter.
        assert!(near(
            map_point(&s, SQUARE, Point::ZERO),
            Point::new(50.0, 50.0)
        ));
    }

    #[test]
    fn accounts_for_translation() {
        let mut s = Surface::new(SQUARE);
        s.scale_by(2.0, 1.0, 4.0);
        s.translate_by(Vec2::new(40.0, 0.0), SQUARE);
        assert!(near(
            map_point(&s, SQUARE, Point::new(140.0, 100.0)),
            Point::new(100.0, 100.0)
        ));
    }

    #[test]
    fn scales_between_container_and_content() {
        // Content laid out at half the container size, untransformed.
        let s = Surface::new(Size::new(100.0, 100.0));
        let p = Point::new(80.0, 20.0);
        assert!(near(map_point(&s, SQUARE, p), p));
    }

    #[test]
    fn rotation_round_trip_about_the_pivot() {
        let s = Surface::new(SQUARE);
        let p = Point::new(150.0, 60.0);
        let before = point_before_rotation(&s, p, 37.0);
        let back = point_after_rotation(&s, before, 37.0);
        assert!(
            (back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9,
            "{back:?}"
        );
        // The pivot itself never moves.
        assert!(near(
            point_before_rotation(&s, Point::new(100.0, 100.0), 90.0),
            Point::new(100.0, 100.0)
        ));
    }
}
