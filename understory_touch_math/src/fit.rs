// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect};

/// Returns the uniform-scale transform that fits `src` inside `dst`,
/// preserving aspect ratio and centering the result.
///
/// The scale is `min(dst.width / src.width, dst.height / src.height)`; the
/// leftover space along the other axis is split evenly on both sides.
///
/// A degenerate `src` or `dst` (zero, negative or non-finite size) yields
/// [`Affine::IDENTITY`].
#[must_use]
pub fn fit_rect_centered(src: Rect, dst: Rect) -> Affine {
    if !is_usable(src) || !is_usable(dst) {
        return Affine::IDENTITY;
    }
    let sx = dst.width() / src.width();
    let sy = dst.height() / src.height();
    let scale = sx.min(sy);

    // Center whichever axis did not determine the scale.
    let tx = dst.x0 - src.x0 * scale + (dst.width() - src.width() * scale) / 2.0;
    let ty = dst.y0 - src.y0 * scale + (dst.height() - src.height() * scale) / 2.0;

    Affine::new([scale, 0.0, 0.0, scale, tx, ty])
}

/// Maps `pt` through [`fit_rect_centered`]`(src, dst)`.
#[must_use]
pub fn map_point_between(pt: Point, src: Rect, dst: Rect) -> Point {
    fit_rect_centered(src, dst) * pt
}

/// Scales `rect` by `factor` about its own center.
///
/// Each edge moves outwards (or inwards, for `factor < 1`) by half of the
/// change in size, so the center stays put.
#[must_use]
pub fn scale_rect_about_center(rect: Rect, factor: f64) -> Rect {
    let dw = (rect.width() * factor - rect.width()) / 2.0;
    let dh = (rect.height() * factor - rect.height()) / 2.0;
    Rect::new(rect.x0 - dw, rect.y0 - dh, rect.x1 + dw, rect.y1 + dh)
}

fn is_usable(rect: Rect) -> bool {
    let (w, h) = (rect.width(), rect.height());
    w.is_finite()
        && h.is_finite()
        && w > 0.0
        && h > 0.0
        && rect.x0.is_finite()
        && rect.y0.is_finite()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{fit_rect_centered, map_point_between, scale_rect_about_center};

    fn assert_point_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn same_rect_is_identity() {
        let r = Rect::new(10.0, 20.0, 110.0, 220.0);
        let pt = Point::new(42.0, 77.0);
        assert_point_near(map_point_between(pt, r, r), pt);
    }

    #[test]
    fn wide_source_is_centered_vertically() {
        let src = Rect::new(0.0, 0.0, 200.0, 100.0);
        let dst = Rect::new(0.0, 0.0, 100.0, 100.0);
        let fit = fit_rect_centered(src, dst);
        let mapped = fit.transform_rect_bbox(src);
        // Uniform scale of 0.5 leaves 50 units of vertical slack.
        assert_point_near(mapped.origin(), Point::new(0.0, 25.0));
        assert!((mapped.width() - 100.0).abs() < 1e-9, "width {}", mapped.width());
        assert!((mapped.height() - 50.0).abs() < 1e-9, "height {}", mapped.height());
        assert_point_near(mapped.center(), dst.center());
    }

    #[test]
    fn tall_source_is_centered_horizontally() {
        let src = Rect::new(-50.0, -100.0, 50.0, 100.0);
        let dst = Rect::new(0.0, 0.0, 400.0, 200.0);
        let mapped = fit_rect_centered(src, dst).transform_rect_bbox(src);
        assert_point_near(mapped.center(), dst.center());
        assert!((mapped.height() - 200.0).abs() < 1e-9, "height {}", mapped.height());
        assert!((mapped.width() - 100.0).abs() < 1e-9, "width {}", mapped.width());
    }

    #[test]
    fn zoomed_rect_maps_back_to_original() {
        let original = Rect::new(0.0, 0.0, 400.0, 300.0);
        let zoomed = scale_rect_about_center(original, 2.0);
        // The center of the screen stays the center of the content.
        assert_point_near(
            map_point_between(original.center(), zoomed, original),
            original.center(),
        );
        // The top-left corner of the screen shows the content a quarter in.
        assert_point_near(
            map_point_between(Point::ZERO, zoomed, original),
            Point::new(100.0, 75.0),
        );
    }

    #[test]
    fn degenerate_source_is_identity() {
        let pt = Point::new(3.0, 4.0);
        let empty = Rect::new(5.0, 5.0, 5.0, 10.0);
        let dst = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_point_near(map_point_between(pt, empty, dst), pt);
    }

    #[test]
    fn scale_about_center_keeps_center() {
        let r = Rect::new(10.0, 10.0, 30.0, 50.0);
        let grown = scale_rect_about_center(r, 1.5);
        assert_point_near(grown.center(), r.center());
        assert!((grown.width() - 30.0).abs() < 1e-9, "width {}", grown.width());
        assert!((grown.height() - 60.0).abs() < 1e-9, "height {}", grown.height());
        let back = scale_rect_about_center(grown, 1.0 / 1.5);
        assert_point_near(back.origin(), r.origin());
    }
}
